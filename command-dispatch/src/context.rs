//! Patient context resolution from the navigation location.

use uuid::Uuid;

/// Resolve the open patient record from the current navigation path.
///
/// Pure function of the location: looks for a `/patients/{uuid}` segment
/// pair. Recomputed on every turn, never cached, since the user may navigate
/// between utterances.
pub fn resolve_patient(location: &str) -> Option<Uuid> {
    let path = location.split(['?', '#']).next().unwrap_or(location);
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());

    while let Some(segment) = segments.next() {
        if segment == "patients" {
            return segments.next().and_then(|id| Uuid::parse_str(id).ok());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "7d5100b5-5d86-4f9c-803f-3746b1eeaf72";

    #[test]
    fn test_resolves_patient_record_paths() {
        let expected = Uuid::parse_str(ID).unwrap();
        assert_eq!(resolve_patient(&format!("/patients/{}", ID)), Some(expected));
        assert_eq!(
            resolve_patient(&format!("/patients/{}/vitals", ID)),
            Some(expected)
        );
        assert_eq!(
            resolve_patient(&format!("/patients/{}?tab=summary", ID)),
            Some(expected)
        );
    }

    #[test]
    fn test_non_patient_paths_resolve_to_none() {
        assert_eq!(resolve_patient("/"), None);
        assert_eq!(resolve_patient("/patients"), None);
        assert_eq!(resolve_patient("/settings/profile"), None);
        assert_eq!(resolve_patient(""), None);
    }

    #[test]
    fn test_malformed_ids_resolve_to_none() {
        assert_eq!(resolve_patient("/patients/not-a-uuid"), None);
        assert_eq!(resolve_patient("/patients/123"), None);
    }
}
