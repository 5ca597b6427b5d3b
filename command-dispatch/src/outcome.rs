use serde::Serialize;

/// Result of routing one command: produced exactly once per turn and never
/// persisted beyond the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub success: bool,
    /// User-facing summary of what happened.
    pub label: Option<String>,
    /// Error detail from the downstream endpoint, where available.
    pub detail: Option<String>,
}

impl DispatchOutcome {
    pub fn ok(label: impl Into<String>) -> Self {
        Self {
            success: true,
            label: Some(label.into()),
            detail: None,
        }
    }

    /// The command was understood but could not proceed (missing context,
    /// missing fields, nothing found). No endpoint was called.
    pub fn rejected(label: impl Into<String>) -> Self {
        Self {
            success: false,
            label: Some(label.into()),
            detail: None,
        }
    }

    /// A downstream call failed.
    pub fn error(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            label: Some(label.into()),
            detail: Some(detail.into()),
        }
    }

    /// Clinician-readable feedback line for the conversation transcript.
    pub fn feedback(&self) -> String {
        match (&self.label, &self.detail) {
            (Some(label), Some(detail)) => format!("{}: {}", label, detail),
            (Some(label), None) => label.clone(),
            (None, Some(detail)) => format!("Error recording data: {}", detail),
            (None, None) => {
                if self.success {
                    "Done.".to_string()
                } else {
                    "Sorry, something went wrong.".to_string()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_composition() {
        assert_eq!(
            DispatchOutcome::ok("Allergy added successfully.").feedback(),
            "Allergy added successfully."
        );
        assert_eq!(
            DispatchOutcome::error("Error recording data", "service unavailable").feedback(),
            "Error recording data: service unavailable"
        );
    }
}
