//! Best-effort scan of assistant text for a "call this specialist" cue.
//!
//! This sits outside the action protocol: free-text assistant replies are
//! scanned for a known specialist mentioned near a call/phone verb so the UI
//! can surface a call-now affordance. Failing to match is always safe.

use crate::endpoints::Specialist;

const CALL_VERBS: &[&str] = &["call", "phone", "ring", "dial", "contact"];

/// Affordance the UI can render as a call-now button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPrompt {
    pub specialist: Specialist,
}

/// Scan `text` for a roster specialist co-occurring with a call verb.
///
/// Case-insensitive substring matching; first roster hit wins.
pub fn detect_call_prompt(text: &str, roster: &[Specialist]) -> Option<CallPrompt> {
    let lowered = text.to_lowercase();

    let has_call_verb = CALL_VERBS.iter().any(|verb| {
        lowered
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word == *verb)
    });
    if !has_call_verb {
        return None;
    }

    roster
        .iter()
        .find(|specialist| lowered.contains(&specialist.name.to_lowercase()))
        .map(|specialist| CallPrompt {
            specialist: specialist.clone(),
        })
}
