//! Tolerant decoding of raw classifier replies.
//!
//! The parser is total: any input, however malformed, yields a [`Command`],
//! never a panic or an error. Semantic validation of payload fields is the
//! dispatch router's job.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::command::{Command, HistoryMode, HistoryPayload};

#[derive(Debug, Deserialize)]
struct ReplyEnvelope {
    action: Option<String>,
    #[serde(default)]
    payload: Value,
}

/// Strip surrounding markdown code-fence markers the model was told not to
/// emit but sometimes emits anyway.
fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        // Drop the fence line including an optional language tag.
        text = match rest.split_once('\n') {
            Some((_, body)) => body,
            None => rest.strip_prefix("json").unwrap_or(rest),
        };
    }
    text = text.trim_end();
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

fn parse_failure() -> Command {
    Command::Unknown {
        message: "parse failure".to_string(),
    }
}

/// Lenient payload decode: null, absent, or shape-mismatched payloads fall
/// back to the all-empty payload, which the router then rejects as
/// incomplete rather than crashing the turn.
fn decode_payload<T: Default + DeserializeOwned>(payload: Value) -> T {
    if payload.is_null() {
        return T::default();
    }
    serde_json::from_value(payload).unwrap_or_default()
}

fn history_payload(payload: Value, implied_mode: HistoryMode) -> HistoryPayload {
    let mut decoded: HistoryPayload = decode_payload(payload);
    // The classifier may omit the mode; the action name implies it.
    decoded.mode.get_or_insert(implied_mode);
    decoded
}

/// Decode a raw classifier reply into a typed command.
pub fn parse_reply(raw: &str) -> Command {
    let cleaned = strip_code_fences(raw);

    let envelope: ReplyEnvelope = match serde_json::from_str(cleaned) {
        Ok(envelope) => envelope,
        Err(error) => {
            debug!(%error, "Classifier reply is not a JSON object");
            return parse_failure();
        }
    };

    let action = match envelope.action {
        Some(action) => action,
        None => {
            debug!("Classifier reply has no action field");
            return parse_failure();
        }
    };
    let payload = envelope.payload;

    use crate::command::NavTarget::*;
    match action.as_str() {
        "add_vitals" => Command::AddVitals(decode_payload(payload)),
        "add_medication" => Command::AddMedication(decode_payload(payload)),
        "prescribe_medication" => Command::PrescribeMedication(decode_payload(payload)),
        "add_allergy" => Command::AddAllergy(decode_payload(payload)),
        "remove_allergy" => Command::RemoveAllergy(decode_payload(payload)),
        "add_condition" => Command::AddCondition(decode_payload(payload)),
        "remove_condition" => Command::RemoveCondition(decode_payload(payload)),
        "add_note" => Command::AddNote(decode_payload(payload)),
        "add_soap_note" => Command::AddSoapNote(decode_payload(payload)),
        "add_history" => Command::AddHistory(history_payload(payload, HistoryMode::Append)),
        "update_history" => Command::UpdateHistory(history_payload(payload, HistoryMode::Update)),
        "clear_history" => Command::ClearHistory(history_payload(payload, HistoryMode::Clear)),
        "create_referral" => Command::CreateReferral(decode_payload(payload)),
        "suggest_specialist" => Command::SuggestSpecialist(decode_payload(payload)),
        "find_patient" => Command::FindPatient(decode_payload(payload)),
        "go_summary" => Command::Navigate(Summary),
        "go_vitals" => Command::Navigate(Vitals),
        "go_medications" => Command::Navigate(Medications),
        "go_allergies" => Command::Navigate(Allergies),
        "go_history" => Command::Navigate(History),
        "go_notes" => Command::Navigate(Notes),
        "go_referrals" => Command::Navigate(Referrals),
        "go_dashboard" => Command::Navigate(Dashboard),
        "go_patients" => Command::Navigate(Patients),
        "unknown" => {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unrecognized request")
                .to_string();
            Command::Unknown { message }
        }
        other => {
            debug!(action = other, "Classifier returned an action outside the vocabulary");
            Command::Unknown {
                message: format!("unrecognized action: {}", other),
            }
        }
    }
}
