//! The fixed instruction sent with every classification request.
//!
//! This is a protocol-by-convention boundary: the model is told exactly what
//! to emit, but nothing downstream assumes it complied. Changing an action
//! name or payload shape here must be mirrored in the command model.

/// System instruction fixing the closed vocabulary and payload shapes.
pub const CLASSIFIER_INSTRUCTION: &str = r#"You classify a clinician's dictated request into exactly one action from a fixed vocabulary and extract its payload.

Respond with exactly one JSON object of the form {"action": "<name>", "payload": {...}} and nothing else: no explanation, no surrounding prose, no markdown code fences.

Use null for any payload field the request does not state. If the request matches no action, use {"action": "unknown", "payload": {"message": "<short reason>"}}.

Actions and example payloads:

{"action": "add_vitals", "payload": {"systolic": 120, "diastolic": 80, "heartRate": 90, "temperature": null, "spo2": null, "weight": null}}
{"action": "add_medication", "payload": {"name": "Amoxicillin", "dose": "500 mg", "route": "oral", "frequency": "three times daily", "duration": "7 days", "notes": null}}
{"action": "prescribe_medication", "payload": {"name": "Lisinopril", "dose": "10 mg", "route": "oral", "frequency": "once daily", "duration": null, "notes": null}}
{"action": "add_allergy", "payload": {"allergen": "Penicillin", "type": "Drug", "severity": "Severe", "reaction": "anaphylaxis", "notes": null, "intent": "add"}}
{"action": "remove_allergy", "payload": {"allergen": "Penicillin", "type": null, "severity": null, "reaction": null, "notes": null, "intent": "remove"}}
{"action": "add_condition", "payload": {"conditionName": "Type 2 diabetes", "status": "Active", "diagnosisDate": null, "notes": null}}
{"action": "remove_condition", "payload": {"conditionName": "Asthma", "status": null, "diagnosisDate": null, "notes": null}}
{"action": "add_note", "payload": {"text": "Patient reports improved sleep."}}
{"action": "add_soap_note", "payload": {"text": "S: headache for two days. O: afebrile. A: tension headache. P: hydration and rest."}}
{"action": "add_history", "payload": {"mode": "append", "text": "Appendectomy in 2015."}}
{"action": "update_history", "payload": {"mode": "update", "text": "Former smoker, quit 2020."}}
{"action": "clear_history", "payload": {"mode": "clear"}}
{"action": "create_referral", "payload": {"specialty": "Cardiology", "reason": "persistent palpitations"}}
{"action": "suggest_specialist", "payload": {"specialty": null, "reason": "recurrent migraines"}}
{"action": "find_patient", "payload": {"name": "Jane Doe"}}
{"action": "go_summary", "payload": {}}
{"action": "go_vitals", "payload": {}}
{"action": "go_medications", "payload": {}}
{"action": "go_allergies", "payload": {}}
{"action": "go_history", "payload": {}}
{"action": "go_notes", "payload": {}}
{"action": "go_referrals", "payload": {}}
{"action": "go_dashboard", "payload": {}}
{"action": "go_patients", "payload": {}}

Severity must be one of Mild, Moderate, Severe, Life-Threatening. Allergy type must be one of Drug, Food, Environmental, Other. Condition status must be one of Active, Controlled, Remission, Inactive. History mode must be one of append, update, clear."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_covers_full_vocabulary() {
        let actions = [
            "add_vitals",
            "add_medication",
            "prescribe_medication",
            "add_allergy",
            "remove_allergy",
            "add_condition",
            "remove_condition",
            "add_note",
            "add_soap_note",
            "add_history",
            "update_history",
            "clear_history",
            "create_referral",
            "suggest_specialist",
            "find_patient",
            "go_summary",
            "go_vitals",
            "go_medications",
            "go_allergies",
            "go_history",
            "go_notes",
            "go_referrals",
            "go_dashboard",
            "go_patients",
            "unknown",
        ];
        for action in actions {
            assert!(
                CLASSIFIER_INSTRUCTION.contains(&format!("\"{}\"", action)),
                "instruction is missing action {}",
                action
            );
        }
    }

    #[test]
    fn test_instruction_forbids_fences_and_prose() {
        assert!(CLASSIFIER_INSTRUCTION.contains("exactly one JSON object"));
        assert!(CLASSIFIER_INSTRUCTION.contains("no markdown code fences"));
    }
}
