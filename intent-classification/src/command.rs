//! Typed command model decoded from classifier replies.
//!
//! The classifier is untrusted, so every payload field is optional here;
//! required-field validation happens in the dispatch router, and anything
//! that cannot be decoded at all degrades to [`Command::Unknown`].

use serde::{Deserialize, Serialize};

/// Vital signs, numeric-or-null per measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VitalsPayload {
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,
    pub heart_rate: Option<f64>,
    pub temperature: Option<f64>,
    pub spo2: Option<f64>,
    pub weight: Option<f64>,
}

impl VitalsPayload {
    /// True when no measurement was captured at all.
    pub fn is_empty(&self) -> bool {
        self.systolic.is_none()
            && self.diastolic.is_none()
            && self.heart_rate.is_none()
            && self.temperature.is_none()
            && self.spo2.is_none()
            && self.weight.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllergyType {
    Drug,
    Food,
    Environmental,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllergySeverity {
    Mild,
    Moderate,
    Severe,
    #[serde(rename = "Life-Threatening")]
    LifeThreatening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllergyIntent {
    Add,
    Remove,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AllergyPayload {
    pub allergen: Option<String>,
    #[serde(rename = "type")]
    pub allergy_type: Option<AllergyType>,
    pub severity: Option<AllergySeverity>,
    pub reaction: Option<String>,
    pub notes: Option<String>,
    pub intent: Option<AllergyIntent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    Active,
    Controlled,
    Remission,
    Inactive,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionPayload {
    pub condition_name: Option<String>,
    pub status: Option<ConditionStatus>,
    pub diagnosis_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicationPayload {
    pub name: Option<String>,
    pub dose: Option<String>,
    pub route: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotePayload {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    Append,
    Update,
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryPayload {
    pub mode: Option<HistoryMode>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferralPayload {
    pub specialty: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupPayload {
    pub name: Option<String>,
}

/// The nine navigation targets of the record UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavTarget {
    Summary,
    Vitals,
    Medications,
    Allergies,
    History,
    Notes,
    Referrals,
    Dashboard,
    Patients,
}

impl NavTarget {
    /// Section name, i.e. the action name with its `go_` prefix stripped.
    pub fn section(&self) -> &'static str {
        match self {
            NavTarget::Summary => "summary",
            NavTarget::Vitals => "vitals",
            NavTarget::Medications => "medications",
            NavTarget::Allergies => "allergies",
            NavTarget::History => "history",
            NavTarget::Notes => "notes",
            NavTarget::Referrals => "referrals",
            NavTarget::Dashboard => "dashboard",
            NavTarget::Patients => "patients",
        }
    }

    /// Dashboard and the patient list are reachable without an open record.
    pub fn is_global(&self) -> bool {
        matches!(self, NavTarget::Dashboard | NavTarget::Patients)
    }
}

/// A classified clinician command: closed vocabulary, typed payloads, and a
/// mandatory fallback variant for anything the classifier got wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddVitals(VitalsPayload),
    AddMedication(MedicationPayload),
    PrescribeMedication(MedicationPayload),
    AddAllergy(AllergyPayload),
    RemoveAllergy(AllergyPayload),
    AddCondition(ConditionPayload),
    RemoveCondition(ConditionPayload),
    AddNote(NotePayload),
    AddSoapNote(NotePayload),
    AddHistory(HistoryPayload),
    UpdateHistory(HistoryPayload),
    ClearHistory(HistoryPayload),
    CreateReferral(ReferralPayload),
    SuggestSpecialist(ReferralPayload),
    FindPatient(LookupPayload),
    Navigate(NavTarget),
    Unknown { message: String },
}

impl Command {
    /// Wire-level action name, as fixed by the prompt contract.
    pub fn action_name(&self) -> &'static str {
        match self {
            Command::AddVitals(_) => "add_vitals",
            Command::AddMedication(_) => "add_medication",
            Command::PrescribeMedication(_) => "prescribe_medication",
            Command::AddAllergy(_) => "add_allergy",
            Command::RemoveAllergy(_) => "remove_allergy",
            Command::AddCondition(_) => "add_condition",
            Command::RemoveCondition(_) => "remove_condition",
            Command::AddNote(_) => "add_note",
            Command::AddSoapNote(_) => "add_soap_note",
            Command::AddHistory(_) => "add_history",
            Command::UpdateHistory(_) => "update_history",
            Command::ClearHistory(_) => "clear_history",
            Command::CreateReferral(_) => "create_referral",
            Command::SuggestSpecialist(_) => "suggest_specialist",
            Command::FindPatient(_) => "find_patient",
            Command::Navigate(target) => match target {
                NavTarget::Summary => "go_summary",
                NavTarget::Vitals => "go_vitals",
                NavTarget::Medications => "go_medications",
                NavTarget::Allergies => "go_allergies",
                NavTarget::History => "go_history",
                NavTarget::Notes => "go_notes",
                NavTarget::Referrals => "go_referrals",
                NavTarget::Dashboard => "go_dashboard",
                NavTarget::Patients => "go_patients",
            },
            Command::Unknown { .. } => "unknown",
        }
    }
}
