//! External collaborator interfaces: mutation endpoints, patient lookup, and
//! the navigation effect supplied by the application shell.
//!
//! The router is agnostic to what sits behind these; each mutation endpoint
//! accepts `{patientId, payload}` and answers `{success, error?}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DispatchResult;

/// The downstream record section a write action mutates.
///
/// Every write action variant maps to exactly one target; the mapping lives
/// in the router and is an exhaustive match, so adding an action without
/// choosing a target does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationTarget {
    Vitals,
    Medication,
    Prescription,
    AllergyAdd,
    AllergyRemove,
    ConditionAdd,
    ConditionRemove,
    Note,
    SoapNote,
    History,
    Referral,
}

impl MutationTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationTarget::Vitals => "vitals",
            MutationTarget::Medication => "medication",
            MutationTarget::Prescription => "prescription",
            MutationTarget::AllergyAdd => "allergy_add",
            MutationTarget::AllergyRemove => "allergy_remove",
            MutationTarget::ConditionAdd => "condition_add",
            MutationTarget::ConditionRemove => "condition_remove",
            MutationTarget::Note => "note",
            MutationTarget::SoapNote => "soap_note",
            MutationTarget::History => "history",
            MutationTarget::Referral => "referral",
        }
    }
}

/// Wire-shaped reply from a mutation endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EndpointResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// A patient returned by the lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientMatch {
    pub id: Uuid,
    pub name: String,
}

/// A specialist known to the practice directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialist {
    pub name: String,
    pub specialty: String,
    pub phone: Option<String>,
}

/// Trait for the clinical-record mutation endpoints
#[async_trait]
pub trait ClinicalEndpoint: Send + Sync {
    /// Submit one write against the given patient record.
    async fn submit(
        &self,
        target: MutationTarget,
        patient_id: Uuid,
        payload: serde_json::Value,
    ) -> DispatchResult<EndpointResponse>;
}

/// Trait for patient and specialist lookups
#[async_trait]
pub trait PatientDirectory: Send + Sync {
    /// Name-based patient lookup. Matching semantics belong to the endpoint.
    async fn find_by_name(&self, name: &str) -> DispatchResult<Vec<PatientMatch>>;

    /// Suggest specialists for a free-text reason.
    async fn suggest_specialists(&self, reason: Option<&str>) -> DispatchResult<Vec<Specialist>>;
}

/// Navigation capability supplied by the surrounding application shell.
pub trait Navigator: Send + Sync {
    /// Transition to `path`, optionally with one query parameter.
    fn navigate(&self, path: &str, query: Option<(&str, &str)>);
}
