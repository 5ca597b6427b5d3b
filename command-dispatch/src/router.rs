//! The per-turn decision table: typed command + resolved context in, exactly
//! one outcome and at most one side effect out.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use intent_classification::{Command, NavTarget};

use crate::endpoints::{ClinicalEndpoint, MutationTarget, Navigator, PatientDirectory};
use crate::outcome::DispatchOutcome;

const SELECT_PATIENT: &str =
    "No patient record is open. Select or find a patient first, then repeat the command.";

/// Routes classified commands to mutation endpoints, lookups, or navigation.
///
/// Context is passed in explicitly, computed once per turn; the router never
/// reads ambient navigation state mid-dispatch.
pub struct DispatchRouter {
    endpoint: Arc<dyn ClinicalEndpoint>,
    directory: Arc<dyn PatientDirectory>,
    navigator: Arc<dyn Navigator>,
}

fn required(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn incomplete(what: &str) -> DispatchOutcome {
    DispatchOutcome::rejected(format!(
        "I couldn't capture the {}. Please repeat the command.",
        what
    ))
}

impl DispatchRouter {
    pub fn new(
        endpoint: Arc<dyn ClinicalEndpoint>,
        directory: Arc<dyn PatientDirectory>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            endpoint,
            directory,
            navigator,
        }
    }

    /// Dispatch one command. Infallible by design: every failure mode folds
    /// into the returned outcome so the turn always gets visible feedback.
    pub async fn dispatch(&self, command: Command, context: Option<Uuid>) -> DispatchOutcome {
        debug!(action = command.action_name(), patient = ?context, "Dispatching command");

        match command {
            Command::AddVitals(payload) => {
                if payload.is_empty() {
                    return incomplete("vital sign values");
                }
                self.write(
                    MutationTarget::Vitals,
                    &payload,
                    context,
                    "Vitals recorded successfully.",
                )
                .await
            }
            Command::AddMedication(payload) => {
                if required(&payload.name).is_none() {
                    return incomplete("medication name");
                }
                self.write(
                    MutationTarget::Medication,
                    &payload,
                    context,
                    "Medication added successfully.",
                )
                .await
            }
            Command::PrescribeMedication(payload) => {
                if required(&payload.name).is_none() {
                    return incomplete("medication name");
                }
                self.write(
                    MutationTarget::Prescription,
                    &payload,
                    context,
                    "Prescription recorded successfully.",
                )
                .await
            }
            Command::AddAllergy(payload) => {
                if required(&payload.allergen).is_none() {
                    return incomplete("allergen");
                }
                self.write(
                    MutationTarget::AllergyAdd,
                    &payload,
                    context,
                    "Allergy added successfully.",
                )
                .await
            }
            Command::RemoveAllergy(payload) => {
                if required(&payload.allergen).is_none() {
                    return incomplete("allergen");
                }
                self.write(
                    MutationTarget::AllergyRemove,
                    &payload,
                    context,
                    "Allergy removed.",
                )
                .await
            }
            Command::AddCondition(payload) => {
                if required(&payload.condition_name).is_none() {
                    return incomplete("condition name");
                }
                self.write(
                    MutationTarget::ConditionAdd,
                    &payload,
                    context,
                    "Condition added successfully.",
                )
                .await
            }
            Command::RemoveCondition(payload) => {
                if required(&payload.condition_name).is_none() {
                    return incomplete("condition name");
                }
                self.write(
                    MutationTarget::ConditionRemove,
                    &payload,
                    context,
                    "Condition removed.",
                )
                .await
            }
            Command::AddNote(payload) => {
                if required(&payload.text).is_none() {
                    return incomplete("note text");
                }
                self.write(
                    MutationTarget::Note,
                    &payload,
                    context,
                    "Note added successfully.",
                )
                .await
            }
            Command::AddSoapNote(payload) => {
                if required(&payload.text).is_none() {
                    return incomplete("note text");
                }
                self.write(
                    MutationTarget::SoapNote,
                    &payload,
                    context,
                    "SOAP note added successfully.",
                )
                .await
            }
            Command::AddHistory(payload) | Command::UpdateHistory(payload) => {
                if required(&payload.text).is_none() {
                    return incomplete("history text");
                }
                self.write(
                    MutationTarget::History,
                    &payload,
                    context,
                    "History updated successfully.",
                )
                .await
            }
            Command::ClearHistory(payload) => {
                self.write(
                    MutationTarget::History,
                    &payload,
                    context,
                    "History cleared.",
                )
                .await
            }
            Command::CreateReferral(payload) => {
                self.write(
                    MutationTarget::Referral,
                    &payload,
                    context,
                    "Referral created successfully.",
                )
                .await
            }
            Command::SuggestSpecialist(payload) => {
                self.suggest_specialists(payload.reason.as_deref()).await
            }
            Command::FindPatient(payload) => match required(&payload.name) {
                Some(name) => self.find_patient(name).await,
                None => incomplete("patient name"),
            },
            Command::Navigate(target) => self.navigate(target, context),
            Command::Unknown { message } => {
                debug!(reason = %message, "Command not understood");
                DispatchOutcome::rejected("Sorry, I didn't understand that request.")
            }
        }
    }

    /// Submit one write. A missing patient context is a blocking
    /// precondition: the endpoint is never called.
    async fn write<T: Serialize>(
        &self,
        target: MutationTarget,
        payload: &T,
        context: Option<Uuid>,
        success_label: &str,
    ) -> DispatchOutcome {
        let patient_id = match context {
            Some(id) => id,
            None => return DispatchOutcome::rejected(SELECT_PATIENT),
        };

        let payload = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(error) => {
                return DispatchOutcome::error("Error recording data", error.to_string())
            }
        };

        match self.endpoint.submit(target, patient_id, payload).await {
            Ok(response) if response.success => {
                info!(target = target.as_str(), patient = %patient_id, "Mutation accepted");
                DispatchOutcome::ok(success_label)
            }
            Ok(response) => {
                let reason = response
                    .error
                    .unwrap_or_else(|| "the service reported a failure".to_string());
                warn!(target = target.as_str(), reason = %reason, "Mutation rejected");
                DispatchOutcome::error("Error recording data", reason)
            }
            Err(error) => {
                warn!(target = target.as_str(), error = %error, "Mutation endpoint unreachable");
                DispatchOutcome::error("Error recording data", error.to_string())
            }
        }
    }

    fn navigate(&self, target: NavTarget, context: Option<Uuid>) -> DispatchOutcome {
        match target {
            NavTarget::Dashboard => {
                self.navigator.navigate("/", None);
                DispatchOutcome::ok("Opening the dashboard.")
            }
            NavTarget::Patients => {
                self.navigator.navigate("/patients", None);
                DispatchOutcome::ok("Opening the patient directory.")
            }
            section => match context {
                Some(patient_id) => {
                    self.navigator.navigate(
                        &format!("/patients/{}", patient_id),
                        Some(("tab", section.section())),
                    );
                    DispatchOutcome::ok(format!("Opening the {} section.", section.section()))
                }
                None => DispatchOutcome::rejected(format!(
                    "Select a patient to open their {}.",
                    section.section()
                )),
            },
        }
    }

    async fn find_patient(&self, name: &str) -> DispatchOutcome {
        let matches = match self.directory.find_by_name(name).await {
            Ok(matches) => matches,
            Err(error) => {
                warn!(query = name, error = %error, "Patient lookup failed");
                return DispatchOutcome::error("Error searching for patients", error.to_string());
            }
        };

        match matches.as_slice() {
            [] => DispatchOutcome::rejected(format!("No patient matching \"{}\" was found.", name)),
            [only] => {
                self.navigator
                    .navigate(&format!("/patients/{}", only.id), None);
                DispatchOutcome::ok(format!("Opening {}'s record.", only.name))
            }
            many => {
                self.navigator.navigate("/patients", Some(("search", name)));
                DispatchOutcome::ok(format!(
                    "Found {} patients matching \"{}\". Showing the patient directory.",
                    many.len(),
                    name
                ))
            }
        }
    }

    async fn suggest_specialists(&self, reason: Option<&str>) -> DispatchOutcome {
        match self.directory.suggest_specialists(reason).await {
            Ok(specialists) if specialists.is_empty() => {
                DispatchOutcome::ok("No specialist suggestions are available.")
            }
            Ok(specialists) => {
                let listing = specialists
                    .iter()
                    .map(|s| format!("{} ({})", s.name, s.specialty))
                    .collect::<Vec<_>>()
                    .join(", ");
                DispatchOutcome::ok(format!("Suggested specialists: {}.", listing))
            }
            Err(error) => {
                warn!(error = %error, "Specialist suggestion failed");
                DispatchOutcome::error("Error fetching specialist suggestions", error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use intent_classification::{
        parse_reply, HistoryMode, LookupPayload, MedicationPayload, NotePayload, VitalsPayload,
    };

    use crate::endpoints::{EndpointResponse, PatientMatch, Specialist};
    use crate::error::{DispatchError, DispatchResult};

    #[derive(Default)]
    struct RecordingEndpoint {
        calls: Mutex<Vec<(MutationTarget, Uuid, Value)>>,
        fail_with: Option<String>,
        unreachable: bool,
    }

    #[async_trait]
    impl ClinicalEndpoint for RecordingEndpoint {
        async fn submit(
            &self,
            target: MutationTarget,
            patient_id: Uuid,
            payload: Value,
        ) -> DispatchResult<EndpointResponse> {
            if self.unreachable {
                return Err(DispatchError::Endpoint("connection refused".to_string()));
            }
            self.calls.lock().unwrap().push((target, patient_id, payload));
            match &self.fail_with {
                Some(reason) => Ok(EndpointResponse::failed(reason.clone())),
                None => Ok(EndpointResponse::ok()),
            }
        }
    }

    #[derive(Default)]
    struct FakeDirectory {
        patients: Vec<PatientMatch>,
        specialists: Vec<Specialist>,
    }

    #[async_trait]
    impl PatientDirectory for FakeDirectory {
        async fn find_by_name(&self, _name: &str) -> DispatchResult<Vec<PatientMatch>> {
            Ok(self.patients.clone())
        }

        async fn suggest_specialists(
            &self,
            _reason: Option<&str>,
        ) -> DispatchResult<Vec<Specialist>> {
            Ok(self.specialists.clone())
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        transitions: Mutex<Vec<(String, Option<(String, String)>)>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, path: &str, query: Option<(&str, &str)>) {
            self.transitions.lock().unwrap().push((
                path.to_string(),
                query.map(|(k, v)| (k.to_string(), v.to_string())),
            ));
        }
    }

    struct Harness {
        router: DispatchRouter,
        endpoint: Arc<RecordingEndpoint>,
        navigator: Arc<RecordingNavigator>,
    }

    fn harness_with(endpoint: RecordingEndpoint, directory: FakeDirectory) -> Harness {
        let endpoint = Arc::new(endpoint);
        let navigator = Arc::new(RecordingNavigator::default());
        let router = DispatchRouter::new(
            endpoint.clone(),
            Arc::new(directory),
            navigator.clone(),
        );
        Harness {
            router,
            endpoint,
            navigator,
        }
    }

    fn harness() -> Harness {
        harness_with(RecordingEndpoint::default(), FakeDirectory::default())
    }

    fn patient() -> Uuid {
        Uuid::new_v4()
    }

    #[tokio::test]
    async fn test_write_without_context_is_blocked() {
        let h = harness();
        let command = Command::AddAllergy(intent_classification::AllergyPayload {
            allergen: Some("Penicillin".to_string()),
            ..Default::default()
        });

        let outcome = h.router.dispatch(command, None).await;

        assert!(!outcome.success);
        assert!(outcome.feedback().contains("Select or find a patient"));
        assert!(h.endpoint.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_with_context_hits_exactly_one_endpoint() {
        let h = harness();
        let id = patient();
        let command = Command::AddVitals(VitalsPayload {
            systolic: Some(120.0),
            diastolic: Some(80.0),
            heart_rate: Some(90.0),
            ..Default::default()
        });

        let outcome = h.router.dispatch(command, Some(id)).await;

        assert!(outcome.success);
        assert_eq!(outcome.feedback(), "Vitals recorded successfully.");
        let calls = h.endpoint.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, MutationTarget::Vitals);
        assert_eq!(calls[0].1, id);
        assert_eq!(calls[0].2["systolic"], 120.0);
    }

    #[tokio::test]
    async fn test_incomplete_payload_is_rejected_before_dispatch() {
        let h = harness();
        let command = Command::AddMedication(MedicationPayload::default());

        let outcome = h.router.dispatch(command, Some(patient())).await;

        assert!(!outcome.success);
        assert!(outcome.feedback().contains("medication name"));
        assert!(h.endpoint.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_vitals_are_incomplete() {
        let h = harness();
        let outcome = h
            .router
            .dispatch(Command::AddVitals(VitalsPayload::default()), Some(patient()))
            .await;
        assert!(!outcome.success);
        assert!(h.endpoint.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_history_dispatches_with_clear_mode() {
        let h = harness();
        let command = parse_reply(r#"{"action": "clear_history", "payload": {}}"#);

        let outcome = h.router.dispatch(command, Some(patient())).await;

        assert!(outcome.success);
        let calls = h.endpoint.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, MutationTarget::History);
        assert_eq!(calls[0].2["mode"], "clear");
        drop(calls);

        // Sanity: the parser really did fill the mode in.
        match parse_reply(r#"{"action": "clear_history", "payload": {}}"#) {
            Command::ClearHistory(payload) => assert_eq!(payload.mode, Some(HistoryMode::Clear)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_endpoint_failure_is_reported_verbatim() {
        let h = harness_with(
            RecordingEndpoint {
                fail_with: Some("validation failed: dose".to_string()),
                ..Default::default()
            },
            FakeDirectory::default(),
        );
        let command = Command::AddNote(NotePayload {
            text: Some("Patient doing well.".to_string()),
        });

        let outcome = h.router.dispatch(command, Some(patient())).await;

        assert!(!outcome.success);
        assert_eq!(
            outcome.feedback(),
            "Error recording data: validation failed: dose"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_still_yields_feedback() {
        let h = harness_with(
            RecordingEndpoint {
                unreachable: true,
                ..Default::default()
            },
            FakeDirectory::default(),
        );
        let command = Command::AddNote(NotePayload {
            text: Some("note".to_string()),
        });

        let outcome = h.router.dispatch(command, Some(patient())).await;

        assert!(!outcome.success);
        assert!(outcome.feedback().starts_with("Error recording data:"));
    }

    #[tokio::test]
    async fn test_unknown_is_a_safe_noop() {
        let h = harness();
        let outcome = h
            .router
            .dispatch(
                Command::Unknown {
                    message: "parse failure".to_string(),
                },
                Some(patient()),
            )
            .await;

        assert!(!outcome.success);
        assert_eq!(outcome.feedback(), "Sorry, I didn't understand that request.");
        assert!(h.endpoint.calls.lock().unwrap().is_empty());
        assert!(h.navigator.transitions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_global_navigation_needs_no_context() {
        let h = harness();
        let outcome = h
            .router
            .dispatch(Command::Navigate(NavTarget::Dashboard), None)
            .await;

        assert!(outcome.success);
        let transitions = h.navigator.transitions.lock().unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].0, "/");
        assert!(transitions[0].1.is_none());
    }

    #[tokio::test]
    async fn test_section_navigation_with_context() {
        let h = harness();
        let id = patient();
        let outcome = h
            .router
            .dispatch(Command::Navigate(NavTarget::Summary), Some(id))
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.feedback(), "Opening the summary section.");
        let transitions = h.navigator.transitions.lock().unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].0, format!("/patients/{}", id));
        assert_eq!(
            transitions[0].1,
            Some(("tab".to_string(), "summary".to_string()))
        );
    }

    #[tokio::test]
    async fn test_section_navigation_without_context_is_blocked() {
        let h = harness();
        let outcome = h
            .router
            .dispatch(Command::Navigate(NavTarget::Summary), None)
            .await;

        assert!(!outcome.success);
        assert!(outcome.feedback().contains("Select a patient"));
        assert!(h.navigator.transitions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_patient_no_match() {
        let h = harness();
        let command = Command::FindPatient(LookupPayload {
            name: Some("Jane Doe".to_string()),
        });

        let outcome = h.router.dispatch(command, None).await;

        assert!(!outcome.success);
        assert!(outcome.feedback().contains("Jane Doe"));
        assert!(h.navigator.transitions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_patient_single_match_navigates() {
        let id = patient();
        let h = harness_with(
            RecordingEndpoint::default(),
            FakeDirectory {
                patients: vec![PatientMatch {
                    id,
                    name: "Jane Doe".to_string(),
                }],
                ..Default::default()
            },
        );
        let command = Command::FindPatient(LookupPayload {
            name: Some("Jane".to_string()),
        });

        let outcome = h.router.dispatch(command, None).await;

        assert!(outcome.success);
        assert_eq!(outcome.feedback(), "Opening Jane Doe's record.");
        let transitions = h.navigator.transitions.lock().unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].0, format!("/patients/{}", id));
        assert!(transitions[0].1.is_none());
    }

    #[tokio::test]
    async fn test_find_patient_ambiguous_match_goes_to_directory() {
        let h = harness_with(
            RecordingEndpoint::default(),
            FakeDirectory {
                patients: vec![
                    PatientMatch {
                        id: patient(),
                        name: "Jane Doe".to_string(),
                    },
                    PatientMatch {
                        id: patient(),
                        name: "Jane Roe".to_string(),
                    },
                ],
                ..Default::default()
            },
        );
        let command = Command::FindPatient(LookupPayload {
            name: Some("Jane".to_string()),
        });

        let outcome = h.router.dispatch(command, None).await;

        assert!(outcome.success);
        assert!(outcome.feedback().contains("Found 2 patients"));
        let transitions = h.navigator.transitions.lock().unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].0, "/patients");
        assert_eq!(
            transitions[0].1,
            Some(("search".to_string(), "Jane".to_string()))
        );
    }

    #[tokio::test]
    async fn test_suggest_specialists_lists_names() {
        let h = harness_with(
            RecordingEndpoint::default(),
            FakeDirectory {
                specialists: vec![Specialist {
                    name: "Dr. Osei".to_string(),
                    specialty: "Cardiology".to_string(),
                    phone: Some("555-0182".to_string()),
                }],
                ..Default::default()
            },
        );
        let command = parse_reply(
            r#"{"action": "suggest_specialist", "payload": {"reason": "palpitations"}}"#,
        );

        let outcome = h.router.dispatch(command, None).await;

        assert!(outcome.success);
        assert_eq!(
            outcome.feedback(),
            "Suggested specialists: Dr. Osei (Cardiology)."
        );
    }

    #[tokio::test]
    async fn test_referral_requires_context_but_not_fields() {
        let h = harness();
        let command = parse_reply(r#"{"action": "create_referral", "payload": {}}"#);

        let blocked = h.router.dispatch(command.clone(), None).await;
        assert!(!blocked.success);
        assert!(h.endpoint.calls.lock().unwrap().is_empty());

        let outcome = h.router.dispatch(command, Some(patient())).await;
        assert!(outcome.success);
        assert_eq!(h.endpoint.calls.lock().unwrap().len(), 1);
    }
}
