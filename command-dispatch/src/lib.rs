//! Command dispatch for the clinical voice assistant
//!
//! Takes a classified command, resolves the patient context it applies to
//! from the current navigation location, routes it to the right mutation or
//! navigation effect, and feeds the outcome back into the conversation
//! transcript. Write actions are blocked, not attempted, when no patient
//! record is open.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use command_dispatch::{DispatchRouter, TurnExecutor};
//! # use command_dispatch::endpoints::{ClinicalEndpoint, PatientDirectory, Navigator};
//!
//! # async fn example(
//! #     endpoint: Arc<dyn ClinicalEndpoint>,
//! #     directory: Arc<dyn PatientDirectory>,
//! #     navigator: Arc<dyn Navigator>,
//! # ) {
//! let router = DispatchRouter::new(endpoint, directory, navigator);
//! let mut executor = TurnExecutor::new(router, Vec::new());
//!
//! let report = executor
//!     .run_turn(
//!         "blood pressure 120 over 80",
//!         Ok(r#"{"action": "add_vitals", "payload": {"systolic": 120, "diastolic": 80}}"#
//!             .to_string()),
//!         "/patients/7d5100b5-5d86-4f9c-803f-3746b1eeaf72",
//!     )
//!     .await;
//! # }
//! ```

pub mod context;
pub mod conversation;
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod outcome;
pub mod router;
pub mod specialist;

pub use context::resolve_patient;
pub use conversation::{Conversation, ConversationTurn, Role};
pub use endpoints::{
    ClinicalEndpoint, EndpointResponse, MutationTarget, Navigator, PatientDirectory, PatientMatch,
    Specialist,
};
pub use error::{DispatchError, DispatchResult};
pub use executor::{TurnExecutor, TurnReport};
pub use outcome::DispatchOutcome;
pub use router::DispatchRouter;
pub use specialist::{detect_call_prompt, CallPrompt};
