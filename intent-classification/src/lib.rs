//! Intent classification for the clinical voice assistant
//!
//! Sends a dictated transcript plus a fixed instruction contract to a
//! language-model service and decodes the untrusted reply into a typed
//! command over a closed action vocabulary. Malformed replies always degrade
//! to the `unknown` command, never to an error.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use intent_classification::{ClassifierConfig, IntentClassifier, parse_reply};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = IntentClassifier::new(ClassifierConfig::from_env()?)?;
//! let raw = classifier.classify("blood pressure 120 over 80").await?;
//! let command = parse_reply(&raw);
//!
//! println!("Classified as: {}", command.action_name());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod parser;
pub mod prompt;

pub use client::IntentClassifier;
pub use command::{
    AllergyIntent, AllergyPayload, AllergySeverity, AllergyType, Command, ConditionPayload,
    ConditionStatus, HistoryMode, HistoryPayload, LookupPayload, MedicationPayload, NavTarget,
    NotePayload, ReferralPayload, VitalsPayload,
};
pub use config::ClassifierConfig;
pub use error::{ClassifierError, ClassifierResult};
pub use parser::parse_reply;
pub use prompt::CLASSIFIER_INSTRUCTION;
