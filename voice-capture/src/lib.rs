//! Speech capture for clinical dictation
//!
//! Owns the microphone/recognition lifecycle and assembles a transcript from
//! interim and final recognition segments. Only finalized segments ever reach
//! the classifier; the interim buffer is display-only.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use voice_capture::{CaptureConfig, CaptureController, RecognitionEvent};
//! # use voice_capture::backend::NullBackend;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CaptureConfig::from_env()?;
//! let mut controller = CaptureController::new(config, Box::new(NullBackend));
//!
//! let session = controller.start().await?;
//! controller.handle_event(session, RecognitionEvent::Final("blood pressure 120 over 80".into()));
//! let transcript = controller.stop().await?;
//!
//! println!("Transcript: {}", transcript);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;

pub use backend::{RecognitionBackend, RecognitionEvent};
pub use config::{CaptureConfig, InterimPolicy};
pub use controller::{CaptureController, CaptureSignal, CaptureState, SessionHandle};
pub use error::{CaptureError, CaptureResult};
