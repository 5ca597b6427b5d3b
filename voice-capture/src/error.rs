use thiserror::Error;

/// Capture failure taxonomy surfaced to the caller.
///
/// None of these are retried automatically; the user must re-invoke
/// [`start`](crate::controller::CaptureController::start).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("No speech detected")]
    NoSpeech,

    #[error("Audio capture device unavailable")]
    AudioCaptureUnavailable,

    #[error("Recognition aborted")]
    Aborted,

    #[error("Speech recognition is not available in this environment")]
    Unsupported,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Recognition backend error: {0}")]
    Backend(String),
}

pub type CaptureResult<T> = Result<T, CaptureError>;
