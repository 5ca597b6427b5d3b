use async_trait::async_trait;

use crate::error::{CaptureError, CaptureResult};

/// A single recognition callback from the backend.
///
/// Events re-enter the controller on the same logical thread via
/// [`handle_event`](crate::controller::CaptureController::handle_event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Provisional text for the segment currently being spoken.
    Interim(String),
    /// A segment the recognizer has committed to.
    Final(String),
    /// The recognition session ended on the backend side.
    Ended,
    /// The recognition session failed.
    Failed(CaptureError),
}

/// Trait for speech recognition backends
#[async_trait]
pub trait RecognitionBackend: Send + Sync {
    /// Begin continuous recognition. Results are delivered back to the
    /// controller as [`RecognitionEvent`]s by the host integration.
    async fn start(&mut self, language: &str) -> CaptureResult<()>;

    /// End continuous recognition.
    async fn stop(&mut self) -> CaptureResult<()>;
}

/// Backend that accepts start/stop and produces nothing. Useful in tests and
/// on hosts without a speech API when the caller wants an explicit
/// `Unsupported` error instead of a silent no-op.
pub struct NullBackend;

#[async_trait]
impl RecognitionBackend for NullBackend {
    async fn start(&mut self, _language: &str) -> CaptureResult<()> {
        Ok(())
    }

    async fn stop(&mut self) -> CaptureResult<()> {
        Ok(())
    }
}

/// Backend used where no speech API is present at all.
pub struct UnsupportedBackend;

#[async_trait]
impl RecognitionBackend for UnsupportedBackend {
    async fn start(&mut self, _language: &str) -> CaptureResult<()> {
        Err(CaptureError::Unsupported)
    }

    async fn stop(&mut self) -> CaptureResult<()> {
        Ok(())
    }
}
