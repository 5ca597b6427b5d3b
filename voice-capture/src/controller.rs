use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::backend::{RecognitionBackend, RecognitionEvent};
use crate::config::{CaptureConfig, InterimPolicy};
use crate::error::{CaptureError, CaptureResult};

/// Capture lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Listening,
}

/// Handle identifying one recognition session.
///
/// Replaced wholesale on every `start()`; events carrying a stale handle are
/// dropped so a finished session can never mutate the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionHandle(u64);

/// Out-of-band condition the UI must surface to the clinician.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSignal {
    /// Recognition ended while we were still logically listening. The
    /// controller never auto-restarts; the user resumes manually.
    DictationStopped,
    /// Recognition failed with the given reason.
    Failed(CaptureError),
}

/// Owns the recognition session and assembles the dictation transcript.
///
/// Only one session is active at a time. Finalized segments are newline-joined
/// into the durable transcript; the interim buffer is display-only and is
/// never sent downstream.
pub struct CaptureController {
    config: CaptureConfig,
    backend: Box<dyn RecognitionBackend>,
    state: CaptureState,
    generation: u64,
    segments: Vec<String>,
    interim: String,
    started_at: Option<DateTime<Utc>>,
}

impl CaptureController {
    /// Create a new capture controller
    pub fn new(config: CaptureConfig, backend: Box<dyn RecognitionBackend>) -> Self {
        Self {
            config,
            backend,
            state: CaptureState::Idle,
            generation: 0,
            segments: Vec::new(),
            interim: String::new(),
            started_at: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == CaptureState::Listening
    }

    /// Handle for the current (or most recent) session.
    pub fn session(&self) -> SessionHandle {
        SessionHandle(self.generation)
    }

    /// Begin continuous recognition.
    ///
    /// A repeated `start()` while already listening is a no-op and returns the
    /// current session handle.
    pub async fn start(&mut self) -> CaptureResult<SessionHandle> {
        if self.state == CaptureState::Listening {
            debug!(session = self.generation, "start() while listening is a no-op");
            return Ok(SessionHandle(self.generation));
        }

        self.backend.start(&self.config.language).await?;

        self.generation += 1;
        self.segments.clear();
        self.interim.clear();
        self.state = CaptureState::Listening;
        self.started_at = Some(Utc::now());

        info!(session = self.generation, "Dictation session started");
        Ok(SessionHandle(self.generation))
    }

    /// End recognition and finalize the transcript.
    ///
    /// The pending interim buffer is discarded; only finalized segments make
    /// up the returned transcript. Calling `stop()` while idle just returns
    /// the last finalized transcript.
    pub async fn stop(&mut self) -> CaptureResult<String> {
        if self.state == CaptureState::Listening {
            self.backend.stop().await?;
            self.state = CaptureState::Idle;
            info!(
                session = self.generation,
                segments = self.segments.len(),
                "Dictation session stopped"
            );
        }
        self.interim.clear();
        Ok(self.transcript())
    }

    /// Feed one recognition callback into the controller.
    ///
    /// Events from a stale session, or arriving while idle, are ignored.
    pub fn handle_event(
        &mut self,
        session: SessionHandle,
        event: RecognitionEvent,
    ) -> Option<CaptureSignal> {
        if session.0 != self.generation || self.state != CaptureState::Listening {
            debug!(
                session = session.0,
                current = self.generation,
                "Dropping stale recognition event"
            );
            return None;
        }

        match event {
            RecognitionEvent::Interim(text) => {
                match self.config.interim_policy {
                    InterimPolicy::Replace => self.interim = text,
                    InterimPolicy::Append => self.interim.push_str(&text),
                }
                None
            }
            RecognitionEvent::Final(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    self.segments.push(trimmed.to_string());
                }
                self.interim.clear();
                None
            }
            RecognitionEvent::Ended => {
                // The backend ended the session on its own. Auto-restarting
                // here can loop the permission prompt, so we go idle and ask
                // the user to resume.
                warn!(session = self.generation, "Recognition ended unexpectedly");
                self.state = CaptureState::Idle;
                self.interim.clear();
                Some(CaptureSignal::DictationStopped)
            }
            RecognitionEvent::Failed(error) => {
                warn!(session = self.generation, error = %error, "Recognition failed");
                self.state = CaptureState::Idle;
                self.interim.clear();
                Some(CaptureSignal::Failed(error))
            }
        }
    }

    /// Durable transcript: finalized segments, newline-joined.
    pub fn transcript(&self) -> String {
        self.segments.join("\n")
    }

    /// Display-only text for the segment currently being spoken.
    pub fn interim(&self) -> &str {
        &self.interim
    }

    /// When the current session began, if one is active.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }
}
