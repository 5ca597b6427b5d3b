use serde::{Deserialize, Serialize};

use crate::error::{CaptureError, CaptureResult};

/// How interim (not yet final) recognition results are buffered.
///
/// The legacy dictation surfaces disagreed on this per feature area; here it
/// is a single configuration knob with `Replace` as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterimPolicy {
    /// Each interim update replaces the transient buffer.
    Replace,
    /// Interim updates accumulate until the next final segment.
    Append,
}

/// Speech capture configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaptureConfig {
    pub interim_policy: InterimPolicy,
    /// BCP-47 language tag handed to the recognition backend.
    pub language: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            interim_policy: InterimPolicy::Replace,
            language: "en-US".to_string(),
        }
    }
}

impl CaptureConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> CaptureResult<Self> {
        let interim_policy = match std::env::var("CAPTURE_INTERIM_POLICY") {
            Ok(value) => match value.to_lowercase().as_str() {
                "replace" => InterimPolicy::Replace,
                "append" => InterimPolicy::Append,
                other => {
                    return Err(CaptureError::Config(format!(
                        "Unknown interim policy: {}",
                        other
                    )))
                }
            },
            Err(_) => InterimPolicy::Replace,
        };

        let language = std::env::var("CAPTURE_LANGUAGE").unwrap_or_else(|_| "en-US".to_string());

        Ok(Self {
            interim_policy,
            language,
        })
    }
}
