use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, ClassifierResult};

/// Intent classifier configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Base URL of an OpenAI-compatible chat completions API.
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:11434/v1".to_string(),
            api_key: None,
            model: "llama3.1".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ClassifierResult<Self> {
        let api_url = std::env::var("INTENT_API_URL")
            .unwrap_or_else(|_| "http://localhost:11434/v1".to_string());

        let api_key = std::env::var("INTENT_API_KEY").ok();

        let model = std::env::var("INTENT_MODEL").unwrap_or_else(|_| "llama3.1".to_string());

        let timeout_secs = match std::env::var("INTENT_TIMEOUT_SECS") {
            Ok(value) => value
                .parse()
                .map_err(|_| ClassifierError::Config(format!("Invalid timeout: {}", value)))?,
            Err(_) => 30,
        };

        Ok(Self {
            api_url,
            api_key,
            model,
            timeout_secs,
        })
    }
}
