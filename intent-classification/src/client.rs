use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ClassifierConfig;
use crate::error::{ClassifierError, ClassifierResult};
use crate::prompt::CLASSIFIER_INSTRUCTION;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// Client for the language-model service that classifies utterances.
///
/// Returns the raw model text; decoding and all trust decisions live in the
/// parser. One request per turn, no retries: on failure the caller degrades
/// the turn to `unknown`.
pub struct IntentClassifier {
    config: ClassifierConfig,
    client: reqwest::Client,
}

impl IntentClassifier {
    /// Create a new classifier client
    pub fn new(config: ClassifierConfig) -> ClassifierResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ClassifierError::Network)?;

        Ok(Self { config, client })
    }

    /// Send the fixed instruction plus the transcript, return raw model text.
    pub async fn classify(&self, transcript: &str) -> ClassifierResult<String> {
        debug!(chars = transcript.len(), "Classifying transcript");

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: CLASSIFIER_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: transcript,
                },
            ],
            temperature: 0.0,
        };

        let url = format!("{}/chat/completions", self.config.api_url);
        let mut req = self.client.post(&url).json(&request);
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;

        if !response.status().is_success() {
            return Err(ClassifierError::Service(response.status().as_u16()));
        }

        let body: ChatResponse = response.json().await?;
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ClassifierError::EmptyReply)?;

        info!(chars = text.len(), "Classifier reply received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction() {
        let classifier = IntentClassifier::new(ClassifierConfig::default());
        assert!(classifier.is_ok());
    }

    #[test]
    fn test_chat_response_decoding() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "{\"action\": \"go_summary\", \"payload\": {}}"}}]}"#,
        )
        .unwrap();
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap();
        assert!(text.contains("go_summary"));
    }
}
