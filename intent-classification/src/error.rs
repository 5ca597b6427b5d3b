use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Classifier service returned status {0}")]
    Service(u16),

    #[error("Classifier returned an empty reply")]
    EmptyReply,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ClassifierResult<T> = Result<T, ClassifierError>;
