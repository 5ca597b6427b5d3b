use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Endpoint error: {0}")]
    Endpoint(String),

    #[error("Lookup error: {0}")]
    Lookup(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
