//! Error types for the DeepSeek adapter

use deepchat_application::BackendError;
use thiserror::Error;

/// Result type alias for DeepSeek operations
pub type Result<T> = std::result::Result<T, DeepseekError>;

/// Errors that can occur when talking to the DeepSeek API
#[derive(Error, Debug)]
pub enum DeepseekError {
    #[error("API key is not usable: {0}")]
    InvalidApiKey(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DeepseekError> for BackendError {
    fn from(err: DeepseekError) -> Self {
        match err {
            DeepseekError::InvalidApiKey(msg) => BackendError::ConnectionError(msg),
            DeepseekError::Http(e) if e.is_timeout() => BackendError::Timeout,
            DeepseekError::Http(e) if e.is_connect() => {
                BackendError::ConnectionError(e.to_string())
            }
            DeepseekError::Http(e) => BackendError::RequestFailed(e.to_string()),
            DeepseekError::Api { status, message } => BackendError::ApiError { status, message },
            other => BackendError::Other(other.to_string()),
        }
    }
}
