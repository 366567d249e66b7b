/// Error types for cloud-stt
///
/// Uses thiserror for ergonomic error handling with proper Display implementations.
use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to get access token")]
    Credential(String),

    /// Non-success HTTP status; displays the response body verbatim
    #[error("{body}")]
    RemoteRequest { status: u16, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown model: {name}. Available models: {available}")]
    UnknownModel { name: String, available: String },
}

impl AppError {
    /// Detail carried alongside the user-facing message, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::Credential(detail) => Some(detail.as_str()),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
