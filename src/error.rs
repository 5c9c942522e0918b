use std::io;
use thiserror::Error;

/// Custom result type alias for the application
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur while ingesting repositories or generating tutorials
#[derive(Debug, Error)]
pub enum ServiceError {
    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing/serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// GitHub API specific errors
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Chat-completion API errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// General message errors
    #[error("{0}")]
    Message(String),
}

impl ServiceError {
    /// Creates a new error with the specified message
    pub fn new(message: &str) -> Self {
        Self::Message(message.to_string())
    }

    /// Checks if this error is transient (caused by the network or an upstream API)
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_) | Self::GitHubApi(_) | Self::Llm(_) | Self::Io(_))
    }
}
