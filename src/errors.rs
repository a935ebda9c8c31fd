//! Unified error types and result handling.

use thiserror::Error;

/// Errors produced by configuration loading, the REST collaborator and the editing session.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// I/O failure (config file, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is missing or invalid
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend rejected the credentials
    #[error("Authentication required")]
    Unauthorized,

    /// The backend refused the operation
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend rejected the submitted payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success response
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The editing session was already closed
    #[error("Editor session is closed")]
    SessionClosed,
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
