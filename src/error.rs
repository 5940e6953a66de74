//! Error types for placemark

use thiserror::Error;

/// Main error type for placemark operations
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing API key
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Provider quota or backoff signal
    #[error("{message}")]
    RateLimited {
        message: String,
        /// Seconds from a Retry-After header, when the provider sent one
        retry_after_secs: Option<u64>,
    },

    /// Provider explicitly reported zero matches
    #[error("No results found")]
    NoResults,

    /// Unexpected HTTP status from a provider
    #[error("Server responded with {status}")]
    ServerError { status: u16 },

    /// Provider returned a response status the adapter does not recognize
    #[error("Unknown API response: {0}")]
    UnknownResponse(String),

    /// A field in a provider response could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Note error: {0}")]
    Note(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for placemark operations
pub type Result<T> = std::result::Result<T, Error>;
