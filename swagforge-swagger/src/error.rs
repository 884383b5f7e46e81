//! Error types for document generation

use thiserror::Error;

/// Document generation errors
#[derive(Debug, Error)]
pub enum SwaggerError {
    #[error("unsupported scheme: {0} (expected http, https, ws or wss)")]
    UnsupportedScheme(String),

    #[error("malformed response wrapper: {0}")]
    MalformedWrapper(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for document generation
pub type Result<T> = std::result::Result<T, SwaggerError>;

/// Failure to format a name in a naming style.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("unknown naming style: {0}")]
    UnknownStyle(String),

    #[error("`{0}` has no words to format")]
    Empty(String),
}
