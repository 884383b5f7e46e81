// Error types for loading API definitions

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Failed to read API definition: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode API definition: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpecError>;
