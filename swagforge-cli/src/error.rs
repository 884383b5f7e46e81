//! Error types for the swagforge CLI.

use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug)]
pub enum CliError {
    /// IO error (reading the payload, writing the document)
    Io(std::io::Error),

    /// Configuration could not be loaded or is inconsistent
    Config(String),

    /// The plugin payload could not be decoded
    Input(String),

    /// Document generation failed
    Generate(String),

    /// Invalid argument
    InvalidArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Input(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Generate(msg) => write!(f, "Generation failed: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<swagforge_config::ConfigError> for CliError {
    fn from(e: swagforge_config::ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<swagforge_spec::SpecError> for CliError {
    fn from(e: swagforge_spec::SpecError) -> Self {
        CliError::Input(e.to_string())
    }
}

impl From<swagforge_swagger::SwaggerError> for CliError {
    fn from(e: swagforge_swagger::SwaggerError) -> Self {
        CliError::Generate(e.to_string())
    }
}
