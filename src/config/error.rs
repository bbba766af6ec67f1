//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Rules file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Rules validation error: {0}")]
    Validation(String),
}
