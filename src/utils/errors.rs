use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KumiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Validation failed with {errors} error(s)")]
    Validation { errors: usize },

    #[error("File already exists: {0}")]
    FileExists(PathBuf),

    #[error("{0}")]
    Other(String),
}

impl KumiError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error
    #[allow(dead_code)] // Generic error constructor for downstream callers
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

pub type Result<T> = std::result::Result<T, KumiError>;

impl From<anyhow::Error> for KumiError {
    fn from(err: anyhow::Error) -> Self {
        KumiError::Other(err.to_string())
    }
}
