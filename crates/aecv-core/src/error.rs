//! Error taxonomy for the validation engine.

use crate::domain::Criterion;

/// Errors produced while configuring or running validators.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("validator registry error: {0}")]
    Registry(String),

    #[error("{criterion} validator failed: {reason}")]
    Scoring { criterion: Criterion, reason: String },

    #[error("text analysis failed: {0}")]
    Analysis(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidationError>;
