use thiserror::Error;

use crate::parse::InputFormat;

#[derive(Debug, Error)]
pub enum ReconError {
    /// Format tag is not one of the recognized inventory layouts.
    #[error("unsupported input format: \"{0}\" (expected contents, multibuy or eft)")]
    UnsupportedFormat(String),

    /// A line does not match the shape of its declared format.
    #[error("{format} line {line}: {reason} (expected {expected}): {content:?}")]
    Parse {
        format: InputFormat,
        line: usize,
        content: String,
        reason: String,
        expected: &'static str,
    },

    /// Aggregated quantity cannot be represented. Indicates a parser contract
    /// violation rather than a user-facing condition.
    #[error("aggregation error for item '{item}': {reason}")]
    Aggregation { item: String, reason: String },

    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Job config is well-formed TOML but semantically invalid.
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// IO error (file read, etc.).
    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReconError>;

impl ReconError {
    /// Line number for parse errors, `None` for every other class.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}
