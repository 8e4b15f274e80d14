//! Error types for dimensional modeling.

use dwh_model::{ErrorKind, PipelineError, Stage};
use thiserror::Error;

/// Errors raised while assembling or exporting the star schema.
#[derive(Debug, Error)]
pub enum StarError {
    /// A fact references a surrogate key its dimension does not hold.
    #[error("{table}.{column} references missing key {key} (order {order_number})")]
    ReferentialIntegrity {
        table: &'static str,
        column: &'static str,
        key: i64,
        order_number: String,
    },

    /// Two dimension rows share a surrogate key.
    #[error("{table} assigns surrogate key {key} more than once")]
    DuplicateSurrogateKey { table: &'static str, key: i64 },

    #[error("failed to build {table} frame: {source}")]
    Frame {
        table: &'static str,
        #[source]
        source: polars::error::PolarsError,
    },

    #[error("failed to serialize schema for fingerprint: {0}")]
    Fingerprint(#[from] serde_json::Error),
}

impl StarError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StarError::ReferentialIntegrity { .. } | StarError::DuplicateSurrogateKey { .. } => {
                ErrorKind::ReferentialIntegrityViolation
            }
            StarError::Frame { .. } | StarError::Fingerprint(_) => ErrorKind::OutputFailure,
        }
    }
}

impl From<StarError> for PipelineError {
    fn from(err: StarError) -> Self {
        PipelineError::new(Stage::Model, err.kind(), err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StarError>;
