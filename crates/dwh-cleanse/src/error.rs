//! Error types for cleansing.

use dwh_model::{Entity, ErrorKind, PipelineError, Stage};
use serde::Serialize;
use thiserror::Error;

/// A raw row that no repair rule can fix.
///
/// Rows raising this error are excluded from the clean table and counted
/// in its [`crate::CleanseReport`].
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
pub enum CleanseError {
    /// Business key is null or blank.
    #[error("{entity} row {row}: business key column '{column}' is blank")]
    MissingBusinessKey {
        entity: Entity,
        row: usize,
        column: &'static str,
    },

    /// Business key is present but cannot be interpreted.
    #[error("{entity} row {row}: business key column '{column}' has invalid value '{value}'")]
    InvalidBusinessKey {
        entity: Entity,
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl CleanseError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ValidationError
    }
}

impl From<&CleanseError> for PipelineError {
    fn from(err: &CleanseError) -> Self {
        PipelineError::new(Stage::Cleanse, err.kind(), err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CleanseError>;
