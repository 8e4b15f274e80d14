//! Pipeline error taxonomy.
//!
//! Every stage-specific error converts into a [`PipelineError`], which carries
//! the originating [`Stage`], an [`ErrorKind`], and a human-readable message.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Pipeline stage that produced an error or log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Load,
    Cleanse,
    Model,
    Publish,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Cleanse => "cleanse",
            Stage::Model => "model",
            Stage::Publish => "publish",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error classification shared by all stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Extract missing or unreadable.
    SourceUnavailable,
    /// Extract shape disagrees with the expected staging layout.
    SchemaMismatch,
    /// Business key missing or blank; the row cannot be repaired.
    ValidationError,
    /// Fact row cannot resolve a dimension key. Counted, never fatal.
    OrphanReference,
    /// A fact references a surrogate key absent from its dimension.
    ReferentialIntegrityViolation,
    /// Output could not be written or published.
    OutputFailure,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::SourceUnavailable => "SourceUnavailable",
            ErrorKind::SchemaMismatch => "SchemaMismatch",
            ErrorKind::ValidationError => "ValidationError",
            ErrorKind::OrphanReference => "OrphanReference",
            ErrorKind::ReferentialIntegrityViolation => "ReferentialIntegrityViolation",
            ErrorKind::OutputFailure => "OutputFailure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Typed error returned to callers of the pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{stage} stage failed [{kind}]: {message}")]
pub struct PipelineError {
    pub stage: Stage,
    pub kind: ErrorKind,
    pub message: String,
}

impl PipelineError {
    pub fn new(stage: Stage, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            stage,
            kind,
            message: message.into(),
        }
    }
}

/// Errors raised while interpreting model values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown entity: {0}")]
    UnknownEntity(String),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
