//! Error types for raw extract loading.

use std::path::PathBuf;

use dwh_model::{Entity, ErrorKind, PipelineError, Stage};
use thiserror::Error;

/// Errors that can occur while loading an extract into staging.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Extract not found at the resolved location.
    #[error("extract not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the extract.
    #[error("failed to read extract {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extract uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse a record.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === Layout Errors ===
    /// Extract has no header row.
    #[error("extract has no header row: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header field count differs from the staging layout.
    #[error("{entity} header in {path} has {found} columns, expected {expected}")]
    ColumnCount {
        entity: Entity,
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// Header field name differs from the staging layout.
    #[error("{entity} header in {path}: column {position} is '{found}', expected '{expected}'")]
    ColumnName {
        entity: Entity,
        path: PathBuf,
        position: usize,
        expected: &'static str,
        found: String,
    },

    /// A record's field count differs from the header.
    #[error("record on line {line} of {path} has {found} fields, expected {expected}")]
    RecordLength {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
}

impl IngestError {
    /// Classification in the pipeline error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IngestError::FileNotFound { .. }
            | IngestError::FileRead { .. }
            | IngestError::UnsupportedEncoding { .. }
            | IngestError::CsvParse { .. } => ErrorKind::SourceUnavailable,
            IngestError::EmptyCsv { .. }
            | IngestError::ColumnCount { .. }
            | IngestError::ColumnName { .. }
            | IngestError::RecordLength { .. } => ErrorKind::SchemaMismatch,
        }
    }
}

impl From<&IngestError> for PipelineError {
    fn from(err: &IngestError) -> Self {
        PipelineError::new(Stage::Load, err.kind(), err.to_string())
    }
}

impl From<IngestError> for PipelineError {
    fn from(err: IngestError) -> Self {
        PipelineError::from(&err)
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
