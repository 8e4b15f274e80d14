//! Error types for publishing output tables.

use std::path::PathBuf;

use dwh_model::{ErrorKind, PipelineError, Stage};
use dwh_star::StarError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {table} to {path}: {source}")]
    Write {
        table: &'static str,
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    #[error("failed to export tables: {0}")]
    Export(#[from] StarError),

    /// Swapping the new output into place failed. `restored` tells whether
    /// the previous output was put back.
    #[error("failed to publish {staged} as {target} (restored: {restored}): {source}")]
    Swap {
        staged: PathBuf,
        target: PathBuf,
        restored: bool,
        #[source]
        source: std::io::Error,
    },

    #[error("output path {0} does not name a directory")]
    InvalidOutputDir(PathBuf),
}

impl From<ReportError> for PipelineError {
    fn from(err: ReportError) -> Self {
        PipelineError::new(Stage::Publish, ErrorKind::OutputFailure, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
