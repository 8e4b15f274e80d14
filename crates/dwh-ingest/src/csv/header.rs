//! Extract header normalization and layout checks.

use std::path::Path;

use dwh_model::Entity;

use crate::error::{IngestError, Result};

/// Normalizes a header value: BOM stripped, whitespace trimmed.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Checks an extract header against the staging layout of `entity`.
///
/// Names are compared after normalization and without regard to case.
pub fn check_header(entity: Entity, path: &Path, headers: &[String]) -> Result<()> {
    let expected = entity.columns();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    if headers.len() != expected.len() {
        return Err(IngestError::ColumnCount {
            entity,
            path: path.to_path_buf(),
            expected: expected.len(),
            found: headers.len(),
        });
    }
    for (position, (found, wanted)) in headers.iter().zip(expected).enumerate() {
        if !found.eq_ignore_ascii_case(wanted) {
            return Err(IngestError::ColumnName {
                entity,
                path: path.to_path_buf(),
                position: position + 1,
                expected: wanted,
                found: found.clone(),
            });
        }
    }
    Ok(())
}
