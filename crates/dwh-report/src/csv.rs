//! CSV table writer.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use crate::error::{ReportError, Result};

/// File name for an output table.
pub fn table_file_name(table: &str) -> String {
    format!("{table}.csv")
}

/// Writes one table as `<dir>/<table>.csv` with a header row. Nulls are
/// written as empty cells.
pub fn write_table(dir: &Path, table: &'static str, df: &mut DataFrame) -> Result<PathBuf> {
    let path = dir.join(table_file_name(table));
    let mut file = File::create(&path).map_err(|source| ReportError::Io {
        operation: "create",
        path: path.clone(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|source| ReportError::Write {
            table,
            path: path.clone(),
            source,
        })?;
    file.sync_all().map_err(|source| ReportError::Io {
        operation: "sync",
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
