//! Build-then-swap publishing of the output directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use dwh_model::Stage;
use dwh_star::StarSchema;
use tracing::{debug, info, info_span, warn};

use crate::csv::write_table;
use crate::error::{ReportError, Result};

/// Output directory contents after a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedTables {
    pub output_dir: PathBuf,
    /// Written files, dimensions first.
    pub files: Vec<PathBuf>,
}

fn io_err(operation: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> ReportError {
    let path = path.to_path_buf();
    move |source| ReportError::Io {
        operation,
        path,
        source,
    }
}

fn sibling(output_dir: &Path, suffix: &str) -> Result<PathBuf> {
    let name = output_dir
        .file_name()
        .ok_or_else(|| ReportError::InvalidOutputDir(output_dir.to_path_buf()))?;
    let mut sibling = name.to_os_string();
    sibling.push(suffix);
    Ok(output_dir.with_file_name(sibling))
}

/// Publishes every table of `schema` into `output_dir`.
///
/// Tables are written into a temporary sibling directory first. Only when
/// all of them are on disk does that directory replace `output_dir`, so
/// readers never see a partial table set. The previous output is restored
/// if the final rename fails.
pub fn publish_tables(output_dir: &Path, schema: &StarSchema) -> Result<PublishedTables> {
    let span = info_span!("publish", output_dir = %output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let parent = output_dir
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    fs::create_dir_all(&parent).map_err(io_err("create directory", &parent))?;

    let staged = tempfile::Builder::new()
        .prefix(".dwh-build-")
        .tempdir_in(&parent)
        .map_err(io_err("create staging directory in", &parent))?;

    let mut names = Vec::new();
    for (table, mut df) in schema.frames()? {
        let path = write_table(staged.path(), table, &mut df)?;
        debug!(table, rows = df.height(), path = %path.display(), "table staged");
        if let Some(name) = path.file_name() {
            names.push(name.to_os_string());
        }
    }

    let staged = staged.keep();
    swap_into_place(&staged, output_dir)?;

    let files: Vec<PathBuf> = names.iter().map(|name| output_dir.join(name)).collect();
    info!(
        stage = %Stage::Publish,
        tables = files.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "output published"
    );
    Ok(PublishedTables {
        output_dir: output_dir.to_path_buf(),
        files,
    })
}

/// Puts a backup left by an interrupted swap back in place of `target`.
///
/// Returns whether a backup was restored.
fn recover_interrupted_swap(target: &Path, backup: &Path) -> Result<bool> {
    if target.exists() || !backup.is_dir() {
        return Ok(false);
    }
    fs::rename(backup, target).map_err(io_err("restore interrupted backup to", target))?;
    warn!(path = %target.display(), "restored output left behind by an interrupted publish");
    Ok(true)
}

/// Moves `staged` to `target`, keeping the old `target` as a backup until
/// the rename succeeds.
///
/// A directory cannot be renamed over a non-empty one, so the swap is two
/// renames back to back. Between them `target` is briefly absent; it never
/// holds a partial table set. A backup found without its `target` is
/// restored before anything else happens.
fn swap_into_place(staged: &Path, target: &Path) -> Result<()> {
    let backup = sibling(target, ".previous")?;
    recover_interrupted_swap(target, &backup)?;
    if backup.exists() {
        fs::remove_dir_all(&backup).map_err(io_err("remove old backup", &backup))?;
    }

    let had_previous = target.exists();
    if had_previous {
        fs::rename(target, &backup).map_err(io_err("move previous output to", &backup))?;
    }

    if let Err(source) = fs::rename(staged, target) {
        let restored = had_previous && fs::rename(&backup, target).is_ok();
        if let Err(err) = fs::remove_dir_all(staged) {
            warn!(path = %staged.display(), error = %err, "failed to remove staged output");
        }
        return Err(ReportError::Swap {
            staged: staged.to_path_buf(),
            target: target.to_path_buf(),
            restored,
            source,
        });
    }

    if had_previous && let Err(err) = fs::remove_dir_all(&backup) {
        warn!(path = %backup.display(), error = %err, "failed to remove previous output");
    }
    Ok(())
}
