//! Raw loader: extracts into staging.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use dwh_model::{Entity, Stage};
use tracing::{error, info, info_span};

use crate::catalog::SourceCatalog;
use crate::error::{IngestError, Result};
use crate::staging::{StagedRows, StagingArea};

type ReadOutcome = (Entity, PathBuf, Result<StagedRows>, Duration);

/// Loader behavior switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoaderOptions {
    /// Read extracts concurrently. Tables are still swapped in pipeline order.
    pub parallel: bool,
    /// Stop at the first failed extract instead of attempting the rest.
    pub fail_fast: bool,
}

/// Outcome of loading one extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    pub entity: Entity,
    pub path: PathBuf,
    pub row_count: usize,
    pub duration_ms: u64,
}

/// An extract that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    pub entity: Entity,
    pub error: IngestError,
}

/// Outcome of loading every extract in the catalog.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<LoadResult>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn row_count(&self, entity: Entity) -> Option<usize> {
        self.loaded
            .iter()
            .find(|result| result.entity == entity)
            .map(|result| result.row_count)
    }
}

pub(crate) fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Loads extracts into a [`StagingArea`].
///
/// Each table is read completely before it replaces the previous content,
/// so a failed load leaves the prior staging table in place.
#[derive(Debug)]
pub struct RawLoader {
    catalog: SourceCatalog,
    options: LoaderOptions,
    staging: StagingArea,
}

impl RawLoader {
    pub fn new(catalog: SourceCatalog, options: LoaderOptions) -> Self {
        Self {
            catalog,
            options,
            staging: StagingArea::default(),
        }
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn into_staging(self) -> StagingArea {
        self.staging
    }

    /// Loads one extract, replacing its staging table.
    pub fn load(&mut self, entity: Entity) -> Result<LoadResult> {
        let path = self.catalog.resolve(entity);
        let span = info_span!("load", entity = %entity, path = %path.display());
        let _guard = span.enter();
        let start = Instant::now();

        let rows = StagedRows::read(entity, &path).inspect_err(|err| log_failure(entity, err))?;
        Ok(self.apply(entity, path, rows, start.elapsed()))
    }

    /// Loads every extract in the catalog.
    ///
    /// Failures are collected per entity; other extracts are still loaded
    /// unless `fail_fast` is set.
    pub fn load_all(&mut self) -> LoadReport {
        if self.options.parallel {
            self.load_all_parallel()
        } else {
            self.load_all_sequential()
        }
    }

    fn load_all_sequential(&mut self) -> LoadReport {
        let mut report = LoadReport::default();
        for entity in Entity::ALL {
            match self.load(entity) {
                Ok(result) => report.loaded.push(result),
                Err(error) => {
                    report.failures.push(LoadFailure { entity, error });
                    if self.options.fail_fast {
                        break;
                    }
                }
            }
        }
        report
    }

    fn load_all_parallel(&mut self) -> LoadReport {
        let catalog = &self.catalog;
        let reads: Vec<ReadOutcome> = std::thread::scope(|scope| {
            let handles: Vec<_> = Entity::ALL
                .into_iter()
                .map(|entity| {
                    let path = catalog.resolve(entity);
                    scope.spawn(move || {
                        let start = Instant::now();
                        let rows = StagedRows::read(entity, &path);
                        (entity, path, rows, start.elapsed())
                    })
                })
                .collect();
            handles
                .into_iter()
                .zip(Entity::ALL)
                .map(|(handle, entity)| {
                    handle.join().unwrap_or_else(|_| {
                        let path = catalog.resolve(entity);
                        let error = IngestError::CsvParse {
                            path: path.clone(),
                            message: "reader thread panicked".to_string(),
                        };
                        (entity, path, Err(error), Duration::ZERO)
                    })
                })
                .collect()
        });

        let mut report = LoadReport::default();
        for (entity, path, rows, elapsed) in reads {
            let span = info_span!("load", entity = %entity, path = %path.display());
            let _guard = span.enter();
            match rows {
                Ok(rows) => report.loaded.push(self.apply(entity, path, rows, elapsed)),
                Err(error) => {
                    log_failure(entity, &error);
                    report.failures.push(LoadFailure { entity, error });
                    if self.options.fail_fast {
                        break;
                    }
                }
            }
        }
        report
    }

    fn apply(
        &mut self,
        entity: Entity,
        path: PathBuf,
        rows: StagedRows,
        elapsed: Duration,
    ) -> LoadResult {
        let row_count = rows.len();
        let replaced = self.staging.replace(rows);
        let duration_ms = millis(elapsed);
        info!(
            stage = %Stage::Load,
            entity = %entity,
            row_count,
            replaced,
            duration_ms,
            "staging table loaded"
        );
        LoadResult {
            entity,
            path,
            row_count,
            duration_ms,
        }
    }
}

fn log_failure(entity: Entity, err: &IngestError) {
    error!(
        stage = %Stage::Load,
        entity = %entity,
        kind = %err.kind(),
        message = %err,
        "extract load failed"
    );
}
