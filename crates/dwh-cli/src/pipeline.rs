//! Warehouse pipeline with explicit stages.
//!
//! The pipeline runs these stages in order, each consuming only the
//! previous stage's output:
//! 1. **Load**: Read every source extract into staging tables
//! 2. **Cleanse**: Deduplicate, normalize, and repair staged rows
//! 3. **Model**: Assemble dimensions and facts, verify integrity
//! 4. **Publish**: Write output tables and swap in the new schema
//!
//! A structural failure aborts the run at the failing stage.

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use dwh_cleanse::{CleanSet, Cleanser};
use dwh_ingest::{LoadReport, LoaderOptions, RawLoader, SourceCatalog, StagingArea};
use dwh_model::{Entity, PipelineError, Stage};
use dwh_report::publish_tables;
use dwh_star::{DimensionalModeler, StarBuild, Warehouse};
use tracing::{error, info, info_span};

use crate::types::{EntitySummary, PipelineResult};

/// Output directory used when none is configured, relative to the source root.
pub const DEFAULT_OUTPUT_DIR: &str = "warehouse";

/// Everything a run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source_root: PathBuf,
    pub catalog: SourceCatalog,
    /// Defaults to `<source_root>/warehouse`.
    pub output_dir: Option<PathBuf>,
    /// Reference date for rules that compare against "today".
    pub as_of: NaiveDate,
    pub loader: LoaderOptions,
    /// Build everything but skip writing output files.
    pub dry_run: bool,
}

impl PipelineConfig {
    pub fn new(source_root: impl Into<PathBuf>, as_of: NaiveDate) -> Self {
        let source_root = source_root.into();
        Self {
            catalog: SourceCatalog::new(&source_root),
            source_root,
            output_dir: None,
            as_of,
            loader: LoaderOptions::default(),
            dry_run: false,
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.source_root.join(DEFAULT_OUTPUT_DIR))
    }
}

fn in_stage<T>(
    stage: Stage,
    run: impl FnOnce() -> Result<T, PipelineError>,
) -> Result<T, PipelineError> {
    let span = info_span!("stage", stage = %stage);
    let _guard = span.enter();
    let start = Instant::now();
    info!(stage = %stage, "stage started");

    let result = run();
    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => info!(stage = %stage, duration_ms, "stage finished"),
        Err(err) => error!(
            stage = %err.stage,
            kind = %err.kind,
            message = %err.message,
            duration_ms,
            "stage failed"
        ),
    }
    result
}

// ============================================================================
// Stage 1: Load
// ============================================================================

/// Result of the load stage.
#[derive(Debug)]
pub struct Loaded {
    pub staging: StagingArea,
    pub report: LoadReport,
}

/// Loads every extract. Fails if any extract failed to load.
pub fn load_stage(config: &PipelineConfig) -> Result<Loaded, PipelineError> {
    in_stage(Stage::Load, || {
        let mut loader = RawLoader::new(config.catalog.clone(), config.loader);
        let report = loader.load_all();
        if let Some(failure) = report.failures.first() {
            let mut err = PipelineError::from(&failure.error);
            let others = report.failures.len() - 1;
            if others > 0 {
                err.message = format!("{} ({others} more extracts failed)", err.message);
            }
            return Err(err);
        }
        info!(
            stage = %Stage::Load,
            extracts = report.loaded.len(),
            rows = report.loaded.iter().map(|result| result.row_count).sum::<usize>(),
            "extracts staged"
        );
        Ok(Loaded {
            staging: loader.into_staging(),
            report,
        })
    })
}

// ============================================================================
// Stage 2: Cleanse
// ============================================================================

/// Cleans every staged entity. Unusable rows are excluded and reported,
/// never fatal.
pub fn cleanse_stage(
    config: &PipelineConfig,
    staging: &StagingArea,
) -> Result<CleanSet, PipelineError> {
    in_stage(Stage::Cleanse, || {
        let clean = Cleanser::new(config.as_of).transform_all(staging);
        info!(
            stage = %Stage::Cleanse,
            rejected = clean.rejected_count(),
            "entities cleansed"
        );
        Ok(clean)
    })
}

// ============================================================================
// Stage 3: Model
// ============================================================================

/// Result of the model stage.
#[derive(Debug, Clone)]
pub struct Modeled {
    pub build: StarBuild,
    pub fingerprint: String,
}

pub fn model_stage(clean: &CleanSet) -> Result<Modeled, PipelineError> {
    in_stage(Stage::Model, || {
        let build = DimensionalModeler::new().build(clean)?;
        let fingerprint = build.schema.fingerprint()?;
        Ok(Modeled { build, fingerprint })
    })
}

// ============================================================================
// Stage 4: Publish
// ============================================================================

/// Writes output tables (unless dry run) and swaps the schema into
/// `warehouse`. Returns the output directory that was written.
pub fn publish_stage(
    config: &PipelineConfig,
    modeled: Modeled,
    warehouse: &Warehouse,
) -> Result<Option<PathBuf>, PipelineError> {
    in_stage(Stage::Publish, || {
        let schema = modeled.build.schema;
        let output_dir = if config.dry_run {
            info!(stage = %Stage::Publish, "dry run, output files not written");
            None
        } else {
            let published = publish_tables(&config.output_dir(), &schema)?;
            Some(published.output_dir)
        };
        warehouse.publish(schema);
        Ok(output_dir)
    })
}

// ============================================================================
// Orchestration
// ============================================================================

fn entity_summaries(report: &LoadReport, clean: &CleanSet) -> Vec<EntitySummary> {
    Entity::ALL
        .into_iter()
        .map(|entity| {
            let cleansed = clean.report(entity);
            EntitySummary {
                entity,
                staged: report.row_count(entity).unwrap_or(0),
                clean: cleansed.output_rows,
                duplicates_dropped: cleansed.duplicates_dropped,
                historical_dropped: cleansed.historical_dropped,
                repaired: cleansed.repaired,
                rejected: cleansed.rejected_count(),
            }
        })
        .collect()
}

/// Runs every stage and publishes into a fresh [`Warehouse`].
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineResult, PipelineError> {
    run_pipeline_into(config, &Warehouse::new())
}

/// Runs every stage and publishes into `warehouse`. On failure the
/// previously published schema and output directory stay untouched.
pub fn run_pipeline_into(
    config: &PipelineConfig,
    warehouse: &Warehouse,
) -> Result<PipelineResult, PipelineError> {
    let span = info_span!(
        "pipeline",
        source_root = %config.source_root.display(),
        as_of = %config.as_of
    );
    let _guard = span.enter();
    let start = Instant::now();

    let loaded = load_stage(config)?;
    let clean = cleanse_stage(config, &loaded.staging)?;
    let modeled = model_stage(&clean)?;

    let entities = entity_summaries(&loaded.report, &clean);
    let row_counts = modeled.build.schema.counts();
    let orphan_count = modeled.build.orphan_count;
    let fingerprint = modeled.fingerprint.clone();
    let output_dir = publish_stage(config, modeled, warehouse)?;

    let duration_ms = start.elapsed().as_millis() as u64;
    info!(
        customers = row_counts.customers,
        products = row_counts.products,
        sales = row_counts.sales,
        orphan_count,
        fingerprint = %fingerprint,
        duration_ms,
        "pipeline finished"
    );
    Ok(PipelineResult {
        row_counts,
        entities,
        orphan_count,
        duration_ms,
        fingerprint,
        output_dir,
    })
}
