use std::path::PathBuf;

use dwh_model::Entity;
use dwh_star::TableCounts;
use serde::Serialize;

/// Per-entity counts across the load and cleanse stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub entity: Entity,
    pub staged: usize,
    pub clean: usize,
    pub duplicates_dropped: usize,
    pub historical_dropped: usize,
    pub repaired: usize,
    pub rejected: usize,
}

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    /// Rows per published table.
    pub row_counts: TableCounts,
    pub entities: Vec<EntitySummary>,
    /// Sale lines excluded for unresolved dimension keys.
    pub orphan_count: usize,
    pub duration_ms: u64,
    /// Content fingerprint of the published schema.
    pub fingerprint: String,
    /// `None` for dry runs.
    pub output_dir: Option<PathBuf>,
}
