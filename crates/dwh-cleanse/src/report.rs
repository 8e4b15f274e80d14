//! Cleansing outcome reporting.

use dwh_model::Entity;
use serde::Serialize;

use crate::error::CleanseError;

/// Counts describing what cleansing did to one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanseReport {
    pub entity: Entity,
    /// Staged rows considered.
    pub input_rows: usize,
    /// Clean rows produced.
    pub output_rows: usize,
    /// Rows discarded because another row won for the same business key.
    pub duplicates_dropped: usize,
    /// Product versions excluded because they are no longer active.
    pub historical_dropped: usize,
    /// Surviving rows that had at least one value repaired.
    pub repaired: usize,
    /// Rows excluded because their business key is unusable.
    pub rejected: Vec<CleanseError>,
}

impl CleanseReport {
    pub fn new(entity: Entity, input_rows: usize) -> Self {
        Self {
            entity,
            input_rows,
            output_rows: 0,
            duplicates_dropped: 0,
            historical_dropped: 0,
            repaired: 0,
            rejected: Vec::new(),
        }
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Clean rows for one entity plus the report describing how they were made.
#[derive(Debug, Clone)]
pub struct CleanTable<T> {
    pub rows: Vec<T>,
    pub report: CleanseReport,
}

impl<T> CleanTable<T> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
