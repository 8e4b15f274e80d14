//! Published star schema.

use std::sync::{Arc, PoisonError, RwLock};

use crate::schema::StarSchema;

/// Holds the most recently published schema.
///
/// A run assembles its schema completely before calling
/// [`Warehouse::publish`], which swaps it in under the write lock. Readers
/// hold an `Arc` snapshot and never observe a partially built schema.
#[derive(Debug, Default)]
pub struct Warehouse {
    current: RwLock<Arc<StarSchema>>,
}

impl Warehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot. Empty until the first publish.
    pub fn snapshot(&self) -> Arc<StarSchema> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the published schema, returning the previous one.
    pub fn publish(&self, schema: StarSchema) -> Arc<StarSchema> {
        let next = Arc::new(schema);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}
