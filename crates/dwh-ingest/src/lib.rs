//! Raw extract loading.
//!
//! This crate reads source extracts (CSV files) into source-shaped staging
//! tables without interpreting any value.
//!
//! # Features
//!
//! - **Source Catalog**: Static mapping of entity to extract location
//! - **Layout Checks**: Header field count and names verified per entity
//! - **Staging**: Whole-table replacement after a complete read
//!
//! # Example
//!
//! ```ignore
//! use dwh_ingest::{LoaderOptions, RawLoader, SourceCatalog};
//! use dwh_model::Entity;
//!
//! let mut loader = RawLoader::new(SourceCatalog::new("datasets"), LoaderOptions::default());
//! let result = loader.load(Entity::Customer)?;
//! println!("{} rows in {} ms", result.row_count, result.duration_ms);
//! ```

mod catalog;
mod csv;
mod error;
mod loader;
mod staging;

// === Error Types ===
pub use error::{IngestError, Result};

// === Source Catalog ===
pub use catalog::SourceCatalog;

// === CSV Reading ===
pub use crate::csv::{check_header, normalize_header, read_staged, validate_encoding};

// === Loading ===
pub use loader::{LoadFailure, LoadReport, LoadResult, LoaderOptions, RawLoader};
pub use staging::{StagedRows, StagingArea};
