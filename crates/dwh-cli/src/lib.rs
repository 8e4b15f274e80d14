//! Orchestration for the sales warehouse pipeline.
//!
//! [`pipeline::run_pipeline`] drives load, cleanse, model, and publish in
//! strict order. The `dwh` binary wraps it with argument parsing, logging
//! setup, and a summary table.

pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;

pub use pipeline::{PipelineConfig, run_pipeline};
pub use types::{EntitySummary, PipelineResult};
