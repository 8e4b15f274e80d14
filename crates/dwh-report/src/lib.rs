//! Output publishing.
//!
//! Writes the star schema as comma-delimited tables:
//!
//! - `dim_customers.csv`
//! - `dim_products.csv`
//! - `fact_sales.csv`
//!
//! Each run replaces the output directory wholesale via
//! [`publish_tables`].

mod csv;
mod error;
mod publish;

pub use crate::csv::{table_file_name, write_table};
pub use error::{ReportError, Result};
pub use publish::{PublishedTables, publish_tables};
