//! Cleansing transformer.
//!
//! Turns staged (raw) records into clean, business-key-addressable
//! entities. Each entity has its own rule module:
//!
//! - [`customer`]: latest-created row per customer, trimmed text, coded
//!   marital status and gender
//! - [`product`]: category/item key split, active version only, coded
//!   product line
//! - [`sales`]: date ordering repair, price and amount reconciliation
//! - [`erp`]: supplementary demographics, locations, and categories
//!
//! Repairable problems are fixed in place. Rows whose business key is
//! unusable are excluded and reported as [`CleanseError`]s.

mod cleanser;
pub mod customer;
mod dedupe;
mod error;
pub mod erp;
pub mod product;
mod report;
pub mod sales;
pub mod values;

pub use cleanser::{CleanOutput, CleanSet, Cleanser};
pub use dedupe::keep_max_by_key;
pub use error::{CleanseError, Result};
pub use report::{CleanTable, CleanseReport};
