//! Dimensional modeler.
//!
//! Merges clean entities from both source systems into a star schema:
//!
//! - `dim_customers`: primary customers joined with supplementary
//!   demographics and location on the aligned customer number
//! - `dim_products`: active products joined with their category
//! - `fact_sales`: sale lines resolved to both dimensions by business key
//!
//! Surrogate keys follow ascending business key order, so equal inputs
//! always produce equal keys. Cross-source conflicts go through
//! [`prefer_known`].

mod customer;
mod error;
mod integrity;
mod modeler;
mod product;
mod reconcile;
mod sales;
mod schema;
mod surrogate;
mod warehouse;

pub use customer::build_customer_dim;
pub use error::{Result, StarError};
pub use integrity::verify_integrity;
pub use modeler::{DimensionalModeler, StarBuild};
pub use product::build_product_dim;
pub use reconcile::prefer_known;
pub use sales::{OrphanTally, build_sales_fact};
pub use schema::{CUSTOMER_TABLE, PRODUCT_TABLE, SALES_TABLE, StarSchema, TableCounts};
pub use surrogate::{KeyIndex, assign_keys};
pub use warehouse::Warehouse;
