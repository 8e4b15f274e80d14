//! Dimensional modeling stage entry point.

use std::time::Instant;

use dwh_cleanse::CleanSet;
use dwh_model::{ErrorKind, Stage};
use tracing::{error, info, info_span, warn};

use crate::customer::build_customer_dim;
use crate::error::Result;
use crate::integrity::verify_integrity;
use crate::product::build_product_dim;
use crate::sales::{OrphanTally, build_sales_fact};
use crate::schema::StarSchema;

/// Outcome of one modeling run.
#[derive(Debug, Clone, PartialEq)]
pub struct StarBuild {
    pub schema: StarSchema,
    /// Sale lines excluded because a dimension key could not be resolved.
    pub orphan_count: usize,
    pub orphans: OrphanTally,
}

/// Assembles conformed dimensions and the sales fact from clean entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionalModeler;

impl DimensionalModeler {
    pub fn new() -> Self {
        Self
    }

    /// Builds a complete schema and verifies referential integrity.
    ///
    /// Orphaned sale lines are counted, never raised. An integrity
    /// violation in the assembled schema is fatal.
    pub fn build(&self, clean: &CleanSet) -> Result<StarBuild> {
        let span = info_span!("model");
        let _guard = span.enter();
        let start = Instant::now();

        let (customers, customer_keys) = build_customer_dim(
            &clean.customers.rows,
            &clean.erp_customers.rows,
            &clean.erp_locations.rows,
        );
        let (products, product_keys) =
            build_product_dim(&clean.products.rows, &clean.erp_categories.rows);
        let (sales, orphans) = build_sales_fact(&clean.sales.rows, &customer_keys, &product_keys);

        if orphans.total > 0 {
            warn!(
                stage = %Stage::Model,
                kind = %ErrorKind::OrphanReference,
                orphan_count = orphans.total,
                missing_customer = orphans.missing_customer,
                missing_product = orphans.missing_product,
                "sale lines excluded from fact table"
            );
        }

        let schema = StarSchema {
            customers,
            products,
            sales,
        };
        verify_integrity(&schema).inspect_err(|err| {
            error!(
                stage = %Stage::Model,
                kind = %err.kind(),
                message = %err,
                "referential integrity check failed"
            );
        })?;

        info!(
            stage = %Stage::Model,
            customers = schema.customers.len(),
            products = schema.products.len(),
            sales = schema.sales.len(),
            orphan_count = orphans.total,
            duration_ms = start.elapsed().as_millis() as u64,
            "star schema assembled"
        );
        Ok(StarBuild {
            schema,
            orphan_count: orphans.total,
            orphans,
        })
    }
}
