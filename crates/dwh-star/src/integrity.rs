//! Referential integrity checks over an assembled schema.

use std::collections::BTreeSet;

use dwh_model::SurrogateKey;

use crate::error::{Result, StarError};
use crate::schema::StarSchema;

fn unique_keys(
    table: &'static str,
    keys: impl Iterator<Item = SurrogateKey>,
) -> Result<BTreeSet<SurrogateKey>> {
    let mut seen = BTreeSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(StarError::DuplicateSurrogateKey { table, key });
        }
    }
    Ok(seen)
}

/// Every fact must reference existing dimension rows, and every surrogate
/// key must be unique within its dimension.
pub fn verify_integrity(schema: &StarSchema) -> Result<()> {
    let customers = unique_keys(
        "dim_customers",
        schema.customers.iter().map(|row| row.customer_key),
    )?;
    let products = unique_keys(
        "dim_products",
        schema.products.iter().map(|row| row.product_key),
    )?;

    for fact in &schema.sales {
        if !customers.contains(&fact.customer_key) {
            return Err(StarError::ReferentialIntegrity {
                table: "fact_sales",
                column: "customer_key",
                key: fact.customer_key,
                order_number: fact.order_number.clone(),
            });
        }
        if !products.contains(&fact.product_key) {
            return Err(StarError::ReferentialIntegrity {
                table: "fact_sales",
                column: "product_key",
                key: fact.product_key,
                order_number: fact.order_number.clone(),
            });
        }
    }
    Ok(())
}
