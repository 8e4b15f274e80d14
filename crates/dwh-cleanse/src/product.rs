//! Product cleansing (primary system).
//!
//! The source keeps one row per product version with an effective-date
//! range. Only the open version (no end date) is carried forward.

use std::cmp::Ordering;

use dwh_model::{Entity, Product, ProductLine, ProductRaw};

use crate::dedupe::keep_max_by_key;
use crate::error::{CleanseError, Result};
use crate::report::{CleanTable, CleanseReport};
use crate::values::{clean_text, non_blank, parse_date, parse_decimal, parse_integer};

/// Splits an encoded product key into `(category_id, product_number)`.
///
/// `CO-RF-FR-R92B-58` becomes `("CO_RF", "FR-R92B-58")`: the first two
/// segments form the category reference, the remainder the item key.
pub fn split_product_key(key: &str) -> Option<(String, String)> {
    let mut parts = key.trim().splitn(3, '-');
    let major = parts.next().filter(|part| !part.is_empty())?;
    let minor = parts.next().filter(|part| !part.is_empty())?;
    let item = parts.next().filter(|part| !part.is_empty())?;
    Some((format!("{major}_{minor}"), item.to_string()))
}

/// A parsed product version, before the active-version filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductVersion {
    pub product: Product,
    /// Whether the source row carries an end date.
    pub is_closed: bool,
}

pub fn clean_product(row: usize, raw: &ProductRaw) -> Result<ProductVersion> {
    let Some(key) = non_blank(&raw.prd_key) else {
        return Err(CleanseError::MissingBusinessKey {
            entity: Entity::Product,
            row,
            column: "prd_key",
        });
    };
    let (category_id, product_number) =
        split_product_key(key).ok_or_else(|| CleanseError::InvalidBusinessKey {
            entity: Entity::Product,
            row,
            column: "prd_key",
            value: key.to_string(),
        })?;

    Ok(ProductVersion {
        product: Product {
            product_number,
            product_id: parse_integer(&raw.prd_id),
            category_id,
            name: clean_text(&raw.prd_nm),
            cost: parse_decimal(&raw.prd_cost).unwrap_or(0.0),
            line: ProductLine::from_code(Some(&raw.prd_line)),
            start_date: parse_date(&raw.prd_start_dt),
        },
        is_closed: non_blank(&raw.prd_end_dt).is_some(),
    })
}

/// Total order among open versions of the same product: the latest start
/// date supersedes the others.
fn rank_version(a: &Product, b: &Product) -> Ordering {
    a.start_date
        .cmp(&b.start_date)
        .then_with(|| a.product_id.cmp(&b.product_id))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.category_id.cmp(&b.category_id))
        .then_with(|| a.line.cmp(&b.line))
        .then_with(|| a.cost.total_cmp(&b.cost))
}

/// Cleans staged products down to one active version per product number.
pub fn clean_products(raw: &[ProductRaw]) -> CleanTable<Product> {
    let mut report = CleanseReport::new(Entity::Product, raw.len());
    let mut open = Vec::with_capacity(raw.len());
    for (idx, row) in raw.iter().enumerate() {
        match clean_product(idx + 1, row) {
            Ok(version) if version.is_closed => report.historical_dropped += 1,
            Ok(version) => open.push(version.product),
            Err(err) => report.rejected.push(err),
        }
    }

    let (rows, dropped) = keep_max_by_key(
        open,
        |product| product.product_number.clone(),
        rank_version,
    );
    report.duplicates_dropped = dropped;
    report.output_rows = rows.len();
    CleanTable { rows, report }
}
