//! Clean entities produced by cleansing.
//!
//! Each clean entity is addressable by a business key that is unique within
//! its table. Optional fields are `None` when the source value was blank or
//! could not be repaired; coded attributes use the enumerations in
//! [`crate::codes`] instead.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codes::{Gender, MaritalStatus, ProductLine};

/// Customer from the primary system, keyed by `customer_id`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    /// Cross-system alignment key (e.g. `AW00011000`).
    pub customer_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub marital_status: MaritalStatus,
    pub gender: Gender,
    pub create_date: Option<NaiveDate>,
}

/// Currently-active product version, keyed by `product_number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_number: String,
    pub product_id: Option<i64>,
    /// Category reference derived from the encoded product key.
    pub category_id: String,
    pub name: Option<String>,
    pub cost: f64,
    pub line: ProductLine,
    pub start_date: Option<NaiveDate>,
}

/// Business key of a sale line: one product within one order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SaleKey {
    pub order_number: String,
    pub product_number: String,
}

/// Repairs applied to a sale during cleansing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleFlags {
    /// An order/ship/due ordering violation nulled at least one date.
    pub date_repaired: bool,
    /// The stored amount was replaced by `quantity * price`.
    pub amount_recomputed: bool,
    /// Price was derived from amount and quantity.
    pub price_derived: bool,
    /// Price could not be resolved (e.g. zero quantity).
    pub price_unresolved: bool,
}

impl SaleFlags {
    pub fn any(&self) -> bool {
        self.date_repaired || self.amount_recomputed || self.price_derived || self.price_unresolved
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub key: SaleKey,
    /// Referenced customer; `None` when the source id was blank or invalid.
    pub customer_id: Option<i64>,
    pub order_date: Option<NaiveDate>,
    pub ship_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    pub amount: Option<f64>,
    pub flags: SaleFlags,
}

/// Demographics from the supplementary system, keyed by aligned customer number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ErpCustomer {
    pub customer_number: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
}

/// Customer location, keyed by aligned customer number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ErpLocation {
    pub customer_number: String,
    /// Canonical country name, or the literal `n/a`.
    pub country: String,
}

/// Product category lookup, keyed by category id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ErpCategory {
    pub id: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub maintenance: Option<String>,
}

/// Sentinel written for a missing country.
pub const COUNTRY_NOT_AVAILABLE: &str = "n/a";
