//! Star-schema rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codes::{Gender, MaritalStatus, ProductLine};

/// Surrogate key assigned by the modeler. Starts at 1 within each run.
pub type SurrogateKey = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDim {
    pub customer_key: SurrogateKey,
    pub customer_id: i64,
    pub customer_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub marital_status: MaritalStatus,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub create_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDim {
    pub product_key: SurrogateKey,
    pub product_id: Option<i64>,
    pub product_number: String,
    pub product_name: Option<String>,
    pub category_id: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub maintenance: Option<String>,
    pub cost: f64,
    pub product_line: ProductLine,
    pub start_date: Option<NaiveDate>,
}

/// Sales fact row. Business keys are carried alongside the surrogate keys
/// for traceability back to the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesFact {
    pub order_number: String,
    pub product_key: SurrogateKey,
    pub customer_key: SurrogateKey,
    pub product_number: String,
    pub customer_id: i64,
    pub order_date: Option<NaiveDate>,
    pub ship_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}
