//! The assembled star schema and its tabular export.

use chrono::NaiveDate;
use dwh_model::{CustomerDim, ProductDim, SalesFact};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{Result, StarError};

pub const CUSTOMER_TABLE: &str = "dim_customers";
pub const PRODUCT_TABLE: &str = "dim_products";
pub const SALES_TABLE: &str = "fact_sales";

/// Two conformed dimensions and one fact table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StarSchema {
    pub customers: Vec<CustomerDim>,
    pub products: Vec<ProductDim>,
    pub sales: Vec<SalesFact>,
}

/// Row counts per output table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub customers: usize,
    pub products: usize,
    pub sales: usize,
}

impl StarSchema {
    pub fn counts(&self) -> TableCounts {
        TableCounts {
            customers: self.customers.len(),
            products: self.products.len(),
            sales: self.sales.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty() && self.products.is_empty() && self.sales.is_empty()
    }

    /// Hex SHA-256 over the schema's JSON serialization. Equal inputs give
    /// equal fingerprints across runs.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        let digest = Sha256::digest(&bytes);
        Ok(hex::encode(digest))
    }

    pub fn customers_frame(&self) -> Result<DataFrame> {
        let rows = &self.customers;
        frame(
            CUSTOMER_TABLE,
            vec![
                column("customer_key", rows, |r| r.customer_key),
                column("customer_id", rows, |r| r.customer_id),
                column("customer_number", rows, |r| r.customer_number.clone()),
                column("first_name", rows, |r| r.first_name.clone()),
                column("last_name", rows, |r| r.last_name.clone()),
                column("country", rows, |r| r.country.clone()),
                column("marital_status", rows, |r| r.marital_status.as_str()),
                column("gender", rows, |r| r.gender.as_str()),
                column("birth_date", rows, |r| date_text(r.birth_date)),
                column("create_date", rows, |r| date_text(r.create_date)),
            ],
        )
    }

    pub fn products_frame(&self) -> Result<DataFrame> {
        let rows = &self.products;
        frame(
            PRODUCT_TABLE,
            vec![
                column("product_key", rows, |r| r.product_key),
                column("product_id", rows, |r| r.product_id),
                column("product_number", rows, |r| r.product_number.clone()),
                column("product_name", rows, |r| r.product_name.clone()),
                column("category_id", rows, |r| r.category_id.clone()),
                column("category", rows, |r| r.category.clone()),
                column("subcategory", rows, |r| r.subcategory.clone()),
                column("maintenance", rows, |r| r.maintenance.clone()),
                column("cost", rows, |r| r.cost),
                column("product_line", rows, |r| r.product_line.as_str()),
                column("start_date", rows, |r| date_text(r.start_date)),
            ],
        )
    }

    pub fn sales_frame(&self) -> Result<DataFrame> {
        let rows = &self.sales;
        frame(
            SALES_TABLE,
            vec![
                column("order_number", rows, |r| r.order_number.clone()),
                column("product_key", rows, |r| r.product_key),
                column("customer_key", rows, |r| r.customer_key),
                column("product_number", rows, |r| r.product_number.clone()),
                column("customer_id", rows, |r| r.customer_id),
                column("order_date", rows, |r| date_text(r.order_date)),
                column("ship_date", rows, |r| date_text(r.ship_date)),
                column("due_date", rows, |r| date_text(r.due_date)),
                column("sales_amount", rows, |r| r.amount),
                column("quantity", rows, |r| r.quantity),
                column("price", rows, |r| r.price),
            ],
        )
    }

    /// All three tables as `(name, frame)` pairs, dimensions first.
    pub fn frames(&self) -> Result<Vec<(&'static str, DataFrame)>> {
        Ok(vec![
            (CUSTOMER_TABLE, self.customers_frame()?),
            (PRODUCT_TABLE, self.products_frame()?),
            (SALES_TABLE, self.sales_frame()?),
        ])
    }
}

fn column<R, T, P: ?Sized>(name: &str, rows: &[R], value: impl Fn(&R) -> T) -> Column
where
    Series: NamedFrom<Vec<T>, P>,
{
    let values: Vec<T> = rows.iter().map(value).collect();
    Series::new(name.into(), values).into()
}

fn date_text(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

fn frame(table: &'static str, columns: Vec<Column>) -> Result<DataFrame> {
    DataFrame::new(columns).map_err(|source| StarError::Frame { table, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwh_model::{Gender, MaritalStatus, ProductLine};

    fn schema() -> StarSchema {
        StarSchema {
            customers: vec![CustomerDim {
                customer_key: 1,
                customer_id: 11000,
                customer_number: Some("AW00011000".to_string()),
                first_name: Some("Jon".to_string()),
                last_name: Some("Yang".to_string()),
                country: Some("Australia".to_string()),
                marital_status: MaritalStatus::Married,
                gender: Gender::Male,
                birth_date: NaiveDate::from_ymd_opt(1971, 10, 6),
                create_date: None,
            }],
            products: vec![ProductDim {
                product_key: 1,
                product_id: Some(310),
                product_number: "BK-R93R-62".to_string(),
                product_name: Some("Road-150 Red- 62".to_string()),
                category_id: "BI_RB".to_string(),
                category: Some("Bikes".to_string()),
                subcategory: Some("Road Bikes".to_string()),
                maintenance: Some("Yes".to_string()),
                cost: 2171.0,
                product_line: ProductLine::Road,
                start_date: NaiveDate::from_ymd_opt(2003, 7, 1),
            }],
            sales: vec![SalesFact {
                order_number: "SO43697".to_string(),
                product_key: 1,
                customer_key: 1,
                product_number: "BK-R93R-62".to_string(),
                customer_id: 11000,
                order_date: NaiveDate::from_ymd_opt(2010, 12, 29),
                ship_date: None,
                due_date: None,
                amount: Some(3578.0),
                quantity: Some(1),
                price: Some(3578.0),
            }],
        }
    }

    #[test]
    fn fingerprint_is_stable_and_content_sensitive() {
        let a = schema().fingerprint().unwrap();
        assert_eq!(a.len(), 64);
        assert_eq!(a, schema().fingerprint().unwrap());

        let mut changed = schema();
        changed.sales[0].quantity = Some(2);
        assert_ne!(a, changed.fingerprint().unwrap());
    }

    #[test]
    fn frames_have_one_row_per_record() {
        let frames = schema().frames().unwrap();
        let names: Vec<&str> = frames.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec![CUSTOMER_TABLE, PRODUCT_TABLE, SALES_TABLE]);
        for (_, df) in &frames {
            assert_eq!(df.height(), 1);
        }
        assert_eq!(frames[0].1.width(), 10);
        assert_eq!(frames[2].1.width(), 11);
    }

    #[test]
    fn counts_tables() {
        let counts = schema().counts();
        assert_eq!(counts, TableCounts { customers: 1, products: 1, sales: 1 });
        assert!(StarSchema::default().is_empty());
    }
}
