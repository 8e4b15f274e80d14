//! Warehouse data model.
//!
//! Three layers of entities flow through the pipeline:
//!
//! - **Staging** ([`raw`]): source-shaped, all-text records
//! - **Clean** ([`clean`]): deduplicated, typed, business-key addressable
//! - **Dimensional** ([`dimension`]): star-schema rows with surrogate keys

pub mod clean;
pub mod codes;
pub mod dimension;
pub mod entity;
pub mod error;
pub mod raw;

pub use clean::{
    COUNTRY_NOT_AVAILABLE, Customer, ErpCategory, ErpCustomer, ErpLocation, Product, Sale,
    SaleFlags, SaleKey,
};
pub use codes::{Gender, KnownValue, MaritalStatus, ProductLine};
pub use dimension::{CustomerDim, ProductDim, SalesFact, SurrogateKey};
pub use entity::{Entity, SourceSystem};
pub use error::{ErrorKind, ModelError, PipelineError, Result, Stage};
pub use raw::{
    CustomerRaw, ErpCategoryRaw, ErpCustomerRaw, ErpLocationRaw, ProductRaw, SalesRaw,
    StagedRecord,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_flags_any() {
        let mut flags = SaleFlags::default();
        assert!(!flags.any());
        flags.price_derived = true;
        assert!(flags.any());
    }

    #[test]
    fn customer_dim_serializes() {
        let row = CustomerDim {
            customer_key: 1,
            customer_id: 11000,
            customer_number: Some("AW00011000".to_string()),
            first_name: Some("Jon".to_string()),
            last_name: Some("Yang".to_string()),
            country: Some("Australia".to_string()),
            marital_status: MaritalStatus::Married,
            gender: Gender::Male,
            birth_date: None,
            create_date: None,
        };
        let json = serde_json::to_string(&row).expect("serialize row");
        let round: CustomerDim = serde_json::from_str(&json).expect("deserialize row");
        assert_eq!(round, row);
    }
}
