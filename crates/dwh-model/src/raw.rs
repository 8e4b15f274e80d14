//! Staging (raw) records.
//!
//! Raw records mirror their extract 1:1: one `String` per column, in file
//! order, holding the textual value exactly as read. No interpretation
//! happens here; blank cells stay blank.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// A record type that can be staged from an extract.
///
/// Fields are deserialized positionally, so field declaration order must
/// match [`Entity::columns`] for [`StagedRecord::ENTITY`].
pub trait StagedRecord: DeserializeOwned + Send + 'static {
    const ENTITY: Entity;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRaw {
    pub cst_id: String,
    pub cst_key: String,
    pub cst_firstname: String,
    pub cst_lastname: String,
    pub cst_marital_status: String,
    pub cst_gndr: String,
    pub cst_create_date: String,
}

impl StagedRecord for CustomerRaw {
    const ENTITY: Entity = Entity::Customer;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRaw {
    pub prd_id: String,
    pub prd_key: String,
    pub prd_nm: String,
    pub prd_cost: String,
    pub prd_line: String,
    pub prd_start_dt: String,
    pub prd_end_dt: String,
}

impl StagedRecord for ProductRaw {
    const ENTITY: Entity = Entity::Product;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRaw {
    pub sls_ord_num: String,
    pub sls_prd_key: String,
    pub sls_cust_id: String,
    pub sls_order_dt: String,
    pub sls_ship_dt: String,
    pub sls_due_dt: String,
    pub sls_sales: String,
    pub sls_quantity: String,
    pub sls_price: String,
}

impl StagedRecord for SalesRaw {
    const ENTITY: Entity = Entity::Sale;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpCustomerRaw {
    pub cid: String,
    pub bdate: String,
    #[serde(rename = "gen")]
    pub gender: String,
}

impl StagedRecord for ErpCustomerRaw {
    const ENTITY: Entity = Entity::ErpCustomer;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpLocationRaw {
    pub cid: String,
    pub cntry: String,
}

impl StagedRecord for ErpLocationRaw {
    const ENTITY: Entity = Entity::ErpLocation;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpCategoryRaw {
    pub id: String,
    pub cat: String,
    pub subcat: String,
    pub maintenance: String,
}

impl StagedRecord for ErpCategoryRaw {
    const ENTITY: Entity = Entity::ErpCategory;
}
