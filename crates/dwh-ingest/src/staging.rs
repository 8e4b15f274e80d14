//! Source-shaped staging tables.

use std::path::Path;

use dwh_model::{
    CustomerRaw, Entity, ErpCategoryRaw, ErpCustomerRaw, ErpLocationRaw, ProductRaw, SalesRaw,
};

use crate::csv::read_staged;
use crate::error::Result;

/// Fully-read rows of one extract, ready to be swapped into staging.
#[derive(Debug, Clone)]
pub enum StagedRows {
    Customers(Vec<CustomerRaw>),
    Products(Vec<ProductRaw>),
    Sales(Vec<SalesRaw>),
    ErpCustomers(Vec<ErpCustomerRaw>),
    ErpLocations(Vec<ErpLocationRaw>),
    ErpCategories(Vec<ErpCategoryRaw>),
}

impl StagedRows {
    /// Reads the extract for `entity` at `path`.
    pub fn read(entity: Entity, path: &Path) -> Result<Self> {
        Ok(match entity {
            Entity::Customer => StagedRows::Customers(read_staged(path)?),
            Entity::Product => StagedRows::Products(read_staged(path)?),
            Entity::Sale => StagedRows::Sales(read_staged(path)?),
            Entity::ErpCustomer => StagedRows::ErpCustomers(read_staged(path)?),
            Entity::ErpLocation => StagedRows::ErpLocations(read_staged(path)?),
            Entity::ErpCategory => StagedRows::ErpCategories(read_staged(path)?),
        })
    }

    pub fn len(&self) -> usize {
        match self {
            StagedRows::Customers(rows) => rows.len(),
            StagedRows::Products(rows) => rows.len(),
            StagedRows::Sales(rows) => rows.len(),
            StagedRows::ErpCustomers(rows) => rows.len(),
            StagedRows::ErpLocations(rows) => rows.len(),
            StagedRows::ErpCategories(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Staging tables for every source entity.
///
/// A table is only ever replaced as a whole by [`StagingArea::replace`],
/// after its extract has been read completely.
#[derive(Debug, Clone, Default)]
pub struct StagingArea {
    pub customers: Vec<CustomerRaw>,
    pub products: Vec<ProductRaw>,
    pub sales: Vec<SalesRaw>,
    pub erp_customers: Vec<ErpCustomerRaw>,
    pub erp_locations: Vec<ErpLocationRaw>,
    pub erp_categories: Vec<ErpCategoryRaw>,
}

impl StagingArea {
    /// Swaps in a freshly-read table, returning the previous row count.
    pub fn replace(&mut self, rows: StagedRows) -> usize {
        match rows {
            StagedRows::Customers(rows) => std::mem::replace(&mut self.customers, rows).len(),
            StagedRows::Products(rows) => std::mem::replace(&mut self.products, rows).len(),
            StagedRows::Sales(rows) => std::mem::replace(&mut self.sales, rows).len(),
            StagedRows::ErpCustomers(rows) => {
                std::mem::replace(&mut self.erp_customers, rows).len()
            }
            StagedRows::ErpLocations(rows) => {
                std::mem::replace(&mut self.erp_locations, rows).len()
            }
            StagedRows::ErpCategories(rows) => {
                std::mem::replace(&mut self.erp_categories, rows).len()
            }
        }
    }

    pub fn row_count(&self, entity: Entity) -> usize {
        match entity {
            Entity::Customer => self.customers.len(),
            Entity::Product => self.products.len(),
            Entity::Sale => self.sales.len(),
            Entity::ErpCustomer => self.erp_customers.len(),
            Entity::ErpLocation => self.erp_locations.len(),
            Entity::ErpCategory => self.erp_categories.len(),
        }
    }
}
