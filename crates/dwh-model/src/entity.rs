//! Source entities and the operational systems they come from.
//!
//! Each [`Entity`] corresponds to exactly one flat-file extract and one
//! staging table. The expected column layout and default file location are
//! fixed per entity; the loader compares every extract header against
//! [`Entity::columns`] before any row is staged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Operational system an extract originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceSystem {
    /// Primary system: customer master, product catalog, sales orders.
    Crm,
    /// Supplementary system: demographics, locations, product categories.
    Erp,
}

impl SourceSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSystem::Crm => "crm",
            SourceSystem::Erp => "erp",
        }
    }

    /// Directory (relative to the source root) holding this system's extracts.
    pub fn directory(&self) -> &'static str {
        match self {
            SourceSystem::Crm => "source_crm",
            SourceSystem::Erp => "source_erp",
        }
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source entity with its own extract file and staging table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Entity {
    Customer,
    Product,
    Sale,
    ErpCustomer,
    ErpLocation,
    ErpCategory,
}

impl Entity {
    /// All entities in pipeline order (primary system first).
    pub const ALL: [Entity; 6] = [
        Entity::Customer,
        Entity::Product,
        Entity::Sale,
        Entity::ErpCustomer,
        Entity::ErpLocation,
        Entity::ErpCategory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Customer => "customer",
            Entity::Product => "product",
            Entity::Sale => "sale",
            Entity::ErpCustomer => "erp_customer",
            Entity::ErpLocation => "erp_location",
            Entity::ErpCategory => "erp_category",
        }
    }

    pub fn system(&self) -> SourceSystem {
        match self {
            Entity::Customer | Entity::Product | Entity::Sale => SourceSystem::Crm,
            Entity::ErpCustomer | Entity::ErpLocation | Entity::ErpCategory => SourceSystem::Erp,
        }
    }

    /// Extract file name. Matched case-sensitively.
    pub fn file_name(&self) -> &'static str {
        match self {
            Entity::Customer => "cust_info.csv",
            Entity::Product => "prd_info.csv",
            Entity::Sale => "sales_details.csv",
            Entity::ErpCustomer => "CUST_AZ12.csv",
            Entity::ErpLocation => "LOC_A101.csv",
            Entity::ErpCategory => "PX_CAT_G1V2.csv",
        }
    }

    /// Default extract location relative to the source root.
    pub fn default_path(&self) -> String {
        format!("{}/{}", self.system().directory(), self.file_name())
    }

    /// Expected staging columns, in source order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Entity::Customer => &[
                "cst_id",
                "cst_key",
                "cst_firstname",
                "cst_lastname",
                "cst_marital_status",
                "cst_gndr",
                "cst_create_date",
            ],
            Entity::Product => &[
                "prd_id",
                "prd_key",
                "prd_nm",
                "prd_cost",
                "prd_line",
                "prd_start_dt",
                "prd_end_dt",
            ],
            Entity::Sale => &[
                "sls_ord_num",
                "sls_prd_key",
                "sls_cust_id",
                "sls_order_dt",
                "sls_ship_dt",
                "sls_due_dt",
                "sls_sales",
                "sls_quantity",
                "sls_price",
            ],
            Entity::ErpCustomer => &["CID", "BDATE", "GEN"],
            Entity::ErpLocation => &["CID", "CNTRY"],
            Entity::ErpCategory => &["ID", "CAT", "SUBCAT", "MAINTENANCE"],
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Entity::ALL
            .into_iter()
            .find(|entity| entity.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ModelError::UnknownEntity(needle.to_string()))
    }
}
