//! Cleansing stage entry point.

use std::time::Instant;

use chrono::NaiveDate;
use dwh_ingest::StagingArea;
use dwh_model::{
    Customer, Entity, ErpCategory, ErpCustomer, ErpLocation, Product, Sale, Stage,
};
use tracing::{debug, info, info_span, warn};

use crate::customer::clean_customers;
use crate::erp::{clean_erp_categories, clean_erp_customers, clean_erp_locations};
use crate::product::clean_products;
use crate::report::{CleanTable, CleanseReport};
use crate::sales::clean_sales;

/// Clean table for one entity, as returned by [`Cleanser::transform`].
#[derive(Debug, Clone)]
pub enum CleanOutput {
    Customers(CleanTable<Customer>),
    Products(CleanTable<Product>),
    Sales(CleanTable<Sale>),
    ErpCustomers(CleanTable<ErpCustomer>),
    ErpLocations(CleanTable<ErpLocation>),
    ErpCategories(CleanTable<ErpCategory>),
}

impl CleanOutput {
    pub fn report(&self) -> &CleanseReport {
        match self {
            CleanOutput::Customers(table) => &table.report,
            CleanOutput::Products(table) => &table.report,
            CleanOutput::Sales(table) => &table.report,
            CleanOutput::ErpCustomers(table) => &table.report,
            CleanOutput::ErpLocations(table) => &table.report,
            CleanOutput::ErpCategories(table) => &table.report,
        }
    }
}

/// Clean tables for every entity.
#[derive(Debug, Clone)]
pub struct CleanSet {
    pub customers: CleanTable<Customer>,
    pub products: CleanTable<Product>,
    pub sales: CleanTable<Sale>,
    pub erp_customers: CleanTable<ErpCustomer>,
    pub erp_locations: CleanTable<ErpLocation>,
    pub erp_categories: CleanTable<ErpCategory>,
}

impl CleanSet {
    pub fn report(&self, entity: Entity) -> &CleanseReport {
        match entity {
            Entity::Customer => &self.customers.report,
            Entity::Product => &self.products.report,
            Entity::Sale => &self.sales.report,
            Entity::ErpCustomer => &self.erp_customers.report,
            Entity::ErpLocation => &self.erp_locations.report,
            Entity::ErpCategory => &self.erp_categories.report,
        }
    }

    /// Reports in pipeline order.
    pub fn reports(&self) -> impl Iterator<Item = &CleanseReport> {
        Entity::ALL.into_iter().map(|entity| self.report(entity))
    }

    pub fn rejected_count(&self) -> usize {
        self.reports().map(CleanseReport::rejected_count).sum()
    }
}

/// Applies the per-entity cleansing rules to staged data.
#[derive(Debug, Clone, Copy)]
pub struct Cleanser {
    as_of: NaiveDate,
}

impl Cleanser {
    /// `as_of` is the reference date for rules that compare against "today".
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    fn timed<T>(&self, entity: Entity, clean: impl FnOnce() -> CleanTable<T>) -> CleanTable<T> {
        let span = info_span!("cleanse", entity = %entity);
        let _guard = span.enter();
        let start = Instant::now();
        let table = clean();
        log_report(&table.report, start.elapsed().as_millis());
        table
    }

    pub fn customers(&self, staging: &StagingArea) -> CleanTable<Customer> {
        self.timed(Entity::Customer, || clean_customers(&staging.customers))
    }

    pub fn products(&self, staging: &StagingArea) -> CleanTable<Product> {
        self.timed(Entity::Product, || clean_products(&staging.products))
    }

    pub fn sales(&self, staging: &StagingArea) -> CleanTable<Sale> {
        self.timed(Entity::Sale, || clean_sales(&staging.sales))
    }

    pub fn erp_customers(&self, staging: &StagingArea) -> CleanTable<ErpCustomer> {
        self.timed(Entity::ErpCustomer, || {
            clean_erp_customers(&staging.erp_customers, self.as_of)
        })
    }

    pub fn erp_locations(&self, staging: &StagingArea) -> CleanTable<ErpLocation> {
        self.timed(Entity::ErpLocation, || {
            clean_erp_locations(&staging.erp_locations)
        })
    }

    pub fn erp_categories(&self, staging: &StagingArea) -> CleanTable<ErpCategory> {
        self.timed(Entity::ErpCategory, || {
            clean_erp_categories(&staging.erp_categories)
        })
    }

    /// Cleans one entity's staging table.
    pub fn transform(&self, staging: &StagingArea, entity: Entity) -> CleanOutput {
        match entity {
            Entity::Customer => CleanOutput::Customers(self.customers(staging)),
            Entity::Product => CleanOutput::Products(self.products(staging)),
            Entity::Sale => CleanOutput::Sales(self.sales(staging)),
            Entity::ErpCustomer => CleanOutput::ErpCustomers(self.erp_customers(staging)),
            Entity::ErpLocation => CleanOutput::ErpLocations(self.erp_locations(staging)),
            Entity::ErpCategory => CleanOutput::ErpCategories(self.erp_categories(staging)),
        }
    }

    /// Cleans every entity, in pipeline order.
    pub fn transform_all(&self, staging: &StagingArea) -> CleanSet {
        CleanSet {
            customers: self.customers(staging),
            products: self.products(staging),
            sales: self.sales(staging),
            erp_customers: self.erp_customers(staging),
            erp_locations: self.erp_locations(staging),
            erp_categories: self.erp_categories(staging),
        }
    }
}

fn log_report(report: &CleanseReport, duration_ms: u128) {
    info!(
        stage = %Stage::Cleanse,
        entity = %report.entity,
        input_rows = report.input_rows,
        output_rows = report.output_rows,
        duplicates_dropped = report.duplicates_dropped,
        historical_dropped = report.historical_dropped,
        repaired = report.repaired,
        rejected = report.rejected_count(),
        duration_ms = duration_ms as u64,
        "entity cleansed"
    );
    if let Some(first) = report.rejected.first() {
        warn!(
            stage = %Stage::Cleanse,
            entity = %report.entity,
            kind = %first.kind(),
            rejected = report.rejected_count(),
            message = %first,
            "rows excluded for unusable business keys"
        );
    }
    for rejection in report.rejected.iter().skip(1) {
        debug!(entity = %report.entity, message = %rejection, "row excluded");
    }
}
