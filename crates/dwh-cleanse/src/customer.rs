//! Customer cleansing (primary system).

use dwh_model::{Customer, CustomerRaw, Entity, Gender, MaritalStatus};

use crate::dedupe::keep_max_by_key;
use crate::error::{CleanseError, Result};
use crate::report::{CleanTable, CleanseReport};
use crate::values::{clean_text, non_blank, parse_date, parse_integer};

/// Interprets one staged customer row.
pub fn clean_customer(row: usize, raw: &CustomerRaw) -> Result<Customer> {
    let Some(id_text) = non_blank(&raw.cst_id) else {
        return Err(CleanseError::MissingBusinessKey {
            entity: Entity::Customer,
            row,
            column: "cst_id",
        });
    };
    let customer_id = parse_integer(id_text).ok_or_else(|| CleanseError::InvalidBusinessKey {
        entity: Entity::Customer,
        row,
        column: "cst_id",
        value: id_text.to_string(),
    })?;

    Ok(Customer {
        customer_id,
        customer_number: clean_text(&raw.cst_key),
        first_name: clean_text(&raw.cst_firstname),
        last_name: clean_text(&raw.cst_lastname),
        marital_status: MaritalStatus::from_code(Some(&raw.cst_marital_status)),
        gender: Gender::from_code(Some(&raw.cst_gndr)),
        create_date: parse_date(&raw.cst_create_date),
    })
}

/// Cleans staged customers: one row per customer id, the most recently
/// created one. Rows without a creation date rank below any dated row.
pub fn clean_customers(raw: &[CustomerRaw]) -> CleanTable<Customer> {
    let mut report = CleanseReport::new(Entity::Customer, raw.len());
    let mut parsed = Vec::with_capacity(raw.len());
    for (idx, row) in raw.iter().enumerate() {
        match clean_customer(idx + 1, row) {
            Ok(customer) => parsed.push(customer),
            Err(err) => report.rejected.push(err),
        }
    }

    let (rows, dropped) = keep_max_by_key(
        parsed,
        |customer| customer.customer_id,
        |a, b| a.create_date.cmp(&b.create_date).then_with(|| a.cmp(b)),
    );
    report.duplicates_dropped = dropped;
    report.output_rows = rows.len();
    CleanTable { rows, report }
}
