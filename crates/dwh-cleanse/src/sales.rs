//! Sales cleansing (primary system).
//!
//! Sales are never dropped for bad dates or amounts. Date ordering
//! violations null the offending date; price and amount are repaired from
//! each other and from quantity. Repairs are recorded in [`SaleFlags`].

use std::cmp::Ordering;

use chrono::NaiveDate;
use dwh_model::{Entity, Sale, SaleFlags, SaleKey, SalesRaw};

use crate::dedupe::keep_max_by_key;
use crate::error::{CleanseError, Result};
use crate::report::{CleanTable, CleanseReport};
use crate::values::{cmp_decimal, non_blank, parse_date, parse_decimal, parse_integer};

/// Dates after ordering validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDates {
    pub order: Option<NaiveDate>,
    pub ship: Option<NaiveDate>,
    pub due: Option<NaiveDate>,
    pub repaired: bool,
}

/// Enforces `order <= ship <= due` over the dates that are present.
///
/// The order date anchors the sequence. A ship date before the order date
/// is nulled; a due date before the ship date (or before the order date
/// when there is no ship date) is nulled.
pub fn validate_dates(
    order: Option<NaiveDate>,
    ship: Option<NaiveDate>,
    due: Option<NaiveDate>,
) -> OrderDates {
    let mut dates = OrderDates {
        order,
        ship,
        due,
        repaired: false,
    };
    if let (Some(order), Some(ship)) = (dates.order, dates.ship) {
        if ship < order {
            dates.ship = None;
            dates.repaired = true;
        }
    }
    let due_floor = dates.ship.or(dates.order);
    if let (Some(floor), Some(due)) = (due_floor, dates.due) {
        if due < floor {
            dates.due = None;
            dates.repaired = true;
        }
    }
    dates
}

/// Price, amount, and the repairs applied to produce them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub price: Option<f64>,
    pub amount: Option<f64>,
    pub price_derived: bool,
    pub price_unresolved: bool,
    pub amount_recomputed: bool,
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Resolves price and amount.
///
/// Price: kept when positive; otherwise derived as `amount / quantity` when
/// both are positive; otherwise the absolute value of a negative price;
/// otherwise unresolved. Amount: recomputed as `quantity * price` when the
/// stored amount is missing, non-positive, inconsistent, or `force_recompute`
/// is set. Without a quantity and price, a positive stored amount is kept.
pub fn resolve_pricing(
    quantity: Option<i64>,
    price: Option<f64>,
    amount: Option<f64>,
    force_recompute: bool,
) -> Pricing {
    let mut pricing = Pricing {
        price: None,
        amount: None,
        price_derived: false,
        price_unresolved: false,
        amount_recomputed: false,
    };

    pricing.price = match price {
        Some(p) if p > 0.0 => Some(p),
        _ => match (amount, quantity) {
            (Some(a), Some(q)) if a > 0.0 && q > 0 => {
                pricing.price_derived = true;
                Some(a / q as f64)
            }
            _ => match price {
                Some(p) if p < 0.0 => Some(-p),
                _ => {
                    pricing.price_unresolved = true;
                    None
                }
            },
        },
    };

    pricing.amount = match (quantity, pricing.price) {
        (Some(q), Some(p)) => {
            let expected = q as f64 * p;
            let consistent = amount.is_some_and(|a| a > 0.0 && approx_eq(a, expected));
            if consistent && !force_recompute {
                amount
            } else {
                pricing.amount_recomputed = true;
                Some(expected)
            }
        }
        _ => amount.filter(|a| *a > 0.0),
    };

    pricing
}

pub fn clean_sale(row: usize, raw: &SalesRaw) -> Result<Sale> {
    let order_number = non_blank(&raw.sls_ord_num).ok_or(CleanseError::MissingBusinessKey {
        entity: Entity::Sale,
        row,
        column: "sls_ord_num",
    })?;
    let product_number = non_blank(&raw.sls_prd_key).ok_or(CleanseError::MissingBusinessKey {
        entity: Entity::Sale,
        row,
        column: "sls_prd_key",
    })?;

    let dates = validate_dates(
        parse_date(&raw.sls_order_dt),
        parse_date(&raw.sls_ship_dt),
        parse_date(&raw.sls_due_dt),
    );
    let quantity = parse_integer(&raw.sls_quantity);
    let pricing = resolve_pricing(
        quantity,
        parse_decimal(&raw.sls_price),
        parse_decimal(&raw.sls_sales),
        dates.repaired,
    );

    Ok(Sale {
        key: SaleKey {
            order_number: order_number.to_string(),
            product_number: product_number.to_string(),
        },
        customer_id: parse_integer(&raw.sls_cust_id),
        order_date: dates.order,
        ship_date: dates.ship,
        due_date: dates.due,
        quantity,
        price: pricing.price,
        amount: pricing.amount,
        flags: SaleFlags {
            date_repaired: dates.repaired,
            amount_recomputed: pricing.amount_recomputed,
            price_derived: pricing.price_derived,
            price_unresolved: pricing.price_unresolved,
        },
    })
}

/// Total order used to pick one survivor among duplicate sale lines.
fn rank_sale(a: &Sale, b: &Sale) -> Ordering {
    a.order_date
        .cmp(&b.order_date)
        .then_with(|| a.ship_date.cmp(&b.ship_date))
        .then_with(|| a.due_date.cmp(&b.due_date))
        .then_with(|| a.customer_id.cmp(&b.customer_id))
        .then_with(|| a.quantity.cmp(&b.quantity))
        .then_with(|| cmp_decimal(a.price, b.price))
        .then_with(|| cmp_decimal(a.amount, b.amount))
}

/// Cleans staged sales to one line per order number and product.
pub fn clean_sales(raw: &[SalesRaw]) -> CleanTable<Sale> {
    let mut report = CleanseReport::new(Entity::Sale, raw.len());
    let mut parsed = Vec::with_capacity(raw.len());
    for (idx, row) in raw.iter().enumerate() {
        match clean_sale(idx + 1, row) {
            Ok(sale) => parsed.push(sale),
            Err(err) => report.rejected.push(err),
        }
    }

    let (rows, dropped) = keep_max_by_key(parsed, |sale| sale.key.clone(), rank_sale);
    report.duplicates_dropped = dropped;
    report.repaired = rows.iter().filter(|sale| sale.flags.any()).count();
    report.output_rows = rows.len();
    CleanTable { rows, report }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn raw(quantity: &str, price: &str, amount: &str) -> SalesRaw {
        SalesRaw {
            sls_ord_num: "SO43697".to_string(),
            sls_prd_key: "BK-R93R-62".to_string(),
            sls_cust_id: "21768".to_string(),
            sls_order_dt: "20101229".to_string(),
            sls_ship_dt: "20110105".to_string(),
            sls_due_dt: "20110110".to_string(),
            sls_sales: amount.to_string(),
            sls_quantity: quantity.to_string(),
            sls_price: price.to_string(),
        }
    }

    #[test]
    fn recomputes_inconsistent_amount() {
        let sale = clean_sale(1, &raw("3", "10", "999")).unwrap();
        assert_eq!(sale.amount, Some(30.0));
        assert_eq!(sale.price, Some(10.0));
        assert!(sale.flags.amount_recomputed);
        assert!(!sale.flags.price_derived);
    }

    #[test]
    fn derives_missing_price() {
        let sale = clean_sale(1, &raw("5", "", "100")).unwrap();
        assert_eq!(sale.price, Some(20.0));
        assert_eq!(sale.amount, Some(100.0));
        assert!(sale.flags.price_derived);
        assert!(!sale.flags.amount_recomputed);
    }

    #[test]
    fn recomputes_missing_or_negative_amount() {
        assert_eq!(clean_sale(1, &raw("2", "15", "")).unwrap().amount, Some(30.0));
        assert_eq!(clean_sale(1, &raw("2", "15", "0")).unwrap().amount, Some(30.0));
        assert_eq!(clean_sale(1, &raw("2", "15", "-30")).unwrap().amount, Some(30.0));
    }

    #[test]
    fn negative_price_with_bad_amount_uses_absolute_value() {
        let sale = clean_sale(1, &raw("2", "-15", "")).unwrap();
        assert_eq!(sale.price, Some(15.0));
        assert_eq!(sale.amount, Some(30.0));
    }

    #[test]
    fn zero_quantity_leaves_price_unresolved() {
        let sale = clean_sale(1, &raw("0", "", "100")).unwrap();
        assert_eq!(sale.price, None);
        assert!(sale.flags.price_unresolved);
        assert_eq!(sale.amount, Some(100.0));
    }

    #[test]
    fn consistent_sale_is_untouched() {
        let sale = clean_sale(1, &raw("1", "3578", "3578")).unwrap();
        assert!(!sale.flags.any());
        assert_eq!(sale.order_date, date(2010, 12, 29));
        assert_eq!(sale.ship_date, date(2011, 1, 5));
        assert_eq!(sale.due_date, date(2011, 1, 10));
        assert_eq!(sale.customer_id, Some(21768));
    }

    #[test]
    fn ship_before_order_is_nulled() {
        let dates = validate_dates(date(2011, 1, 5), date(2010, 12, 29), date(2011, 1, 10));
        assert_eq!(dates.ship, None);
        assert_eq!(dates.due, date(2011, 1, 10));
        assert!(dates.repaired);
    }

    #[test]
    fn due_before_ship_is_nulled() {
        let dates = validate_dates(date(2010, 12, 29), date(2011, 1, 5), date(2011, 1, 1));
        assert_eq!(dates.ship, date(2011, 1, 5));
        assert_eq!(dates.due, None);
        assert!(dates.repaired);
    }

    #[test]
    fn due_checked_against_order_without_ship() {
        let dates = validate_dates(date(2011, 1, 5), None, date(2011, 1, 1));
        assert_eq!(dates.due, None);
        assert!(dates.repaired);
    }

    #[test]
    fn date_repair_forces_amount_recompute() {
        let mut row = raw("2", "10", "20");
        row.sls_ship_dt = "20101201".to_string();
        let sale = clean_sale(1, &row).unwrap();
        assert!(sale.flags.date_repaired);
        assert!(sale.flags.amount_recomputed);
        assert_eq!(sale.amount, Some(20.0));
        assert_eq!(sale.ship_date, None);
    }

    #[test]
    fn invalid_dates_become_null() {
        let mut row = raw("1", "10", "10");
        row.sls_order_dt = "0".to_string();
        row.sls_ship_dt = "32154".to_string();
        let sale = clean_sale(1, &row).unwrap();
        assert_eq!(sale.order_date, None);
        assert_eq!(sale.ship_date, None);
        assert!(!sale.flags.date_repaired);
    }

    #[test]
    fn rejects_missing_order_number() {
        let mut row = raw("1", "10", "10");
        row.sls_ord_num = " ".to_string();
        let table = clean_sales(&[row]);
        assert!(table.rows.is_empty());
        assert_eq!(table.report.rejected_count(), 1);
    }

    #[test]
    fn dedupes_sale_lines() {
        let table = clean_sales(&[raw("1", "10", "10"), raw("2", "10", "20")]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].quantity, Some(2));
        assert_eq!(table.report.duplicates_dropped, 1);
    }
}
