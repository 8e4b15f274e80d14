//! Sales fact assembly.

use dwh_model::{Sale, SalesFact};
use serde::Serialize;

use crate::surrogate::KeyIndex;

/// Sale lines excluded because a dimension key could not be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrphanTally {
    /// No customer id, or the id is absent from the customer dimension.
    pub missing_customer: usize,
    /// Product number absent from the (active-only) product dimension.
    pub missing_product: usize,
    /// Lines excluded. A line missing both sides counts once here.
    pub total: usize,
}

/// Joins clean sales to both dimensions. Rows that cannot resolve both
/// surrogate keys are excluded and tallied.
pub fn build_sales_fact(
    sales: &[Sale],
    customers: &KeyIndex<i64>,
    products: &KeyIndex<String>,
) -> (Vec<SalesFact>, OrphanTally) {
    let mut ordered: Vec<&Sale> = sales.iter().collect();
    ordered.sort_by(|a, b| a.key.cmp(&b.key));

    let mut tally = OrphanTally::default();
    let mut facts = Vec::with_capacity(ordered.len());
    for sale in ordered {
        let customer = sale
            .customer_id
            .and_then(|id| customers.get(&id).map(|key| (id, key)));
        let product_key = products.get(sale.key.product_number.as_str());
        if customer.is_none() {
            tally.missing_customer += 1;
        }
        if product_key.is_none() {
            tally.missing_product += 1;
        }
        let (Some((customer_id, customer_key)), Some(product_key)) = (customer, product_key) else {
            tally.total += 1;
            continue;
        };
        facts.push(SalesFact {
            order_number: sale.key.order_number.clone(),
            product_key,
            customer_key,
            product_number: sale.key.product_number.clone(),
            customer_id,
            order_date: sale.order_date,
            ship_date: sale.ship_date,
            due_date: sale.due_date,
            amount: sale.amount,
            quantity: sale.quantity,
            price: sale.price,
        });
    }
    (facts, tally)
}
