//! Customer dimension: primary customers enriched with supplementary
//! demographics and location.

use std::collections::BTreeMap;

use dwh_model::{Customer, CustomerDim, ErpCustomer, ErpLocation};

use crate::reconcile::prefer_known;
use crate::surrogate::{KeyIndex, assign_keys};

/// Builds the customer dimension, keyed in ascending `customer_id` order.
///
/// Supplementary rows join on the aligned customer number. Customers
/// without a match keep their primary attributes; country stays `None`
/// when no location row exists.
pub fn build_customer_dim(
    customers: &[Customer],
    demographics: &[ErpCustomer],
    locations: &[ErpLocation],
) -> (Vec<CustomerDim>, KeyIndex<i64>) {
    let demographics: BTreeMap<&str, &ErpCustomer> = demographics
        .iter()
        .map(|row| (row.customer_number.as_str(), row))
        .collect();
    let locations: BTreeMap<&str, &ErpLocation> = locations
        .iter()
        .map(|row| (row.customer_number.as_str(), row))
        .collect();

    let (keyed, index) = assign_keys(customers.to_vec(), |customer| customer.customer_id);
    let rows = keyed
        .into_iter()
        .map(|(customer_key, customer)| {
            let number = customer.customer_number.as_deref();
            let erp = number.and_then(|n| demographics.get(n).copied());
            let location = number.and_then(|n| locations.get(n).copied());
            CustomerDim {
                customer_key,
                customer_id: customer.customer_id,
                gender: prefer_known(customer.gender, erp.map(|row| row.gender)),
                birth_date: erp.and_then(|row| row.birth_date),
                country: location.map(|row| row.country.clone()),
                customer_number: customer.customer_number,
                first_name: customer.first_name,
                last_name: customer.last_name,
                marital_status: customer.marital_status,
                create_date: customer.create_date,
            }
        })
        .collect();
    (rows, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dwh_model::{Gender, MaritalStatus};

    fn customer(id: i64, gender: Gender) -> Customer {
        Customer {
            customer_id: id,
            customer_number: Some(format!("AW000{id}")),
            first_name: Some("Jon".to_string()),
            last_name: Some("Yang".to_string()),
            marital_status: MaritalStatus::Married,
            gender,
            create_date: None,
        }
    }

    fn erp(number: &str, gender: Gender) -> ErpCustomer {
        ErpCustomer {
            customer_number: number.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1971, 10, 6),
            gender,
        }
    }

    #[test]
    fn keys_follow_customer_id_order() {
        let (rows, index) = build_customer_dim(
            &[customer(11002, Gender::Male), customer(11000, Gender::Male)],
            &[],
            &[],
        );
        assert_eq!(rows[0].customer_id, 11000);
        assert_eq!(rows[0].customer_key, 1);
        assert_eq!(rows[1].customer_key, 2);
        assert_eq!(index.get(&11002), Some(2));
    }

    #[test]
    fn primary_gender_wins_unless_unknown() {
        let (rows, _) = build_customer_dim(
            &[customer(11000, Gender::Male), customer(11001, Gender::Unknown)],
            &[erp("AW00011000", Gender::Female), erp("AW00011001", Gender::Female)],
            &[],
        );
        assert_eq!(rows[0].gender, Gender::Male);
        assert_eq!(rows[1].gender, Gender::Female);
        assert_eq!(rows[1].birth_date, NaiveDate::from_ymd_opt(1971, 10, 6));
    }

    #[test]
    fn country_comes_from_location() {
        let (rows, _) = build_customer_dim(
            &[customer(11000, Gender::Male), customer(11001, Gender::Male)],
            &[],
            &[ErpLocation {
                customer_number: "AW00011000".to_string(),
                country: "Australia".to_string(),
            }],
        );
        assert_eq!(rows[0].country.as_deref(), Some("Australia"));
        assert_eq!(rows[1].country, None);
        assert_eq!(rows[1].birth_date, None);
    }
}
