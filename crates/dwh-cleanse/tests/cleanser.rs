use chrono::NaiveDate;
use proptest::prelude::*;

use dwh_cleanse::customer::clean_customers;
use dwh_cleanse::{CleanOutput, Cleanser};
use dwh_ingest::StagingArea;
use dwh_model::{CustomerRaw, Entity, ErpCustomerRaw, ErpLocationRaw, SalesRaw};

fn customer(id: &str, first: &str, created: &str) -> CustomerRaw {
    CustomerRaw {
        cst_id: id.to_string(),
        cst_key: format!("AW000{id}"),
        cst_firstname: first.to_string(),
        cst_lastname: "Huang".to_string(),
        cst_marital_status: "S".to_string(),
        cst_gndr: "M".to_string(),
        cst_create_date: created.to_string(),
    }
}

fn sample_staging() -> StagingArea {
    StagingArea {
        customers: vec![
            customer("11001", "Eugene", "2025-10-06"),
            customer("11001", "Eugène", "2025-10-07"),
            customer("", "Nobody", "2025-10-07"),
        ],
        sales: vec![SalesRaw {
            sls_ord_num: "SO43698".to_string(),
            sls_prd_key: "BK-M82S-44".to_string(),
            sls_cust_id: "11001".to_string(),
            sls_order_dt: "20101229".to_string(),
            sls_ship_dt: "20110105".to_string(),
            sls_due_dt: "20110110".to_string(),
            sls_sales: "999".to_string(),
            sls_quantity: "3".to_string(),
            sls_price: "10".to_string(),
        }],
        erp_customers: vec![ErpCustomerRaw {
            cid: "NASAW00011001".to_string(),
            bdate: "2099-01-01".to_string(),
            gender: "Male".to_string(),
        }],
        erp_locations: vec![ErpLocationRaw {
            cid: "AW-00011001".to_string(),
            cntry: "USA".to_string(),
        }],
        ..StagingArea::default()
    }
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("date")
}

#[test]
fn transform_all_applies_every_rule() {
    let clean = Cleanser::new(as_of()).transform_all(&sample_staging());

    assert_eq!(clean.customers.rows.len(), 1);
    assert_eq!(clean.customers.rows[0].first_name.as_deref(), Some("Eugène"));
    assert_eq!(clean.customers.report.duplicates_dropped, 1);
    assert_eq!(clean.customers.report.rejected_count(), 1);

    assert_eq!(clean.sales.rows[0].amount, Some(30.0));
    assert_eq!(clean.sales.report.repaired, 1);

    assert_eq!(clean.erp_customers.rows[0].customer_number, "AW00011001");
    assert_eq!(clean.erp_customers.rows[0].birth_date, None);
    assert_eq!(clean.erp_locations.rows[0].country, "United States");

    assert!(clean.products.is_empty());
    assert_eq!(clean.rejected_count(), 1);
}

#[test]
fn transform_single_entity() {
    let output = Cleanser::new(as_of()).transform(&sample_staging(), Entity::ErpLocation);

    let CleanOutput::ErpLocations(table) = output else {
        panic!("expected locations");
    };
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.report.entity, Entity::ErpLocation);
}

proptest! {
    #[test]
    fn customer_dedup_ignores_row_order(
        days in proptest::collection::vec(1u32..28, 1..8),
        seed in any::<u64>(),
    ) {
        let rows: Vec<CustomerRaw> = days
            .iter()
            .enumerate()
            .map(|(idx, day)| customer("42", &format!("v{idx}"), &format!("2024-03-{day:02}")))
            .collect();
        let mut shuffled = rows.clone();
        let len = shuffled.len();
        let rotate = usize::try_from(seed % len as u64).unwrap_or(0);
        shuffled.rotate_left(rotate);
        shuffled.reverse();

        let forward = clean_customers(&rows);
        let reordered = clean_customers(&shuffled);

        prop_assert_eq!(forward.rows.len(), 1);
        prop_assert_eq!(&forward.rows, &reordered.rows);
        let latest = days.iter().max().copied().unwrap_or_default();
        prop_assert_eq!(
            forward.rows[0].create_date,
            NaiveDate::from_ymd_opt(2024, 3, latest)
        );
    }
}
