//! End-to-end tests for the pipeline orchestrator.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use dwh_cli::pipeline::{PipelineConfig, load_stage, run_pipeline, run_pipeline_into};
use dwh_model::{Entity, ErrorKind, Stage};
use dwh_star::Warehouse;
use tempfile::TempDir;

fn write_extract(root: &Path, entity: Entity, contents: &str) {
    let path = root.join(entity.default_path());
    fs::create_dir_all(path.parent().expect("parent dir")).expect("create source dir");
    fs::write(&path, contents).expect("write extract");
}

fn write_sources(root: &Path) {
    write_extract(
        root,
        Entity::Customer,
        "cst_id,cst_key,cst_firstname,cst_lastname,cst_marital_status,cst_gndr,cst_create_date\n\
         11000,AW00011000,Jon,Yang,M,M,2025-10-05\n\
         11000,AW00011000, Jon ,Yang,M,M,2025-10-06\n\
         11001,AW00011001,Eugene,Huang,S,,2025-10-06\n\
         ,AW00011002,Ruben,Torres,M,M,2025-10-06\n",
    );
    write_extract(
        root,
        Entity::Product,
        "prd_id,prd_key,prd_nm,prd_cost,prd_line,prd_start_dt,prd_end_dt\n\
         310,BI-RB-BK-R93R-62,Road-150 Red- 62,2171,R,2003-07-01,\n\
         212,CO-RF-FR-R92R-58,HL Road Frame - Red- 58,,R,2003-07-01,2011-12-28\n\
         210,CO-RF-FR-R92B-58,HL Road Frame - Black- 58,,R,2003-07-01,\n",
    );
    write_extract(
        root,
        Entity::Sale,
        "sls_ord_num,sls_prd_key,sls_cust_id,sls_order_dt,sls_ship_dt,sls_due_dt,sls_sales,sls_quantity,sls_price\n\
         SO43697,BK-R93R-62,11000,20101229,20110105,20110110,999,3,10\n\
         SO43698,FR-R92B-58,11001,20101229,20110105,20110110,100,5,\n\
         SO43699,FR-R92R-58,11000,20101229,20110105,20110110,30,3,10\n\
         SO43700,BK-R93R-62,99999,20101229,20110105,20110110,30,3,10\n",
    );
    write_extract(
        root,
        Entity::ErpCustomer,
        "CID,BDATE,GEN\nNASAW00011001,1971-10-06,Female\nAW00011000,2099-01-01,Male\n",
    );
    write_extract(root, Entity::ErpLocation, "CID,CNTRY\nAW-00011000,DE\n");
    write_extract(
        root,
        Entity::ErpCategory,
        "ID,CAT,SUBCAT,MAINTENANCE\n\
         BI_RB,Bikes,Road Bikes,Yes\n\
         CO_RF,Components,Road Frames,No\n",
    );
}

fn config(root: &Path) -> PipelineConfig {
    let as_of = NaiveDate::from_ymd_opt(2026, 10, 19).expect("date");
    PipelineConfig::new(root, as_of)
}

#[test]
fn runs_every_stage_and_publishes() {
    let dir = TempDir::new().expect("temp dir");
    write_sources(dir.path());

    let result = run_pipeline(&config(dir.path())).expect("pipeline run");

    insta::assert_json_snapshot!(result.row_counts, @r#"
    {
      "customers": 2,
      "products": 2,
      "sales": 2
    }
    "#);
    assert_eq!(result.orphan_count, 2);
    assert_eq!(result.fingerprint.len(), 64);

    let output = dir.path().join("warehouse");
    assert_eq!(result.output_dir.as_deref(), Some(output.as_path()));
    for (name, lines) in [
        ("dim_customers.csv", 3),
        ("dim_products.csv", 3),
        ("fact_sales.csv", 3),
    ] {
        let contents = fs::read_to_string(output.join(name)).expect("read output");
        assert_eq!(contents.lines().count(), lines, "{name}");
    }

    let customers = &result.entities[0];
    assert_eq!(customers.entity, Entity::Customer);
    assert_eq!(customers.staged, 4);
    assert_eq!(customers.clean, 2);
    assert_eq!(customers.duplicates_dropped, 1);
    assert_eq!(customers.rejected, 1);

    let products = &result.entities[1];
    assert_eq!(products.historical_dropped, 1);
}

#[test]
fn published_schema_reflects_cleansing_rules() {
    let dir = TempDir::new().expect("temp dir");
    write_sources(dir.path());
    let warehouse = Warehouse::new();

    run_pipeline_into(&config(dir.path()), &warehouse).expect("pipeline run");
    let schema = warehouse.snapshot();

    let products: Vec<&str> = schema
        .products
        .iter()
        .map(|row| row.product_number.as_str())
        .collect();
    assert_eq!(products, vec!["BK-R93R-62", "FR-R92B-58"]);

    let first = &schema.sales[0];
    assert_eq!(first.order_number, "SO43697");
    assert_eq!(first.amount, Some(30.0));
    let second = &schema.sales[1];
    assert_eq!(second.price, Some(20.0));
    assert_eq!(second.amount, Some(100.0));

    let jon = &schema.customers[0];
    assert_eq!(jon.first_name.as_deref(), Some("Jon"));
    assert_eq!(jon.country.as_deref(), Some("Germany"));
    assert_eq!(jon.birth_date, None);
    let eugene = &schema.customers[1];
    assert_eq!(eugene.gender, dwh_model::Gender::Female);

    for fact in &schema.sales {
        assert!(schema.customers.iter().any(|c| c.customer_key == fact.customer_key));
        assert!(schema.products.iter().any(|p| p.product_key == fact.product_key));
    }
}

#[test]
fn rerun_is_idempotent() {
    let dir = TempDir::new().expect("temp dir");
    write_sources(dir.path());
    let output = dir.path().join("warehouse");

    let first = run_pipeline(&config(dir.path())).expect("first run");
    let facts = fs::read(output.join("fact_sales.csv")).expect("read facts");
    let second = run_pipeline(&config(dir.path())).expect("second run");

    assert_eq!(first.fingerprint, second.fingerprint);
    assert_eq!(first.row_counts, second.row_counts);
    assert_eq!(facts, fs::read(output.join("fact_sales.csv")).expect("read facts"));
}

#[test]
fn parallel_load_gives_same_fingerprint() {
    let dir = TempDir::new().expect("temp dir");
    write_sources(dir.path());

    let sequential = run_pipeline(&config(dir.path())).expect("sequential run");
    let mut parallel = config(dir.path());
    parallel.loader.parallel = true;
    parallel.dry_run = true;
    let parallel = run_pipeline(&parallel).expect("parallel run");

    assert_eq!(sequential.fingerprint, parallel.fingerprint);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    write_sources(dir.path());
    let mut config = config(dir.path());
    config.dry_run = true;

    let result = run_pipeline(&config).expect("dry run");
    assert_eq!(result.output_dir, None);
    assert!(!dir.path().join("warehouse").exists());
    assert_eq!(result.row_counts.sales, 2);
}

#[test]
fn missing_extract_aborts_and_keeps_previous_output() {
    let dir = TempDir::new().expect("temp dir");
    write_sources(dir.path());
    let warehouse = Warehouse::new();
    let config = config(dir.path());
    run_pipeline_into(&config, &warehouse).expect("first run");
    let published = warehouse.snapshot();

    fs::remove_file(dir.path().join(Entity::ErpLocation.default_path())).expect("remove extract");
    let err = run_pipeline_into(&config, &warehouse).unwrap_err();

    assert_eq!(err.stage, Stage::Load);
    assert_eq!(err.kind, ErrorKind::SourceUnavailable);
    assert!(std::sync::Arc::ptr_eq(&published, &warehouse.snapshot()));
    assert!(dir.path().join("warehouse/fact_sales.csv").exists());
}

#[test]
fn header_mismatch_is_schema_error() {
    let dir = TempDir::new().expect("temp dir");
    write_sources(dir.path());
    write_extract(dir.path(), Entity::ErpCategory, "ID,CAT,SUBCAT\nBI_RB,Bikes,Road Bikes\n");

    let err = load_stage(&config(dir.path())).unwrap_err();
    assert_eq!(err.stage, Stage::Load);
    assert_eq!(err.kind, ErrorKind::SchemaMismatch);
}
