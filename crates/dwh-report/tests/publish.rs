use std::fs;

use dwh_report::{ReportError, publish_tables};
use dwh_star::StarSchema;
use fixtures::schema;
use tempfile::TempDir;

mod fixtures {
    use dwh_model::{CustomerDim, Gender, MaritalStatus, ProductDim, ProductLine, SalesFact};
    use dwh_star::StarSchema;

    pub fn schema() -> StarSchema {
        StarSchema {
            customers: vec![CustomerDim {
                customer_key: 1,
                customer_id: 11000,
                customer_number: Some("AW00011000".to_string()),
                first_name: Some("Jon".to_string()),
                last_name: Some("Yang".to_string()),
                country: Some("Australia".to_string()),
                marital_status: MaritalStatus::Married,
                gender: Gender::Male,
                birth_date: None,
                create_date: None,
            }],
            products: vec![ProductDim {
                product_key: 1,
                product_id: Some(310),
                product_number: "BK-R93R-62".to_string(),
                product_name: Some("Road-150 Red, 62".to_string()),
                category_id: "BI_RB".to_string(),
                category: Some("Bikes".to_string()),
                subcategory: None,
                maintenance: None,
                cost: 2171.0,
                product_line: ProductLine::Road,
                start_date: None,
            }],
            sales: vec![SalesFact {
                order_number: "SO43697".to_string(),
                product_key: 1,
                customer_key: 1,
                product_number: "BK-R93R-62".to_string(),
                customer_id: 11000,
                order_date: None,
                ship_date: None,
                due_date: None,
                amount: Some(30.0),
                quantity: Some(3),
                price: Some(10.0),
            }],
        }
    }
}

#[test]
fn writes_all_tables() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("warehouse");

    let published = publish_tables(&output, &schema()).unwrap();

    let names: Vec<String> = published
        .files
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["dim_customers.csv", "dim_products.csv", "fact_sales.csv"]
    );
    for file in &published.files {
        assert!(file.starts_with(&output));
        assert!(file.exists());
    }

    let customers = fs::read_to_string(output.join("dim_customers.csv")).unwrap();
    insta::assert_snapshot!(customers.trim_end(), @r"
    customer_key,customer_id,customer_number,first_name,last_name,country,marital_status,gender,birth_date,create_date
    1,11000,AW00011000,Jon,Yang,Australia,Married,Male,,
    ");

    let products = fs::read_to_string(output.join("dim_products.csv")).unwrap();
    assert!(products.contains("\"Road-150 Red, 62\""));
}

#[test]
fn replaces_previous_output_wholesale() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("warehouse");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("stale.csv"), "old").unwrap();

    publish_tables(&output, &schema()).unwrap();
    assert!(!output.join("stale.csv").exists());

    publish_tables(&output, &StarSchema::default()).unwrap();
    let sales = fs::read_to_string(output.join("fact_sales.csv")).unwrap();
    assert_eq!(sales.lines().count(), 1);

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("warehouse")]);
}

#[test]
fn unwritable_parent_is_reported() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("file");
    fs::write(&blocker, "not a directory").unwrap();

    let err = publish_tables(&blocker.join("warehouse"), &schema()).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));

    let pipeline: dwh_model::PipelineError = err.into();
    assert_eq!(pipeline.stage, dwh_model::Stage::Publish);
    assert_eq!(pipeline.kind, dwh_model::ErrorKind::OutputFailure);
}
