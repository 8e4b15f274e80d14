//! Product dimension: active products enriched with their category.

use std::collections::BTreeMap;

use dwh_model::{ErpCategory, Product, ProductDim};

use crate::surrogate::{KeyIndex, assign_keys};

/// Builds the product dimension, keyed in ascending `product_number` order.
/// Products whose category id has no lookup row keep `None` category fields.
pub fn build_product_dim(
    products: &[Product],
    categories: &[ErpCategory],
) -> (Vec<ProductDim>, KeyIndex<String>) {
    let categories: BTreeMap<&str, &ErpCategory> =
        categories.iter().map(|row| (row.id.as_str(), row)).collect();

    let (keyed, index) = assign_keys(products.to_vec(), |product| product.product_number.clone());
    let rows = keyed
        .into_iter()
        .map(|(product_key, product)| {
            let category = categories.get(product.category_id.as_str()).copied();
            ProductDim {
                product_key,
                product_id: product.product_id,
                product_number: product.product_number,
                product_name: product.name,
                category: category.and_then(|row| row.category.clone()),
                subcategory: category.and_then(|row| row.subcategory.clone()),
                maintenance: category.and_then(|row| row.maintenance.clone()),
                category_id: product.category_id,
                cost: product.cost,
                product_line: product.line,
                start_date: product.start_date,
            }
        })
        .collect();
    (rows, index)
}
