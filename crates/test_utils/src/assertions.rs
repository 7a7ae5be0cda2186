//! Custom Test Assertions
//!
//! Assertion helpers for the entity graphs returned by `DataService` reads.
//! They give more meaningful failure messages than chained `unwrap`s.

use domain_catalog::{Order, OrderDetail, Product};

/// Asserts that a product carries its category and that the category matches
/// the foreign key
///
/// # Panics
///
/// Panics if the category is missing or belongs to a different id
pub fn assert_category_loaded(product: &Product) {
    let category = product
        .category
        .as_ref()
        .unwrap_or_else(|| panic!("product {} has no category loaded", product.id));
    assert_eq!(
        category.id, product.category_id,
        "product {} loaded category {} but references {}",
        product.id, category.id, product.category_id
    );
}

/// Asserts that an order line carries its product and the product's category
pub fn assert_detail_product_loaded(detail: &OrderDetail) {
    let product = detail.product.as_ref().unwrap_or_else(|| {
        panic!(
            "order detail ({}, {}) has no product loaded",
            detail.order_id, detail.product_id
        )
    });
    assert_eq!(product.id, detail.product_id, "order detail loaded the wrong product");
    assert_category_loaded(product);
}

/// Asserts the three-level chain order -> details -> product -> category
///
/// Also checks the lines belong to the order and are ordered by product id.
pub fn assert_order_fully_loaded(order: &Order) {
    for detail in &order.details {
        assert_eq!(
            detail.order_id, order.id,
            "order {} contains a line of order {}",
            order.id, detail.order_id
        );
        assert_detail_product_loaded(detail);
    }

    assert!(
        order.details.windows(2).all(|w| w[0].product_id < w[1].product_id),
        "order {} lines are not ordered by product id",
        order.id
    );
}

/// Asserts that a sequence is strictly ascending by the given key
pub fn assert_strictly_ascending<T, K: Ord + std::fmt::Debug>(items: &[T], key: impl Fn(&T) -> K) {
    let keys: Vec<K> = items.iter().map(key).collect();
    assert!(
        keys.windows(2).all(|w| w[0] < w[1]),
        "expected strictly ascending keys, got {:?}",
        keys
    );
}
