//! Flat catalog snapshots
//!
//! A [`CatalogSnapshot`] is the table-shaped form of the catalog: every
//! entity without its relations. Fixtures build one, the in-memory service
//! loads one, and the PostgreSQL test harness inserts one.

use std::collections::HashSet;

use core_kernel::PortError;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::order::{Order, OrderDetail};
use crate::product::Product;

/// Rows of the four catalog tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_details: Vec<OrderDetail>,
}

impl CatalogSnapshot {
    /// Checks key uniqueness and foreign-key references
    ///
    /// # Errors
    ///
    /// Returns `PortError::Conflict` for a duplicate key and
    /// `PortError::Validation` for a dangling reference.
    pub fn validate(&self) -> Result<(), PortError> {
        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(category.id) {
                return Err(PortError::conflict(format!("duplicate category id {}", category.id)));
            }
        }

        let mut product_ids = HashSet::new();
        for product in &self.products {
            if !product_ids.insert(product.id) {
                return Err(PortError::conflict(format!("duplicate product id {}", product.id)));
            }
            if !category_ids.contains(&product.category_id) {
                return Err(PortError::validation_field(
                    format!("product {} references missing category {}", product.id, product.category_id),
                    "category_id",
                ));
            }
        }

        let mut order_ids = HashSet::new();
        for order in &self.orders {
            if !order_ids.insert(order.id) {
                return Err(PortError::conflict(format!("duplicate order id {}", order.id)));
            }
        }

        let mut detail_keys = HashSet::new();
        for detail in &self.order_details {
            if !detail_keys.insert(detail.key()) {
                return Err(PortError::conflict(format!(
                    "duplicate order detail ({}, {})",
                    detail.order_id, detail.product_id
                )));
            }
            if !order_ids.contains(&detail.order_id) {
                return Err(PortError::validation_field(
                    format!("order detail references missing order {}", detail.order_id),
                    "order_id",
                ));
            }
            if !product_ids.contains(&detail.product_id) {
                return Err(PortError::validation_field(
                    format!("order detail references missing product {}", detail.product_id),
                    "product_id",
                ));
            }
            if !(0.0..=1.0).contains(&detail.discount) {
                return Err(PortError::validation_field(
                    format!("discount {} is outside 0.0..=1.0", detail.discount),
                    "discount",
                ));
            }
        }

        Ok(())
    }
}
