//! Products and their category relation

use core_kernel::{CategoryId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A product sold by the company
///
/// `category` is only populated when the read operation that produced the
/// product eagerly loads it; `category_id` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Foreign key to the owning category
    pub category_id: CategoryId,
    /// Packaging description, e.g. "10 boxes x 20 bags"
    pub quantity_per_unit: String,
    /// List price per unit
    pub unit_price: Decimal,
    pub units_in_stock: i32,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Product {
    /// Name of the loaded category, or `None` when it was not loaded
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// Alias for `name`, matching the `ProductName` column label
    pub fn product_name(&self) -> &str {
        &self.name
    }

    /// Returns true if any units are in stock
    pub fn in_stock(&self) -> bool {
        self.units_in_stock > 0
    }

    /// Returns a copy without the category relation
    pub fn detached(&self) -> Self {
        Self {
            category: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(category: Option<Category>) -> Product {
        Product {
            id: ProductId::new(3),
            name: "Aniseed Syrup".to_string(),
            category_id: CategoryId::new(2),
            quantity_per_unit: "12 - 550 ml bottles".to_string(),
            unit_price: Decimal::new(1000, 2),
            units_in_stock: 13,
            category,
        }
    }

    #[test]
    fn test_category_name_when_loaded() {
        let p = product(Some(Category::new(CategoryId::new(2), "Condiments", "Sweet and savory sauces")));
        assert_eq!(p.category_name(), Some("Condiments"));
    }

    #[test]
    fn test_category_name_absent_when_not_loaded() {
        assert_eq!(product(None).category_name(), None);
    }

    #[test]
    fn test_detached_drops_relation_only() {
        let p = product(Some(Category::new(CategoryId::new(2), "Condiments", "")));
        let d = p.detached();
        assert!(d.category.is_none());
        assert_eq!(d.category_id, p.category_id);
        assert_eq!(d.product_name(), "Aniseed Syrup");
    }
}
