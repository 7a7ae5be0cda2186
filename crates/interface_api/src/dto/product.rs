//! Product DTOs

use domain_catalog::Product;
use rust_decimal::Decimal;
use serde::Serialize;

/// Category reference nested in a product
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: i32,
    pub name: String,
}

/// `GET /api/products/{id}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub quantity_per_unit: String,
    pub unit_price: Decimal,
    pub units_in_stock: i32,
    pub in_stock: bool,
    /// `null` when the category row is missing
    pub category: Option<CategoryRef>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let in_stock = product.in_stock();
        Self {
            id: product.id.value(),
            name: product.name,
            quantity_per_unit: product.quantity_per_unit,
            unit_price: product.unit_price,
            units_in_stock: product.units_in_stock,
            in_stock,
            category: product.category.map(|c| CategoryRef {
                id: c.id.value(),
                name: c.name,
            }),
        }
    }
}

/// `GET /api/products/category/{id}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithCategoryName {
    pub name: String,
    pub category_name: Option<String>,
}

impl From<Product> for ProductWithCategoryName {
    fn from(product: Product) -> Self {
        Self {
            category_name: product.category.map(|c| c.name),
            name: product.name,
        }
    }
}

/// `GET /api/products/name/{name}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductByName {
    pub product_name: String,
    pub category_name: Option<String>,
}

impl From<Product> for ProductByName {
    fn from(product: Product) -> Self {
        Self {
            product_name: product.product_name().to_string(),
            category_name: product.category.map(|c| c.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{CategoryId, ProductId};
    use domain_catalog::Category;
    use serde_json::json;

    fn chai(category: Option<Category>) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Chai".to_string(),
            category_id: CategoryId::new(1),
            quantity_per_unit: "10 boxes x 20 bags".to_string(),
            unit_price: Decimal::new(1800, 2),
            units_in_stock: 39,
            category,
        }
    }

    #[test]
    fn test_product_response_nests_category() {
        let beverages = Category::new(CategoryId::new(1), "Beverages", "Soft drinks");
        let value = serde_json::to_value(ProductResponse::from(chai(Some(beverages)))).unwrap();

        assert_eq!(value["category"], json!({ "id": 1, "name": "Beverages" }));
        assert_eq!(value["quantityPerUnit"], "10 boxes x 20 bags");
        assert_eq!(value["unitsInStock"], 39);
        assert_eq!(value["inStock"], true);
    }

    #[test]
    fn test_product_response_null_category() {
        let value = serde_json::to_value(ProductResponse::from(chai(None))).unwrap();
        assert!(value["category"].is_null());
    }

    #[test]
    fn test_flat_projections() {
        let beverages = Category::new(CategoryId::new(1), "Beverages", "");

        let by_category = serde_json::to_value(ProductWithCategoryName::from(chai(Some(beverages.clone())))).unwrap();
        assert_eq!(by_category, json!({ "name": "Chai", "categoryName": "Beverages" }));

        let by_name = serde_json::to_value(ProductByName::from(chai(Some(beverages)))).unwrap();
        assert_eq!(by_name, json!({ "productName": "Chai", "categoryName": "Beverages" }));
    }
}
