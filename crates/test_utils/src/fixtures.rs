//! Pre-built Test Fixtures
//!
//! A stable slice of the Northwind sample database. The ids, names, and
//! prices match the public sample data so expectations read naturally, but
//! only enough rows are kept to exercise every relationship:
//!
//! - `Meat/Poultry` (id 6) has no products and can be deleted
//! - Order 10251 has not shipped
//! - Order 10252 has no lines
//! - Product 51 appears on two orders at the same negotiated price
//! - Product 11 appears on two orders at different prices

use chrono::NaiveDate;
use core_kernel::{CategoryId, OrderId, ProductId};
use domain_catalog::{CatalogSnapshot, Category, Order, OrderDetail, Product};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Id of the category without products
pub const EMPTY_CATEGORY_ID: CategoryId = CategoryId::new(6);
/// Highest category id in the fixture
pub const MAX_CATEGORY_ID: CategoryId = CategoryId::new(8);
/// Id of the order that has not shipped
pub const UNSHIPPED_ORDER_ID: OrderId = OrderId::new(10251);
/// Id of the order without lines
pub const EMPTY_ORDER_ID: OrderId = OrderId::new(10252);

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("fixture dates are valid")
}

/// Builds a category row
pub fn category(id: i32, name: &str, description: &str) -> Category {
    Category::new(CategoryId::new(id), name, description)
}

/// Builds a product row without its category relation
pub fn product(
    id: i32,
    name: &str,
    category_id: i32,
    quantity_per_unit: &str,
    unit_price: Decimal,
    units_in_stock: i32,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category_id: CategoryId::new(category_id),
        quantity_per_unit: quantity_per_unit.to_string(),
        unit_price,
        units_in_stock,
        category: None,
    }
}

/// Builds an order line without relations
pub fn order_detail(order_id: i32, product_id: i32, unit_price: Decimal, quantity: i32, discount: f32) -> OrderDetail {
    OrderDetail {
        order_id: OrderId::new(order_id),
        product_id: ProductId::new(product_id),
        unit_price,
        quantity,
        discount,
        product: None,
        order: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn order(
    id: i32,
    customer_id: &str,
    employee_id: i32,
    order_date: NaiveDate,
    required_date: NaiveDate,
    shipped_date: Option<NaiveDate>,
    freight: Decimal,
    ship_name: &str,
    ship_city: &str,
) -> Order {
    Order {
        id: OrderId::new(id),
        customer_id: customer_id.to_string(),
        employee_id,
        order_date,
        required_date,
        shipped_date,
        freight,
        ship_name: ship_name.to_string(),
        ship_city: ship_city.to_string(),
        details: Vec::new(),
    }
}

/// All fixture categories, ordered by id
pub fn northwind_categories() -> Vec<Category> {
    vec![
        category(1, "Beverages", "Soft drinks, coffees, teas, beers, and ales"),
        category(2, "Condiments", "Sweet and savory sauces, relishes, spreads, and seasonings"),
        category(3, "Confections", "Desserts, candies, and sweet breads"),
        category(4, "Dairy Products", "Cheeses"),
        category(5, "Grains/Cereals", "Breads, crackers, pasta, and cereal"),
        category(6, "Meat/Poultry", "Prepared meats"),
        category(7, "Produce", "Dried fruit and bean curd"),
        category(8, "Seafood", "Seaweed and fish"),
    ]
}

/// All fixture products, ordered by id
pub fn northwind_products() -> Vec<Product> {
    vec![
        product(1, "Chai", 1, "10 boxes x 20 bags", dec!(18.00), 39),
        product(2, "Chang", 1, "24 - 12 oz bottles", dec!(19.00), 17),
        product(3, "Aniseed Syrup", 2, "12 - 550 ml bottles", dec!(10.00), 13),
        product(4, "Chef Anton's Cajun Seasoning", 2, "48 - 6 oz jars", dec!(22.00), 53),
        product(11, "Queso Cabrales", 4, "1 kg pkg.", dec!(21.00), 22),
        product(13, "Konbu", 8, "2 kg box", dec!(6.00), 24),
        product(14, "Tofu", 7, "40 - 100 g pkgs.", dec!(23.25), 35),
        product(16, "Pavlova", 3, "32 - 500 g boxes", dec!(17.45), 29),
        product(39, "Chartreuse verte", 1, "750 cc per bottle", dec!(18.00), 69),
        product(42, "Singaporean Hokkien Fried Mee", 5, "32 - 1 kg pkgs.", dec!(14.00), 26),
        product(51, "Manjimup Dried Apples", 7, "50 - 300 g pkgs.", dec!(53.00), 20),
        product(72, "Mozzarella di Giovanni", 4, "24 - 200 g pkgs.", dec!(34.80), 14),
        product(77, "Original Frankfurter grüne Soße", 2, "12 boxes", dec!(13.00), 32),
    ]
}

/// All fixture orders (headers only), ordered by id
pub fn northwind_orders() -> Vec<Order> {
    vec![
        order(10248, "VINET", 5, date(1996, 7, 4), date(1996, 8, 1), Some(date(1996, 7, 16)), dec!(32.38), "Vins et alcools Chevalier", "Reims"),
        order(10249, "TOMSP", 6, date(1996, 7, 5), date(1996, 8, 16), Some(date(1996, 7, 10)), dec!(11.61), "Toms Spezialitäten", "Münster"),
        order(10250, "HANAR", 4, date(1996, 7, 8), date(1996, 8, 5), Some(date(1996, 7, 12)), dec!(65.83), "Hanari Carnes", "Rio de Janeiro"),
        order(10251, "VICTE", 3, date(1996, 7, 8), date(1996, 8, 5), None, dec!(41.34), "Victuailles en stock", "Lyon"),
        order(10252, "SUPRD", 4, date(1996, 7, 9), date(1996, 8, 6), Some(date(1996, 7, 11)), dec!(51.30), "Suprêmes délices", "Charleroi"),
    ]
}

/// All fixture order lines
pub fn northwind_order_details() -> Vec<OrderDetail> {
    vec![
        order_detail(10248, 11, dec!(14.00), 12, 0.0),
        order_detail(10248, 42, dec!(9.80), 10, 0.0),
        order_detail(10248, 72, dec!(34.80), 5, 0.0),
        order_detail(10249, 14, dec!(18.60), 9, 0.0),
        order_detail(10249, 51, dec!(42.40), 40, 0.0),
        order_detail(10250, 51, dec!(42.40), 35, 0.15),
        order_detail(10251, 11, dec!(16.80), 15, 0.05),
        order_detail(10251, 42, dec!(9.80), 6, 0.05),
    ]
}

/// The complete fixture as a snapshot
pub fn northwind_snapshot() -> CatalogSnapshot {
    CatalogSnapshot {
        categories: northwind_categories(),
        products: northwind_products(),
        orders: northwind_orders(),
        order_details: northwind_order_details(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_consistent() {
        northwind_snapshot().validate().unwrap();
    }

    #[test]
    fn test_empty_category_has_no_products() {
        assert!(northwind_products().iter().all(|p| p.category_id != EMPTY_CATEGORY_ID));
    }

    #[test]
    fn test_max_category_id() {
        let max = northwind_categories().iter().map(|c| c.id).max();
        assert_eq!(max, Some(MAX_CATEGORY_ID));
    }
}
