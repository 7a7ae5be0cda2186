//! Northwind Catalog Domain
//!
//! This crate holds the entity model of the Northwind subset served by the
//! API (categories, products, orders, and order lines) together with the
//! [`DataService`] port every data-access adapter implements.
//!
//! # Relationships
//!
//! - A **Category** owns zero or more **Products**
//! - A **Product** belongs to exactly one Category
//! - An **Order** owns an ordered collection of **OrderDetail** lines
//! - An **OrderDetail** is keyed by `(OrderId, ProductId)` and references one
//!   Order and one Product
//!
//! Related entities are carried as optional fields. Each `DataService`
//! operation documents which of them it populates, so callers never issue a
//! second query to render a response.
//!
//! # Examples
//!
//! ```rust
//! use domain_catalog::{Category, Product};
//! use core_kernel::{CategoryId, ProductId};
//! use rust_decimal::Decimal;
//!
//! let beverages = Category::new(CategoryId::new(1), "Beverages", "Soft drinks, coffees, teas");
//! let chai = Product {
//!     id: ProductId::new(1),
//!     name: "Chai".to_string(),
//!     category_id: beverages.id,
//!     quantity_per_unit: "10 boxes x 20 bags".to_string(),
//!     unit_price: Decimal::new(1800, 2),
//!     units_in_stock: 39,
//!     category: Some(beverages),
//! };
//!
//! assert_eq!(chai.category_name(), Some("Beverages"));
//! ```

pub mod category;
pub mod product;
pub mod order;
pub mod snapshot;
pub mod ports;

pub use category::Category;
pub use product::Product;
pub use order::{Order, OrderDetail, product_history_ordering};
pub use snapshot::CatalogSnapshot;
pub use ports::DataService;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemoryDataService;
