//! Repository implementations for the Northwind tables
//!
//! Each repository encapsulates the SQL for one table and returns row types
//! that mirror the selected columns. Relations are loaded with joins in the
//! same statement so a read is always a single round trip.
//!
//! Queries cast money, discount, and date columns explicitly so the service
//! reads Northwind ports that store them with different column types.

pub mod category;
pub mod product;
pub mod order;

pub use category::CategoryRepository;
pub use product::ProductRepository;
pub use order::OrderRepository;
