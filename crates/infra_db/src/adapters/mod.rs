//! Port Adapters
//!
//! This module connects the `DataService` port to the PostgreSQL
//! repositories.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresDataService;
//! use domain_catalog::DataService;
//!
//! let service = PostgresDataService::new(pool);
//! let order = service.get_order(OrderId::new(10248)).await?;
//! ```

pub mod data_service;

pub use data_service::PostgresDataService;
