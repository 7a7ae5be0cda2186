//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL side of the Northwind service using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern:
//!
//! - **Repositories** own the SQL for one table (plus the joins needed to
//!   eagerly load its relations) and return flat row types
//! - **Adapters** implement the `DataService` port on top of the
//!   repositories, folding rows into connected entity graphs
//!
//! Every operation checks a connection out of the shared pool for its own
//! duration; writes run inside a transaction that commits or rolls back as
//! a unit.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, PostgresDataService};
//!
//! let pool = create_pool(DatabaseConfig::from_connection_string("postgres://localhost/northwind")?).await?;
//! let service = PostgresDataService::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, parse_connection_string, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::PostgresDataService;
