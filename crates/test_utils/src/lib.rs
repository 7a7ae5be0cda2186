//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! Northwind service test suite.
//!
//! # Modules
//!
//! - `fixtures`: A small, stable subset of the Northwind sample data
//! - `database`: PostgreSQL testcontainer management and seeding
//! - `assertions`: Assertion helpers for eager-loaded entity graphs

pub mod fixtures;
pub mod database;
pub mod assertions;

pub use fixtures::*;
pub use database::*;
pub use assertions::*;
