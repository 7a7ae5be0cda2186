//! Core Kernel - Foundational types shared by every layer of the Northwind service
//!
//! This crate provides the building blocks used across the workspace:
//! - Strongly-typed integer identifiers for catalog and order entities
//! - The `PortError` taxonomy returned by every data-access port
//! - Marker and health-check traits implemented by port adapters

pub mod identifiers;
pub mod ports;

pub use identifiers::{CategoryId, ProductId, OrderId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
