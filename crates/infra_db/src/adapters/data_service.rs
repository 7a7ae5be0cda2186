//! PostgreSQL Data Service Adapter
//!
//! This module provides the database implementation of the `DataService`
//! port. The adapter:
//!
//! - Delegates SQL to the table repositories
//! - Converts flat rows into connected entity graphs
//! - Translates database errors into port errors
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresDataService;
//! use domain_catalog::DataService;
//! use std::sync::Arc;
//!
//! let service: Arc<dyn DataService> = Arc::new(PostgresDataService::new(pool));
//! let chai = service.get_products_by_name("chai").await?;
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use core_kernel::{
    AdapterHealth, CategoryId, DomainPort, HealthCheckResult, HealthCheckable, OrderId, PortError,
    ProductId,
};
use domain_catalog::{Category, DataService, Order, OrderDetail, Product};

use crate::error::{db_to_port_error, DatabaseError};
use crate::repositories::category::{CategoryRepository, CategoryRow};
use crate::repositories::order::{
    DetailWithOrderRow, DetailWithProductRow, LineProductRow, LineRow, OrderGraphRow,
    OrderRepository, OrderRow,
};
use crate::repositories::product::{ProductRepository, ProductWithCategoryRow};

/// A ping slower than this reports the adapter as degraded
const DEGRADED_LATENCY_MS: u64 = 1_000;

/// PostgreSQL-backed implementation of the DataService trait
///
/// Cloning is cheap: the repositories share one connection pool.
///
/// # Error Handling
///
/// - Absent rows are returned as `None`, `false`, or an empty `Vec`
/// - A delete blocked by products -> `PortError::Conflict`
/// - Connection and pool failures -> `PortError::Connection` / `ServiceUnavailable`
/// - Other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresDataService {
    categories: CategoryRepository,
    products: ProductRepository,
    orders: OrderRepository,
    pool: PgPool,
}

impl PostgresDataService {
    /// Creates a new adapter over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            categories: CategoryRepository::new(pool.clone()),
            products: ProductRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            pool,
        }
    }
}

// Mark as a domain port
impl DomainPort for PostgresDataService {}

#[async_trait]
impl HealthCheckable for PostgresDataService {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) if latency_ms > DEGRADED_LATENCY_MS => HealthCheckResult {
                adapter_id: "postgres-data-service".to_string(),
                status: AdapterHealth::Degraded,
                latency_ms,
                message: Some(format!("Slow database ping: {}ms", latency_ms)),
                checked_at: Utc::now(),
            },
            Ok(_) => HealthCheckResult {
                adapter_id: "postgres-data-service".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "postgres-data-service".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl DataService for PostgresDataService {
    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, PortError> {
        let rows = self.categories.list().await.map_err(db_to_port_error)?;
        debug!(count = rows.len(), "Listed categories");
        Ok(rows.into_iter().map(row_to_category).collect())
    }

    #[instrument(skip(self), fields(category_id = %id))]
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, PortError> {
        let row = self
            .categories
            .find_by_id(id.value())
            .await
            .map_err(db_to_port_error)?;
        Ok(row.map(row_to_category))
    }

    #[instrument(skip(self, description))]
    async fn create_category(&self, name: &str, description: &str) -> Result<Category, PortError> {
        let row = self
            .categories
            .insert_next(name, description)
            .await
            .map_err(db_to_port_error)?;
        info!(category_id = row.category_id, "Created category");
        Ok(row_to_category(row))
    }

    #[instrument(skip(self, description), fields(category_id = %id))]
    async fn update_category(
        &self,
        id: CategoryId,
        name: &str,
        description: &str,
    ) -> Result<bool, PortError> {
        let updated = self
            .categories
            .update(id.value(), name, description)
            .await
            .map_err(db_to_port_error)?;
        if updated {
            info!("Updated category");
        }
        Ok(updated)
    }

    #[instrument(skip(self), fields(category_id = %id))]
    async fn delete_category(&self, id: CategoryId) -> Result<bool, PortError> {
        match self.categories.delete(id.value()).await {
            Ok(deleted) => {
                if deleted {
                    info!("Deleted category");
                }
                Ok(deleted)
            }
            Err(e @ DatabaseError::ForeignKeyViolation(_)) => {
                warn!(error = %e, "Rejected category delete");
                Err(db_to_port_error(e))
            }
            Err(e) => Err(db_to_port_error(e)),
        }
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, PortError> {
        let row = self
            .products
            .find_by_id(id.value())
            .await
            .map_err(db_to_port_error)?;
        Ok(row.map(row_to_product))
    }

    #[instrument(skip(self), fields(category_id = %category_id))]
    async fn get_products_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, PortError> {
        let rows = self
            .products
            .find_by_category(category_id.value())
            .await
            .map_err(db_to_port_error)?;
        Ok(rows.into_iter().map(row_to_product).collect())
    }

    #[instrument(skip(self))]
    async fn get_products_by_name(&self, substring: &str) -> Result<Vec<Product>, PortError> {
        let rows = self
            .products
            .search_by_name(substring)
            .await
            .map_err(db_to_port_error)?;
        debug!(count = rows.len(), "Searched products by name");
        Ok(rows.into_iter().map(row_to_product).collect())
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, PortError> {
        let rows = self
            .orders
            .find_graph(id.value())
            .await
            .map_err(db_to_port_error)?;
        Ok(fold_order_graphs(rows)?.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, PortError> {
        let rows = self.orders.list_graphs().await.map_err(db_to_port_error)?;
        let orders = fold_order_graphs(rows)?;
        debug!(count = orders.len(), "Listed orders");
        Ok(orders)
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    async fn get_order_details_by_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderDetail>, PortError> {
        let rows = self
            .orders
            .details_by_order(order_id.value())
            .await
            .map_err(db_to_port_error)?;
        rows.into_iter().map(row_to_detail_with_product).collect()
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn get_order_details_by_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<OrderDetail>, PortError> {
        let rows = self
            .orders
            .details_by_product(product_id.value())
            .await
            .map_err(db_to_port_error)?;
        rows.into_iter().map(row_to_detail_with_order).collect()
    }
}

// ============================================================================
// Row conversion
// ============================================================================

fn row_to_category(row: CategoryRow) -> Category {
    Category::new(CategoryId::new(row.category_id), row.name, row.description)
}

fn row_to_product(row: ProductWithCategoryRow) -> Product {
    let category = match (row.joined_category_id, row.category_name) {
        (Some(id), Some(name)) => Some(Category::new(
            CategoryId::new(id),
            name,
            row.category_description.unwrap_or_default(),
        )),
        _ => None,
    };

    Product {
        id: ProductId::new(row.product_id),
        name: row.name,
        category_id: CategoryId::new(row.category_id),
        quantity_per_unit: row.quantity_per_unit,
        unit_price: row.unit_price,
        units_in_stock: row.units_in_stock,
        category,
    }
}

fn row_to_order_header(row: OrderRow) -> Order {
    Order {
        id: OrderId::new(row.order_id),
        customer_id: row.customer_id,
        employee_id: row.employee_id,
        order_date: row.order_date,
        required_date: row.required_date,
        shipped_date: row.shipped_date,
        freight: row.freight,
        ship_name: row.ship_name,
        ship_city: row.ship_city,
        details: Vec::new(),
    }
}

/// Builds the product of a joined line, if the join matched one
fn line_product(row: LineProductRow) -> Option<Product> {
    let category = match (row.category_id, row.category_name) {
        (Some(id), Some(name)) => Some(Category::new(
            CategoryId::new(id),
            name,
            row.category_description.unwrap_or_default(),
        )),
        _ => None,
    };

    Some(Product {
        id: ProductId::new(row.product_id?),
        name: row.product_name?,
        category_id: CategoryId::new(row.product_category_id?),
        quantity_per_unit: row.quantity_per_unit.unwrap_or_default(),
        unit_price: row.product_unit_price.unwrap_or_default(),
        units_in_stock: row.units_in_stock.unwrap_or_default(),
        category,
    })
}

/// Builds a detail from line columns
///
/// # Returns
///
/// `Ok(None)` when the outer join produced no line at all
fn line_to_detail(line: LineRow) -> Result<Option<OrderDetail>, PortError> {
    let (Some(order_id), Some(product_id)) = (line.line_order_id, line.line_product_id) else {
        return Ok(None);
    };

    let missing = |column: &str| {
        PortError::internal(format!(
            "order detail ({}, {}) has NULL {}",
            order_id, product_id, column
        ))
    };

    Ok(Some(OrderDetail {
        order_id: OrderId::new(order_id),
        product_id: ProductId::new(product_id),
        unit_price: line.line_unit_price.ok_or_else(|| missing("unitprice"))?,
        quantity: line.line_quantity.ok_or_else(|| missing("quantity"))?,
        discount: line.line_discount.unwrap_or_default(),
        product: None,
        order: None,
    }))
}

fn row_to_detail_with_product(row: DetailWithProductRow) -> Result<OrderDetail, PortError> {
    let detail = line_to_detail(row.line)?
        .ok_or_else(|| PortError::internal("order detail row without key columns"))?;
    Ok(OrderDetail {
        product: line_product(row.product),
        ..detail
    })
}

fn row_to_detail_with_order(row: DetailWithOrderRow) -> Result<OrderDetail, PortError> {
    let detail = line_to_detail(row.line)?
        .ok_or_else(|| PortError::internal("order detail row without key columns"))?;
    Ok(OrderDetail {
        order: Some(Box::new(row_to_order_header(row.order))),
        ..detail
    })
}

/// Folds graph rows (sorted by order id, then product id) into orders
///
/// Consecutive rows with the same order id belong to one order. A row with
/// NULL line columns marks an order without lines. A line with NULL value
/// columns fails the whole read.
fn fold_order_graphs(rows: Vec<OrderGraphRow>) -> Result<Vec<Order>, PortError> {
    let mut orders: Vec<Order> = Vec::new();

    for row in rows {
        let order_id = OrderId::new(row.order.order_id);
        if orders.last().map(|o| o.id) != Some(order_id) {
            orders.push(row_to_order_header(row.order));
        }

        let Some(detail) = line_to_detail(row.line)? else {
            continue;
        };

        if let Some(order) = orders.last_mut() {
            order.details.push(OrderDetail {
                product: line_product(row.product),
                ..detail
            });
        }
    }

    Ok(orders)
}
