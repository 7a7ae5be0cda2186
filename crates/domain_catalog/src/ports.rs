//! Catalog Data-Access Port
//!
//! This module defines the [`DataService`] port: the complete set of read and
//! write operations the API layer may perform against the catalog. Adapters:
//!
//! - **PostgreSQL Adapter**: `infra_db::adapters::PostgresDataService`
//! - **In-Memory Double**: [`mock::InMemoryDataService`], for tests
//!
//! # Contract
//!
//! - Absent rows are reported as `Ok(None)`, `Ok(false)`, or an empty `Vec`,
//!   never as `PortError::NotFound`.
//! - Every read returns a fully connected graph to the documented depth.
//! - New category ids are `max(existing id, or 0) + 1`, assigned atomically.
//! - A category that still owns products cannot be deleted
//!   (`PortError::Conflict`).
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_catalog::DataService;
//! use std::sync::Arc;
//!
//! let service: Arc<dyn DataService> = Arc::new(PostgresDataService::new(pool));
//! let beverages = service.get_products_by_category(CategoryId::new(1)).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{CategoryId, DomainPort, HealthCheckable, OrderId, PortError, ProductId};

use crate::category::Category;
use crate::order::{Order, OrderDetail};
use crate::product::Product;

/// The data-access port for the catalog
///
/// All methods are async and return `Result<T, PortError>`; errors are
/// reserved for store failures and rejected writes.
#[async_trait]
pub trait DataService: DomainPort + HealthCheckable {
    // ========================================================================
    // Categories
    // ========================================================================

    /// Lists every category ordered by id
    async fn list_categories(&self) -> Result<Vec<Category>, PortError>;

    /// Retrieves a category by id
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, PortError>;

    /// Creates a category with the next id (`max + 1`, or 1 when empty)
    ///
    /// Name validation belongs to the caller.
    async fn create_category(&self, name: &str, description: &str) -> Result<Category, PortError>;

    /// Overwrites name and description
    ///
    /// # Returns
    ///
    /// `false` without mutation when no category has the given id
    async fn update_category(
        &self,
        id: CategoryId,
        name: &str,
        description: &str,
    ) -> Result<bool, PortError>;

    /// Deletes a category
    ///
    /// # Returns
    ///
    /// `false` when no category has the given id
    ///
    /// # Errors
    ///
    /// `PortError::Conflict` when products still reference the category
    async fn delete_category(&self, id: CategoryId) -> Result<bool, PortError>;

    // ========================================================================
    // Products
    // ========================================================================

    /// Retrieves a product with its category loaded
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, PortError>;

    /// Products of one category ordered by id, each with its category loaded
    async fn get_products_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, PortError>;

    /// Products whose name contains `substring`, case-insensitively,
    /// ordered by id and with categories loaded
    async fn get_products_by_name(&self, substring: &str) -> Result<Vec<Product>, PortError>;

    // ========================================================================
    // Orders
    // ========================================================================

    /// Retrieves an order with details, their products, and the products'
    /// categories loaded
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, PortError>;

    /// Lists every order ordered by id, loaded like [`DataService::get_order`]
    async fn list_orders(&self) -> Result<Vec<Order>, PortError>;

    /// Lines of one order ordered by product id, with product and category loaded
    async fn get_order_details_by_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderDetail>, PortError>;

    /// Lines referencing one product with their order header loaded
    ///
    /// Ordered by [`crate::order::product_history_ordering`]: unit price
    /// descending, then order date ascending, then order id ascending.
    async fn get_order_details_by_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<OrderDetail>, PortError>;
}

/// In-memory implementation of DataService for testing
///
/// Stores the four tables in ordered maps behind a single lock so that
/// writes are atomic and reads see a consistent graph.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult};

    use crate::order::product_history_ordering;
    use crate::snapshot::CatalogSnapshot;

    #[derive(Debug, Default)]
    struct Tables {
        categories: BTreeMap<CategoryId, Category>,
        products: BTreeMap<ProductId, Product>,
        orders: BTreeMap<OrderId, Order>,
        order_details: BTreeMap<(OrderId, ProductId), OrderDetail>,
    }

    impl Tables {
        fn with_category(&self, product: &Product) -> Product {
            Product {
                category: self.categories.get(&product.category_id).cloned(),
                ..product.clone()
            }
        }

        fn order_graph(&self, order: &Order) -> Order {
            let details = self
                .order_details
                .range((order.id, ProductId::new(i32::MIN))..=(order.id, ProductId::new(i32::MAX)))
                .map(|(_, d)| self.detail_with_product(d))
                .collect();
            Order {
                details,
                ..order.clone()
            }
        }

        fn detail_with_product(&self, detail: &OrderDetail) -> OrderDetail {
            OrderDetail {
                product: self.products.get(&detail.product_id).map(|p| self.with_category(p)),
                order: None,
                ..detail.clone()
            }
        }
    }

    /// In-memory mock implementation of DataService
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryDataService {
        tables: Arc<RwLock<Tables>>,
    }

    impl InMemoryDataService {
        /// Creates an empty service
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a service pre-populated from a snapshot
        ///
        /// Relations on the snapshot rows are ignored; they are rebuilt from
        /// foreign keys on every read.
        ///
        /// # Errors
        ///
        /// Returns the snapshot's validation error if keys collide or
        /// references dangle.
        pub fn with_snapshot(snapshot: CatalogSnapshot) -> Result<Self, PortError> {
            snapshot.validate()?;

            let tables = Tables {
                categories: snapshot.categories.into_iter().map(|c| (c.id, c)).collect(),
                products: snapshot
                    .products
                    .into_iter()
                    .map(|p| (p.id, p.detached()))
                    .collect(),
                orders: snapshot
                    .orders
                    .into_iter()
                    .map(|o| (o.id, o.header()))
                    .collect(),
                order_details: snapshot
                    .order_details
                    .into_iter()
                    .map(|d| (d.key(), d.detached()))
                    .collect(),
            };

            Ok(Self {
                tables: Arc::new(RwLock::new(tables)),
            })
        }
    }

    impl DomainPort for InMemoryDataService {}

    #[async_trait]
    impl HealthCheckable for InMemoryDataService {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "in-memory-data-service".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("In-memory adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl DataService for InMemoryDataService {
        async fn list_categories(&self) -> Result<Vec<Category>, PortError> {
            Ok(self.tables.read().await.categories.values().cloned().collect())
        }

        async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, PortError> {
            Ok(self.tables.read().await.categories.get(&id).cloned())
        }

        async fn create_category(&self, name: &str, description: &str) -> Result<Category, PortError> {
            let mut tables = self.tables.write().await;
            let id = match tables.categories.keys().next_back() {
                Some(max) => max.next().ok_or_else(|| {
                    PortError::internal(format!("no category id left after {}", max))
                })?,
                None => CategoryId::new(1),
            };

            let category = Category::new(id, name, description);
            tables.categories.insert(id, category.clone());
            Ok(category)
        }

        async fn update_category(
            &self,
            id: CategoryId,
            name: &str,
            description: &str,
        ) -> Result<bool, PortError> {
            let mut tables = self.tables.write().await;
            match tables.categories.get_mut(&id) {
                Some(category) => {
                    category.name = name.to_string();
                    category.description = description.to_string();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete_category(&self, id: CategoryId) -> Result<bool, PortError> {
            let mut tables = self.tables.write().await;
            if !tables.categories.contains_key(&id) {
                return Ok(false);
            }

            let dependents = tables.products.values().filter(|p| p.category_id == id).count();
            if dependents > 0 {
                return Err(PortError::conflict(format!(
                    "category {} still has {} product(s)",
                    id, dependents
                )));
            }

            tables.categories.remove(&id);
            Ok(true)
        }

        async fn get_product(&self, id: ProductId) -> Result<Option<Product>, PortError> {
            let tables = self.tables.read().await;
            Ok(tables.products.get(&id).map(|p| tables.with_category(p)))
        }

        async fn get_products_by_category(
            &self,
            category_id: CategoryId,
        ) -> Result<Vec<Product>, PortError> {
            let tables = self.tables.read().await;
            Ok(tables
                .products
                .values()
                .filter(|p| p.category_id == category_id)
                .map(|p| tables.with_category(p))
                .collect())
        }

        async fn get_products_by_name(&self, substring: &str) -> Result<Vec<Product>, PortError> {
            let needle = substring.to_lowercase();
            let tables = self.tables.read().await;
            Ok(tables
                .products
                .values()
                .filter(|p| p.name.to_lowercase().contains(&needle))
                .map(|p| tables.with_category(p))
                .collect())
        }

        async fn get_order(&self, id: OrderId) -> Result<Option<Order>, PortError> {
            let tables = self.tables.read().await;
            Ok(tables.orders.get(&id).map(|o| tables.order_graph(o)))
        }

        async fn list_orders(&self) -> Result<Vec<Order>, PortError> {
            let tables = self.tables.read().await;
            Ok(tables.orders.values().map(|o| tables.order_graph(o)).collect())
        }

        async fn get_order_details_by_order(
            &self,
            order_id: OrderId,
        ) -> Result<Vec<OrderDetail>, PortError> {
            let tables = self.tables.read().await;
            Ok(tables
                .order_details
                .values()
                .filter(|d| d.order_id == order_id)
                .map(|d| tables.detail_with_product(d))
                .collect())
        }

        async fn get_order_details_by_product(
            &self,
            product_id: ProductId,
        ) -> Result<Vec<OrderDetail>, PortError> {
            let tables = self.tables.read().await;
            let mut details: Vec<OrderDetail> = tables
                .order_details
                .values()
                .filter(|d| d.product_id == product_id)
                .map(|d| OrderDetail {
                    order: tables.orders.get(&d.order_id).cloned().map(Box::new),
                    ..d.clone()
                })
                .collect();
            details.sort_by(product_history_ordering);
            Ok(details)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::InMemoryDataService;

    #[tokio::test]
    async fn test_mock_create_on_empty_store_starts_at_one() {
        let service = InMemoryDataService::new();
        let created = service.create_category("Beverages", "Drinks").await.unwrap();
        assert_eq!(created.id, CategoryId::new(1));

        let second = service.create_category("Condiments", "").await.unwrap();
        assert_eq!(second.id, CategoryId::new(2));
    }

    #[tokio::test]
    async fn test_mock_create_after_max_id_is_an_error() {
        let service = InMemoryDataService::with_snapshot(crate::CatalogSnapshot {
            categories: vec![Category::new(CategoryId::new(i32::MAX), "Last", "")],
            ..Default::default()
        })
        .unwrap();

        let err = service.create_category("Overflow", "").await.unwrap_err();

        assert!(matches!(err, PortError::Internal { .. }));
        assert_eq!(service.list_categories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_update_missing_returns_false() {
        let service = InMemoryDataService::new();
        let updated = service.update_category(CategoryId::new(7), "X", "Y").await.unwrap();
        assert!(!updated);
        assert!(service.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_delete_missing_returns_false() {
        let service = InMemoryDataService::new();
        assert!(!service.delete_category(CategoryId::new(7)).await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let service = InMemoryDataService::new();
        let result = service.health_check().await;
        assert_eq!(result.status, core_kernel::AdapterHealth::Healthy);
    }
}
