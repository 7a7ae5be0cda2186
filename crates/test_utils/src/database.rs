//! Database Test Utilities
//!
//! Provides helpers for database testing including testcontainer management,
//! schema initialization, and seeding from a [`CatalogSnapshot`].

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use domain_catalog::CatalogSnapshot;

/// Default PostgreSQL image for testing
const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "northwind_test";

/// Schema applied to every test database
pub const SCHEMA_SQL: &str = include_str!("../../../migrations/0001_northwind_schema.sql");

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration for test database
#[derive(Debug, Clone)]
pub struct TestDatabaseConfig {
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl Default for TestDatabaseConfig {
    fn default() -> Self {
        Self {
            user: POSTGRES_USER.to_string(),
            password: POSTGRES_PASSWORD.to_string(),
            database: POSTGRES_DB.to_string(),
            host: "localhost".to_string(),
            port: 5432,
        }
    }
}

impl TestDatabaseConfig {
    /// Creates the database connection URL
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// A wrapper around a PostgreSQL test container
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub config: TestDatabaseConfig,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a new PostgreSQL container with the Northwind schema applied
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or the schema fails to apply
    pub async fn new() -> Result<Self, BoxError> {
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr("database system is ready to accept connections"))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .start()
            .await?;

        let port = container.get_host_port_ipv4(5432).await?;
        let host = container.get_host().await?.to_string();

        let config = TestDatabaseConfig {
            host,
            port,
            ..Default::default()
        };

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.connection_url())
            .await?;

        let test_db = Self {
            _container: container,
            config,
            pool,
        };

        test_db.init_schema().await?;

        Ok(test_db)
    }

    /// Starts a container and seeds it with the given snapshot
    pub async fn seeded(snapshot: &CatalogSnapshot) -> Result<Self, BoxError> {
        let db = Self::new().await?;
        db.seed(snapshot).await?;
        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), BoxError> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Inserts every row of the snapshot in one transaction
    pub async fn seed(&self, snapshot: &CatalogSnapshot) -> Result<(), BoxError> {
        let mut tx = self.pool.begin().await?;

        for c in &snapshot.categories {
            sqlx::query("INSERT INTO categories (categoryid, categoryname, description) VALUES ($1, $2, $3)")
                .bind(c.id.value())
                .bind(&c.name)
                .bind(&c.description)
                .execute(&mut *tx)
                .await?;
        }

        for p in &snapshot.products {
            sqlx::query(
                "INSERT INTO products (productid, productname, categoryid, quantityperunit, unitprice, unitsinstock) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(p.id.value())
            .bind(&p.name)
            .bind(p.category_id.value())
            .bind(&p.quantity_per_unit)
            .bind(p.unit_price)
            .bind(p.units_in_stock)
            .execute(&mut *tx)
            .await?;
        }

        for o in &snapshot.orders {
            sqlx::query(
                "INSERT INTO orders (orderid, customerid, employeeid, orderdate, requireddate, shippeddate, freight, shipname, shipcity) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(o.id.value())
            .bind(&o.customer_id)
            .bind(o.employee_id)
            .bind(o.order_date)
            .bind(o.required_date)
            .bind(o.shipped_date)
            .bind(o.freight)
            .bind(&o.ship_name)
            .bind(&o.ship_city)
            .execute(&mut *tx)
            .await?;
        }

        for d in &snapshot.order_details {
            sqlx::query(
                "INSERT INTO order_details (orderid, productid, unitprice, quantity, discount) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(d.order_id.value())
            .bind(d.product_id.value())
            .bind(d.unit_price)
            .bind(d.quantity)
            .bind(d.discount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

/// Creates an isolated test database seeded with the given snapshot
///
/// Use this when tests modify data and isolation is required
pub async fn create_seeded_test_database(snapshot: &CatalogSnapshot) -> Result<TestDatabase, BoxError> {
    TestDatabase::seeded(snapshot).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_connection_url() {
        let config = TestDatabaseConfig::default();
        let url = config.connection_url();

        assert!(url.starts_with("postgres://"));
        assert!(url.contains(POSTGRES_USER));
        assert!(url.contains(POSTGRES_DB));
    }

    #[test]
    fn test_schema_declares_all_tables() {
        for table in ["categories", "products", "orders", "order_details"] {
            assert!(SCHEMA_SQL.contains(&format!("CREATE TABLE IF NOT EXISTS {table}")));
        }
    }
}
