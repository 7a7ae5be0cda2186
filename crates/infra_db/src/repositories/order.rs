//! Order repository implementation
//!
//! Orders are read as a flattened join of `orders`, `order_details`,
//! `products`, and `categories`: one row per order line, or a single row
//! with NULL line columns for an order without lines. The adapter folds the
//! rows back into order graphs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::DatabaseError;

const ORDER_COLUMNS: &str = r#"
    o.orderid AS order_id,
    o.customerid AS customer_id,
    o.employeeid AS employee_id,
    o.orderdate::date AS order_date,
    o.requireddate::date AS required_date,
    o.shippeddate::date AS shipped_date,
    COALESCE(o.freight, 0)::numeric AS freight,
    COALESCE(o.shipname, '') AS ship_name,
    COALESCE(o.shipcity, '') AS ship_city
"#;

const LINE_COLUMNS: &str = r#"
    od.orderid AS line_order_id,
    od.productid AS line_product_id,
    od.unitprice::numeric AS line_unit_price,
    od.quantity::int4 AS line_quantity,
    od.discount::real AS line_discount
"#;

const PRODUCT_COLUMNS: &str = r#"
    p.productid AS product_id,
    p.productname AS product_name,
    p.categoryid AS product_category_id,
    COALESCE(p.quantityperunit, '') AS quantity_per_unit,
    COALESCE(p.unitprice, 0)::numeric AS product_unit_price,
    COALESCE(p.unitsinstock, 0)::int4 AS units_in_stock,
    c.categoryid AS category_id,
    c.categoryname AS category_name,
    c.description AS category_description
"#;

/// Repository for the `orders` and `order_details` tables
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Creates a new OrderRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn graph_query(filter: &str) -> String {
        format!(
            r#"
            SELECT {ORDER_COLUMNS}, {LINE_COLUMNS}, {PRODUCT_COLUMNS}
            FROM orders o
            LEFT JOIN order_details od ON od.orderid = o.orderid
            LEFT JOIN products p ON p.productid = od.productid
            LEFT JOIN categories c ON c.categoryid = p.categoryid
            {filter}
            ORDER BY o.orderid, od.productid
            "#
        )
    }

    /// Retrieves the graph rows of one order, ordered by product id
    ///
    /// An empty result means the order does not exist.
    pub async fn find_graph(&self, order_id: i32) -> Result<Vec<OrderGraphRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, OrderGraphRow>(&Self::graph_query("WHERE o.orderid = $1"))
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Retrieves the graph rows of every order, ordered by order id then product id
    pub async fn list_graphs(&self) -> Result<Vec<OrderGraphRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, OrderGraphRow>(&Self::graph_query(""))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Retrieves the lines of one order with product and category, ordered by product id
    pub async fn details_by_order(&self, order_id: i32) -> Result<Vec<DetailWithProductRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, DetailWithProductRow>(&format!(
            r#"
            SELECT {LINE_COLUMNS}, {PRODUCT_COLUMNS}
            FROM order_details od
            LEFT JOIN products p ON p.productid = od.productid
            LEFT JOIN categories c ON c.categoryid = p.categoryid
            WHERE od.orderid = $1
            ORDER BY od.productid
            "#
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Retrieves the lines referencing one product with their order header
    ///
    /// Ordered by unit price descending, then order date, then order id.
    pub async fn details_by_product(&self, product_id: i32) -> Result<Vec<DetailWithOrderRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, DetailWithOrderRow>(&format!(
            r#"
            SELECT {LINE_COLUMNS}, {ORDER_COLUMNS}
            FROM order_details od
            JOIN orders o ON o.orderid = od.orderid
            WHERE od.productid = $1
            ORDER BY od.unitprice DESC, o.orderdate ASC, od.orderid ASC
            "#
        ))
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Order header columns
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRow {
    pub order_id: i32,
    pub customer_id: String,
    pub employee_id: i32,
    pub order_date: NaiveDate,
    pub required_date: NaiveDate,
    pub shipped_date: Option<NaiveDate>,
    pub freight: Decimal,
    pub ship_name: String,
    pub ship_city: String,
}

/// Order line columns; NULL when an outer join found no line
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LineRow {
    pub line_order_id: Option<i32>,
    pub line_product_id: Option<i32>,
    pub line_unit_price: Option<Decimal>,
    pub line_quantity: Option<i32>,
    pub line_discount: Option<f32>,
}

/// Product and category columns; NULL when an outer join found no match
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LineProductRow {
    pub product_id: Option<i32>,
    pub product_name: Option<String>,
    pub product_category_id: Option<i32>,
    pub quantity_per_unit: Option<String>,
    pub product_unit_price: Option<Decimal>,
    pub units_in_stock: Option<i32>,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    pub category_description: Option<String>,
}

/// One row of the order graph join
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderGraphRow {
    #[sqlx(flatten)]
    pub order: OrderRow,
    #[sqlx(flatten)]
    pub line: LineRow,
    #[sqlx(flatten)]
    pub product: LineProductRow,
}

/// An order line with its product and category
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DetailWithProductRow {
    #[sqlx(flatten)]
    pub line: LineRow,
    #[sqlx(flatten)]
    pub product: LineProductRow,
}

/// An order line with its order header
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DetailWithOrderRow {
    #[sqlx(flatten)]
    pub line: LineRow,
    #[sqlx(flatten)]
    pub order: OrderRow,
}
