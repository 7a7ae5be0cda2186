//! Category repository implementation
//!
//! Database access for the `categories` table, including id assignment for
//! new rows and the dependent-product check that guards deletes.

use sqlx::PgPool;
use tracing::debug;

use crate::error::DatabaseError;

/// Columns selected for every category read
const CATEGORY_COLUMNS: &str = r#"
    categoryid AS category_id,
    categoryname AS name,
    COALESCE(description, '') AS description
"#;

/// Repository for the `categories` table
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves every category ordered by id
    pub async fn list(&self) -> Result<Vec<CategoryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY categoryid"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Retrieves a category by id
    pub async fn find_by_id(&self, category_id: i32) -> Result<Option<CategoryRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE categoryid = $1"
        ))
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Inserts a category with id `max(categoryid) + 1` (1 for an empty table)
    ///
    /// The table is locked against concurrent writers for the duration of
    /// the transaction so two inserts cannot compute the same id. Readers are
    /// not blocked.
    pub async fn insert_next(&self, name: &str, description: &str) -> Result<CategoryRow, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("LOCK TABLE categories IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            r#"
            INSERT INTO categories (categoryid, categoryname, description)
            SELECT COALESCE(MAX(categoryid), 0) + 1, $1, $2 FROM categories
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(category_id = row.category_id, "Inserted category");
        Ok(row)
    }

    /// Overwrites name and description
    ///
    /// # Returns
    ///
    /// `false` when no row has the given id
    pub async fn update(&self, category_id: i32, name: &str, description: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE categories SET categoryname = $2, description = $3 WHERE categoryid = $1",
        )
        .bind(category_id)
        .bind(name)
        .bind(description)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Deletes a category that no product references
    ///
    /// The category row is locked first; inserting a product for it has to
    /// wait on that lock, so the dependent count cannot go stale before the
    /// delete runs.
    ///
    /// # Returns
    ///
    /// `false` when no row has the given id
    ///
    /// # Errors
    ///
    /// `DatabaseError::ForeignKeyViolation` when products still reference it
    pub async fn delete(&self, category_id: i32) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i32>(
            "SELECT categoryid FROM categories WHERE categoryid = $1 FOR UPDATE",
        )
        .bind(category_id)
        .fetch_optional(&mut *tx)
        .await?;

        if exists.is_none() {
            return Ok(false);
        }

        let dependents = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products WHERE categoryid = $1",
        )
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await?;

        if dependents > 0 {
            return Err(DatabaseError::has_dependents("Category", category_id, dependents, "product"));
        }

        sqlx::query("DELETE FROM categories WHERE categoryid = $1")
            .bind(category_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}

/// Database row for a category
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRow {
    pub category_id: i32,
    pub name: String,
    pub description: String,
}
