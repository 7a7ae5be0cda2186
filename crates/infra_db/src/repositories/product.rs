//! Product repository implementation
//!
//! Every product read joins `categories` so the owning category comes back
//! in the same row.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::DatabaseError;

/// Products left-joined to their category
const PRODUCT_WITH_CATEGORY: &str = r#"
    SELECT
        p.productid AS product_id,
        p.productname AS name,
        p.categoryid AS category_id,
        COALESCE(p.quantityperunit, '') AS quantity_per_unit,
        COALESCE(p.unitprice, 0)::numeric AS unit_price,
        COALESCE(p.unitsinstock, 0)::int4 AS units_in_stock,
        c.categoryid AS joined_category_id,
        c.categoryname AS category_name,
        c.description AS category_description
    FROM products p
    LEFT JOIN categories c ON c.categoryid = p.categoryid
"#;

/// Repository for the `products` table
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a product and its category
    pub async fn find_by_id(&self, product_id: i32) -> Result<Option<ProductWithCategoryRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ProductWithCategoryRow>(&format!(
            "{PRODUCT_WITH_CATEGORY} WHERE p.productid = $1"
        ))
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves the products of one category ordered by product id
    pub async fn find_by_category(&self, category_id: i32) -> Result<Vec<ProductWithCategoryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ProductWithCategoryRow>(&format!(
            "{PRODUCT_WITH_CATEGORY} WHERE p.categoryid = $1 ORDER BY p.productid"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Retrieves products whose name contains `substring`, ignoring case,
    /// ordered by product id
    ///
    /// LIKE wildcards in `substring` match literally.
    pub async fn search_by_name(&self, substring: &str) -> Result<Vec<ProductWithCategoryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ProductWithCategoryRow>(&format!(
            "{PRODUCT_WITH_CATEGORY} WHERE p.productname ILIKE $1 ORDER BY p.productid"
        ))
        .bind(contains_pattern(substring))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Builds an `ILIKE` pattern matching any value that contains `substring`
///
/// `\`, `%` and `_` are escaped with PostgreSQL's default escape character.
pub fn contains_pattern(substring: &str) -> String {
    let mut pattern = String::with_capacity(substring.len() + 2);
    pattern.push('%');
    for ch in substring.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Database row for a product joined to its category
///
/// The `joined_*` / `category_*` columns are NULL when the category row is
/// missing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductWithCategoryRow {
    pub product_id: i32,
    pub name: String,
    pub category_id: i32,
    pub quantity_per_unit: String,
    pub unit_price: Decimal,
    pub units_in_stock: i32,
    pub joined_category_id: Option<i32>,
    pub category_name: Option<String>,
    pub category_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_contains_pattern_wraps_plain_text() {
        assert_eq!(contains_pattern("chai"), "%chai%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_contains_pattern_empty_matches_everything() {
        assert_eq!(contains_pattern(""), "%%");
    }

    fn unescape(inner: &str) -> String {
        let mut out = String::new();
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch == '\\' {
                out.extend(chars.next());
            } else {
                out.push(ch);
            }
        }
        out
    }

    proptest! {
        #[test]
        fn prop_pattern_has_no_bare_wildcards(substring in ".{0,24}") {
            let pattern = contains_pattern(&substring);
            let inner = &pattern[1..pattern.len() - 1];

            let mut escaped = false;
            for ch in inner.chars() {
                if !escaped {
                    prop_assert!(ch != '%' && ch != '_');
                }
                escaped = !escaped && ch == '\\';
            }
            prop_assert_eq!(unescape(inner), substring);
        }
    }
}
