//! Database error types
//!
//! This module defines the errors that can occur during database operations
//! and their translation into the port-level [`PortError`].

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key constraint violation, or a delete blocked by dependents
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A column could not be decoded into its Rust type
    #[error("Decode error: {0}")]
    DecodeFailed(String),

    /// The server cancelled a statement that exceeded `statement_timeout`
    #[error("Statement timed out: {0}")]
    StatementTimeout(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// The connection string could not be turned into connect options
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),
}

impl DatabaseError {
    /// Creates an error for a delete blocked by rows that still reference the target
    pub fn has_dependents(entity: &str, id: impl std::fmt::Display, dependents: i64, dependent: &str) -> Self {
        DatabaseError::ForeignKeyViolation(format!(
            "{} {} is still referenced by {} {}(s)",
            entity, id, dependents, dependent
        ))
    }

    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_)
                | DatabaseError::ForeignKeyViolation(_)
                | DatabaseError::ConstraintViolation(_)
        )
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Converts SQLx errors to specific DatabaseError variants
///
/// Database errors are classified by their PostgreSQL SQLSTATE code.
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DatabaseError::ConnectionFailed(error.to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
                DatabaseError::DecodeFailed(error.to_string())
            }
            sqlx::Error::Configuration(_) => {
                DatabaseError::InvalidConnectionString(error.to_string())
            }
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => DatabaseError::DuplicateEntry(db_err.message().to_string()),
                Some("23503") => DatabaseError::ForeignKeyViolation(db_err.message().to_string()),
                Some("23514") => DatabaseError::ConstraintViolation(db_err.message().to_string()),
                Some("57014") => DatabaseError::StatementTimeout(db_err.message().to_string()),
                _ => DatabaseError::QueryFailed(db_err.message().to_string()),
            },
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

/// Translates a database error into the port error seen by callers
///
/// - duplicate and foreign-key violations -> `PortError::Conflict`
/// - check violations -> `PortError::Validation`
/// - connection problems -> `PortError::Connection` / `ServiceUnavailable`
/// - cancelled statements -> `PortError::Timeout`
/// - anything else -> `PortError::Internal`
pub fn db_to_port_error(error: DatabaseError) -> PortError {
    match error {
        DatabaseError::DuplicateEntry(msg) | DatabaseError::ForeignKeyViolation(msg) => {
            PortError::conflict(msg)
        }
        DatabaseError::ConstraintViolation(msg) => PortError::validation(msg),
        DatabaseError::ConnectionFailed(msg) => PortError::connection(msg),
        DatabaseError::StatementTimeout(msg) => PortError::Timeout {
            operation: msg,
            duration_ms: 0,
        },
        DatabaseError::PoolExhausted => PortError::ServiceUnavailable {
            service: "postgres connection pool".to_string(),
        },
        other => PortError::internal(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_row_not_found_is_internal() {
        let error = DatabaseError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, DatabaseError::QueryFailed(_)));
        assert!(matches!(db_to_port_error(error), PortError::Internal { .. }));
    }

    #[test]
    fn test_invalid_connection_string_is_internal() {
        let error = DatabaseError::InvalidConnectionString("unknown key `colour`".to_string());
        assert!(!error.is_connection_error());
        assert!(matches!(db_to_port_error(error), PortError::Internal { .. }));
    }

    #[test]
    fn test_pool_timeout_is_connection_error() {
        let error = DatabaseError::from(sqlx::Error::PoolTimedOut);
        assert!(error.is_connection_error());
        assert!(matches!(
            db_to_port_error(error),
            PortError::ServiceUnavailable { .. }
        ));
    }

    #[test]
    fn test_dependents_map_to_conflict() {
        let error = DatabaseError::has_dependents("Category", 1, 3, "product");
        assert!(error.is_constraint_violation());
        assert!(error.to_string().contains("3 product(s)"));
        assert!(db_to_port_error(error).is_conflict());
    }

    #[test]
    fn test_statement_timeout_maps_to_timeout() {
        let port = db_to_port_error(DatabaseError::StatementTimeout("canceling statement".to_string()));
        assert!(matches!(port, PortError::Timeout { .. }));
        assert!(port.is_transient());
    }

    #[test]
    fn test_check_violation_maps_to_validation() {
        let port = db_to_port_error(DatabaseError::ConstraintViolation("discount".to_string()));
        assert!(matches!(port, PortError::Validation { .. }));
    }
}
