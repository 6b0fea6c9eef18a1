//! Unified error type for data layer
//!
//! Wraps store-specific errors so API handlers depend only on [`DataError`].

use thiserror::Error;

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// Migration failed
    #[error("Migration {version} ({name}) failed on {backend}: {error}")]
    MigrationFailed {
        backend: &'static str,
        version: i32,
        name: String,
        error: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A book referenced an author id that does not exist
    #[error("Author {0} does not exist")]
    AuthorNotFound(i64),

    /// Author deletion blocked by referencing books
    #[error("Author {id} is still referenced by {books} book(s)")]
    AuthorHasBooks { id: i64, books: i64 },
}

impl DataError {
    /// Check if this is a connection-related error that might be transient
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Sqlite(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            _ => false,
        }
    }
}

impl From<crate::data::sqlite::SqliteError> for DataError {
    fn from(e: crate::data::sqlite::SqliteError) -> Self {
        use crate::data::sqlite::SqliteError;
        match e {
            SqliteError::Database(e) => Self::Sqlite(e),
            SqliteError::MigrationFailed {
                version,
                name,
                error,
            } => Self::MigrationFailed {
                backend: "sqlite",
                version,
                name,
                error,
            },
            SqliteError::Io(e) => Self::Io(e),
            SqliteError::AuthorNotFound(id) => Self::AuthorNotFound(id),
            SqliteError::AuthorHasBooks { id, books } => Self::AuthorHasBooks { id, books },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::SqliteError;

    #[test]
    fn test_migration_error_keeps_backend() {
        let err: DataError = SqliteError::MigrationFailed {
            version: 1,
            name: "initial_schema".to_string(),
            error: "boom".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Migration 1 (initial_schema) failed on sqlite: boom"
        );
    }

    #[test]
    fn test_pool_timeout_is_transient() {
        let err: DataError = SqliteError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(err.is_transient());

        let err: DataError = SqliteError::AuthorNotFound(9).into();
        assert!(!err.is_transient());
    }

    #[test]
    fn test_reference_errors_pass_through() {
        let err: DataError = SqliteError::AuthorHasBooks { id: 1, books: 3 }.into();
        assert!(matches!(err, DataError::AuthorHasBooks { id: 1, books: 3 }));
    }
}
