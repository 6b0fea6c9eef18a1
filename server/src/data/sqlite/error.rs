//! SQLite error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration {version} ({name}) failed: {error}")]
    MigrationFailed {
        version: i32,
        name: String,
        error: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Author {0} does not exist")]
    AuthorNotFound(i64),

    #[error("Author {id} is still referenced by {books} book(s)")]
    AuthorHasBooks { id: i64, books: i64 },
}
