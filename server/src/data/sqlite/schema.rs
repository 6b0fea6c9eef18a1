//! SQLite schema definitions
//!
//! `SCHEMA` is applied as a whole to fresh databases by `migrations.rs`.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Authors
-- =============================================================================
CREATE TABLE IF NOT EXISTS authors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT CHECK(name IS NULL OR length(name) <= 255),
    birth_date TEXT
);

CREATE INDEX IF NOT EXISTS idx_authors_name ON authors(name);

-- =============================================================================
-- 2. Books (references authors, no cascade)
-- =============================================================================
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT CHECK(title IS NULL OR length(title) <= 255),
    description TEXT CHECK(description IS NULL OR length(description) <= 255),
    publication_date TEXT,
    price INTEGER,
    author_id INTEGER REFERENCES authors(id)
);

CREATE INDEX IF NOT EXISTS idx_books_author_id ON books(author_id);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_contains_required_tables() {
        let required_tables = ["schema_version", "schema_migrations", "authors", "books"];

        for table in required_tables {
            assert!(
                SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table)),
                "Schema missing table: {}",
                table
            );
        }
    }

    #[test]
    fn test_books_reference_authors_without_cascade() {
        assert!(SCHEMA.contains("author_id INTEGER REFERENCES authors(id)"));
        assert!(!SCHEMA.contains("ON DELETE CASCADE"));
    }
}
