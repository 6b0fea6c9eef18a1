//! Book repository for SQLite operations
//!
//! Books are always read joined with their author's summary.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};

use crate::data::criteria::{Pageable, Predicate, Sort, SqlParams};
use crate::data::sqlite::SqliteError;
use crate::data::types::{AuthorSummary, BookFields, BookPatch, BookRow, Page};

use super::{criteria_arguments, page_clause};

type BookTuple = (
    i64,
    Option<String>,
    Option<String>,
    Option<NaiveDate>,
    Option<i64>,
    Option<i64>,
    Option<String>,
);

const SELECT_BOOK: &str = "SELECT b.id, b.title, b.description, b.publication_date, b.price, b.author_id, a.name \
     FROM books b LEFT JOIN authors a ON a.id = b.author_id";

fn to_row(
    (id, title, description, publication_date, price, author_id, author_name): BookTuple,
) -> BookRow {
    BookRow {
        id,
        title,
        description,
        publication_date,
        price,
        author: author_id.map(|id| AuthorSummary {
            id,
            name: author_name,
        }),
    }
}

/// Fail with [`SqliteError::AuthorNotFound`] unless the referenced author exists
async fn ensure_author(
    conn: &mut SqliteConnection,
    author_id: Option<i64>,
) -> Result<(), SqliteError> {
    let Some(author_id) = author_id else {
        return Ok(());
    };
    let exists: bool = sqlx::query_scalar("SELECT COUNT(*) > 0 FROM authors WHERE id = ?")
        .bind(author_id)
        .fetch_one(conn)
        .await?;
    if exists {
        Ok(())
    } else {
        Err(SqliteError::AuthorNotFound(author_id))
    }
}

async fn fetch_book(conn: &mut SqliteConnection, id: i64) -> Result<Option<BookRow>, SqliteError> {
    let row = sqlx::query_as::<_, BookTuple>(&format!("{} WHERE b.id = ?", SELECT_BOOK))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row.map(to_row))
}

/// Insert a new book; the store assigns the id
pub async fn create_book(pool: &SqlitePool, fields: &BookFields) -> Result<BookRow, SqliteError> {
    let mut tx = pool.begin().await?;

    ensure_author(&mut tx, fields.author_id).await?;

    let id = sqlx::query(
        "INSERT INTO books (title, description, publication_date, price, author_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(fields.publication_date)
    .bind(fields.price)
    .bind(fields.author_id)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    let row = fetch_book(&mut tx, id)
        .await?
        .ok_or(SqliteError::Database(sqlx::Error::RowNotFound))?;

    tx.commit().await?;

    tracing::debug!(%id, "Book created");
    Ok(row)
}

/// Get a book by ID
pub async fn get_book(pool: &SqlitePool, id: i64) -> Result<Option<BookRow>, SqliteError> {
    let mut conn = pool.acquire().await?;
    fetch_book(&mut conn, id).await
}

async fn write_book(
    conn: &mut SqliteConnection,
    id: i64,
    fields: &BookFields,
) -> Result<Option<BookRow>, SqliteError> {
    let result = sqlx::query(
        "UPDATE books SET title = ?, description = ?, publication_date = ?, price = ?, author_id = ? WHERE id = ?",
    )
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(fields.publication_date)
    .bind(fields.price)
    .bind(fields.author_id)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    fetch_book(conn, id).await
}

/// Replace all mutable fields. Returns `None` if the book does not exist.
pub async fn update_book(
    pool: &SqlitePool,
    id: i64,
    fields: &BookFields,
) -> Result<Option<BookRow>, SqliteError> {
    let mut tx = pool.begin().await?;

    ensure_author(&mut tx, fields.author_id).await?;
    let Some(row) = write_book(&mut tx, id, fields).await? else {
        return Ok(None);
    };

    tx.commit().await?;
    Ok(Some(row))
}

/// Apply a merge-patch. Returns `None` if the book does not exist.
pub async fn patch_book(
    pool: &SqlitePool,
    id: i64,
    patch: BookPatch,
) -> Result<Option<BookRow>, SqliteError> {
    let mut tx = pool.begin().await?;

    let Some(current) = fetch_book(&mut tx, id).await? else {
        return Ok(None);
    };
    let fields = patch.apply(&current);
    ensure_author(&mut tx, fields.author_id).await?;
    let row = write_book(&mut tx, id, &fields).await?;

    tx.commit().await?;
    Ok(row)
}

/// Delete a book by ID. Returns `false` if nothing was deleted.
pub async fn delete_book(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}

/// List books matching a predicate with the total match count, both read in
/// one transaction. `page: None` returns every match.
pub async fn list_books(
    pool: &SqlitePool,
    predicate: &Predicate,
    sort: &Sort,
    page: Option<Pageable>,
) -> Result<Page<BookRow>, SqliteError> {
    let mut tx = pool.begin().await?;

    let total = count_matching(&mut tx, predicate).await?;
    let rows = select_matching(&mut tx, predicate, sort, page).await?;

    tx.commit().await?;

    Ok(Page { rows, total })
}

async fn select_matching(
    conn: &mut SqliteConnection,
    predicate: &Predicate,
    sort: &Sort,
    page: Option<Pageable>,
) -> Result<Vec<BookRow>, SqliteError> {
    let mut params = SqlParams::default();
    let where_sql = predicate.to_sql_aliased(&mut params, "b");
    let sql = format!(
        "{} WHERE {} ORDER BY {}{}",
        SELECT_BOOK,
        where_sql,
        sort.to_sql_aliased("b"),
        page_clause(page)
    );
    let args = criteria_arguments(params, page)?;

    let rows = sqlx::query_as_with::<_, BookTuple, _>(&sql, args)
        .fetch_all(conn)
        .await?;

    Ok(rows.into_iter().map(to_row).collect())
}

/// Count books matching a predicate
pub async fn count_books(pool: &SqlitePool, predicate: &Predicate) -> Result<u64, SqliteError> {
    let mut conn = pool.acquire().await?;
    count_matching(&mut conn, predicate).await
}

async fn count_matching(
    conn: &mut SqliteConnection,
    predicate: &Predicate,
) -> Result<u64, SqliteError> {
    let mut params = SqlParams::default();
    let sql = format!(
        "SELECT COUNT(*) FROM books b WHERE {}",
        predicate.to_sql_aliased(&mut params, "b")
    );
    let args = criteria_arguments(params, None)?;

    let count: i64 = sqlx::query_scalar_with(&sql, args).fetch_one(conn).await?;
    Ok(count as u64)
}
