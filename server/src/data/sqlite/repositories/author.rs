//! Author repository for SQLite operations
//!
//! Every mutation runs in its own transaction. Early returns drop the
//! transaction, which rolls it back.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};

use crate::data::criteria::{Pageable, Predicate, Sort, SqlParams};
use crate::data::sqlite::SqliteError;
use crate::data::types::{AuthorFields, AuthorPatch, AuthorRow, Page};

use super::{criteria_arguments, page_clause};

type AuthorTuple = (i64, Option<String>, Option<NaiveDate>);

const SELECT_AUTHOR: &str = "SELECT id, name, birth_date FROM authors";

fn to_row((id, name, birth_date): AuthorTuple) -> AuthorRow {
    AuthorRow {
        id,
        name,
        birth_date,
    }
}

/// Insert a new author; the store assigns the id
pub async fn create_author(
    pool: &SqlitePool,
    fields: &AuthorFields,
) -> Result<AuthorRow, SqliteError> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query("INSERT INTO authors (name, birth_date) VALUES (?, ?)")
        .bind(&fields.name)
        .bind(fields.birth_date)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;

    tracing::debug!(%id, "Author created");
    Ok(AuthorRow {
        id,
        name: fields.name.clone(),
        birth_date: fields.birth_date,
    })
}

/// Get an author by ID
pub async fn get_author(pool: &SqlitePool, id: i64) -> Result<Option<AuthorRow>, SqliteError> {
    let mut conn = pool.acquire().await?;
    fetch_author(&mut conn, id).await
}

async fn fetch_author(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<AuthorRow>, SqliteError> {
    let row = sqlx::query_as::<_, AuthorTuple>(&format!("{} WHERE id = ?", SELECT_AUTHOR))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row.map(to_row))
}

/// Replace all mutable fields. Returns `None` if the author does not exist.
pub async fn update_author(
    pool: &SqlitePool,
    id: i64,
    fields: &AuthorFields,
) -> Result<Option<AuthorRow>, SqliteError> {
    let mut tx = pool.begin().await?;

    let result = write_author(&mut tx, id, fields).await?;
    if result == 0 {
        return Ok(None);
    }

    tx.commit().await?;

    Ok(Some(AuthorRow {
        id,
        name: fields.name.clone(),
        birth_date: fields.birth_date,
    }))
}

/// Apply a merge-patch. Returns `None` if the author does not exist.
pub async fn patch_author(
    pool: &SqlitePool,
    id: i64,
    patch: AuthorPatch,
) -> Result<Option<AuthorRow>, SqliteError> {
    let mut tx = pool.begin().await?;

    let Some(current) = fetch_author(&mut tx, id).await? else {
        return Ok(None);
    };
    let fields = patch.apply(&current);
    write_author(&mut tx, id, &fields).await?;

    tx.commit().await?;

    Ok(Some(AuthorRow {
        id,
        name: fields.name,
        birth_date: fields.birth_date,
    }))
}

async fn write_author(
    conn: &mut SqliteConnection,
    id: i64,
    fields: &AuthorFields,
) -> Result<u64, SqliteError> {
    let result = sqlx::query("UPDATE authors SET name = ?, birth_date = ? WHERE id = ?")
        .bind(&fields.name)
        .bind(fields.birth_date)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

/// Delete an author by ID. Returns `false` if nothing was deleted.
///
/// Refused with [`SqliteError::AuthorHasBooks`] while any book references it.
pub async fn delete_author(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let mut tx = pool.begin().await?;

    let books: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    if books > 0 {
        return Err(SqliteError::AuthorHasBooks { id, books });
    }

    let result = sqlx::query("DELETE FROM authors WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

/// List authors matching a predicate together with the total match count.
/// `page: None` returns every match.
///
/// Both statements run in one transaction so the total agrees with the rows.
pub async fn list_authors(
    pool: &SqlitePool,
    predicate: &Predicate,
    sort: &Sort,
    page: Option<Pageable>,
) -> Result<Page<AuthorRow>, SqliteError> {
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
) -> Result<Vec<AuthorRow>, SqliteError> {
    let mut params = SqlParams::default();
    let where_sql = predicate.to_sql(&mut params);
    let sql = format!(
        "{} WHERE {} ORDER BY {}{}",
        SELECT_AUTHOR,
        where_sql,
        sort.to_sql_aliased(""),
        page_clause(page)
    );
    let args = criteria_arguments(params, page)?;

    let rows = sqlx::query_as_with::<_, AuthorTuple, _>(&sql, args)
        .fetch_all(conn)
        .await?;

    Ok(rows.into_iter().map(to_row).collect())
}

/// Count authors matching a predicate
pub async fn count_authors(pool: &SqlitePool, predicate: &Predicate) -> Result<u64, SqliteError> {
    let mut conn = pool.acquire().await?;
    count_matching(&mut conn, predicate).await
}

async fn count_matching(
    conn: &mut SqliteConnection,
    predicate: &Predicate,
) -> Result<u64, SqliteError> {
    let mut params = SqlParams::default();
    let sql = format!(
        "SELECT COUNT(*) FROM authors WHERE {}",
        predicate.to_sql(&mut params)
    );
    let args = criteria_arguments(params, None)?;

    let count: i64 = sqlx::query_scalar_with(&sql, args).fetch_one(conn).await?;
    Ok(count as u64)
}
