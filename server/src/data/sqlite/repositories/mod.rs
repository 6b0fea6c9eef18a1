//! SQLite repositories
//!
//! Row types (AuthorRow, BookRow, etc.) live in `crate::data::types`.
//! Criteria queries are compiled by `crate::data::criteria` and bound here.

pub mod author;
pub mod book;

pub use author::{
    count_authors, create_author, delete_author, get_author, list_authors, patch_author,
    update_author,
};
pub use book::{
    count_books, create_book, delete_book, get_book, list_books, patch_book, update_book,
};

use sqlx::Arguments;
use sqlx::sqlite::SqliteArguments;

use crate::data::criteria::{Pageable, SqlParams, Value};
use crate::data::sqlite::SqliteError;

/// `LIMIT`/`OFFSET` suffix matching the arguments added by [`criteria_arguments`]
fn page_clause(page: Option<Pageable>) -> &'static str {
    if page.is_some() {
        " LIMIT ? OFFSET ?"
    } else {
        ""
    }
}

/// Bind criteria parameters in placeholder order, followed by paging values
fn criteria_arguments<'q>(
    params: SqlParams,
    page: Option<Pageable>,
) -> Result<SqliteArguments<'q>, SqliteError> {
    let mut args = SqliteArguments::default();
    for value in params.values {
        match value {
            Value::Integer(v) => args.add(v),
            Value::Text(v) => args.add(v),
            Value::Date(v) => args.add(v),
        }
        .map_err(sqlx::Error::Encode)?;
    }
    if let Some(page) = page {
        args.add(page.limit()).map_err(sqlx::Error::Encode)?;
        args.add(page.offset()).map_err(sqlx::Error::Encode)?;
    }
    Ok(args)
}
