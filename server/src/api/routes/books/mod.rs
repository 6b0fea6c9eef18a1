//! Book API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::routing::get;
use axum::{Json, Router};

use super::{collection_update_not_allowed, ensure_matching_id};
use crate::api::extractors::{EntityPath, QueryPairs, ValidatedJson};
use crate::api::types::ApiError;
use crate::core::constants::TOTAL_COUNT_HEADER;
use crate::data::TransactionalService;
use crate::data::criteria::{parse_criteria, schemas::BOOK};

use types::{BookDto, BookPatchRequest, BookRequest};

/// Shared state for Books API endpoints
#[derive(Clone)]
pub struct BooksApiState {
    pub database: Arc<TransactionalService>,
}

/// Build Books API routes
pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = BooksApiState { database };

    Router::new()
        .route(
            "/",
            get(list_books)
                .post(create_book)
                .put(collection_update_not_allowed)
                .patch(collection_update_not_allowed),
        )
        .route("/count", get(count_books))
        .route(
            "/{id}",
            get(get_book)
                .put(update_book)
                .patch(patch_book)
                .delete(delete_book),
        )
        .with_state(state)
}

fn not_found(id: i64) -> ApiError {
    ApiError::not_found("NOT_FOUND", format!("Book not found: {}", id))
}

fn id_not_found(id: i64) -> ApiError {
    ApiError::bad_request("ID_NOT_FOUND", format!("Book not found: {}", id))
}

/// List books matching the criteria parameters
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    params(
        ("sort" = Option<String>, Query, description = "Sort key: field[,asc|desc] (repeatable)"),
        ("page" = Option<u32>, Query, description = "Zero-based page index"),
        ("size" = Option<u32>, Query, description = "Page size (1-2000, default 20)"),
        ("authorId.equals" = Option<i64>, Query, description = "Example filter: field.operator=value")
    ),
    responses(
        (status = 200, description = "Matching books; X-Total-Count carries the unpaginated total", body = [BookDto]),
        (status = 400, description = "Invalid criteria")
    )
)]
pub async fn list_books(
    State(state): State<BooksApiState>,
    QueryPairs(params): QueryPairs,
) -> Result<([(&'static str, String); 1], Json<Vec<BookDto>>), ApiError> {
    let request = parse_criteria(&params, &BOOK)?;
    let page = state
        .database
        .repository()
        .list_books(&request.predicate, &request.sort, Some(request.page))
        .await
        .map_err(ApiError::from_data)?;

    let data: Vec<BookDto> = page.rows.into_iter().map(BookDto::from).collect();
    Ok(([(TOTAL_COUNT_HEADER, page.total.to_string())], Json(data)))
}

/// Count books matching the criteria parameters
#[utoipa::path(
    get,
    path = "/api/books/count",
    tag = "books",
    responses(
        (status = 200, description = "Number of matching books", body = u64),
        (status = 400, description = "Invalid criteria")
    )
)]
pub async fn count_books(
    State(state): State<BooksApiState>,
    QueryPairs(params): QueryPairs,
) -> Result<Json<u64>, ApiError> {
    let request = parse_criteria(&params, &BOOK)?;
    let count = state
        .database
        .repository()
        .count_books(&request.predicate)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(count))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = BookRequest,
    responses(
        (status = 201, description = "Book created", body = BookDto),
        (status = 400, description = "Invalid request, id present or unknown author")
    )
)]
pub async fn create_book(
    State(state): State<BooksApiState>,
    ValidatedJson(body): ValidatedJson<BookRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<BookDto>), ApiError> {
    if body.id.is_some() {
        return Err(ApiError::bad_request(
            "ID_EXISTS",
            "A new book cannot already have an id",
        ));
    }

    let row = state
        .database
        .repository()
        .create_book(&body.into_fields())
        .await
        .map_err(ApiError::from_data)?;

    tracing::debug!(id = row.id, "Created book");
    let location = format!("/api/books/{}", row.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BookDto::from(row)),
    ))
}

/// Get a single book by id
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book details", body = BookDto),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<BooksApiState>,
    path: EntityPath,
) -> Result<Json<BookDto>, ApiError> {
    let row = state
        .database
        .repository()
        .get_book(path.id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| not_found(path.id))?;
    Ok(Json(BookDto::from(row)))
}

/// Replace every field of a book
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    request_body = BookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 400, description = "Missing, mismatched or unknown id, or unknown author")
    )
)]
pub async fn update_book(
    State(state): State<BooksApiState>,
    path: EntityPath,
    ValidatedJson(body): ValidatedJson<BookRequest>,
) -> Result<Json<BookDto>, ApiError> {
    ensure_matching_id("book", body.id, path.id)?;

    let row = state
        .database
        .repository()
        .update_book(path.id, &body.into_fields())
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| id_not_found(path.id))?;
    Ok(Json(BookDto::from(row)))
}

/// Merge-patch a book
#[utoipa::path(
    patch,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    request_body(content = BookPatchRequest, content_type = "application/merge-patch+json"),
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 400, description = "Missing, mismatched or unknown id, or unknown author")
    )
)]
pub async fn patch_book(
    State(state): State<BooksApiState>,
    path: EntityPath,
    ValidatedJson(body): ValidatedJson<BookPatchRequest>,
) -> Result<Json<BookDto>, ApiError> {
    ensure_matching_id("book", body.id, path.id)?;

    let row = state
        .database
        .repository()
        .patch_book(path.id, body.into_patch())
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| id_not_found(path.id))?;
    Ok(Json(BookDto::from(row)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<BooksApiState>,
    path: EntityPath,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .database
        .repository()
        .delete_book(path.id)
        .await
        .map_err(ApiError::from_data)?;

    if !deleted {
        return Err(not_found(path.id));
    }
    tracing::debug!(id = path.id, "Deleted book");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::{authors, test_support::send};
    use axum::http::Method;
    use serde_json::json;

    async fn app() -> Router {
        let database = Arc::new(TransactionalService::in_memory().await);
        Router::new()
            .nest("/api/authors", authors::routes(database.clone()))
            .nest("/api/books", routes(database))
    }

    async fn create_author(router: &Router, name: &str) -> i64 {
        let res = send(
            router,
            Method::POST,
            "/api/authors",
            Some(json!({"name": name})),
        )
        .await;
        assert_eq!(res.status, StatusCode::CREATED);
        res.body["id"].as_i64().unwrap()
    }

    async fn create_book(router: &Router, body: serde_json::Value) -> i64 {
        let res = send(router, Method::POST, "/api/books", Some(body)).await;
        assert_eq!(res.status, StatusCode::CREATED);
        res.body["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_create_embeds_author_summary() {
        let router = app().await;
        let author = create_author(&router, "Ursula").await;

        let res = send(
            &router,
            Method::POST,
            "/api/books",
            Some(json!({
                "title": "The Dispossessed",
                "publicationDate": "1974-05-01",
                "price": 12,
                "author": {"id": author}
            })),
        )
        .await;
        assert_eq!(res.status, StatusCode::CREATED);
        assert_eq!(res.body["author"], json!({"id": author, "name": "Ursula"}));
        assert_eq!(res.body["publicationDate"], "1974-05-01");
    }

    #[tokio::test]
    async fn test_unknown_author_is_rejected() {
        let router = app().await;
        let res = send(
            &router,
            Method::POST,
            "/api/books",
            Some(json!({"title": "T", "author": {"id": 404}})),
        )
        .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["code"], "AUTHOR_NOT_FOUND");

        let res = send(&router, Method::GET, "/api/books/count", None).await;
        assert_eq!(res.body, json!(0));
    }

    #[tokio::test]
    async fn test_author_with_books_cannot_be_deleted() {
        let router = app().await;
        let author = create_author(&router, "A").await;
        let book = create_book(&router, json!({"title": "T", "author": {"id": author}})).await;

        let author_uri = format!("/api/authors/{}", author);
        let res = send(&router, Method::DELETE, &author_uri, None).await;
        assert_eq!(res.status, StatusCode::CONFLICT);
        assert_eq!(res.body["code"], "AUTHOR_HAS_BOOKS");

        let res = send(&router, Method::DELETE, &format!("/api/books/{}", book), None).await;
        assert_eq!(res.status, StatusCode::NO_CONTENT);

        let res = send(&router, Method::DELETE, &author_uri, None).await;
        assert_eq!(res.status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_patch_detaches_author() {
        let router = app().await;
        let author = create_author(&router, "A").await;
        let book = create_book(
            &router,
            json!({"title": "T", "price": 5, "author": {"id": author}}),
        )
        .await;

        let res = send(
            &router,
            Method::PATCH,
            &format!("/api/books/{}", book),
            Some(json!({"id": book, "author": null})),
        )
        .await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["author"], serde_json::Value::Null);
        assert_eq!(res.body["price"], 5);
        assert_eq!(res.body["title"], "T");
    }

    #[tokio::test]
    async fn test_filter_by_author_and_price() {
        let router = app().await;
        let a = create_author(&router, "A").await;
        let b = create_author(&router, "B").await;
        create_book(&router, json!({"title": "one", "price": 10, "author": {"id": a}})).await;
        create_book(&router, json!({"title": "two", "price": 20, "author": {"id": a}})).await;
        create_book(&router, json!({"title": "three", "price": 30, "author": {"id": b}})).await;
        create_book(&router, json!({"title": "four"})).await;

        let res = send(
            &router,
            Method::GET,
            &format!("/api/books?authorId.equals={}&sort=price,desc", a),
            None,
        )
        .await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.headers.get(TOTAL_COUNT_HEADER).unwrap(), "2");
        let titles: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["two", "one"]);

        // Unattached books satisfy the negation
        let res = send(
            &router,
            Method::GET,
            &format!("/api/books/count?authorId.notEquals={}", a),
            None,
        )
        .await;
        assert_eq!(res.body, json!(2));

        let res = send(
            &router,
            Method::GET,
            "/api/books/count?price.greaterThanOrEqual=20&price.lessThan=30",
            None,
        )
        .await;
        assert_eq!(res.body, json!(1));

        let res = send(&router, Method::GET, "/api/books/count?authorId.specified=false", None).await;
        assert_eq!(res.body, json!(1));
    }

    #[tokio::test]
    async fn test_update_missing_book() {
        let router = app().await;
        let res = send(
            &router,
            Method::PUT,
            "/api/books/77",
            Some(json!({"id": 77, "title": "x"})),
        )
        .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["code"], "ID_NOT_FOUND");

        let res = send(&router, Method::GET, "/api/books/77", None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }
}
