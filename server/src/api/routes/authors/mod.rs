//! Author API endpoints

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
use crate::data::criteria::{parse_criteria, schemas::AUTHOR};

use types::{AuthorDto, AuthorPatchRequest, AuthorRequest};

/// Shared state for Authors API endpoints
#[derive(Clone)]
pub struct AuthorsApiState {
    pub database: Arc<TransactionalService>,
}

/// Build Authors API routes
pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = AuthorsApiState { database };

    Router::new()
        .route(
            "/",
            get(list_authors)
                .post(create_author)
                .put(collection_update_not_allowed)
                .patch(collection_update_not_allowed),
        )
        .route("/count", get(count_authors))
        .route(
            "/{id}",
            get(get_author)
                .put(update_author)
                .patch(patch_author)
                .delete(delete_author),
        )
        .with_state(state)
}

fn not_found(id: i64) -> ApiError {
    ApiError::not_found("NOT_FOUND", format!("Author not found: {}", id))
}

fn id_not_found(id: i64) -> ApiError {
    ApiError::bad_request("ID_NOT_FOUND", format!("Author not found: {}", id))
}

/// List authors matching the criteria parameters
#[utoipa::path(
    get,
    path = "/api/authors",
    tag = "authors",
    params(
        ("sort" = Option<String>, Query, description = "Sort key: field[,asc|desc] (repeatable)"),
        ("page" = Option<u32>, Query, description = "Zero-based page index"),
        ("size" = Option<u32>, Query, description = "Page size (1-2000, default 20)"),
        ("name.contains" = Option<String>, Query, description = "Example filter: field.operator=value")
    ),
    responses(
        (status = 200, description = "Matching authors; X-Total-Count carries the unpaginated total", body = [AuthorDto]),
        (status = 400, description = "Invalid criteria")
    )
)]
pub async fn list_authors(
    State(state): State<AuthorsApiState>,
    QueryPairs(params): QueryPairs,
) -> Result<([(&'static str, String); 1], Json<Vec<AuthorDto>>), ApiError> {
    let request = parse_criteria(&params, &AUTHOR)?;
    let page = state
        .database
        .repository()
        .list_authors(&request.predicate, &request.sort, Some(request.page))
        .await
        .map_err(ApiError::from_data)?;

    let data: Vec<AuthorDto> = page.rows.into_iter().map(AuthorDto::from).collect();
    Ok(([(TOTAL_COUNT_HEADER, page.total.to_string())], Json(data)))
}

/// Count authors matching the criteria parameters
#[utoipa::path(
    get,
    path = "/api/authors/count",
    tag = "authors",
    responses(
        (status = 200, description = "Number of matching authors", body = u64),
        (status = 400, description = "Invalid criteria")
    )
)]
pub async fn count_authors(
    State(state): State<AuthorsApiState>,
    QueryPairs(params): QueryPairs,
) -> Result<Json<u64>, ApiError> {
    let request = parse_criteria(&params, &AUTHOR)?;
    let count = state
        .database
        .repository()
        .count_authors(&request.predicate)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(count))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/api/authors",
    tag = "authors",
    request_body = AuthorRequest,
    responses(
        (status = 201, description = "Author created", body = AuthorDto),
        (status = 400, description = "Invalid request or id present")
    )
)]
pub async fn create_author(
    State(state): State<AuthorsApiState>,
    ValidatedJson(body): ValidatedJson<AuthorRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<AuthorDto>), ApiError> {
    if body.id.is_some() {
        return Err(ApiError::bad_request(
            "ID_EXISTS",
            "A new author cannot already have an id",
        ));
    }

    let row = state
        .database
        .repository()
        .create_author(&body.into_fields())
        .await
        .map_err(ApiError::from_data)?;

    tracing::debug!(id = row.id, "Created author");
    let location = format!("/api/authors/{}", row.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(AuthorDto::from(row)),
    ))
}

/// Get a single author by id
#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author details", body = AuthorDto),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AuthorsApiState>,
    path: EntityPath,
) -> Result<Json<AuthorDto>, ApiError> {
    let row = state
        .database
        .repository()
        .get_author(path.id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| not_found(path.id))?;
    Ok(Json(AuthorDto::from(row)))
}

/// Replace every field of an author
#[utoipa::path(
    put,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    request_body = AuthorRequest,
    responses(
        (status = 200, description = "Author updated", body = AuthorDto),
        (status = 400, description = "Missing, mismatched or unknown id")
    )
)]
pub async fn update_author(
    State(state): State<AuthorsApiState>,
    path: EntityPath,
    ValidatedJson(body): ValidatedJson<AuthorRequest>,
) -> Result<Json<AuthorDto>, ApiError> {
    ensure_matching_id("author", body.id, path.id)?;

    let row = state
        .database
        .repository()
        .update_author(path.id, &body.into_fields())
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| id_not_found(path.id))?;
    Ok(Json(AuthorDto::from(row)))
}

/// Merge-patch an author
#[utoipa::path(
    patch,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    request_body(content = AuthorPatchRequest, content_type = "application/merge-patch+json"),
    responses(
        (status = 200, description = "Author updated", body = AuthorDto),
        (status = 400, description = "Missing, mismatched or unknown id")
    )
)]
pub async fn patch_author(
    State(state): State<AuthorsApiState>,
    path: EntityPath,
    ValidatedJson(body): ValidatedJson<AuthorPatchRequest>,
) -> Result<Json<AuthorDto>, ApiError> {
    ensure_matching_id("author", body.id, path.id)?;

    let row = state
        .database
        .repository()
        .patch_author(path.id, body.into_patch())
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| id_not_found(path.id))?;
    Ok(Json(AuthorDto::from(row)))
}

/// Delete an author that no book references
#[utoipa::path(
    delete,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author is referenced by books")
    )
)]
pub async fn delete_author(
    State(state): State<AuthorsApiState>,
    path: EntityPath,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .database
        .repository()
        .delete_author(path.id)
        .await
        .map_err(ApiError::from_data)?;

    if !deleted {
        return Err(not_found(path.id));
    }
    tracing::debug!(id = path.id, "Deleted author");
    Ok(StatusCode::NO_CONTENT)
}
