//! Shared API types
//!
//! Error envelope used by every endpoint, plus the serde helper for
//! merge-patch bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer};

use crate::data::DataError;
use crate::data::criteria::CriteriaError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    MethodNotAllowed { message: String },
    ServiceUnavailable { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Map a data-layer failure onto the HTTP taxonomy.
    ///
    /// Referential errors surface with their own codes; store failures are
    /// logged and hidden behind a generic message.
    pub fn from_data(e: DataError) -> Self {
        match e {
            DataError::AuthorNotFound(id) => Self::bad_request(
                "AUTHOR_NOT_FOUND",
                format!("Referenced author does not exist: {}", id),
            ),
            DataError::AuthorHasBooks { id, books } => Self::conflict(
                "AUTHOR_HAS_BOOKS",
                format!("Author {} is referenced by {} book(s)", id, books),
            ),
            e if e.is_transient() => {
                tracing::warn!(error = %e, "Transient data error");
                Self::service_unavailable("Database temporarily unavailable")
            }
            e => {
                tracing::error!(error = %e, "Data error");
                Self::internal("Database operation failed")
            }
        }
    }
}

impl From<CriteriaError> for ApiError {
    fn from(e: CriteriaError) -> Self {
        Self::bad_request(e.code(), e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Conflict { code, message } => (StatusCode::CONFLICT, "conflict", code, message),
            Self::MethodNotAllowed { message } => (
                StatusCode::METHOD_NOT_ALLOWED,
                "method_not_allowed",
                "METHOD_NOT_ALLOWED".to_string(),
                message,
            ),
            Self::ServiceUnavailable { message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                "SERVICE_UNAVAILABLE".to_string(),
                message,
            ),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

/// Distinguish an absent member from an explicit `null` in merge-patch bodies.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_some")]` on an
/// `Option<Option<T>>` field: absent stays `None`, `null` becomes `Some(None)`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let (status, body) = body_json(ApiError::bad_request("ID_EXISTS", "nope")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
        assert_eq!(body["code"], "ID_EXISTS");
        assert_eq!(body["message"], "nope");
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let (status, body) = body_json(ApiError::method_not_allowed("no id")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_data_error_mapping() {
        let (status, body) = body_json(ApiError::from_data(DataError::AuthorNotFound(7))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "AUTHOR_NOT_FOUND");

        let (status, body) = body_json(ApiError::from_data(DataError::AuthorHasBooks {
            id: 1,
            books: 2,
        }))
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "AUTHOR_HAS_BOOKS");

        let (status, _) =
            body_json(ApiError::from_data(DataError::Sqlite(sqlx::Error::PoolTimedOut))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, body) =
            body_json(ApiError::from_data(DataError::Sqlite(sqlx::Error::RowNotFound))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Database operation failed");
    }

    #[tokio::test]
    async fn test_criteria_error_is_bad_request() {
        let err = CriteriaError::TooManyFilters { max: 50 };
        let (status, body) = body_json(ApiError::from(err)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "TOO_MANY_FILTERS");
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        name: Option<Option<String>>,
    }

    #[test]
    fn test_deserialize_some_distinguishes_null() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.name, None);
        let null: Patch = serde_json::from_str(r#"{"name":null}"#).unwrap();
        assert_eq!(null.name, Some(None));
        let set: Patch = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(set.name, Some(Some("x".to_string())));
    }
}
