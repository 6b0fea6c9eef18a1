//! API route handlers

pub mod authors;
pub mod books;
pub mod health;

use crate::api::types::ApiError;

/// Identifier rules shared by `PUT` and `PATCH` on a single entity
pub(crate) fn ensure_matching_id(
    entity: &str,
    body_id: Option<i64>,
    path_id: i64,
) -> Result<(), ApiError> {
    match body_id {
        None => Err(ApiError::bad_request(
            "ID_NULL",
            format!("The {} id must be present in the body", entity),
        )),
        Some(id) if id != path_id => Err(ApiError::bad_request(
            "ID_INVALID",
            format!("Body id {} does not match path id {}", id, path_id),
        )),
        Some(_) => Ok(()),
    }
}

/// `PUT`/`PATCH` against a collection path
pub(crate) async fn collection_update_not_allowed() -> ApiError {
    ApiError::method_not_allowed("An id path parameter is required for updates")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_matching_id() {
        assert!(ensure_matching_id("author", Some(3), 3).is_ok());
        assert!(matches!(
            ensure_matching_id("author", None, 3),
            Err(ApiError::BadRequest { code, .. }) if code == "ID_NULL"
        ));
        assert!(matches!(
            ensure_matching_id("author", Some(4), 3),
            Err(ApiError::BadRequest { code, .. }) if code == "ID_INVALID"
        ));
    }
}
