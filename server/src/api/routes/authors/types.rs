//! Author API types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::types::deserialize_some;
use crate::data::types::{AuthorFields, AuthorPatch, AuthorRow};

/// Author DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: i64,
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl From<AuthorRow> for AuthorDto {
    fn from(row: AuthorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            birth_date: row.birth_date,
        }
    }
}

/// Request body for creating or fully replacing an author
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRequest {
    /// Must be absent on create and equal to the path id on replace
    pub id: Option<i64>,

    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,

    pub birth_date: Option<NaiveDate>,
}

impl AuthorRequest {
    pub fn into_fields(self) -> AuthorFields {
        AuthorFields {
            name: self.name,
            birth_date: self.birth_date,
        }
    }
}

/// Merge-patch body: absent members are kept, `null` clears
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPatchRequest {
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<NaiveDate>)]
    pub birth_date: Option<Option<NaiveDate>>,
}

impl AuthorPatchRequest {
    pub fn into_patch(self) -> AuthorPatch {
        AuthorPatch {
            name: self.name,
            birth_date: self.birth_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_uses_camel_case() {
        let dto = AuthorDto::from(AuthorRow {
            id: 1,
            name: Some("Ann".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1970, 1, 2),
        });
        let json = serde_json::to_value(dto).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Ann", "birthDate": "1970-01-02"})
        );
    }

    #[test]
    fn test_patch_request_tracks_null_members() {
        let req: AuthorPatchRequest =
            serde_json::from_str(r#"{"id": 1, "birthDate": null}"#).unwrap();
        let patch = req.into_patch();
        assert_eq!(patch.name, None);
        assert_eq!(patch.birth_date, Some(None));
    }

    #[test]
    fn test_name_length_validated() {
        let req = AuthorRequest {
            id: None,
            name: Some("x".repeat(256)),
            birth_date: None,
        };
        assert!(req.validate().is_err());

        let patch: AuthorPatchRequest =
            serde_json::from_value(serde_json::json!({"id": 1, "name": "x".repeat(256)}))
                .unwrap();
        assert!(patch.validate().is_err());

        let cleared: AuthorPatchRequest =
            serde_json::from_str(r#"{"id": 1, "name": null}"#).unwrap();
        assert!(cleared.validate().is_ok());
    }
}
