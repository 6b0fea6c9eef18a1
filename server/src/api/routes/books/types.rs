//! Book API types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::types::deserialize_some;
use crate::data::types::{AuthorSummary, BookFields, BookPatch, BookRow};

/// Narrowed author view embedded in a book
#[derive(Debug, Serialize, ToSchema)]
pub struct BookAuthorDto {
    pub id: i64,
    pub name: Option<String>,
}

impl From<AuthorSummary> for BookAuthorDto {
    fn from(author: AuthorSummary) -> Self {
        Self {
            id: author.id,
            name: author.name,
        }
    }
}

/// Book DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub price: Option<i64>,
    pub author: Option<BookAuthorDto>,
}

impl From<BookRow> for BookDto {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            publication_date: row.publication_date,
            price: row.price,
            author: row.author.map(BookAuthorDto::from),
        }
    }
}

/// Author reference in request bodies; other members are ignored
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct AuthorRef {
    pub id: i64,
}

/// Request body for creating or fully replacing a book
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub id: Option<i64>,

    #[validate(length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,

    pub publication_date: Option<NaiveDate>,

    pub price: Option<i64>,

    pub author: Option<AuthorRef>,
}

impl BookRequest {
    pub fn into_fields(self) -> BookFields {
        BookFields {
            title: self.title,
            description: self.description,
            publication_date: self.publication_date,
            price: self.price,
            author_id: self.author.map(|a| a.id),
        }
    }
}

/// Merge-patch body: absent members are kept, `null` clears
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPatchRequest {
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<NaiveDate>)]
    pub publication_date: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i64>)]
    pub price: Option<Option<i64>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<AuthorRef>)]
    pub author: Option<Option<AuthorRef>>,
}

impl BookPatchRequest {
    pub fn into_patch(self) -> BookPatch {
        BookPatch {
            title: self.title,
            description: self.description,
            publication_date: self.publication_date,
            price: self.price,
            author_id: self.author.map(|a| a.map(|a| a.id)),
        }
    }
}
