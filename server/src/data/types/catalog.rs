//! Author and book row types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One page of matching rows with the unpaginated total, read in one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

// ============================================================================
// Author types
// ============================================================================

/// Author row from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRow {
    pub id: i64,
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Mutable author fields (create and full replace)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFields {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Merge-patch over author fields.
///
/// Outer `None` keeps the stored value, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorPatch {
    pub name: Option<Option<String>>,
    pub birth_date: Option<Option<NaiveDate>>,
}

impl AuthorPatch {
    pub fn apply(self, current: &AuthorRow) -> AuthorFields {
        AuthorFields {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            birth_date: self.birth_date.unwrap_or(current.birth_date),
        }
    }
}

/// Narrowed author view embedded in book rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: i64,
    pub name: Option<String>,
}

// ============================================================================
// Book types
// ============================================================================

/// Book row joined with its author summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRow {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub price: Option<i64>,
    pub author: Option<AuthorSummary>,
}

/// Mutable book fields (create and full replace)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub price: Option<i64>,
    pub author_id: Option<i64>,
}

/// Merge-patch over book fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub publication_date: Option<Option<NaiveDate>>,
    pub price: Option<Option<i64>>,
    pub author_id: Option<Option<i64>>,
}

impl BookPatch {
    pub fn apply(self, current: &BookRow) -> BookFields {
        BookFields {
            title: self.title.unwrap_or_else(|| current.title.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            publication_date: self.publication_date.unwrap_or(current.publication_date),
            price: self.price.unwrap_or(current.price),
            author_id: self
                .author_id
                .unwrap_or_else(|| current.author.as_ref().map(|a| a.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> AuthorRow {
        AuthorRow {
            id: 1,
            name: Some("AAAAAAAAAA".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1970, 1, 1),
        }
    }

    #[test]
    fn empty_patch_keeps_everything() {
        let fields = AuthorPatch::default().apply(&author());
        assert_eq!(fields.name.as_deref(), Some("AAAAAAAAAA"));
        assert_eq!(fields.birth_date, NaiveDate::from_ymd_opt(1970, 1, 1));
    }

    #[test]
    fn patch_overwrites_and_clears() {
        let patch = AuthorPatch {
            name: Some(Some("BBBBBBBBBB".to_string())),
            birth_date: Some(None),
        };
        let fields = patch.apply(&author());
        assert_eq!(fields.name.as_deref(), Some("BBBBBBBBBB"));
        assert_eq!(fields.birth_date, None);
    }

    #[test]
    fn book_patch_keeps_author_reference() {
        let book = BookRow {
            id: 7,
            title: Some("Title".to_string()),
            description: None,
            publication_date: None,
            price: Some(10),
            author: Some(AuthorSummary {
                id: 3,
                name: None,
            }),
        };
        let patch = BookPatch {
            price: Some(Some(12)),
            ..Default::default()
        };
        let fields = patch.apply(&book);
        assert_eq!(fields.author_id, Some(3));
        assert_eq!(fields.price, Some(12));
        assert_eq!(fields.title.as_deref(), Some("Title"));
    }

    #[test]
    fn book_patch_can_detach_author() {
        let book = BookRow {
            id: 7,
            title: None,
            description: None,
            publication_date: None,
            price: None,
            author: Some(AuthorSummary {
                id: 3,
                name: None,
            }),
        };
        let patch = BookPatch {
            author_id: Some(None),
            ..Default::default()
        };
        assert_eq!(patch.apply(&book).author_id, None);
    }
}
