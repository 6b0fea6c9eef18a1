//! Repository trait for the catalog store
//!
//! Handlers talk to storage only through [`CatalogRepository`], implemented
//! by the SQLite backend.

use async_trait::async_trait;

use crate::data::criteria::{Pageable, Predicate, Sort};
use crate::data::error::DataError;
use crate::data::types::{
    AuthorFields, AuthorPatch, AuthorRow, BookFields, BookPatch, BookRow, Page,
};

/// Repository trait for author and book operations
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // ==================== Author Operations ====================

    async fn create_author(&self, fields: &AuthorFields) -> Result<AuthorRow, DataError>;

    async fn get_author(&self, id: i64) -> Result<Option<AuthorRow>, DataError>;

    /// Full replace; `None` if the author does not exist
    async fn update_author(
        &self,
        id: i64,
        fields: &AuthorFields,
    ) -> Result<Option<AuthorRow>, DataError>;

    /// Merge-patch; `None` if the author does not exist
    async fn patch_author(
        &self,
        id: i64,
        patch: AuthorPatch,
    ) -> Result<Option<AuthorRow>, DataError>;

    /// Returns `false` if there was nothing to delete
    async fn delete_author(&self, id: i64) -> Result<bool, DataError>;

    /// Matching rows plus the unpaginated total, read in one transaction
    async fn list_authors(
        &self,
        predicate: &Predicate,
        sort: &Sort,
        page: Option<Pageable>,
    ) -> Result<Page<AuthorRow>, DataError>;

    async fn count_authors(&self, predicate: &Predicate) -> Result<u64, DataError>;

    // ==================== Book Operations ====================

    async fn create_book(&self, fields: &BookFields) -> Result<BookRow, DataError>;

    async fn get_book(&self, id: i64) -> Result<Option<BookRow>, DataError>;

    async fn update_book(&self, id: i64, fields: &BookFields)
    -> Result<Option<BookRow>, DataError>;

    async fn patch_book(&self, id: i64, patch: BookPatch) -> Result<Option<BookRow>, DataError>;

    async fn delete_book(&self, id: i64) -> Result<bool, DataError>;

    /// Matching rows plus the unpaginated total, read in one transaction
    async fn list_books(
        &self,
        predicate: &Predicate,
        sort: &Sort,
        page: Option<Pageable>,
    ) -> Result<Page<BookRow>, DataError>;

    async fn count_books(&self, predicate: &Predicate) -> Result<u64, DataError>;
}
