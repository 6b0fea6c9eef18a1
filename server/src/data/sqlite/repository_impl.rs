//! CatalogRepository trait implementation for SQLite

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::criteria::{Pageable, Predicate, Sort};
use crate::data::error::DataError;
use crate::data::traits::CatalogRepository;
use crate::data::types::{
    AuthorFields, AuthorPatch, AuthorRow, BookFields, BookPatch, BookRow, Page,
};

use super::SqliteService;
use super::repositories::{author, book};

#[async_trait]
impl CatalogRepository for Arc<SqliteService> {
    // ==================== Author Operations ====================

    async fn create_author(&self, fields: &AuthorFields) -> Result<AuthorRow, DataError> {
        author::create_author(self.pool(), fields)
            .await
            .map_err(Into::into)
    }

    async fn get_author(&self, id: i64) -> Result<Option<AuthorRow>, DataError> {
        author::get_author(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn update_author(
        &self,
        id: i64,
        fields: &AuthorFields,
    ) -> Result<Option<AuthorRow>, DataError> {
        author::update_author(self.pool(), id, fields)
            .await
            .map_err(Into::into)
    }

    async fn patch_author(
        &self,
        id: i64,
        patch: AuthorPatch,
    ) -> Result<Option<AuthorRow>, DataError> {
        author::patch_author(self.pool(), id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_author(&self, id: i64) -> Result<bool, DataError> {
        author::delete_author(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn list_authors(
        &self,
        predicate: &Predicate,
        sort: &Sort,
        page: Option<Pageable>,
    ) -> Result<Page<AuthorRow>, DataError> {
        author::list_authors(self.pool(), predicate, sort, page)
            .await
            .map_err(Into::into)
    }

    async fn count_authors(&self, predicate: &Predicate) -> Result<u64, DataError> {
        author::count_authors(self.pool(), predicate)
            .await
            .map_err(Into::into)
    }

    // ==================== Book Operations ====================

    async fn create_book(&self, fields: &BookFields) -> Result<BookRow, DataError> {
        book::create_book(self.pool(), fields)
            .await
            .map_err(Into::into)
    }

    async fn get_book(&self, id: i64) -> Result<Option<BookRow>, DataError> {
        book::get_book(self.pool(), id).await.map_err(Into::into)
    }

    async fn update_book(
        &self,
        id: i64,
        fields: &BookFields,
    ) -> Result<Option<BookRow>, DataError> {
        book::update_book(self.pool(), id, fields)
            .await
            .map_err(Into::into)
    }

    async fn patch_book(&self, id: i64, patch: BookPatch) -> Result<Option<BookRow>, DataError> {
        book::patch_book(self.pool(), id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_book(&self, id: i64) -> Result<bool, DataError> {
        book::delete_book(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn list_books(
        &self,
        predicate: &Predicate,
        sort: &Sort,
        page: Option<Pageable>,
    ) -> Result<Page<BookRow>, DataError> {
        book::list_books(self.pool(), predicate, sort, page)
            .await
            .map_err(Into::into)
    }

    async fn count_books(&self, predicate: &Predicate) -> Result<u64, DataError> {
        book::count_books(self.pool(), predicate)
            .await
            .map_err(Into::into)
    }
}
