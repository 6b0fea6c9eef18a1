//! Shared data types for the catalog store
//!
//! Row types returned by repositories and the field sets accepted by
//! create, update and patch operations.

mod catalog;

pub use catalog::{
    AuthorFields, AuthorPatch, AuthorRow, AuthorSummary, BookFields, BookPatch, BookRow, Page,
};
