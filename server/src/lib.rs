//! Libris: a books-and-authors catalog server.
//!
//! REST resources for authors and books over an embedded SQLite store, with
//! list and count endpoints driven by `<field>.<operator>=<value>` criteria.

pub mod api;
mod app;
pub mod core;
pub mod data;
pub mod utils;
