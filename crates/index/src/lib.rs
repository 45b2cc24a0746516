//! SQLite search index for Dash docsets.
//!
//! Every docset carries a single-file database at
//! `Contents/Resources/docSet.dsidx` with one table:
//!
//! ```sql
//! CREATE TABLE searchIndex(id INTEGER PRIMARY KEY, name TEXT, type TEXT, path TEXT);
//! CREATE UNIQUE INDEX anchor ON searchIndex (name, type, path);
//! ```
//!
//! [`Database`] owns the connection and schema; [`SearchIndex`] inserts and
//! reads [`Entry`] records, reporting each insertion as an [`Insertion`]
//! outcome instead of an error.

mod db;
pub mod error;
mod models;
mod repo;

pub use crate::db::Database;
pub use crate::models::{Entry, EntryType};
pub use crate::repo::{Conflict, Insertion, SearchIndex};
