//! Insertion and lookup of search index entries.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{Entry, EntryRow};
use derive_more::Display;
use exn::ResultExt;
use sqlx::SqlitePool;
use tracing::instrument;

/// Why an entry was not inserted even though nothing went wrong.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Conflict {
    /// An entry (of any type) already points at the same path.
    #[display("path already indexed")]
    Path,
    /// An entry (pointing anywhere) already uses the same name.
    #[display("name already indexed")]
    Name,
    /// The exact (name, type, path) triple was ignored by the unique index.
    #[display("entry already indexed")]
    Entry,
}

/// Outcome of offering a single entry to the index.
///
/// Insertion never fails the run: statement errors are reported as
/// [`Rejected`](Self::Rejected) and logged.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Insertion {
    Inserted,
    Duplicate(Conflict),
    Rejected,
}

/// Repository over the `searchIndex` table.
///
/// # Deduplication
///
/// The first writer wins. A new entry is only inserted if no existing entry
/// has the same path **and** no existing entry has the same name, regardless
/// of their types. This is stricter than the table's unique index over
/// (name, type, path): a second, legitimately different page that happens to
/// share a display name with an earlier one is dropped.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    pool: SqlitePool,
}
impl From<&Database> for SearchIndex {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}
impl SearchIndex {
    /// Offer an entry to the index, applying the first-writer-wins policy.
    #[instrument(level = "debug", skip_all, fields(name = %entry.name, kind = %entry.kind, path = %entry.path, outcome))]
    pub async fn insert(&self, entry: &Entry) -> Insertion {
        let outcome = match self.try_insert(entry).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = ?e, name = %entry.name, path = %entry.path, "Search index entry rejected");
                Insertion::Rejected
            },
        };
        tracing::Span::current().record("outcome", tracing::field::debug(&outcome));
        outcome
    }

    async fn try_insert(&self, entry: &Entry) -> Result<Insertion> {
        let by_path = self.find_by_path(&entry.path).await?;
        let by_name = self.find_by_name(&entry.name).await?;
        if by_path.is_some() {
            return Ok(Insertion::Duplicate(Conflict::Path));
        }
        if by_name.is_some() {
            return Ok(Insertion::Duplicate(Conflict::Name));
        }
        let result = sqlx::query(include_str!("../queries/insert_entry.sql"))
            .bind(&entry.name)
            .bind(entry.kind.as_str())
            .bind(&entry.path)
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(match result.rows_affected() {
            0 => Insertion::Duplicate(Conflict::Entry),
            _ => Insertion::Inserted,
        })
    }

    /// Find the first entry pointing at `path`, whatever its name or type.
    pub async fn find_by_path(&self, path: impl AsRef<str>) -> Result<Option<Entry>> {
        let row: Option<EntryRow> = sqlx::query_as(include_str!("../queries/find_by_path.sql"))
            .bind(path.as_ref())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(Entry::try_from).transpose()
    }

    /// Find the first entry named `name`, whatever its path or type.
    pub async fn find_by_name(&self, name: impl AsRef<str>) -> Result<Option<Entry>> {
        let row: Option<EntryRow> = sqlx::query_as(include_str!("../queries/find_by_name.sql"))
            .bind(name.as_ref())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(Entry::try_from).transpose()
    }

    /// List every entry in insertion order.
    pub async fn list(&self) -> Result<Vec<Entry>> {
        let rows: Vec<EntryRow> = sqlx::query_as(include_str!("../queries/list_entries.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(Entry::try_from).collect()
    }

    pub async fn count(&self) -> Result<u64> {
        let row: (i64,) = sqlx::query_as(include_str!("../queries/count_entries.sql"))
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        u64::try_from(row.0).or_raise(|| ErrorKind::InvalidData("entry count"))
    }
}
