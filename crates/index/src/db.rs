//! Database connection management.

use exn::ResultExt;
use sqlx::SqliteConnection;
use sqlx::pool::PoolConnectionMetadata;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous};
use std::path::Path;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// Dash reads the index straight out of the bundle, so writes go through a
/// single connection and the file must stand alone once closed.
const MAX_CONNECTIONS: u32 = 1;

/// Connection to a docset's search index store (`docSet.dsidx`).
///
/// Connecting creates the file if needed and ensures the `searchIndex` schema
/// exists. Call [`close`](Self::close) once the index is populated so the
/// database is fully written before the bundle is archived.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn new(options: SqliteConnectOptions) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .after_connect(|conn, meta| Box::pin(async move { Self::apply_pragmas(conn, meta).await }))
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let db = Self { pool };
        db.create_schema().await?;
        Ok(db)
    }

    /// Connect to the search index at the given path.
    ///
    /// Creates the database file if it doesn't exist. The parent directory
    /// must already exist.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.parent().is_some_and(Path::is_dir) {
            exn::bail!(ErrorKind::InvalidLocation(path.to_path_buf()));
        }
        let options = Self::base_options().filename(path).create_if_missing(true);
        Self::new(options).await
    }

    /// Connect to an in-memory database (useful for testing).
    ///
    /// Note: do NOT apply `#[cfg(test)]` so that other crates can also use
    /// this in their tests.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = Self::base_options().filename(":memory:");
        Self::new(options).await
    }

    /// Base connection options shared between file and in-memory databases.
    fn base_options() -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            // A rollback journal instead of WAL: no `-wal`/`-shm` side files
            // may be left next to the index inside the bundle.
            .journal_mode(SqliteJournalMode::Delete)
            .synchronous(SqliteSynchronous::Normal)
            .auto_vacuum(sqlx::sqlite::SqliteAutoVacuum::None)
    }

    /// Apply additional PRAGMA settings that aren't exposed via SqliteConnectOptions.
    async fn apply_pragmas(conn: &mut SqliteConnection, _meta: PoolConnectionMetadata) -> sqlx::Result<()> {
        sqlx::query(
            r#"
                PRAGMA cache_size = -8192;
                PRAGMA temp_store = MEMORY;
            "#,
        )
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Create the `searchIndex` table and its uniqueness constraint.
    ///
    /// Idempotent; called automatically by `connect` and `connect_in_memory`.
    #[instrument("creating search index schema", skip(self))]
    async fn create_schema(&self) -> Result<()> {
        sqlx::query(include_str!("../queries/schema.sql"))
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Schema)?;
        Ok(())
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    ///
    /// After calling this, the Database instance should not be used.
    pub async fn close(&self) {
        // Let SQLite update query planner statistics
        _ = sqlx::query("PRAGMA optimize").execute(&self.pool).await;
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let db = Database::connect_in_memory().await.unwrap();
        assert!(!db.pool().is_closed());
        db.close().await;
        assert!(db.pool().is_closed());
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let db = Database::connect_in_memory().await.unwrap();
        db.create_schema().await.unwrap();
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE (type = 'table' AND name = 'searchIndex') OR (type = 'index' AND name = 'anchor')",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(row.0, 2);
        db.close().await;
    }

    #[tokio::test]
    async fn test_connect_creates_standalone_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docSet.dsidx");
        let db = Database::connect(&path).await.unwrap();
        let row: (String,) = sqlx::query_as("PRAGMA journal_mode").fetch_one(db.pool()).await.unwrap();
        assert_eq!(row.0, "delete");
        db.close().await;
        assert!(path.is_file());
        assert!(!dir.path().join("docSet.dsidx-wal").exists());
        assert!(!dir.path().join("docSet.dsidx-journal").exists());
    }

    #[tokio::test]
    async fn test_connect_requires_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = Database::connect(dir.path().join("Contents/Resources/docSet.dsidx")).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidLocation(_)));
    }
}
