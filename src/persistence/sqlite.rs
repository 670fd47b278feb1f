//! SQLite implementation of the persistence layer.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::models::LogEntry;
use crate::error::ReceiverError;

const CREATE_LOGS_TABLE: &str = "CREATE TABLE IF NOT EXISTS logs (\
     id INTEGER PRIMARY KEY AUTOINCREMENT, \
     timestamp DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP, \
     raw_log TEXT)";

const CREATE_LOGS_ID_INDEX: &str = "CREATE INDEX IF NOT EXISTS ix_logs_id ON logs (id)";

/// SQLite-backed persistence layer using `sqlx::SqlitePool`.
///
/// Cloning is cheap; all clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct SqlitePersistence {
    pool: SqlitePool,
}

impl SqlitePersistence {
    /// Opens (creating if absent) the database file at `path` and ensures
    /// the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiverError::Storage`] if the file cannot be opened or
    /// the schema cannot be created.
    pub async fn connect(
        path: &Path,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, ReceiverError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await?;

        let persistence = Self::new(pool);
        persistence.ensure_schema().await?;
        tracing::info!(path = %path.display(), "sqlite store ready");
        Ok(persistence)
    }

    /// Opens a private in-memory database with the schema applied.
    ///
    /// The pool is pinned to a single connection that never expires, since
    /// every SQLite in-memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiverError::Storage`] on failure.
    pub async fn in_memory() -> Result<Self, ReceiverError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let persistence = Self::new(pool);
        persistence.ensure_schema().await?;
        Ok(persistence)
    }

    /// Wraps an existing pool. Call [`Self::ensure_schema`] before use.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the `logs` table and its index if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiverError::Storage`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), ReceiverError> {
        sqlx::query(CREATE_LOGS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_LOGS_ID_INDEX).execute(&self.pool).await?;
        Ok(())
    }

    /// Inserts one payload row inside its own transaction and returns the
    /// stored entry.
    ///
    /// The transaction is committed before returning. On any error it is
    /// dropped, which rolls it back and releases the connection.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiverError::Storage`] on database failure.
    pub async fn insert_log(
        &self,
        raw_log: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<LogEntry, ReceiverError> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO logs (timestamp, raw_log) VALUES (?, ?) RETURNING id",
        )
        .bind(timestamp)
        .bind(raw_log)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(LogEntry {
            id,
            timestamp,
            raw_log: raw_log.to_string(),
        })
    }

    /// Loads a single entry by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiverError::Storage`] on database failure.
    pub async fn get_log(&self, id: i64) -> Result<Option<LogEntry>, ReceiverError> {
        let entry = sqlx::query_as::<_, LogEntry>(
            "SELECT id, timestamp, raw_log FROM logs WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Returns the number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiverError::Storage`] on database failure.
    pub async fn count_logs(&self) -> Result<i64, ReceiverError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM logs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Closes the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    async fn make_store() -> SqlitePersistence {
        let Ok(store) = SqlitePersistence::in_memory().await else {
            panic!("in-memory store");
        };
        store
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let store = make_store().await;
        assert!(store.ensure_schema().await.is_ok());
        assert!(store.ensure_schema().await.is_ok());
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = make_store().await;

        let Ok(first) = store.insert_log("{\"a\":1}", Utc::now()).await else {
            panic!("first insert failed");
        };
        let Ok(second) = store.insert_log("{\"a\":2}", Utc::now()).await else {
            panic!("second insert failed");
        };

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn inserted_entry_reads_back() {
        let store = make_store().await;
        let now = Utc::now();

        let Ok(entry) = store.insert_log("{\"pagado\":true}", now).await else {
            panic!("insert failed");
        };
        let Ok(Some(loaded)) = store.get_log(entry.id).await else {
            panic!("entry not found");
        };

        assert_eq!(loaded.raw_log, "{\"pagado\":true}");
        assert_eq!(loaded.timestamp, now);
        assert_eq!(store.count_logs().await.ok(), Some(1));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = make_store().await;

        let Ok(first) = store.insert_log("{}", Utc::now()).await else {
            panic!("insert failed");
        };
        let deleted = sqlx::query("DELETE FROM logs WHERE id = ?")
            .bind(first.id)
            .execute(store.pool())
            .await;
        assert!(deleted.is_ok());

        let Ok(second) = store.insert_log("{}", Utc::now()).await else {
            panic!("insert failed");
        };
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn timestamp_defaults_when_not_supplied() {
        let store = make_store().await;
        let inserted = sqlx::query("INSERT INTO logs (raw_log) VALUES ('{}')")
            .execute(store.pool())
            .await;
        assert!(inserted.is_ok());

        let Ok(Some(entry)) = store.get_log(1).await else {
            panic!("entry not found");
        };
        assert!(entry.timestamp <= Utc::now());
    }

    #[tokio::test]
    async fn get_log_returns_none_for_unknown_id() {
        let store = make_store().await;
        assert!(matches!(store.get_log(99).await, Ok(None)));
    }

    #[tokio::test]
    async fn insert_fails_after_close() {
        let store = make_store().await;
        store.close().await;
        let result = store.insert_log("{}", Utc::now()).await;
        assert!(matches!(result, Err(ReceiverError::Storage(_))));
    }
}
