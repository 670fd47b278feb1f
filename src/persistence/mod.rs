//! Persistence layer: SQLite log of received webhook payloads.
//!
//! A single `logs` table holds one row per accepted webhook. The concrete
//! implementation uses `sqlx::SqlitePool` against a local database file.

pub mod models;
pub mod sqlite;

pub use models::LogEntry;
pub use sqlite::SqlitePersistence;
