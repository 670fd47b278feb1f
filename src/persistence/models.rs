//! Database models for stored webhook payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row from the `logs` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LogEntry {
    /// Auto-increment row ID. Never reused.
    pub id: i64,
    /// Receipt timestamp.
    pub timestamp: DateTime<Utc>,
    /// The full webhook body as compact JSON text.
    pub raw_log: String,
}
