//! Sink layer: where accepted payloads end up.
//!
//! [`Sink`] is the single capability the webhook handler depends on. The
//! database variant persists each payload and yields a row ID, the console
//! variant prints it and yields nothing.

pub mod console;
pub mod database;

pub use console::ConsoleSink;
pub use database::DatabaseSink;

use std::time::Duration;

use crate::config::{ReceiverConfig, SinkKind};
use crate::domain::RawPayload;
use crate::error::ReceiverError;
use crate::persistence::SqlitePersistence;

/// Outcome of storing one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreReceipt {
    /// Identifier assigned by the store, if the sink produces one.
    pub id: Option<i64>,
}

/// A configured payload sink.
#[derive(Debug, Clone)]
pub enum Sink {
    /// Persist to SQLite.
    Database(DatabaseSink),
    /// Print to standard output.
    Console(ConsoleSink),
}

impl Sink {
    /// Builds the sink selected by `config`, opening the SQLite store and
    /// ensuring its schema when the database variant is chosen.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiverError::Storage`] if the database cannot be opened.
    pub async fn from_config(config: &ReceiverConfig) -> Result<Self, ReceiverError> {
        match config.sink {
            SinkKind::Database => {
                let persistence = SqlitePersistence::connect(
                    &config.db_path,
                    config.database_max_connections,
                    Duration::from_secs(config.database_connect_timeout_secs),
                )
                .await?;
                Ok(Self::Database(DatabaseSink::new(persistence)))
            }
            SinkKind::Console => Ok(Self::Console(ConsoleSink::new())),
        }
    }

    /// Records one payload.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiverError::Storage`] if the database sink fails to
    /// commit. The console sink never fails.
    pub async fn store(&self, payload: &RawPayload) -> Result<StoreReceipt, ReceiverError> {
        match self {
            Self::Database(sink) => sink.store(payload).await,
            Self::Console(sink) => Ok(sink.store(payload)),
        }
    }

    /// Which variant this is.
    #[must_use]
    pub const fn kind(&self) -> SinkKind {
        match self {
            Self::Database(_) => SinkKind::Database,
            Self::Console(_) => SinkKind::Console,
        }
    }

    /// Status line served at `GET /`.
    #[must_use]
    pub const fn status_message(&self) -> &'static str {
        match self {
            Self::Database(_) => "Webhook receiver operational. SQLite DB active.",
            Self::Console(_) => "Webhook receiver operational. Console logging active.",
        }
    }

    /// Releases any held resources. Called once after the server stops.
    pub async fn shutdown(&self) {
        if let Self::Database(sink) = self {
            sink.persistence().close().await;
        }
    }
}

impl From<DatabaseSink> for Sink {
    fn from(sink: DatabaseSink) -> Self {
        Self::Database(sink)
    }
}

impl From<ConsoleSink> for Sink {
    fn from(sink: ConsoleSink) -> Self {
        Self::Console(sink)
    }
}
