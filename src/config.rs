//! Receiver configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ReceiverError;

/// Which sink accepted payloads are handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Persist each payload as a row in the SQLite `logs` table.
    Database,
    /// Print each payload to standard output.
    Console,
}

impl SinkKind {
    /// Returns the lowercase name used in config and health output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Console => "console",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SinkKind {
    type Err = ReceiverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" | "db" | "sqlite" => Ok(Self::Database),
            "console" | "log" | "stdout" => Ok(Self::Console),
            other => Err(ReceiverError::Config(format!("unknown SINK value: {other}"))),
        }
    }
}

/// Top-level receiver configuration.
///
/// Loaded once at startup via [`ReceiverConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8000`).
    pub listen_addr: SocketAddr,

    /// Selected sink.
    pub sink: SinkKind,

    /// Path of the SQLite database file. Created if absent.
    pub db_path: PathBuf,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_connect_timeout_secs: u64,

    /// Largest accepted request body in bytes. `None` means unlimited.
    pub max_body_bytes: Option<usize>,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            sink: SinkKind::Database,
            db_path: PathBuf::from("./logs.db"),
            database_max_connections: 5,
            database_connect_timeout_secs: 5,
            max_body_bytes: None,
        }
    }
}

impl ReceiverConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// `MAX_BODY_BYTES` unset or `0` leaves request bodies uncapped.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiverError::Config`] if `LISTEN_ADDR` or `SINK` is set
    /// but cannot be parsed.
    pub fn from_env() -> Result<Self, ReceiverError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| ReceiverError::Config(format!("invalid LISTEN_ADDR {raw:?}: {e}")))?,
            Err(_) => defaults.listen_addr,
        };

        let sink = match std::env::var("SINK") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.sink,
        };

        let db_path = std::env::var("DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let database_max_connections =
            parse_env("DATABASE_MAX_CONNECTIONS", defaults.database_max_connections);
        let database_connect_timeout_secs = parse_env(
            "DATABASE_CONNECT_TIMEOUT_SECS",
            defaults.database_connect_timeout_secs,
        );

        let max_body_bytes = body_limit(parse_env("MAX_BODY_BYTES", 0));

        Ok(Self {
            listen_addr,
            sink,
            db_path,
            database_max_connections,
            database_connect_timeout_secs,
            max_body_bytes,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    parse_or(std::env::var(key).ok().as_deref(), default)
}

/// Maps a configured byte count to a limit; zero disables the cap.
fn body_limit(bytes: usize) -> Option<usize> {
    (bytes > 0).then_some(bytes)
}

fn parse_or<T: FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
