//! # webhook-receiver
//!
//! HTTP receiver for third-party webhooks (e.g. payment notifications).
//!
//! Every `POST /webhook` body that parses as JSON is handed to a sink
//! exactly once. The database sink stores it verbatim in a SQLite `logs`
//! table and answers with the new row ID; the console sink prints it to
//! standard output. Payloads are opaque: no schema is enforced.
//!
//! ## Architecture
//!
//! ```text
//! Webhook sender (HTTP)
//!     │
//!     ├── Handlers (api/)
//!     │
//!     ├── RawPayload (domain/)
//!     │
//!     ├── Sink (sink/)
//!     │     ├── DatabaseSink ── SQLite (persistence/)
//!     │     └── ConsoleSink ── stdout
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod sink;
