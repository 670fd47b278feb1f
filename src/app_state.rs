//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::sink::Sink;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Destination for accepted webhook payloads.
    pub sink: Arc<Sink>,
}

impl AppState {
    /// Wraps a sink for sharing across handlers.
    #[must_use]
    pub fn new(sink: impl Into<Sink>) -> Self {
        Self {
            sink: Arc::new(sink.into()),
        }
    }
}
