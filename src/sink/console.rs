//! Console sink: prints each payload to standard output.

use std::io::Write;

use super::StoreReceipt;
use crate::domain::RawPayload;

/// Payload field used as the event correlation ID.
const EVENT_ID_FIELD: &str = "id";

const SEPARATOR_WIDTH: usize = 50;

/// Writes a formatted block per payload to stdout. Keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Creates a console sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Prints the payload. Write errors on stdout are ignored.
    pub fn store(&self, payload: &RawPayload) -> StoreReceipt {
        let block = Self::render(payload);
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(block.as_bytes());
        let _ = stdout.flush();

        tracing::info!(event_id = %payload.display_field(EVENT_ID_FIELD), "webhook payload logged");
        StoreReceipt { id: None }
    }

    /// Renders the block written for `payload`: a separator, the event ID
    /// header, the pretty-printed body and a closing separator.
    #[must_use]
    pub fn render(payload: &RawPayload) -> String {
        let separator = "=".repeat(SEPARATOR_WIDTH);
        format!(
            "{separator}\nWebhook received\nID de Evento: {}\n{}\n{separator}\n",
            payload.display_field(EVENT_ID_FIELD),
            payload.to_pretty_string(),
        )
    }
}
