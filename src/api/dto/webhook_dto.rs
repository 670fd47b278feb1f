//! Response bodies for the webhook and status endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::sink::StoreReceipt;

/// Acknowledgment returned for an accepted webhook.
///
/// Database sink: `{"status": "Saved to DB", "id_saved": 1}`.
/// Console sink: `{"status": "Received OK", "message": "Log captured for later analysis"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WebhookAck {
    /// Outcome summary.
    pub status: String,
    /// Row ID assigned by the database sink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_saved: Option<i64>,
    /// Extra note from sinks that do not assign IDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<StoreReceipt> for WebhookAck {
    fn from(receipt: StoreReceipt) -> Self {
        match receipt.id {
            Some(id) => Self {
                status: "Saved to DB".to_string(),
                id_saved: Some(id),
                message: None,
            },
            None => Self {
                status: "Received OK".to_string(),
                id_saved: None,
                message: Some("Log captured for later analysis".to_string()),
            },
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusMessage {
    /// Fixed operational message.
    pub message: String,
}
