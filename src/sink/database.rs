//! SQLite-backed sink.

use chrono::Utc;

use super::StoreReceipt;
use crate::domain::RawPayload;
use crate::error::ReceiverError;
use crate::persistence::SqlitePersistence;

/// Payload field echoed to the log after each insert.
const PAYMENT_STATUS_FIELD: &str = "pagado";

/// Persists every payload as one row in the `logs` table.
#[derive(Debug, Clone)]
pub struct DatabaseSink {
    persistence: SqlitePersistence,
}

impl DatabaseSink {
    /// Creates a sink over an initialised store.
    #[must_use]
    pub fn new(persistence: SqlitePersistence) -> Self {
        Self { persistence }
    }

    /// Returns the underlying store.
    #[must_use]
    pub(crate) fn persistence(&self) -> &SqlitePersistence {
        &self.persistence
    }

    /// Serializes `payload` to compact JSON and inserts it with the current
    /// time. Failures are returned to the caller untouched; nothing is
    /// retried.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiverError::Storage`] if the insert or commit fails.
    pub async fn store(&self, payload: &RawPayload) -> Result<StoreReceipt, ReceiverError> {
        let raw_log = payload.to_canonical_string();
        let entry = self.persistence.insert_log(&raw_log, Utc::now()).await?;

        tracing::info!(
            id = entry.id,
            pagado = %payload.display_field(PAYMENT_STATUS_FIELD),
            "webhook payload saved"
        );

        Ok(StoreReceipt { id: Some(entry.id) })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn make_sink() -> DatabaseSink {
        let Ok(store) = SqlitePersistence::in_memory().await else {
            panic!("in-memory store");
        };
        DatabaseSink::new(store)
    }

    #[tokio::test]
    async fn store_returns_row_id() {
        let sink = make_sink().await;
        let payload = RawPayload::from(json!({"pagado": true, "monto": 100}));

        let Ok(receipt) = sink.store(&payload).await else {
            panic!("store failed");
        };
        assert_eq!(receipt.id, Some(1));
    }

    #[tokio::test]
    async fn stored_row_round_trips_to_payload() {
        let sink = make_sink().await;
        let value = json!({"nested": {"list": [1, 2.5, "x", null, false]}, "id": "evt_1"});
        let payload = RawPayload::from(value.clone());

        let Ok(StoreReceipt { id: Some(id) }) = sink.store(&payload).await else {
            panic!("store failed");
        };
        let Ok(Some(entry)) = sink.persistence().get_log(id).await else {
            panic!("row missing");
        };
        let Ok(stored) = serde_json::from_str::<serde_json::Value>(&entry.raw_log) else {
            panic!("raw_log is not JSON");
        };
        assert_eq!(stored, value);
    }

    #[tokio::test]
    async fn big_integers_are_stored_exactly() {
        let sink = make_sink().await;
        let body = br#"{"amount": 123456789012345678901234567890, "fee": -98765432109876543210}"#;
        let Ok(payload) = RawPayload::parse(body) else {
            panic!("payload rejected");
        };

        let Ok(StoreReceipt { id: Some(id) }) = sink.store(&payload).await else {
            panic!("store failed");
        };
        let Ok(Some(entry)) = sink.persistence().get_log(id).await else {
            panic!("row missing");
        };

        assert_eq!(
            entry.raw_log,
            r#"{"amount":123456789012345678901234567890,"fee":-98765432109876543210}"#
        );
        let Ok(stored) = serde_json::from_str::<serde_json::Value>(&entry.raw_log) else {
            panic!("raw_log is not JSON");
        };
        let Ok(original) = serde_json::from_slice::<serde_json::Value>(body) else {
            panic!("body is not JSON");
        };
        assert_eq!(stored, original);
    }

    #[tokio::test]
    async fn store_propagates_storage_failure() {
        let sink = make_sink().await;
        sink.persistence().close().await;

        let result = sink.store(&RawPayload::from(json!({}))).await;
        assert!(matches!(result, Err(ReceiverError::Storage(_))));
    }
}
