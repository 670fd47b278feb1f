//! Webhook ingestion handler.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::WebhookAck;
use crate::app_state::AppState;
use crate::domain::RawPayload;
use crate::error::{ErrorResponse, ReceiverError};

/// `POST /webhook` — Accept a JSON payload and hand it to the sink.
///
/// The body is parsed as JSON whatever its declared content type.
///
/// # Errors
///
/// Returns [`ReceiverError::InvalidJson`] for unparseable bodies and
/// [`ReceiverError::Storage`] if the database sink fails.
#[utoipa::path(
    post,
    path = "/webhook",
    tag = "Webhook",
    summary = "Receive a webhook",
    description = "Accepts any JSON document and stores it verbatim. The database sink answers with the assigned row ID.",
    request_body(content = String, description = "Arbitrary JSON document", content_type = "application/json"),
    responses(
        (status = 200, description = "Payload accepted", body = WebhookAck),
        (status = 400, description = "Body is not valid JSON", body = ErrorResponse),
        (status = 500, description = "Storage failure"),
    )
)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ReceiverError> {
    let payload = RawPayload::parse(&body).inspect_err(|e| {
        tracing::warn!(error = %e, bytes = body.len(), "rejected webhook body");
    })?;

    let receipt = state.sink.store(&payload).await?;

    Ok(Json(WebhookAck::from(receipt)))
}

/// Webhook routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/webhook", post(receive_webhook))
}
