//! HTTP API layer: route handlers, DTOs, and router composition.
//!
//! | Method | Path       | Handler                              |
//! |--------|------------|--------------------------------------|
//! | POST   | `/webhook` | [`handlers::webhook::receive_webhook`] |
//! | GET    | `/`        | [`handlers::system::home_handler`]     |
//! | GET    | `/health`  | [`handlers::system::health_handler`]   |

pub mod dto;
pub mod handlers;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for all endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "webhook-receiver", description = "Stores inbound webhook payloads verbatim."),
    paths(
        handlers::webhook::receive_webhook,
        handlers::system::home_handler,
        handlers::system::health_handler,
    ),
    components(schemas(
        dto::WebhookAck,
        dto::StatusMessage,
        handlers::system::HealthResponse,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "Webhook", description = "Webhook ingestion"),
        (name = "System", description = "Status and health"),
    )
)]
pub struct ApiDoc;

/// Builds the route table without state or middleware.
pub fn build_router() -> Router<AppState> {
    let router = handlers::routes();

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

/// Builds the complete application with request bodies uncapped.
pub fn build_app(state: AppState) -> Router {
    build_app_with_body_limit(state, None)
}

/// Builds the complete application: routes, body limit, request tracing
/// and state. `None` lifts axum's default 2 MB body cap entirely.
pub fn build_app_with_body_limit(state: AppState, max_body_bytes: Option<usize>) -> Router {
    let body_limit = match max_body_bytes {
        Some(bytes) => DefaultBodyLimit::max(bytes),
        None => DefaultBodyLimit::disable(),
    };

    build_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(body_limit),
        )
        .with_state(state)
}
