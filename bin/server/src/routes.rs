//! HTTP routes: the webhook, a health probe and a service description.

use crate::AppState;
use crate::error::WebhookError;
use crate::wire::{Endpoints, HealthResponse, ServiceInfo, WebhookRequest, WebhookResponse};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use lecture_bot_conversation::Turn;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/webhook", post(webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handles one dialogue turn.
///
/// The body is parsed by hand so that malformed payloads still get a 200
/// apology rather than an extractor rejection.
async fn webhook(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<WebhookResponse>, WebhookError> {
    let request: WebhookRequest =
        serde_json::from_slice(&body).map_err(|e| WebhookError::MalformedPayload {
            reason: e.to_string(),
        })?;

    tracing::info!(
        intent = ?request.query_result.intent.display_name,
        action = ?request.query_result.action,
        parameters = ?request.query_result.parameters,
        "Webhook turn"
    );

    let reply = state
        .dispatcher
        .handle(Turn::from(request))
        .await
        .map_err(|report| WebhookError::TurnFailed {
            reason: report.to_string(),
        })?;

    Ok(Json(reply.into()))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Webhook is running".to_string(),
    })
}

async fn home() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "University Chatbot Webhook".to_string(),
        status: "running".to_string(),
        endpoints: Endpoints {
            webhook: "/webhook".to_string(),
            health: "/health".to_string(),
        },
    })
}
