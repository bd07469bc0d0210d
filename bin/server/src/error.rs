//! Domain error types for the webhook surface.
//!
//! The dialogue platform expects HTTP 200 on every turn, so webhook errors
//! render as a fixed apology with status 200 after being logged.

use crate::wire::WebhookResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

/// Reply text sent whenever a turn cannot be handled.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// Errors handling a webhook turn.
#[derive(Debug)]
pub enum WebhookError {
    /// The body was not a recognizable turn payload.
    MalformedPayload { reason: String },
    /// The conversation layer rejected the turn.
    TurnFailed { reason: String },
}

impl fmt::Display for WebhookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPayload { reason } => write!(f, "malformed webhook payload: {reason}"),
            Self::TurnFailed { reason } => write!(f, "turn failed: {reason}"),
        }
    }
}

impl std::error::Error for WebhookError {}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Error in webhook");
        (StatusCode::OK, Json(WebhookResponse::text(APOLOGY))).into_response()
    }
}
