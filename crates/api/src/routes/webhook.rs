//! Webhook ingestion endpoint.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde_json::Value;

use hookrelay_core::WebhookEnvelope;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /webhook/{webhookId}
///
/// Accepts a webhook callback from the automation platform and fans it
/// out to every open WebSocket connection subscribed to the channel.
/// Delivery is best-effort: the acknowledgement is returned once the
/// broadcast call completes, regardless of how many subscribers (if
/// any) actually received the frame. Nothing is persisted or retried.
pub async fn receive_webhook(
    State(state): State<AppState>,
    Path(webhook_id): Path<String>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    // An absent body counts as an empty object; anything present must
    // parse as JSON.
    let body: Value = if body.is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice(&body).map_err(AppError::MalformedBody)?
    };

    let envelope = WebhookEnvelope::new(&webhook_id, body);
    let delivered = state.broadcaster.broadcast(&webhook_id, &envelope).await?;

    tracing::info!(channel = %webhook_id, delivered, "Webhook dispatched to channel");

    Ok("Webhook dispatched to channel subscribers.")
}
