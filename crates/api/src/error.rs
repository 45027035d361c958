use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hookrelay_core::RelayError;

/// Application-level error type for HTTP handlers.
///
/// Every variant is reported to the webhook caller as a generic
/// internal-error acknowledgement; the caller does not retry and gets
/// no per-subscriber detail. Failures are logged with their cause and
/// never propagate beyond the request that hit them.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The webhook request body could not be parsed as JSON.
    #[error("Malformed webhook body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    /// A relay-level failure during dispatch.
    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::MalformedBody(err) => {
                tracing::error!(error = %err, "Failed to parse webhook body");
            }
            AppError::Relay(err) => {
                tracing::error!(error = %err, "Relay error during webhook dispatch");
            }
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error processing the request.",
        )
            .into_response()
    }
}
