use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::Uri;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use hookrelay_core::IdleTimer;

use crate::state::AppState;

/// HTTP handler that upgrades the connection to WebSocket.
///
/// The channel id is the first slash-delimited segment of the request
/// path: `/chanA` and `/chanA/extra` both subscribe to `chanA`. A path
/// with no non-slash segment subscribes to the empty-string channel,
/// which every client that omits a channel ends up sharing.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    uri: Uri,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let channel_id = channel_from_path(uri.path());
    ws.on_upgrade(move |socket| handle_socket(socket, channel_id, state))
}

/// First slash-delimited path segment, or `""` when there is none.
fn channel_from_path(path: &str) -> String {
    path.split('/').nth(1).unwrap_or("").to_string()
}

/// Manage a single WebSocket connection after upgrade.
///
/// Registers the connection, then drives inbound frames, outbound
/// deliveries, and the idle timer from one `select!` loop:
///   - any inbound frame other than Close restarts the idle window;
///   - frames queued by the broadcaster are forwarded to the sink;
///   - idle expiry sends a Close frame and ends the session.
/// On every exit path the timer is cancelled and the registry entry
/// removed.
async fn handle_socket(socket: WebSocket, channel_id: String, state: AppState) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, channel = %channel_id, "WebSocket connected");

    // Registration and timer start happen together: from here on the
    // connection is Open and reachable by broadcasts.
    let mut rx = state
        .registry
        .insert(conn_id.clone(), channel_id.clone())
        .await;
    let mut timer = IdleTimer::new(Duration::from_secs(state.config.idle_timeout_secs));

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            // The inbound branch is polled first so a client frame that
            // arrived before the idle deadline always resets the timer
            // ahead of the expiry branch.
            biased;

            inbound = stream.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {
                    // Payload is not processed; any frame counts as
                    // activity, including client keepalives.
                    timer.reset();
                }
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                    break;
                }
            },

            outbound = rx.recv() => match outbound {
                Some(msg) => {
                    let closing = matches!(msg, Message::Close(_));
                    if sink.send(msg).await.is_err() {
                        tracing::debug!(conn_id = %conn_id, "WebSocket sink closed");
                        break;
                    }
                    if closing {
                        break;
                    }
                }
                // The registry dropped our sender (shutdown).
                None => break,
            },

            () = timer.expired() => {
                tracing::info!(
                    conn_id = %conn_id,
                    channel = %channel_id,
                    "Idle window elapsed, closing connection"
                );
                let _ = sink.send(Message::Close(None)).await;
                break;
            }
        }
    }

    // Teardown runs on every exit path: cancel the timer, then drop
    // registry membership synchronously with the connection's end.
    timer.cancel();
    state.registry.remove(&conn_id).await;
    tracing::info!(conn_id = %conn_id, channel = %channel_id, "WebSocket disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- channel_from_path ----------------------------------------------------

    #[test]
    fn first_segment_is_channel() {
        assert_eq!(channel_from_path("/chanA"), "chanA");
    }

    #[test]
    fn trailing_segments_are_ignored() {
        assert_eq!(channel_from_path("/chanA/extra/bits"), "chanA");
    }

    #[test]
    fn bare_slash_is_empty_channel() {
        assert_eq!(channel_from_path("/"), "");
    }

    #[test]
    fn leading_double_slash_is_empty_channel() {
        assert_eq!(channel_from_path("//hidden"), "");
    }
}
