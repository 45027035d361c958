//! Channel-scoped registry of active WebSocket connections.

use std::collections::HashMap;

use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};

use crate::types::Timestamp;

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// A single live connection and its channel association.
pub struct Connection {
    /// Channel this connection subscribed to at handshake time.
    /// Immutable for the connection's whole lifetime.
    pub channel_id: String,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// In-memory collection of active connections tagged by channel id.
///
/// Many connections may share a channel id. Membership changes are the
/// only mutation performed on shared state; broadcasts work from a
/// point-in-time [`snapshot`](ChannelRegistry::snapshot) so they
/// tolerate concurrent inserts and removals.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc`
/// and shared across the application. The registry lives only for the
/// process's lifetime — on restart all subscriptions are gone and
/// clients must reconnect.
pub struct ChannelRegistry {
    connections: RwLock<HashMap<String, Connection>>,
}

impl ChannelRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection under `channel_id`.
    ///
    /// Returns the receiver half of the connection's message channel so
    /// the caller can forward messages to the WebSocket sink.
    pub async fn insert(
        &self,
        conn_id: String,
        channel_id: String,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = Connection {
            channel_id,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID. Unknown IDs are a no-op.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Point-in-time view of the senders subscribed to `channel_id`.
    ///
    /// Taken under the read lock, so membership changes that land after
    /// the snapshot do not affect an in-flight broadcast.
    pub async fn snapshot(&self, channel_id: &str) -> Vec<(String, WsSender)> {
        self.connections
            .read()
            .await
            .iter()
            .filter(|(_, conn)| conn.channel_id == channel_id)
            .map(|(id, conn)| (id.clone(), conn.sender.clone()))
            .collect()
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
