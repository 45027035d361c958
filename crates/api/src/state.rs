use std::sync::Arc;

use hookrelay_core::{Broadcaster, ChannelRegistry};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Registry of active WebSocket connections, keyed by channel.
    pub registry: Arc<ChannelRegistry>,
    /// Fan-out of webhook envelopes to channel subscribers.
    pub broadcaster: Broadcaster,
}

impl AppState {
    /// Build the state graph: one registry, one broadcaster over it.
    pub fn new(config: ServerConfig) -> Self {
        let registry = Arc::new(ChannelRegistry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));
        Self {
            config: Arc::new(config),
            registry,
            broadcaster,
        }
    }
}
