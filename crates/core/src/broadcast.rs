//! Fan-out of one webhook envelope to a channel's open subscribers.

use std::sync::Arc;

use axum::extract::ws::Message;

use crate::envelope::WebhookEnvelope;
use crate::error::RelayError;
use crate::registry::ChannelRegistry;

/// Routes inbound webhook envelopes to every open connection tagged
/// with the target channel id.
///
/// Delivery is best-effort: a subscriber whose channel has closed is
/// skipped and never aborts delivery to the remaining subscribers.
/// There is no queueing — a broadcast that finds no open subscriber is
/// simply dropped for that subscriber.
#[derive(Clone)]
pub struct Broadcaster {
    registry: Arc<ChannelRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<ChannelRegistry>) -> Self {
        Self { registry }
    }

    /// Deliver `envelope` to every open subscriber of `channel_id`.
    ///
    /// The envelope is serialized once; each matched connection gets
    /// the same text frame. Returns the number of subscribers the
    /// frame was handed to.
    pub async fn broadcast(
        &self,
        channel_id: &str,
        envelope: &WebhookEnvelope,
    ) -> Result<usize, RelayError> {
        let message = Message::Text(envelope.to_text()?.into());

        let subscribers = self.registry.snapshot(channel_id).await;
        let matched = subscribers.len();

        let mut delivered = 0;
        for (conn_id, sender) in subscribers {
            if sender.send(message.clone()).is_ok() {
                delivered += 1;
            } else {
                // Connection is tearing down; its registry entry goes
                // away when its lifecycle task finishes.
                tracing::debug!(
                    conn_id = %conn_id,
                    channel = %channel_id,
                    "Subscriber channel closed, delivery skipped"
                );
            }
        }

        tracing::debug!(channel = %channel_id, matched, delivered, "Broadcast complete");
        Ok(delivered)
    }
}
