//! Relay domain for the webhook-to-WebSocket bridge.
//!
//! Holds the channel-scoped connection registry, the per-connection idle
//! timer, the webhook envelope format, and the broadcaster that fans an
//! envelope out to every open subscriber of a channel. The HTTP and
//! WebSocket surfaces live in `hookrelay-api`.

pub mod broadcast;
pub mod envelope;
pub mod error;
pub mod idle;
pub mod registry;
pub mod types;

pub use broadcast::Broadcaster;
pub use envelope::WebhookEnvelope;
pub use error::RelayError;
pub use idle::IdleTimer;
pub use registry::{ChannelRegistry, Connection, WsSender};
