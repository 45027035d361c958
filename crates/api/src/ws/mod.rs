//! WebSocket subscriber endpoint.
//!
//! Handles the upgrade (channel-id extraction from the request path),
//! registry membership, and the per-connection lifecycle: idle-timer
//! resets on inbound activity, forced close on idle expiry, teardown
//! on peer close or transport error.

mod handler;

pub use handler::ws_handler;
