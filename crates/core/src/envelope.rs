//! Delivery envelope for one inbound webhook call.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::RelayError;

/// Path-parameter key carried in the envelope's first element.
///
/// Clients match on this key, so it is part of the wire contract.
pub const PARAM_KEY: &str = "webhookId";

/// Ordered pair `[pathParams, body]` serialized as a two-element JSON
/// array. Path params come first; the order is part of the contract.
///
/// The envelope exists only for the duration of one broadcast and is
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookEnvelope(Value, Value);

impl WebhookEnvelope {
    /// Build the envelope for a webhook addressed to `channel_id` with
    /// the given request body.
    pub fn new(channel_id: &str, body: Value) -> Self {
        Self(json!({ PARAM_KEY: channel_id }), body)
    }

    /// Serialize to the single text payload delivered to subscribers.
    pub fn to_text(&self) -> Result<String, RelayError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_precede_body() {
        let envelope = WebhookEnvelope::new("foo", json!({ "x": 1 }));
        let text = envelope.to_text().unwrap();

        assert_eq!(text, r#"[{"webhookId":"foo"},{"x":1}]"#);
    }

    #[test]
    fn empty_channel_id_is_preserved() {
        let envelope = WebhookEnvelope::new("", json!({}));
        let text = envelope.to_text().unwrap();

        assert_eq!(text, r#"[{"webhookId":""},{}]"#);
    }

    #[test]
    fn body_passes_through_unmodified() {
        let body = json!({ "nested": { "list": [1, 2, 3] }, "s": "value" });
        let envelope = WebhookEnvelope::new("chan", body.clone());

        let parsed: Value = serde_json::from_str(&envelope.to_text().unwrap()).unwrap();
        assert_eq!(parsed[1], body);
    }
}
