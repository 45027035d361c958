#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The envelope could not be serialized to a text payload.
    #[error("Failed to encode envelope: {0}")]
    Encode(#[from] serde_json::Error),
}
