use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Frame is not valid JSON, has an unknown `kind`, or misses a required field.
    #[error("malformed signaling message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid connection id {value:?}")]
    InvalidConnectionId {
        value: String,
        #[source]
        source: uuid::Error,
    },
}
