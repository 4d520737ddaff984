use thiserror::Error;

/// Errors raised while converting events between their typed and stored forms.
#[derive(Debug, Error)]
pub enum EventError {
    /// The stored event type has no handler in the target event enum.
    #[error("Handler not found for event \"{event_type}\"")]
    UnknownEventType { event_type: String },

    /// The event type is known but its payload does not decode.
    #[error("Invalid payload for event \"{event_type}\": {source}")]
    InvalidPayload {
        event_type: String,
        source: serde_json::Error,
    },

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for event log operations.
pub type Result<T> = std::result::Result<T, EventError>;
