//! Protocol error types.

use thiserror::Error;

/// Errors produced while building or decoding protocol payloads.
///
/// Inbound room frames never surface these to the event stream; they are
/// logged and dropped by [`crate::decode`]. Only whole-payload failures such
/// as an unreadable backlog body or an invalid room name are returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Payload was not valid JSON or did not match the expected shape.
    #[error("JSON decode failed: {0}")]
    JsonDecode(String),

    /// Outbound frame could not be serialized.
    #[error("JSON encode failed: {0}")]
    JsonEncode(String),

    /// Room identifier was empty or whitespace.
    #[error("invalid room id: {0:?}")]
    InvalidRoomId(String),
}

/// Result type alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
