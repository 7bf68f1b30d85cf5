//! Opaque identifiers for rooms and senders.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ProtocolError;

/// Identifier of a chat room (the channel topic on the wire).
///
/// Always non-empty. Compared and hashed by its exact text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    /// Create a room id. Fails if `name` is empty or only whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, ProtocolError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProtocolError::InvalidRoomId(name));
        }
        Ok(Self(name))
    }

    /// Room name as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoomId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RoomId {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomId> for String {
    fn from(room: RoomId) -> Self {
        room.0
    }
}

/// Opaque identity of a message sender.
///
/// Live messages carry the server's user id. Backlog messages carry the
/// fixed [`SenderId::backlog`] marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SenderId(String);

impl SenderId {
    const BACKLOG: &'static str = "backlog";

    /// Wrap a server-provided identity.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Sender attached to every message decoded from the backlog.
    pub fn backlog() -> Self {
        Self(Self::BACKLOG.to_string())
    }}

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn room_id_rejects_blank() {
        assert!(RoomId::new("").is_err());
        assert!(RoomId::new("   ").is_err());
        assert_eq!(RoomId::new("general").map(|r| r.to_string()), Ok("general".to_string()));
    }

    #[test]
    fn room_id_deserialize_validates() {
        let room: Result<RoomId, _> = serde_json::from_str("\"\"");
        assert!(room.is_err());

        let room: RoomId = serde_json::from_str("\"lobby\"").unwrap();
        assert_eq!(room.as_str(), "lobby");
    }

    #[test]
    fn backlog_marker() {
        assert_eq!(SenderId::backlog().to_string(), "backlog");
        assert_ne!(SenderId::new("7"), SenderId::backlog());
    }
}
