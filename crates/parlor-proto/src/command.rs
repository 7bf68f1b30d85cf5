//! Outbound command frames.
//!
//! The server multiplexes channels over one websocket. Every command names
//! its channel with an `identifier`, which is itself a JSON document encoded
//! as a string inside the outer frame. Message bodies (`data`) are nested the
//! same way.

use serde::Serialize;

use crate::{
    RoomId,
    errors::{ProtocolError, Result},
};

/// Server-side channel that carries room traffic.
pub const CHANNEL_NAME: &str = "ChatRoomChannel";

/// Action name the channel dispatches outbound messages to.
const SEND_ACTION: &str = "send_message";

/// Channel identifier naming one room's topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelIdentifier {
    /// Channel class name.
    pub channel: &'static str,
    /// Room topic.
    pub topic: RoomId,
}

impl ChannelIdentifier {
    /// Identifier for the given room on the chat channel.
    pub fn for_room(room: &RoomId) -> Self {
        Self { channel: CHANNEL_NAME, topic: room.clone() }
    }

    /// String form embedded in command frames.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ProtocolError::JsonEncode(e.to_string()))
    }
}

/// Commands the client sends to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Subscribe to a room's channel. Sent once, right after connecting.
    Subscribe {
        /// Room to subscribe to.
        room: RoomId,
    },

    /// Post a message to a room.
    Message {
        /// Target room.
        room: RoomId,
        /// Message text.
        content: String,
    },
}

#[derive(Serialize)]
struct Envelope {
    command: &'static str,
    identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

#[derive(Serialize)]
struct MessageData<'a> {
    action: &'static str,
    room: &'a RoomId,
    content: &'a str,
}

impl Command {
    /// Room the command targets.
    pub fn room(&self) -> &RoomId {
        match self {
            Self::Subscribe { room } | Self::Message { room, .. } => room,
        }
    }

    /// Serialize to the JSON text sent on the websocket.
    pub fn encode(&self) -> Result<String> {
        let identifier = ChannelIdentifier::for_room(self.room()).encode()?;

        let envelope = match self {
            Self::Subscribe { .. } => Envelope { command: "subscribe", identifier, data: None },
            Self::Message { room, content } => {
                let data = MessageData { action: SEND_ACTION, room, content };
                let data = serde_json::to_string(&data)
                    .map_err(|e| ProtocolError::JsonEncode(e.to_string()))?;
                Envelope { command: "message", identifier, data: Some(data) }
            },
        };

        serde_json::to_string(&envelope).map_err(|e| ProtocolError::JsonEncode(e.to_string()))
    }
}
