//! Inbound frames and the event decoder.
//!
//! # Recognized shapes
//!
//! ```text
//! {"type":"welcome"}                               -> Welcome
//! {"type":"ping","message":<n>}                    -> Ping
//! {"type":"confirm_subscription","identifier":..}  -> SubscriptionConfirmed
//! {"type":"reject_subscription","identifier":..}   -> SubscriptionRejected
//! {"type":"disconnect","reason":..}                -> Disconnect
//! {"identifier":..,"message":{"type":..,..}}       -> Event(ChatEvent)
//! ```
//!
//! Anything else is [`InboundFrame::Unknown`].

use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;

use crate::{ChatEvent, SenderId};

/// One inbound websocket frame, undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    payload: Bytes,
}

impl RawFrame {
    /// Wrap frame bytes.
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self { payload: payload.into() }
    }

    /// Frame bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload as text, lossy for invalid UTF-8. Used for logging.
    pub fn to_text_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

impl From<String> for RawFrame {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&'static str> for RawFrame {
    fn from(text: &'static str) -> Self {
        Self::new(Bytes::from_static(text.as_bytes()))
    }
}

/// Classification of an inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// Server greeting after the websocket upgrade.
    Welcome,
    /// Server keepalive.
    Ping,
    /// Subscription accepted.
    SubscriptionConfirmed,
    /// Subscription refused (unknown room or not authorized).
    SubscriptionRejected,
    /// Server is about to drop the connection.
    Disconnect {
        /// Reason given by the server, if any.
        reason: Option<String>,
    },
    /// Room activity.
    Event(ChatEvent),
    /// Unrecognized or malformed frame.
    Unknown,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: Option<Value>,
    reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RoomMessage {
    NewMessage { content: String, user: UserRef },
    UserJoined { username: String },
    UserLeft { username: String },
}

/// User object as embedded in messages and backlog entries.
#[derive(Deserialize)]
pub(crate) struct UserRef {
    #[serde(default)]
    pub(crate) id: Option<Value>,
    pub(crate) username: String,
}

impl UserRef {
    /// Sender identity: the server id when present, otherwise the username.
    pub(crate) fn sender_id(&self) -> SenderId {
        match &self.id {
            Some(Value::String(id)) => SenderId::new(id.clone()),
            Some(Value::Null) | None => SenderId::new(self.username.clone()),
            Some(other) => SenderId::new(other.to_string()),
        }
    }
}

impl From<RoomMessage> for ChatEvent {
    fn from(message: RoomMessage) -> Self {
        match message {
            RoomMessage::NewMessage { content, user } => {
                let sender = user.sender_id();
                ChatEvent::MessagePosted { username: user.username, content, sender }
            },
            RoomMessage::UserJoined { username } => ChatEvent::UserJoined { username },
            RoomMessage::UserLeft { username } => ChatEvent::UserLeft { username },
        }
    }
}

impl InboundFrame {
    /// Classify a raw frame. Never fails; unrecognized input is `Unknown`.
    pub fn parse(raw: &RawFrame) -> Self {
        let envelope: Envelope = match serde_json::from_slice(raw.payload()) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, frame = %raw.to_text_lossy(), "dropping malformed frame");
                return Self::Unknown;
            },
        };

        match envelope.kind.as_deref() {
            Some("welcome") => Self::Welcome,
            Some("ping") => Self::Ping,
            Some("confirm_subscription") => Self::SubscriptionConfirmed,
            Some("reject_subscription") => Self::SubscriptionRejected,
            Some("disconnect") => Self::Disconnect { reason: envelope.reason },
            Some(_) => Self::Unknown,
            None => envelope.message.map_or(Self::Unknown, Self::from_message),
        }
    }

    fn from_message(message: Value) -> Self {
        match serde_json::from_value::<RoomMessage>(message) {
            Ok(message) => Self::Event(message.into()),
            Err(e) => {
                tracing::debug!(error = %e, "dropping unrecognized room message");
                Self::Unknown
            },
        }
    }
}

/// Decode a raw frame into a chat event.
///
/// Returns `None` for control frames and for anything unrecognized. Never
/// an error: a bad frame is logged and dropped, and the stream carries on.
pub fn decode(raw: &RawFrame) -> Option<ChatEvent> {
    match InboundFrame::parse(raw) {
        InboundFrame::Event(event) => Some(event),
        InboundFrame::Unknown => {
            tracing::debug!(frame = %raw.to_text_lossy(), "unknown frame shape");
            None
        },
        InboundFrame::Welcome
        | InboundFrame::Ping
        | InboundFrame::SubscriptionConfirmed
        | InboundFrame::SubscriptionRejected
        | InboundFrame::Disconnect { .. } => None,
    }
}
