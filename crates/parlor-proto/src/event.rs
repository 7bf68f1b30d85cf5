//! Typed room activity.

use crate::SenderId;

/// A discrete piece of room activity, in arrival order.
///
/// Events carry no timestamps or ids usable for reordering; the order in
/// which the transport delivers them is the only ordering there is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// A user posted a message.
    MessagePosted {
        /// Display name of the author.
        username: String,
        /// Message text.
        content: String,
        /// Opaque identity of the author.
        sender: SenderId,
    },

    /// A user entered the room.
    UserJoined {
        /// Display name of the user.
        username: String,
    },

    /// A user left the room.
    UserLeft {
        /// Display name of the user.
        username: String,
    },
}

impl ChatEvent {
    /// Build a backlog message carrying the pre-set backlog sender.
    pub fn backlog_message(username: impl Into<String>, content: impl Into<String>) -> Self {
        Self::MessagePosted {
            username: username.into(),
            content: content.into(),
            sender: SenderId::backlog(),
        }
    }

    /// Whether this is a posted message (as opposed to presence).
    pub fn is_message(&self) -> bool {
        matches!(self, Self::MessagePosted { .. })
    }
}
