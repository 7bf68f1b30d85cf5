//! Application input events.
//!
//! This module defines [`AppEvent`], the full set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from three sources:
//! - User interactions (keys, resize, interrupt).
//! - The room list, which selects the active room.
//! - The transport session and backlog fetch, translated by the runtime.

use parlor_proto::{ChatEvent, RoomId};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// A room was chosen and should become active.
    RoomSelected {
        /// Chosen room.
        room: RoomId,
    },

    /// Backlog for a room arrived.
    Backlog {
        /// Room the backlog belongs to.
        room: RoomId,
        /// Historical messages, oldest first.
        events: Vec<ChatEvent>,
    },

    /// Backlog for a room could not be fetched.
    BacklogUnavailable {
        /// Room the fetch was for.
        room: RoomId,
        /// Error description.
        message: String,
    },

    /// Live room activity.
    Chat(ChatEvent),

    /// Subscription handshake completed.
    Subscribed,

    /// The session's event stream ended.
    Disconnected {
        /// Why, when the stream did not end because we closed it.
        reason: Option<String>,
    },

    /// Operator asked to shut down.
    Interrupt,

    /// Recoverable error to show the user.
    Error {
        /// Error description.
        message: String,
    },
}
