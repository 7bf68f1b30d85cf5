//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use parlor_proto::RoomId;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Fetch the room's message history.
    FetchBacklog {
        /// Room being activated.
        room: RoomId,
    },

    /// Dial the server and subscribe to the room.
    Subscribe {
        /// Room being activated.
        room: RoomId,
    },

    /// Post a message on the live session.
    SendMessage {
        /// Active room.
        room: RoomId,
        /// Compose buffer contents at submit time.
        content: String,
    },

    /// Ask the room list for another room.
    NavigateRooms,

    /// Close the live session.
    CloseSession,
}
