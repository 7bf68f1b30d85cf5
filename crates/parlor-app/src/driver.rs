//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use parlor_proto::{ChatEvent, RoomId};

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the production TUI and in tests.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, a websocket session per room
/// - **Tests**: scripted events and recorded calls
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Current terminal dimensions (columns, rows).
    fn size(&self) -> (u16, u16);

    /// Wait for the next input event.
    ///
    /// Multiplexes terminal input, interrupts, and the live session's
    /// events. Returns `None` when something happened that the app does not
    /// need to see.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Fetch the room's message history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    fn fetch_backlog(
        &mut self,
        room: &RoomId,
    ) -> impl Future<Output = Result<Vec<ChatEvent>, Self::Error>> + Send;

    /// Open a session subscribed to `room`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be dialed or the subscribe
    /// handshake fails.
    fn connect(&mut self, room: &RoomId) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Post a message on the live session.
    ///
    /// # Errors
    ///
    /// Returns an error if no session is subscribed or the write fails.
    fn send(
        &mut self,
        room: &RoomId,
        content: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Close the live session.
    ///
    /// Its event stream ends afterwards, which the driver reports as
    /// [`AppEvent::Disconnected`]. Does nothing without a session.
    fn close(&mut self) -> impl Future<Output = ()> + Send;

    /// Pick the next room to activate, if there is one.
    fn next_room(&mut self) -> Option<RoomId>;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;
}
