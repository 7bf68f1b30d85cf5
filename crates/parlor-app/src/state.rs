//! Observable connection state.

/// Connection state as seen by the UI.
///
/// Tracks the transport session's lifecycle. There is no path from `Closed`
/// back to `Connecting` except selecting a room again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No room selected yet.
    #[default]
    Disconnected,
    /// Backlog fetch and subscribe in progress.
    Connecting,
    /// Live session.
    Subscribed,
    /// Close requested, waiting for the event stream to end.
    Closing,
    /// Session ended.
    Closed,
}

impl ConnectionState {
    /// Whether a session exists that still needs closing.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Connecting | Self::Subscribed)
    }
}
