//! Server location.

use parlor_proto::RoomId;
use reqwest::Url;

/// Path of the websocket endpoint on the server.
const CABLE_PATH: &str = "/cable";

/// Where the chat server lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Host and optional port, e.g. `localhost:3000`.
    pub host: String,
    /// Use `wss`/`https` instead of `ws`/`http`.
    pub secure: bool,
}

impl TransportConfig {
    /// Plain-text transport to `host`.
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into(), secure: false }
    }

    /// Websocket URL, e.g. `ws://localhost:3000/cable`.
    pub fn socket_url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{scheme}://{}{CABLE_PATH}", self.host)
    }

    /// Backlog URL for a room, with the room name percent-encoded.
    ///
    /// Returns `None` if the host does not form a valid base URL.
    pub fn backlog_url(&self, room: &RoomId) -> Option<Url> {
        let scheme = if self.secure { "https" } else { "http" };
        let mut url = Url::parse(&format!("{scheme}://{}/", self.host)).ok()?;
        url.path_segments_mut().ok()?.pop_if_empty().extend(["rooms", room.as_str(), "messages"]);
        Some(url)
    }
}
