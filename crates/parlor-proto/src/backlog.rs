//! Historical messages fetched when a room becomes active.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    ChatEvent,
    errors::{ProtocolError, Result},
    frame::UserRef,
};

#[derive(Deserialize)]
struct BacklogEntry {
    content: String,
    user: UserRef,
}

/// Decode a backlog body into message events, oldest first.
///
/// The body must be a JSON array. Entries that do not look like messages are
/// logged and skipped. Every decoded message carries the pre-set backlog
/// sender; backlog never produces join/leave events.
pub fn decode_backlog(body: &[u8]) -> Result<Vec<ChatEvent>> {
    let entries: Vec<Value> =
        serde_json::from_slice(body).map_err(|e| ProtocolError::JsonDecode(e.to_string()))?;

    let events = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<BacklogEntry>(entry) {
            Ok(entry) => Some(ChatEvent::backlog_message(entry.user.username, entry.content)),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed backlog entry");
                None
            },
        })
        .collect();

    Ok(events)
}
