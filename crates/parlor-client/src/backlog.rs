//! Room backlog over HTTP.

use parlor_proto::{ChatEvent, RoomId, decode_backlog};
use reqwest::header::AUTHORIZATION;

use crate::{BacklogError, TransportConfig};

/// Fetch the messages posted to `room` before this session, oldest first.
///
/// Sends `GET /rooms/<room>/messages` with the token verbatim in the
/// `Authorization` header. Called once per room activation, before the
/// websocket subscription, so the backlog always precedes live events.
pub async fn fetch_backlog(
    http: &reqwest::Client,
    config: &TransportConfig,
    room: &RoomId,
    token: &str,
) -> Result<Vec<ChatEvent>, BacklogError> {
    let url = config.backlog_url(room).ok_or_else(|| BacklogError::InvalidUrl(config.host.clone()))?;
    tracing::debug!(%url, "fetching backlog");

    let response = http
        .get(url)
        .header(AUTHORIZATION, token)
        .send()
        .await
        .map_err(|e| BacklogError::Request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(BacklogError::Status(status.as_u16()));
    }

    let body = response.bytes().await.map_err(|e| BacklogError::Request(e.to_string()))?;
    let events = decode_backlog(&body)?;

    tracing::info!(%room, count = events.len(), "backlog loaded");
    Ok(events)
}
