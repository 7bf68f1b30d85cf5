//! Transport error types.
//!
//! Mirrors how failures propagate: a [`ConnectionError`] is fatal at startup,
//! a [`ReadError`] only ends the event stream, a [`SendError`] is returned to
//! the caller, and decode failures never leave the decoder.

use parlor_proto::ProtocolError;
use thiserror::Error;

use crate::SessionState;

/// Dialing or subscribing failed. There is no retry.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Websocket URL could not be turned into a request.
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    /// Token is not a valid header value.
    #[error("auth token is not a valid header value")]
    InvalidToken,

    /// TCP connect or websocket upgrade failed.
    #[error("dial failed: {0}")]
    Dial(String),

    /// Subscribe frame could not be written.
    #[error("subscribe handshake failed: {0}")]
    Handshake(String),

    /// Subscribe frame could not be built.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Writing an outbound message failed.
#[derive(Debug, Error)]
pub enum SendError {
    /// Session is not in the `Subscribed` state.
    #[error("session is not subscribed (state: {state:?})")]
    NotSubscribed {
        /// State at the time of the call.
        state: SessionState,
    },

    /// Websocket write failed. The session is closing.
    #[error("write failed: {0}")]
    Write(String),

    /// Message frame could not be built.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Why the inbound stream ended, when it was not ended by [`crate::Session::close`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Peer sent a close frame or hung up.
    #[error("connection closed by server{}", reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default())]
    PeerClosed {
        /// Close reason, if the peer gave one.
        reason: Option<String>,
    },

    /// Read failed mid-session.
    #[error("connection lost: {0}")]
    Transport(String),
}

/// Fetching the room backlog failed.
#[derive(Debug, Error)]
pub enum BacklogError {
    /// Host and room do not form a valid URL.
    #[error("invalid backlog URL for host {0:?}")]
    InvalidUrl(String),

    /// Request could not be sent or the body could not be read.
    #[error("backlog request failed: {0}")]
    Request(String),

    /// Server answered with a non-success status.
    #[error("backlog request returned HTTP {0}")]
    Status(u16),

    /// Body was not a backlog array.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}
