//! Transport for Parlor
//!
//! Owns the duplex connection to the chat server. A [`Session`] dials the
//! server's websocket, subscribes to exactly one room, and splits the
//! connection into a write half used for [`Session::send`] and a read task
//! that forwards raw frames, in arrival order, into a single-consumer queue
//! exposed as [`Events`].
//!
//! # Lifecycle
//!
//! ```text
//! Disconnected -> Connecting -> Subscribed -> Closing -> Closed
//! ```
//!
//! There is no reconnection: once a session reaches `Closed` it stays there.
//! Dial and read have no timeouts; a hung peer blocks until the connection
//! is torn down.
//!
//! The room backlog is fetched separately over HTTP with [`fetch_backlog`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod backlog;
mod config;
mod error;
mod session;

pub use backlog::fetch_backlog;
pub use config::TransportConfig;
pub use error::{BacklogError, ConnectionError, ReadError, SendError};
pub use parlor_proto::{ChatEvent, RawFrame, RoomId};
pub use session::{Events, Session, SessionState};
