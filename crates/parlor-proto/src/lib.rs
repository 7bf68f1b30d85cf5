//! Wire protocol for Parlor
//!
//! JSON frames exchanged with the chat server over a websocket, plus the
//! decoder that turns inbound frames into typed [`ChatEvent`]s.
//!
//! # Components
//!
//! - [`RawFrame`]: one inbound websocket frame, opaque until decoded
//! - [`InboundFrame`]: classification of a raw frame (control or room event)
//! - [`ChatEvent`]: typed room activity (message posted, user joined/left)
//! - [`Command`]: outbound subscribe and message frames
//! - [`decode_backlog`]: historical messages fetched on room entry
//!
//! Decoding never fails the caller. Unknown or malformed frames are logged
//! and dropped so a single bad frame cannot halt the event stream.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod backlog;
mod command;
pub mod errors;
mod event;
mod frame;
mod ids;

pub use backlog::decode_backlog;
pub use command::{CHANNEL_NAME, ChannelIdentifier, Command};
pub use errors::ProtocolError;
pub use event::ChatEvent;
pub use frame::{InboundFrame, RawFrame, decode};
pub use ids::{RoomId, SenderId};
