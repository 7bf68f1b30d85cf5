//! Application layer for Parlor
//!
//! Pure state machines and a generic runtime for the chat session, so the
//! exact code that drives the terminal also runs under scripted tests.
//!
//! # Components
//!
//! - [`Transcript`]: ordered, append-only rendered room history
//! - [`Viewport`]: visible window into the transcript with scroll arithmetic
//! - [`InputMode`]: VIEW/COMPOSE keystroke routing and the compose buffer
//! - [`App`]: the single owned aggregate that consumes [`AppEvent`]s and
//!   produces [`AppAction`]s
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: orchestration loop over a [`Driver`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod input;
mod mode;
mod runtime;
mod state;
mod transcript;
mod viewport;

pub use action::AppAction;
pub use app::App;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use mode::{COMPOSE_CHAR_LIMIT, ComposeBuffer, InputMode};
pub use parlor_proto::{ChatEvent, RoomId, SenderId};
pub use runtime::Runtime;
pub use state::ConnectionState;
pub use transcript::{LINE_SEPARATOR, Transcript, render_line};
pub use viewport::{ContentChange, FOOTER_HEIGHT, HEADER_HEIGHT, Viewport, content_height};
