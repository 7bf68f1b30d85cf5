//! Terminal UI for Parlor
//!
//! A thin shell over [`parlor_app::Driver`] that provides terminal-specific
//! I/O and owns the live websocket session. All orchestration logic lives in
//! the generic [`parlor_app::Runtime`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod rooms;
pub mod terminal;
pub mod ui;

pub use parlor_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use rooms::RoomList;
pub use terminal::{DriverConfig, TerminalDriver, TerminalError};

/// Name shown in the footer.
pub const APP_NAME: &str = "parlor";
