//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into a frame.
//!
//! The transcript area's height must match what the App subtracts for its
//! viewport, so the layout uses the same [`HEADER_HEIGHT`] and
//! [`FOOTER_HEIGHT`].

mod footer;
mod header;
mod transcript;

use parlor_app::{FOOTER_HEIGHT, HEADER_HEIGHT};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::App;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, username: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    let [header_area, transcript_area, footer_area] = chunks.as_ref() else {
        return;
    };

    header::render(frame, app, username, *header_area);
    transcript::render(frame, app, *transcript_area);
    footer::render(frame, app, *footer_area);
}
