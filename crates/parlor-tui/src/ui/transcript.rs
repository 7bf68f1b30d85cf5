//! Transcript area
//!
//! Shows the window of the transcript selected by the viewport offset.
//! Lines are not wrapped; the viewport counts one row per line.

use ratatui::{Frame, layout::Rect, text::Line, widgets::Paragraph};

use crate::App;

/// Render the transcript.
///
/// Only the rows that fit are handed to the widget, so the offset is never
/// narrowed to a `u16` scroll position.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let visible: Vec<Line> = app
        .content()
        .lines()
        .skip(app.viewport().offset())
        .take(usize::from(area.height))
        .map(Line::raw)
        .collect();
    frame.render_widget(Paragraph::new(visible), area);
}
