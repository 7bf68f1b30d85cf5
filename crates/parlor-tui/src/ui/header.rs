//! Header row
//!
//! Room title, user, connection state, and the transient status message.

use parlor_app::ConnectionState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

/// Render the header.
pub fn render(frame: &mut Frame, app: &App, username: Option<&str>, area: Rect) {
    let title = app.room().map_or_else(|| " no room".to_string(), |room| format!(" #{room}"));

    let connection = match app.connection_state() {
        ConnectionState::Disconnected => Span::styled("offline", Style::default().fg(Color::Red)),
        ConnectionState::Connecting => {
            Span::styled("connecting", Style::default().fg(Color::Yellow))
        },
        ConnectionState::Subscribed => Span::styled("live", Style::default().fg(Color::Green)),
        ConnectionState::Closing => Span::styled("closing", Style::default().fg(Color::Yellow)),
        ConnectionState::Closed => Span::styled("closed", Style::default().fg(Color::Red)),
    };

    let mut spans = vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))];
    if let Some(name) = username {
        spans.push(Span::styled(format!(" as {name}"), Style::default().fg(Color::Gray)));
    }
    spans.push(Span::raw(" | "));
    spans.push(connection);
    if let Some(status) = app.status_message() {
        spans.push(Span::styled(format!(" | {status}"), Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
