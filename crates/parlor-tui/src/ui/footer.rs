//! Footer row
//!
//! Mode hint, the compose line with cursor, and the app name.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
};

use crate::{APP_NAME, App};

const VIEW_HINT: &str = " j↓ k↑ i(type) ";
const COMPOSE_HINT: &str = " INSERT (esc) ";
const PLACEHOLDER: &str = "Type something...";

/// Render the footer.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let compose = app.mode().compose();
    let hint = if compose.is_some() { COMPOSE_HINT } else { VIEW_HINT };

    let hint_width = Span::raw(hint).width() as u16;
    let name_width = APP_NAME.len() as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(hint_width),
            Constraint::Min(0),
            Constraint::Length(name_width),
        ])
        .split(area);

    let [hint_area, input_area, name_area] = chunks.as_ref() else {
        return;
    };

    let hint_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    frame.render_widget(Paragraph::new(Span::styled(hint, hint_style)), *hint_area);

    let input = match compose {
        Some(buffer) if !buffer.is_empty() => Span::raw(format!(" {}", buffer.text())),
        _ => Span::styled(format!(" {PLACEHOLDER}"), Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(input), *input_area);

    let name = Span::styled(format!(" {APP_NAME} "), Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(Paragraph::new(name), *name_area);

    if let Some(buffer) = compose {
        let max_x = input_area.x.saturating_add(input_area.width.saturating_sub(1));
        let before: String = buffer.text().chars().take(buffer.cursor()).collect();
        let columns = u16::try_from(Span::raw(before).width()).unwrap_or(u16::MAX);
        let cursor_x = input_area.x.saturating_add(1).saturating_add(columns);
        frame.set_cursor_position((cursor_x.min(max_x), input_area.y));
    }
}
