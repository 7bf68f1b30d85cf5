//! Application state machine.
//!
//! This module defines the [`App`] state machine, the single owned aggregate
//! behind the chat screen: connection state, active room, transcript,
//! viewport, and input mode. It is completely decoupled from I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Keystroke routing
//!
//! A key is first offered to the current mode's table. Keys the table does
//! not claim fall through to the mode's fallback: transcript scrolling in
//! VIEW, cursor editing in COMPOSE. A key that switches into COMPOSE also
//! falls through, and the fallback swallows it, so the mode-entry key is
//! never typed into the buffer.

use parlor_proto::{ChatEvent, RoomId};

use crate::{
    AppAction, AppEvent, ComposeBuffer, ConnectionState, ContentChange, FOOTER_HEIGHT,
    HEADER_HEIGHT, InputMode, KeyInput, Transcript, Viewport, content_height,
};

/// Outcome of offering a key to the mode table.
enum Routed {
    Handled(Vec<AppAction>),
    Fallthrough,
}

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Connection state.
    state: ConnectionState,
    /// Currently active room. `None` until one is selected.
    room: Option<RoomId>,
    /// Rendered history of the active room.
    transcript: Transcript,
    /// Cached [`Transcript::render`] output.
    content: String,
    /// Scroll state of the transcript pane.
    viewport: Viewport,
    /// Keystroke routing mode.
    mode: InputMode,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
    /// Shutdown requested; waiting for the session to end.
    quitting: bool,
}

impl App {
    /// Create an App with no active room.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(cols, rows) => {
                let height = rows.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT);
                if self.viewport.resize(height) {
                    tracing::debug!(cols, rows, "first paint");
                }
                vec![AppAction::Render]
            },
            AppEvent::RoomSelected { room } => self.select_room(room),
            AppEvent::Backlog { room, events } => {
                if self.room.as_ref() != Some(&room) {
                    tracing::debug!(%room, "ignoring backlog for inactive room");
                    return vec![];
                }
                self.reset_transcript(&events);
                vec![AppAction::Render]
            },
            AppEvent::BacklogUnavailable { room, message } => {
                if self.room.as_ref() != Some(&room) {
                    return vec![];
                }
                self.reset_transcript(&[]);
                self.status_message = Some(format!("Could not load history: {message}"));
                vec![AppAction::Render]
            },
            AppEvent::Chat(event) => {
                if self.room.is_none() {
                    return vec![];
                }
                self.append(&event);
                vec![AppAction::Render]
            },
            AppEvent::Subscribed => {
                self.state = ConnectionState::Subscribed;
                if let Some(room) = &self.room {
                    self.status_message = Some(format!("Connected to {room}"));
                }
                vec![AppAction::Render]
            },
            AppEvent::Disconnected { reason } => {
                self.state = ConnectionState::Closed;
                if self.quitting {
                    return vec![AppAction::Quit];
                }
                self.status_message = Some(match reason {
                    Some(reason) => format!("Disconnected: {reason}"),
                    None => "Disconnected".to_string(),
                });
                vec![AppAction::Render]
            },
            AppEvent::Interrupt => self.interrupt(),
            AppEvent::Error { message } => {
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Make `room` the active room.
    ///
    /// Any live session is closed first. The backlog is fetched before the
    /// new session subscribes, so history always precedes live events.
    fn select_room(&mut self, room: RoomId) -> Vec<AppAction> {
        let mut actions = Vec::with_capacity(4);
        if self.state.is_live() {
            actions.push(AppAction::CloseSession);
        }

        tracing::info!(%room, "activating room");
        self.state = ConnectionState::Connecting;
        self.mode = InputMode::View;
        self.status_message = Some(format!("Joining {room}..."));
        self.room = Some(room.clone());

        actions.push(AppAction::FetchBacklog { room: room.clone() });
        actions.push(AppAction::Subscribe { room });
        actions.push(AppAction::Render);
        actions
    }

    fn interrupt(&mut self) -> Vec<AppAction> {
        if self.quitting || !self.state.is_live() {
            return vec![AppAction::Quit];
        }
        self.quitting = true;
        self.state = ConnectionState::Closing;
        self.status_message = Some("Closing...".to_string());
        vec![AppAction::CloseSession, AppAction::Render]
    }

    fn reset_transcript(&mut self, backlog: &[ChatEvent]) {
        self.transcript.reset(backlog);
        self.refresh_content(ContentChange::Backlog);
    }

    fn append(&mut self, event: &ChatEvent) {
        self.transcript.append(event);
        let change =
            if event.is_message() { ContentChange::Message } else { ContentChange::Presence };
        self.refresh_content(change);
    }

    fn refresh_content(&mut self, change: ContentChange) {
        self.content = self.transcript.render();
        self.viewport.on_content_changed(content_height(&self.content), change);
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let routed = match self.mode {
            InputMode::View => self.view_key(key),
            InputMode::Compose(_) => self.compose_key(key),
        };
        match routed {
            Routed::Handled(actions) => actions,
            Routed::Fallthrough => self.fallback_key(key),
        }
    }

    fn view_key(&mut self, key: KeyInput) -> Routed {
        match key {
            KeyInput::Char('i') => {
                self.mode = InputMode::Compose(ComposeBuffer::entered());
                Routed::Fallthrough
            },
            KeyInput::Char('g') => Routed::Handled(render_if(self.viewport.scroll_to_top())),
            KeyInput::Char('G') => Routed::Handled(render_if(self.viewport.scroll_to_bottom())),
            KeyInput::Char('h' | 'H') => Routed::Handled(vec![AppAction::NavigateRooms]),
            _ => Routed::Fallthrough,
        }
    }

    fn compose_key(&mut self, key: KeyInput) -> Routed {
        let InputMode::Compose(buffer) = &mut self.mode else {
            return Routed::Fallthrough;
        };
        match key {
            KeyInput::Esc => {
                self.mode = InputMode::View;
                Routed::Handled(vec![AppAction::Render])
            },
            KeyInput::Enter => Routed::Handled(self.submit()),
            KeyInput::Char(c) if !c.is_control() => {
                if buffer.take_entry_suppression() {
                    return Routed::Handled(vec![AppAction::Render]);
                }
                Routed::Handled(render_if(buffer.insert(c)))
            },
            _ => Routed::Fallthrough,
        }
    }

    fn fallback_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match &mut self.mode {
            InputMode::View => {
                let viewport = &mut self.viewport;
                let moved = match key {
                    KeyInput::Char('j') | KeyInput::Down => viewport.scroll_down(1),
                    KeyInput::Char('k') | KeyInput::Up => viewport.scroll_up(1),
                    KeyInput::Char('d') => viewport.half_page_down(),
                    KeyInput::Char('u') => viewport.half_page_up(),
                    KeyInput::Char('f' | ' ') | KeyInput::PageDown => viewport.page_down(),
                    KeyInput::Char('b') | KeyInput::PageUp => viewport.page_up(),
                    _ => false,
                };
                render_if(moved)
            },
            InputMode::Compose(buffer) => {
                if buffer.take_entry_suppression() {
                    return vec![AppAction::Render];
                }
                let edited = match key {
                    KeyInput::Backspace => buffer.backspace(),
                    KeyInput::Delete => buffer.delete(),
                    KeyInput::Left => buffer.move_left(),
                    KeyInput::Right => buffer.move_right(),
                    KeyInput::Home => buffer.move_home(),
                    KeyInput::End => buffer.move_end(),
                    _ => false,
                };
                render_if(edited)
            },
        }
    }

    /// Submit the compose buffer as one message to the active room.
    fn submit(&mut self) -> Vec<AppAction> {
        let InputMode::Compose(buffer) = &mut self.mode else {
            return vec![];
        };
        if buffer.is_empty() {
            return vec![];
        }
        let Some(room) = self.room.clone() else {
            self.status_message = Some("No active room".to_string());
            return vec![AppAction::Render];
        };
        let content = buffer.take();
        vec![AppAction::SendMessage { room, content }, AppAction::Render]
    }

    /// Get the current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Get the active room.
    pub fn room(&self) -> Option<&RoomId> {
        self.room.as_ref()
    }

    /// Get the transcript of the active room.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Get the rendered transcript content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the transcript viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Get the input mode.
    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    /// Get the status message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Whether shutdown was requested.
    pub fn is_quitting(&self) -> bool {
        self.quitting
    }
}

fn render_if(changed: bool) -> Vec<AppAction> {
    if changed { vec![AppAction::Render] } else { vec![] }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use parlor_proto::SenderId;

    use super::*;

    fn room(name: &str) -> RoomId {
        RoomId::new(name).unwrap()
    }

    fn subscribed_app() -> App {
        let mut app = App::new();
        let _ = app.handle(AppEvent::Resize(80, 12));
        let _ = app.handle(AppEvent::RoomSelected { room: room("lobby") });
        let _ = app.handle(AppEvent::Backlog { room: room("lobby"), events: vec![] });
        let _ = app.handle(AppEvent::Subscribed);
        app
    }

    fn keys(app: &mut App, keys: &[KeyInput]) {
        for key in keys {
            let _ = app.handle(AppEvent::Key(*key));
        }
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
    }

    fn posted(content: &str) -> ChatEvent {
        ChatEvent::MessagePosted {
            username: "alice".into(),
            content: content.into(),
            sender: SenderId::new("1"),
        }
    }

    #[test]
    fn select_room_fetches_backlog_before_subscribing() {
        let mut app = App::new();
        let actions = app.handle(AppEvent::RoomSelected { room: room("lobby") });

        assert_eq!(actions, vec![
            AppAction::FetchBacklog { room: room("lobby") },
            AppAction::Subscribe { room: room("lobby") },
            AppAction::Render,
        ]);
        assert_eq!(app.connection_state(), ConnectionState::Connecting);
    }

    #[test]
    fn switching_rooms_closes_live_session_first() {
        let mut app = subscribed_app();
        let actions = app.handle(AppEvent::RoomSelected { room: room("random") });
        assert_eq!(actions.first(), Some(&AppAction::CloseSession));
        assert_eq!(app.room(), Some(&room("random")));
    }

    #[test]
    fn stale_backlog_is_ignored() {
        let mut app = subscribed_app();
        let _ = app.handle(AppEvent::RoomSelected { room: room("random") });

        let actions = app.handle(AppEvent::Backlog {
            room: room("lobby"),
            events: vec![ChatEvent::backlog_message("old", "stale")],
        });

        assert!(actions.is_empty());
        assert!(app.transcript().is_empty());
    }

    #[test]
    fn entry_key_is_not_typed() {
        let mut app = subscribed_app();
        type_str(&mut app, "ihi");

        assert_eq!(app.mode().compose().map(ComposeBuffer::text), Some("hi"));
    }

    #[test]
    fn i_is_typed_once_composing() {
        let mut app = subscribed_app();
        type_str(&mut app, "iii");
        assert_eq!(app.mode().compose().map(ComposeBuffer::text), Some("ii"));
    }

    #[test]
    fn entry_key_swallowed_even_if_next_key_is_editing() {
        let mut app = subscribed_app();
        keys(&mut app, &[KeyInput::Char('i'), KeyInput::Char('a'), KeyInput::Left, KeyInput::Char('b')]);
        assert_eq!(app.mode().compose().map(ComposeBuffer::text), Some("ba"));
    }

    #[test]
    fn enter_sends_and_clears() {
        let mut app = subscribed_app();
        type_str(&mut app, "ihello");

        let actions = app.handle(AppEvent::Key(KeyInput::Enter));

        assert_eq!(actions, vec![
            AppAction::SendMessage { room: room("lobby"), content: "hello".into() },
            AppAction::Render,
        ]);
        assert_eq!(app.mode().compose().map(ComposeBuffer::is_empty), Some(true));
    }

    #[test]
    fn enter_on_empty_buffer_does_nothing() {
        let mut app = subscribed_app();
        type_str(&mut app, "i");
        assert!(app.handle(AppEvent::Key(KeyInput::Enter)).is_empty());
    }

    #[test]
    fn escape_returns_to_view_and_discards_buffer() {
        let mut app = subscribed_app();
        type_str(&mut app, "idraft");
        keys(&mut app, &[KeyInput::Esc]);
        assert_eq!(app.mode(), &InputMode::View);

        type_str(&mut app, "i");
        assert_eq!(app.mode().compose().map(ComposeBuffer::text), Some(""));
    }

    #[test]
    fn h_navigates_rooms_only_in_view() {
        let mut app = subscribed_app();
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Char('h'))), vec![AppAction::NavigateRooms]);

        type_str(&mut app, "i");
        let actions = app.handle(AppEvent::Key(KeyInput::Char('h')));
        assert!(!actions.contains(&AppAction::NavigateRooms));
    }

    #[test]
    fn view_keys_scroll() {
        let mut app = subscribed_app();
        for i in 0..30 {
            let _ = app.handle(AppEvent::Chat(posted(&i.to_string())));
        }
        assert_eq!(app.viewport().offset(), 20);

        type_str(&mut app, "g");
        assert_eq!(app.viewport().offset(), 0);
        type_str(&mut app, "jj");
        assert_eq!(app.viewport().offset(), 2);
        keys(&mut app, &[KeyInput::Up]);
        assert_eq!(app.viewport().offset(), 1);
        type_str(&mut app, "G");
        assert_eq!(app.viewport().offset(), 20);
    }

    #[test]
    fn scroll_at_limit_does_not_render() {
        let mut app = subscribed_app();
        assert!(app.handle(AppEvent::Key(KeyInput::Char('k'))).is_empty());
    }

    #[test]
    fn resize_subtracts_chrome() {
        let app = subscribed_app();
        assert_eq!(app.viewport().height(), 10);
    }

    #[test]
    fn interrupt_closes_then_quits_on_disconnect() {
        let mut app = subscribed_app();

        let actions = app.handle(AppEvent::Interrupt);
        assert_eq!(actions, vec![AppAction::CloseSession, AppAction::Render]);
        assert!(app.is_quitting());
        assert_eq!(app.connection_state(), ConnectionState::Closing);

        let actions = app.handle(AppEvent::Disconnected { reason: None });
        assert_eq!(actions, vec![AppAction::Quit]);
    }

    #[test]
    fn interrupt_without_session_quits() {
        let mut app = App::new();
        assert_eq!(app.handle(AppEvent::Interrupt), vec![AppAction::Quit]);
    }

    #[test]
    fn disconnect_reports_reason() {
        let mut app = subscribed_app();
        let _ = app.handle(AppEvent::Disconnected { reason: Some("server restart".into()) });

        assert_eq!(app.connection_state(), ConnectionState::Closed);
        assert_eq!(app.status_message(), Some("Disconnected: server restart"));
    }

    #[test]
    fn unavailable_backlog_clears_previous_room() {
        let mut app = subscribed_app();
        let _ = app.handle(AppEvent::Chat(posted("from lobby")));
        let _ = app.handle(AppEvent::RoomSelected { room: room("random") });

        let _ = app.handle(AppEvent::BacklogUnavailable {
            room: room("random"),
            message: "status 500".into(),
        });

        assert!(app.transcript().is_empty());
        assert_eq!(app.content(), "");
    }
}
