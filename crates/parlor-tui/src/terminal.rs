//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Network uses one websocket
//! [`Session`] per active room and HTTP for the backlog.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use parlor_app::{App, AppEvent, Driver, KeyInput};
use parlor_client::{
    BacklogError, ConnectionError, Events, SendError, Session, TransportConfig, fetch_backlog,
};
use parlor_proto::{ChatEvent, InboundFrame, RawFrame, RoomId};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{RoomList, ui};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Session could not be established.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Message could not be sent.
    #[error(transparent)]
    Send(#[from] SendError),

    /// Backlog could not be fetched.
    #[error(transparent)]
    Backlog(#[from] BacklogError),

    /// No session is open for the room.
    #[error("not connected to {0}")]
    NoSession(RoomId),
}

/// Everything the driver needs to reach the server.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Server location.
    pub transport: TransportConfig,
    /// Auth token, sent verbatim as the `Authorization` header.
    pub token: String,
    /// Rooms to cycle through.
    pub rooms: RoomList,
    /// Name shown in the header.
    pub username: Option<String>,
}

/// What woke up [`TerminalDriver::poll_event`].
enum Wakeup {
    Interrupt,
    Terminal(Option<io::Result<Event>>),
    Frame(Option<RawFrame>),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the network
/// session (tungstenite websocket, reqwest for backlog).
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    interrupts: mpsc::UnboundedReceiver<()>,
    http: reqwest::Client,
    config: DriverConfig,
    session: Option<Session>,
    events: Option<Events>,
}

impl TerminalDriver {
    /// Create a new terminal driver.
    ///
    /// Enters raw mode and the alternate screen, and starts listening for
    /// SIGINT. Must be called inside a tokio runtime.
    pub fn new(config: DriverConfig) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        let (interrupt_tx, interrupts) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if interrupt_tx.send(()).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            terminal,
            event_stream,
            interrupts,
            http: reqwest::Client::new(),
            config,
            session: None,
            events: None,
        })
    }

    /// Convert a crossterm key press to an app event.
    ///
    /// Ctrl+C arrives as a key in raw mode and maps to an interrupt.
    fn convert_key(key: KeyEvent) -> Option<AppEvent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(AppEvent::Interrupt);
        }
        let input = match key.code {
            KeyCode::Char(c) => KeyInput::Char(c),
            KeyCode::Enter => KeyInput::Enter,
            KeyCode::Backspace => KeyInput::Backspace,
            KeyCode::Delete => KeyInput::Delete,
            KeyCode::Tab => KeyInput::Tab,
            KeyCode::Esc => KeyInput::Esc,
            KeyCode::Left => KeyInput::Left,
            KeyCode::Right => KeyInput::Right,
            KeyCode::Up => KeyInput::Up,
            KeyCode::Down => KeyInput::Down,
            KeyCode::Home => KeyInput::Home,
            KeyCode::End => KeyInput::End,
            KeyCode::PageUp => KeyInput::PageUp,
            KeyCode::PageDown => KeyInput::PageDown,
            _ => return None,
        };
        Some(AppEvent::Key(input))
    }

    /// The session's event stream ended.
    fn stream_ended(&mut self) -> AppEvent {
        self.events = None;
        let reason = self.session.as_ref().and_then(Session::read_error).map(|e| e.to_string());
        tracing::info!(?reason, "session event stream ended");
        AppEvent::Disconnected { reason }
    }
}

/// Translate one inbound frame into an app event.
///
/// Control frames produce nothing except a rejected subscription, which the
/// user needs to see. Unknown frames are dropped by the decoder.
pub(crate) fn frame_event(frame: &RawFrame) -> Option<AppEvent> {
    match InboundFrame::parse(frame) {
        InboundFrame::Event(event) => Some(AppEvent::Chat(event)),
        InboundFrame::SubscriptionRejected => {
            tracing::warn!("subscription rejected by server");
            Some(AppEvent::Error { message: "subscription rejected".to_string() })
        },
        InboundFrame::Disconnect { reason } => {
            tracing::info!(?reason, "server announced disconnect");
            None
        },
        InboundFrame::Welcome
        | InboundFrame::Ping
        | InboundFrame::SubscriptionConfirmed
        | InboundFrame::Unknown => None,
    }
}

/// Next frame from the live session, or never if there is none.
async fn next_frame(events: &mut Option<Events>) -> Option<RawFrame> {
    match events {
        Some(events) => events.next().await,
        None => std::future::pending().await,
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    fn size(&self) -> (u16, u16) {
        crossterm::terminal::size().unwrap_or((80, 24))
    }

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        let wakeup = tokio::select! {
            biased;

            Some(()) = self.interrupts.recv() => Wakeup::Interrupt,
            event = self.event_stream.next() => Wakeup::Terminal(event),
            frame = next_frame(&mut self.events) => Wakeup::Frame(frame),
        };

        match wakeup {
            Wakeup::Interrupt => Ok(Some(AppEvent::Interrupt)),
            Wakeup::Terminal(event) => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    Ok(Self::convert_key(key))
                },
                Some(Ok(Event::Resize(cols, rows))) => Ok(Some(AppEvent::Resize(cols, rows))),
                Some(Ok(_)) => Ok(None),
                Some(Err(e)) => Err(TerminalError::Io(e)),
                None => Ok(Some(AppEvent::Interrupt)),
            },
            Wakeup::Frame(Some(frame)) => Ok(frame_event(&frame)),
            Wakeup::Frame(None) => Ok(Some(self.stream_ended())),
        }
    }

    async fn fetch_backlog(&mut self, room: &RoomId) -> Result<Vec<ChatEvent>, Self::Error> {
        let config = &self.config;
        Ok(fetch_backlog(&self.http, &config.transport, room, &config.token).await?)
    }

    async fn connect(&mut self, room: &RoomId) -> Result<(), Self::Error> {
        self.events = None;
        if let Some(mut old) = self.session.take() {
            old.close().await;
        }

        let mut session =
            Session::connect(&self.config.transport, room.clone(), &self.config.token).await?;
        self.events = session.take_events();
        self.session = Some(session);
        Ok(())
    }

    async fn send(&mut self, room: &RoomId, content: &str) -> Result<(), Self::Error> {
        match self.session.as_mut() {
            Some(session) if session.room() == room => Ok(session.send(content).await?),
            _ => Err(TerminalError::NoSession(room.clone())),
        }
    }

    async fn close(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.close().await;
        }
    }

    fn next_room(&mut self) -> Option<RoomId> {
        self.config.rooms.advance()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let username = self.config.username.as_deref();
        self.terminal.draw(|frame| ui::render(frame, app, username))?;
        Ok(())
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use parlor_proto::{SenderId, decode};

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_c_is_an_interrupt() {
        assert_eq!(
            TerminalDriver::convert_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppEvent::Interrupt)
        );
        assert_eq!(
            TerminalDriver::convert_key(press(KeyCode::Char('c'), KeyModifiers::NONE)),
            Some(AppEvent::Key(KeyInput::Char('c')))
        );
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        assert_eq!(TerminalDriver::convert_key(press(KeyCode::F(5), KeyModifiers::NONE)), None);
        assert_eq!(
            TerminalDriver::convert_key(press(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(AppEvent::Key(KeyInput::PageDown))
        );
    }

    #[test]
    fn room_frames_become_chat_events() {
        let frame = RawFrame::from(
            r#"{"identifier":"{}","message":{"type":"new_message","content":"hi","user":{"id":7,"username":"alice"}}}"#,
        );
        assert_eq!(
            frame_event(&frame),
            Some(AppEvent::Chat(ChatEvent::MessagePosted {
                username: "alice".into(),
                content: "hi".into(),
                sender: SenderId::new("7"),
            }))
        );
    }

    #[test]
    fn control_frames_are_silent() {
        assert_eq!(frame_event(&RawFrame::from(r#"{"type":"ping","message":1}"#)), None);
        assert_eq!(frame_event(&RawFrame::from(r#"{"type":"welcome"}"#)), None);
        assert_eq!(frame_event(&RawFrame::from("not json")), None);
    }

    #[test]
    fn chat_events_agree_with_decode() {
        let frames = [
            r#"{"identifier":"{}","message":{"type":"new_message","content":"hi","user":{"username":"bob"}}}"#,
            r#"{"identifier":"{}","message":{"type":"user_joined","username":"bob"}}"#,
            r#"{"identifier":"{}","message":{"type":"user_left","username":"bob"}}"#,
            r#"{"identifier":"{}","message":{"type":"typing","username":"bob"}}"#,
            r#"{"type":"confirm_subscription","identifier":"{}"}"#,
            r#"{"type":"disconnect","reason":"server_restart"}"#,
            "[1,2,3]",
        ];
        for text in frames {
            let frame = RawFrame::from(text);
            assert_eq!(frame_event(&frame), decode(&frame).map(AppEvent::Chat), "{text}");
        }
    }

    #[test]
    fn rejected_subscription_is_reported() {
        let frame = RawFrame::from(r#"{"type":"reject_subscription","identifier":"{}"}"#);
        assert!(matches!(frame_event(&frame), Some(AppEvent::Error { .. })));
    }
}
