//! Property-based tests for the App state machine.
//!
//! Tests verify that invariants hold under arbitrary event sequences.
//! This ensures behavioral correctness across all possible execution paths.

#![allow(clippy::unwrap_used)]

use parlor_app::{
    App, AppAction, AppEvent, COMPOSE_CHAR_LIMIT, ChatEvent, KeyInput, RoomId, SenderId, Transcript,
    render_line,
};
use proptest::prelude::*;

fn lobby() -> RoomId {
    RoomId::new("lobby").unwrap()
}

fn chat_strategy() -> impl Strategy<Value = ChatEvent> {
    let name = "[a-z]{1,8}";
    prop_oneof![
        3 => (name, ".{0,40}").prop_map(|(u, c)| ChatEvent::MessagePosted {
            sender: SenderId::new(u.clone()),
            username: u,
            content: c,
        }),
        1 => name.prop_map(|u| ChatEvent::UserJoined { username: u }),
        1 => name.prop_map(|u| ChatEvent::UserLeft { username: u }),
    ]
}

fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        4 => any::<char>().prop_map(KeyInput::Char),
        2 => prop::sample::select(vec!['i', 'g', 'G', 'j', 'k', 'd', 'u', 'f', 'b', ' ']).prop_map(KeyInput::Char),
        1 => prop::sample::select(vec![
            KeyInput::Enter,
            KeyInput::Backspace,
            KeyInput::Delete,
            KeyInput::Tab,
            KeyInput::Esc,
            KeyInput::Left,
            KeyInput::Right,
            KeyInput::Up,
            KeyInput::Down,
            KeyInput::Home,
            KeyInput::End,
            KeyInput::PageUp,
            KeyInput::PageDown,
        ]),
    ]
}

/// Generate random app events within a single room.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        1 => (1u16..200, 0u16..100).prop_map(|(c, r)| AppEvent::Resize(c, r)),
        4 => chat_strategy().prop_map(AppEvent::Chat),
        4 => key_strategy().prop_map(AppEvent::Key),
    ]
}

fn joined_app(backlog: &[ChatEvent]) -> App {
    let mut app = App::new();
    app.handle(AppEvent::RoomSelected { room: lobby() });
    app.handle(AppEvent::Backlog { room: lobby(), events: backlog.to_vec() });
    app.handle(AppEvent::Subscribed);
    app
}

proptest! {
    #[test]
    fn prop_offset_stays_in_bounds(
        backlog in prop::collection::vec(chat_strategy(), 0..30),
        events in prop::collection::vec(event_strategy(), 0..100),
    ) {
        let mut app = joined_app(&backlog);
        for event in events {
            app.handle(event);
            let viewport = app.viewport();
            prop_assert!(viewport.offset() <= viewport.excess());
        }
    }

    #[test]
    fn prop_transcript_is_backlog_then_live_in_order(
        backlog in prop::collection::vec(chat_strategy(), 0..20),
        events in prop::collection::vec(event_strategy(), 0..80),
    ) {
        let mut app = joined_app(&backlog);
        let mut expected: Vec<String> = backlog.iter().map(render_line).collect();

        for event in events {
            if let AppEvent::Chat(chat) = &event {
                expected.push(render_line(chat));
            }
            app.handle(event);
        }

        prop_assert_eq!(app.transcript().lines(), expected.as_slice());
        prop_assert_eq!(app.content(), expected.join("\n"));
    }

    #[test]
    fn prop_live_message_at_bottom_stays_at_bottom(
        rows in 3u16..60,
        backlog in prop::collection::vec(chat_strategy(), 0..40),
        live in chat_strategy(),
    ) {
        let mut app = joined_app(&backlog);
        app.handle(AppEvent::Resize(80, rows));
        app.handle(AppEvent::Key(KeyInput::Char('G')));
        prop_assert!(app.viewport().at_bottom());

        app.handle(AppEvent::Chat(live));

        prop_assert_eq!(app.viewport().offset(), app.viewport().excess());
    }

    #[test]
    fn prop_compose_buffer_never_exceeds_limit(
        keys in prop::collection::vec(key_strategy(), 0..300),
    ) {
        let mut app = joined_app(&[]);
        for key in keys {
            app.handle(AppEvent::Key(key));
            if let Some(buffer) = app.mode().compose() {
                prop_assert!(buffer.char_len() <= COMPOSE_CHAR_LIMIT);
                prop_assert!(buffer.cursor() <= buffer.char_len());
            }
        }
    }

    #[test]
    fn prop_submit_sends_exactly_what_was_typed(text in "[a-zA-Z0-9 ]{1,80}") {
        let mut app = joined_app(&[]);
        app.handle(AppEvent::Key(KeyInput::Char('i')));
        for c in text.chars() {
            app.handle(AppEvent::Key(KeyInput::Char(c)));
        }

        let actions = app.handle(AppEvent::Key(KeyInput::Enter));

        prop_assert_eq!(actions, vec![
            AppAction::SendMessage { room: lobby(), content: text },
            AppAction::Render,
        ]);
    }

    #[test]
    fn prop_reset_matches_fresh_transcript(
        before in prop::collection::vec(chat_strategy(), 0..20),
        backlog in prop::collection::vec(chat_strategy(), 0..20),
    ) {
        let mut reused = Transcript::new();
        for event in &before {
            reused.append(event);
        }
        reused.reset(&backlog);

        let mut fresh = Transcript::new();
        for event in &backlog {
            fresh.append(event);
        }

        prop_assert_eq!(reused, fresh);
    }
}
