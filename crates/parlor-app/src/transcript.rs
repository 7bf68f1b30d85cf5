//! Ordered, append-only room history.
//!
//! Each [`ChatEvent`] becomes exactly one rendered line. Lines are never
//! reordered or edited; the only way to drop them is [`Transcript::reset`],
//! which happens once per room activation when the backlog arrives.

use parlor_proto::ChatEvent;

/// Separator between rendered lines.
pub const LINE_SEPARATOR: &str = "\n";

/// Render one event with its display template.
pub fn render_line(event: &ChatEvent) -> String {
    match event {
        ChatEvent::MessagePosted { username, content, .. } => format!("[{username}] {content}"),
        ChatEvent::UserJoined { username } => format!("{username} just joined!"),
        ChatEvent::UserLeft { username } => format!("{username} just left!"),
    }
}

/// Rendered transcript of the active room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event at the tail.
    pub fn append(&mut self, event: &ChatEvent) {
        self.lines.push(render_line(event));
    }

    /// Replace the whole transcript with `backlog`, in order.
    pub fn reset(&mut self, backlog: &[ChatEvent]) {
        self.lines = backlog.iter().map(render_line).collect();
    }

    /// Full transcript, lines joined with [`LINE_SEPARATOR`].
    pub fn render(&self) -> String {
        self.lines.join(LINE_SEPARATOR)
    }

    /// Rendered lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
