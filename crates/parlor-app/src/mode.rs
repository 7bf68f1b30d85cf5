//! Input modes and the compose line editor.
//!
//! In VIEW mode keystrokes navigate the transcript. In COMPOSE mode they edit
//! a single-line buffer capped at [`COMPOSE_CHAR_LIMIT`] characters. The
//! cursor is a character index, never a byte index, so multi-byte input
//! edits cleanly.

/// Maximum characters in the compose buffer.
pub const COMPOSE_CHAR_LIMIT: usize = 80;

/// Current keystroke routing mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys scroll the transcript.
    #[default]
    View,
    /// Keys edit the compose buffer.
    Compose(ComposeBuffer),
}

impl InputMode {
    /// Whether keys currently edit the compose buffer.
    pub fn is_compose(&self) -> bool {
        matches!(self, Self::Compose(_))
    }

    /// The compose buffer, when composing.
    pub fn compose(&self) -> Option<&ComposeBuffer> {
        match self {
            Self::View => None,
            Self::Compose(buffer) => Some(buffer),
        }
    }
}

/// Single-line compose buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposeBuffer {
    text: String,
    cursor: usize,
    /// The keystroke that switched into COMPOSE is still being routed.
    suppress_entry: bool,
}

impl ComposeBuffer {
    /// Empty buffer for a fresh switch into COMPOSE.
    ///
    /// The next keystroke routed to the line editor is swallowed, so the key
    /// that selected the mode never lands in the buffer.
    pub fn entered() -> Self {
        Self { suppress_entry: true, ..Self::default() }
    }

    /// Consume the entry suppression. Returns `true` if it was pending.
    pub fn take_entry_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_entry)
    }

    /// Buffer contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the buffer holds nothing.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Insert `c` at the cursor. Returns `false` when the buffer is full.
    pub fn insert(&mut self, c: char) -> bool {
        if self.char_len() >= COMPOSE_CHAR_LIMIT {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Move the cursor one character left.
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Move the cursor one character right.
    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Move the cursor to the start.
    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    /// Move the cursor past the last character.
    pub fn move_end(&mut self) -> bool {
        let end = self.char_len();
        let moved = self.cursor != end;
        self.cursor = end;
        moved
    }

    /// Take the contents, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.text.char_indices().nth(chars).map_or(self.text.len(), |(i, _)| i)
    }
}
