//! Visible window into the transcript.
//!
//! The viewport holds only dimensions and a scroll offset; the content itself
//! lives in the [`crate::Transcript`]. Every mutation re-clamps the offset, so
//! `0 <= offset <= excess()` holds between calls, where
//! `excess() = max(0, content_height - height)`.

/// Rows reserved above the transcript.
pub const HEADER_HEIGHT: u16 = 1;

/// Rows reserved below the transcript.
pub const FOOTER_HEIGHT: u16 = 1;

/// Number of display lines in rendered content.
///
/// Lines are not wrapped, so this is the count of separator-delimited lines.
pub fn content_height(content: &str) -> usize {
    content.lines().count()
}

/// What kind of content change happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentChange {
    /// Transcript was replaced by a room's backlog. Scrolls to the top.
    Backlog,
    /// A live chat message arrived. Pins to the bottom.
    Message,
    /// A live presence notice arrived. Follows the bottom only if the view
    /// was already there.
    Presence,
}

/// Scroll state of the transcript pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    height: usize,
    offset: usize,
    content_height: usize,
    ready: bool,
}

impl Viewport {
    /// Create a viewport that has not seen a terminal size yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a new visible height.
    ///
    /// The first call marks the viewport ready and starts at the top. Later
    /// calls keep a view that was at the bottom pinned there. Returns `true`
    /// on the first call.
    pub fn resize(&mut self, height: u16) -> bool {
        let first = !self.ready;
        let was_at_bottom = self.ready && self.at_bottom();

        self.height = usize::from(height);

        if first {
            self.ready = true;
            self.offset = 0;
        } else if was_at_bottom {
            self.offset = self.excess();
        }
        self.clamp();
        first
    }

    /// Record a new content height after the transcript changed.
    pub fn on_content_changed(&mut self, content_height: usize, change: ContentChange) {
        let was_at_bottom = self.at_bottom();
        self.content_height = content_height;

        match change {
            ContentChange::Backlog => self.offset = 0,
            ContentChange::Message => self.offset = self.excess(),
            ContentChange::Presence => {
                if was_at_bottom {
                    self.offset = self.excess();
                }
            },
        }
        self.clamp();
    }

    /// Lines of content that do not fit.
    pub fn excess(&self) -> usize {
        self.content_height.saturating_sub(self.height)
    }

    /// Whether the last line of content is visible.
    pub fn at_bottom(&self) -> bool {
        self.offset >= self.excess()
    }

    /// Jump to the first line. Returns whether the offset changed.
    pub fn scroll_to_top(&mut self) -> bool {
        self.set_offset(0)
    }

    /// Jump so the last line is visible. Returns whether the offset changed.
    pub fn scroll_to_bottom(&mut self) -> bool {
        self.set_offset(self.excess())
    }

    /// Scroll towards older lines.
    pub fn scroll_up(&mut self, lines: usize) -> bool {
        self.set_offset(self.offset.saturating_sub(lines))
    }

    /// Scroll towards newer lines.
    pub fn scroll_down(&mut self, lines: usize) -> bool {
        self.set_offset(self.offset.saturating_add(lines))
    }

    /// Scroll up by half the visible height.
    pub fn half_page_up(&mut self) -> bool {
        self.scroll_up(self.half_page())
    }

    /// Scroll down by half the visible height.
    pub fn half_page_down(&mut self) -> bool {
        self.scroll_down(self.half_page())
    }

    /// Scroll up by the visible height.
    pub fn page_up(&mut self) -> bool {
        self.scroll_up(self.height.max(1))
    }

    /// Scroll down by the visible height.
    pub fn page_down(&mut self) -> bool {
        self.scroll_down(self.height.max(1))
    }

    /// Visible height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Index of the first visible line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Lines of content.
    pub fn content_height(&self) -> usize {
        self.content_height
    }

    fn half_page(&self) -> usize {
        (self.height / 2).max(1)
    }

    fn set_offset(&mut self, offset: usize) -> bool {
        let before = self.offset;
        self.offset = offset;
        self.clamp();
        self.offset != before
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.excess());
    }
}
