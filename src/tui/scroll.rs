// Scroll state for TUI panels
//
// Each panel owns its ScrollState; the draw pass feeds it content and
// viewport sizes every frame, key handlers move it.
//
// Two modes:
// - auto-follow: new content keeps the view pinned to the bottom (logs)
// - manual: offset stays where the user left it (posts)

/// Scroll state for a single panel
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Current scroll offset (line index at top of viewport)
    offset: usize,

    /// Total number of lines in content
    total: usize,

    /// Number of lines visible in viewport
    viewport: usize,

    /// Whether to keep the view at the bottom as content grows
    pub auto_follow: bool,
}

impl ScrollState {
    /// Create new scroll state with auto-follow enabled
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Create scroll state with auto-follow disabled (manual scroll)
    pub fn manual() -> Self {
        Self {
            auto_follow: false,
            ..Self::new()
        }
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Scroll up by a page
    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
    }

    /// Scroll down by a page
    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Move the viewport the least amount that puts `line` on screen
    pub fn ensure_visible(&mut self, line: usize) {
        if self.viewport == 0 {
            return;
        }
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + self.viewport {
            self.offset = line + 1 - self.viewport;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end.max(start))
    }

    /// Check if content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    /// Maximum valid offset
    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}
