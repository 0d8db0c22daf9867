// Scroll state shared by the chat and log panels
//
// Each panel owns one. New content keeps the view pinned to the bottom
// until the user scrolls up; scrolling back to the bottom re-pins it.

/// Scroll state for a single panel
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Line index at the top of the viewport
    offset: usize,

    /// Total number of lines in content
    total: usize,

    /// Number of lines visible in viewport
    viewport: usize,

    /// Keep the view at the bottom as content arrives
    pub auto_follow: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Call each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_follow = true;
    }

    /// Visible range as (start, end) indices
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follow_tracks_bottom() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(30, 10);
        assert_eq!(scroll.visible_range(), (20, 30));

        scroll.update_dimensions(35, 10);
        assert_eq!(scroll.visible_range(), (25, 35));
    }

    #[test]
    fn test_scrolling_up_stops_following() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(30, 10);
        scroll.scroll_up();
        assert!(!scroll.auto_follow);

        scroll.update_dimensions(40, 10);
        assert_eq!(scroll.visible_range(), (19, 29));

        scroll.scroll_to_bottom();
        assert!(scroll.auto_follow);
        assert_eq!(scroll.visible_range(), (30, 40));
    }

    #[test]
    fn test_paging_is_clamped() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(25, 10);

        scroll.page_up();
        scroll.page_up();
        assert_eq!(scroll.visible_range(), (0, 10));

        scroll.page_down();
        scroll.page_down();
        assert_eq!(scroll.visible_range(), (15, 25));
        assert!(scroll.auto_follow);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(3, 10);
        scroll.scroll_down();
        assert_eq!(scroll.visible_range(), (0, 3));
        scroll.scroll_to_top();
        assert_eq!(scroll.visible_range(), (0, 3));
    }
}
