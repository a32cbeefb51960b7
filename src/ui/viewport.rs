//! Scroll state for the editing surface.
//!
//! The [`Viewport`] tracks which document lines are on screen and keeps the
//! caret line inside that window as the caret moves.

use std::ops::Range;

/// The visible window over the document's lines.
///
/// # Example
///
/// ```
/// use stackit_editor::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(10, 100);
/// assert_eq!(vp.visible_range(), 0..10);
///
/// vp.follow(42);
/// assert_eq!(vp.visible_range(), 33..43);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    pub const fn new(height: u16, total_lines: usize) -> Self {
        Self {
            height,
            offset: 0,
            total_lines,
        }
    }

    /// First visible line.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Visible line indices, clamped to the document.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.height as usize).min(self.total_lines);
        self.offset.min(end)..end
    }

    /// Scroll the minimum amount that puts `line` on screen.
    pub fn follow(&mut self, line: usize) {
        let height = (self.height as usize).max(1);
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + height {
            self.offset = line + 1 - height;
        }
    }

    pub fn resize(&mut self, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the line count after an edit.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_viewport_starts_at_top() {
        let vp = Viewport::new(24, 100);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible_range(), 0..24);
    }

    #[test]
    fn test_short_document_is_fully_visible() {
        let vp = Viewport::new(24, 3);
        assert_eq!(vp.visible_range(), 0..3);
    }

    #[test]
    fn test_follow_last_line_shows_last_page() {
        let mut vp = Viewport::new(10, 25);
        vp.follow(24);
        assert_eq!(vp.offset(), 15);
        assert_eq!(vp.visible_range(), 15..25);
        vp.follow(0);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_follow_scrolls_only_when_line_leaves_window() {
        let mut vp = Viewport::new(5, 50);
        vp.follow(3);
        assert_eq!(vp.offset(), 0);
        vp.follow(5);
        assert_eq!(vp.offset(), 1);
        vp.follow(20);
        assert_eq!(vp.offset(), 16);
        vp.follow(2);
        assert_eq!(vp.offset(), 2);
    }

    #[test]
    fn test_shrinking_document_clamps_offset() {
        let mut vp = Viewport::new(5, 50);
        vp.follow(44);
        assert_eq!(vp.offset(), 40);
        vp.set_total_lines(8);
        assert_eq!(vp.offset(), 3);
    }

    #[test]
    fn test_resize_clamps_offset() {
        let mut vp = Viewport::new(5, 20);
        vp.follow(19);
        assert_eq!(vp.offset(), 15);
        vp.resize(10);
        assert_eq!(vp.offset(), 10);
    }
}
