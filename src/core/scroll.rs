//! Scroll/viewport model.
//!
//! Pure arithmetic over a content length and a visible window: clamping the
//! window's top, following a free cursor, and laying out a scrollbar track
//! and handle. Drawing is left to [`crate::widgets::Scrollbar`].

use crate::core::appearance::ScrollbarAppearance;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollMode {
    /// Moves shift the window itself.
    #[default]
    Snap,
    /// Moves shift a cursor inside the window; the window follows one unit
    /// at a time when the cursor crosses an edge.
    FreeCursor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollConfig {
    pub mode: ScrollMode,
    /// Reserve the first and last track cells for prev/next indicators.
    pub arrows: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollModel {
    config: ScrollConfig,
    content_length: i32,
    viewport_length: i32,
    visible_override: Option<i32>,
    top: i32,
    cursor: i32,
}

/// Which part of the scrollbar a track cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPart {
    Prev,
    Next,
    Track,
    Handle,
}

/// Layout of a scrollbar over `viewport` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRender {
    pub visible: bool,
    pub viewport: i32,
    /// First handle cell, arrow offset included.
    pub handle_start: i32,
    pub handle_length: i32,
    pub track_cells: i32,
    pub arrows: bool,
}

impl ScrollRender {
    /// Nothing to draw: the whole bar stays transparent.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            viewport: 0,
            handle_start: 0,
            handle_length: 0,
            track_cells: 0,
            arrows: false,
        }
    }

    pub fn part_at(&self, index: i32) -> Option<ScrollPart> {
        if !self.visible || index < 0 || index >= self.viewport {
            return None;
        }
        if self.arrows && index == 0 {
            return Some(ScrollPart::Prev);
        }
        if self.arrows && index == self.viewport - 1 {
            return Some(ScrollPart::Next);
        }
        if index >= self.handle_start && index < self.handle_start + self.handle_length {
            Some(ScrollPart::Handle)
        } else {
            Some(ScrollPart::Track)
        }
    }

    pub fn glyph_at(&self, index: i32, appearance: &ScrollbarAppearance) -> Option<char> {
        self.part_at(index).map(|part| match part {
            ScrollPart::Prev => appearance.prev_glyph,
            ScrollPart::Next => appearance.next_glyph,
            ScrollPart::Track => appearance.track_glyph,
            ScrollPart::Handle => appearance.handle_glyph,
        })
    }
}

impl ScrollModel {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            content_length: 0,
            viewport_length: 0,
            visible_override: None,
            top: 0,
            cursor: 0,
        }
    }

    pub fn config(&self) -> ScrollConfig {
        self.config
    }

    pub fn content_length(&self) -> i32 {
        self.content_length
    }

    /// Visible window length: the override when set, else the viewport.
    pub fn visible_length(&self) -> i32 {
        self.visible_override.unwrap_or(self.viewport_length)
    }

    pub fn top_position(&self) -> i32 {
        self.top
    }

    /// Cursor position; equals the top in snap mode.
    pub fn current_position(&self) -> i32 {
        match self.config.mode {
            ScrollMode::Snap => self.top,
            ScrollMode::FreeCursor => self.cursor,
        }
    }

    pub fn is_needed(&self) -> bool {
        self.content_length > self.visible_length()
    }

    fn max_top(&self) -> i32 {
        (self.content_length - self.visible_length()).max(0)
    }

    pub fn set_content_length(&mut self, length: i32) {
        self.content_length = length.max(0);
        self.clamp();
    }

    pub fn set_visible_length(&mut self, length: i32) {
        self.visible_override = Some(length.max(0));
        self.clamp();
    }

    pub fn clear_visible_length(&mut self) {
        self.visible_override = None;
        self.clamp();
    }

    pub fn set_viewport_length(&mut self, length: i32) {
        self.viewport_length = length.max(0);
        self.clamp();
    }

    /// Jump the window so `position` is its first unit.
    pub fn set_top(&mut self, position: i32) {
        self.top = position;
        self.clamp();
    }

    /// Move by `delta` units: the window in snap mode, the cursor in free mode.
    pub fn move_by(&mut self, delta: i32) {
        match self.config.mode {
            ScrollMode::Snap => self.set_top(self.top.saturating_add(delta)),
            ScrollMode::FreeCursor => self.step_cursor(delta),
        }
    }

    pub fn page(&mut self, pages: i32) {
        self.move_by(pages.saturating_mul(self.visible_length().max(1)));
    }

    /// Move the free cursor to `position` with the same stepping as
    /// [`move_by`](Self::move_by). Acts like [`set_top`](Self::set_top) in
    /// snap mode.
    pub fn set_cursor(&mut self, position: i32) {
        match self.config.mode {
            ScrollMode::Snap => self.set_top(position),
            ScrollMode::FreeCursor => self.step_cursor(position.saturating_sub(self.cursor)),
        }
    }

    fn step_cursor(&mut self, delta: i32) {
        let last = (self.content_length - 1).max(0);
        let step = delta.signum();
        let steps = delta.unsigned_abs().min(self.content_length as u32 + 1);
        for _ in 0..steps {
            let next = (self.cursor + step).clamp(0, last);
            if next == self.cursor {
                break;
            }
            self.cursor = next;
            let visible = self.visible_length().max(1);
            if self.cursor < self.top {
                self.top -= 1;
            } else if self.cursor >= self.top + visible {
                self.top += 1;
            }
        }
        self.clamp();
    }

    fn clamp(&mut self) {
        self.top = self.top.clamp(0, self.max_top());
        if self.config.mode != ScrollMode::FreeCursor {
            return;
        }
        self.cursor = self.cursor.clamp(0, (self.content_length - 1).max(0));
        // Minimal shift so the cursor stays inside the window.
        let visible = self.visible_length().max(1);
        if self.cursor < self.top {
            self.top = self.cursor;
        } else if self.cursor >= self.top + visible {
            self.top = self.cursor - visible + 1;
        }
        self.top = self.top.clamp(0, self.max_top());
    }

    /// Handle geometry for a bar of `viewport` cells.
    pub fn render(&self, viewport: i32) -> ScrollRender {
        if !self.is_needed() {
            return ScrollRender::hidden();
        }
        let (offset, track_cells) = if self.config.arrows {
            (1, viewport - 2)
        } else {
            (0, viewport)
        };
        if track_cells < 1 {
            return ScrollRender::hidden();
        }

        let visible = f64::from(self.visible_length());
        let content = f64::from(self.content_length);
        let handle_length = ((visible / content * f64::from(track_cells)).round() as i32)
            .clamp(1, track_cells);
        let range = f64::from(self.max_top());
        let travel = f64::from(track_cells - handle_length);
        let handle_start = offset + (travel * f64::from(self.top) / range).round() as i32;

        ScrollRender {
            visible: true,
            viewport,
            handle_start,
            handle_length,
            track_cells,
            arrows: self.config.arrows,
        }
    }
}

impl Default for ScrollModel {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{ScrollConfig, ScrollMode, ScrollModel, ScrollPart, ScrollRender};

    fn snap(content: i32, visible: i32) -> ScrollModel {
        let mut model = ScrollModel::default();
        model.set_viewport_length(visible);
        model.set_content_length(content);
        model
    }

    fn free(content: i32, visible: i32) -> ScrollModel {
        let mut model = ScrollModel::new(ScrollConfig {
            mode: ScrollMode::FreeCursor,
            arrows: false,
        });
        model.set_viewport_length(visible);
        model.set_content_length(content);
        model
    }

    #[test]
    fn handle_geometry_matches_proportions() {
        let mut model = snap(100, 10);
        model.set_top(45);
        let render = model.render(20);
        assert_eq!(render.handle_length, 2, "10% of 20 cells");
        assert_eq!(render.handle_start, 9, "45/90 of 18 movable cells");
        assert_eq!(render.part_at(9), Some(ScrollPart::Handle));
        assert_eq!(render.part_at(11), Some(ScrollPart::Track));
    }

    #[test]
    fn arrow_variant_reserves_end_cells() {
        let mut model = ScrollModel::new(ScrollConfig {
            mode: ScrollMode::Snap,
            arrows: true,
        });
        model.set_viewport_length(10);
        model.set_content_length(100);
        model.set_top(90);
        let render = model.render(22);
        assert_eq!(render.track_cells, 20);
        assert_eq!(render.handle_start, 19);
        assert_eq!(render.part_at(0), Some(ScrollPart::Prev));
        assert_eq!(render.part_at(21), Some(ScrollPart::Next));
        assert_eq!(render.part_at(20), Some(ScrollPart::Handle));
    }

    #[test]
    fn not_needed_renders_nothing_and_pins_top() {
        let mut model = snap(10, 10);
        model.set_top(3);
        assert!(!model.is_needed());
        assert_eq!(model.top_position(), 0);
        assert_eq!(model.render(10), ScrollRender::hidden());
        assert_eq!(ScrollRender::hidden().part_at(0), None);
    }

    #[test]
    fn negative_lengths_are_zero() {
        let mut model = snap(-5, 3);
        assert_eq!(model.content_length(), 0);
        model.set_visible_length(-1);
        assert_eq!(model.visible_length(), 0);
        model.clear_visible_length();
        assert_eq!(model.visible_length(), 3);
    }

    #[test]
    fn paging_clamps_at_both_ends() {
        let mut model = snap(25, 10);
        model.page(1);
        assert_eq!(model.top_position(), 10);
        model.page(1);
        assert_eq!(model.top_position(), 15);
        model.page(-5);
        assert_eq!(model.top_position(), 0);
    }

    #[test]
    fn free_cursor_scrolls_one_unit_per_step() {
        let mut model = free(20, 5);
        model.move_by(4);
        assert_eq!((model.current_position(), model.top_position()), (4, 0));
        model.move_by(1);
        assert_eq!((model.current_position(), model.top_position()), (5, 1));
        model.move_by(3);
        assert_eq!((model.current_position(), model.top_position()), (8, 4));
        model.move_by(-2);
        assert_eq!((model.current_position(), model.top_position()), (6, 4));
        model.set_cursor(0);
        assert_eq!((model.current_position(), model.top_position()), (0, 0));
        model.move_by(100);
        assert_eq!((model.current_position(), model.top_position()), (19, 15));
    }

    #[test]
    fn shrinking_window_shifts_minimally() {
        let mut model = free(50, 20);
        model.set_cursor(15);
        assert_eq!(model.top_position(), 0);
        model.set_visible_length(5);
        assert_eq!(model.top_position(), 11, "cursor ends on the last visible row");
        assert_eq!(model.current_position(), 15);
    }
}
