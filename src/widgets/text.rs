//! Text widget: reflowed styled text with an optional vertical scrollbar.
//!
//! The text area shrinks by one column when the laid-out text does not fit
//! and a scrollbar is displayed on the right edge.

use crate::core::appearance::{Shared, TextAppearance};
use crate::core::cell::Cell;
use crate::core::component::{ActiveElement, ActiveState, Component};
use crate::core::geometry::Vec2;
use crate::core::keys::KeyEvent;
use crate::core::layout::{Position, SizeSpec};
use crate::core::text::layout::{LayoutPolicy, TextLayout};
use crate::core::text::{plain, styled};
use crate::render::surface::Surface;
use crate::widgets::scrollbar::{Orientation, ScrollKeys, Scrollbar};

pub struct Text {
    surface: Surface,
    body: Surface,
    layout: TextLayout,
    scrollbar: Scrollbar,
    appearance: Shared<TextAppearance>,
    keys: ScrollKeys,
    active: ActiveState,
    display_scroll: bool,
}

impl Text {
    pub fn new(size_spec: SizeSpec) -> Self {
        let surface = Surface::new(size_spec);
        let appearance = Shared::new(TextAppearance::default());
        let mut scrollbar = Scrollbar::new(Orientation::Vertical);
        scrollbar.surface_mut().set_position(Position::TOP_RIGHT);
        scrollbar.set_immobilized(true);
        scrollbar.set_appearance(Shared::new(appearance.scrollbar.clone()));
        let mut text = Self {
            layout: TextLayout::new(surface.width(), LayoutPolicy::default()),
            body: Surface::with_size(surface.width(), surface.height()),
            surface,
            scrollbar,
            appearance,
            keys: ScrollKeys::vertical(),
            active: ActiveState::default(),
            display_scroll: true,
        };
        text.adjust();
        text
    }

    pub fn with_str(mut self, text: &str) -> Self {
        self.set_str(text);
        self
    }

    pub fn set_text(&mut self, text: Vec<Cell>) {
        self.layout.set_text(text);
        self.adjust();
    }

    /// Set unstyled text, colored with the appearance's text template.
    pub fn set_str(&mut self, text: &str) {
        let cells = styled(text, self.appearance.text);
        self.set_text(cells);
    }

    pub fn text(&self) -> &[Cell] {
        self.layout.raw()
    }

    pub fn plain_text(&self) -> String {
        plain(self.layout.raw())
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Screen cell of character `index` in the laid-out text, row counted
    /// from the first line (not from the scrolled top).
    pub fn position_of(&self, index: usize) -> Vec2 {
        self.layout.position_of(index)
    }

    pub fn line_count(&self) -> i32 {
        self.layout.line_count()
    }

    /// First visible line.
    pub fn line(&self) -> i32 {
        self.scrollbar.top_position()
    }

    pub fn go_to_line(&mut self, line: i32) {
        let before = self.line();
        self.scrollbar.set_top(line);
        if self.line() != before {
            self.surface.mark_dirty();
        }
    }

    pub fn line_up(&mut self) {
        self.go_to_line(self.line() - 1);
    }

    pub fn line_down(&mut self) {
        self.go_to_line(self.line() + 1);
    }

    pub fn page_up(&mut self) {
        self.go_to_line(self.line() - self.surface.height());
    }

    pub fn page_down(&mut self) {
        self.go_to_line(self.line() + self.surface.height());
    }

    pub fn policy(&self) -> LayoutPolicy {
        self.layout.policy()
    }

    pub fn set_policy(&mut self, policy: LayoutPolicy) {
        self.layout.set_policy(policy);
        self.adjust();
    }

    pub fn use_wrap(&mut self, wrap: bool) {
        self.set_policy(LayoutPolicy {
            wrap,
            ..self.policy()
        });
    }

    pub fn use_dense_punctuation(&mut self, dense_punctuation: bool) {
        self.set_policy(LayoutPolicy {
            dense_punctuation,
            ..self.policy()
        });
    }

    pub fn use_control_characters(&mut self, control_characters: bool) {
        self.set_policy(LayoutPolicy {
            control_characters,
            ..self.policy()
        });
    }

    /// Show a scrollbar whenever the text overflows.
    pub fn use_scroll(&mut self, display: bool) {
        self.display_scroll = display;
        self.adjust();
    }

    pub fn is_using_scroll(&self) -> bool {
        self.display_scroll
    }

    /// Whether a scrollbar is on screen right now.
    pub fn is_displaying_scroll(&self) -> bool {
        self.display_scroll && self.scrollbar.is_needed()
    }

    pub fn scrollbar(&self) -> &Scrollbar {
        &self.scrollbar
    }

    /// Fix the widget's size to its text. With `max_width <= 0` the text is
    /// laid out on one line, ignoring control characters. Otherwise the width
    /// is `max_width` and the height is the number of lines needed.
    pub fn resize_to_text(&mut self, max_width: i32) {
        let size = if max_width <= 0 {
            let policy = self.layout.policy();
            self.layout.set_policy(LayoutPolicy {
                control_characters: false,
                ..policy
            });
            self.layout.set_width(self.layout.raw().len() as i32);
            let width = self.layout.laid_out().len() as i32;
            self.layout.set_policy(policy);
            Vec2::new(width, 1)
        } else {
            self.layout.set_width(max_width);
            Vec2::new(max_width, self.layout.line_count())
        };
        tracing::trace!(width = size.x, height = size.y, "text resized to content");
        self.surface.set_size(SizeSpec::fixed(size.x, size.y));
        self.surface.resize(size);
        self.adjust();
    }

    pub fn keys(&self) -> ScrollKeys {
        self.keys
    }

    pub fn set_keys(&mut self, keys: ScrollKeys) {
        self.keys = keys;
    }

    pub fn appearance(&self) -> &Shared<TextAppearance> {
        &self.appearance
    }

    /// Replace the appearance. Already set text keeps its colors; the text
    /// template applies to later [`set_str`](Self::set_str) calls.
    pub fn set_appearance(&mut self, appearance: Shared<TextAppearance>) {
        self.appearance = appearance;
        self.apply_appearance();
    }

    pub fn appearance_mut(&mut self) -> &mut TextAppearance {
        // The scrollbar copy is refreshed on the next draw.
        self.surface.mark_dirty();
        self.appearance.make_mut()
    }

    fn apply_appearance(&mut self) {
        if **self.scrollbar.appearance() != self.appearance.scrollbar {
            self.scrollbar
                .set_appearance(Shared::new(self.appearance.scrollbar.clone()));
        }
        self.surface.mark_dirty();
    }

    fn adjust(&mut self) {
        let size = self.surface.size();
        self.surface.apply_size_of(self.scrollbar.surface_mut());
        self.scrollbar.sync_viewport();

        self.layout.set_width(size.x);
        if self.display_scroll && self.layout.line_count() > size.y {
            self.layout.set_width(size.x - 1);
        }
        self.body.resize(Vec2::new(self.layout.width(), size.y));
        self.scrollbar.set_content_length(self.layout.line_count());
        self.surface.mark_dirty();
    }

    fn fill(&mut self) {
        let width = self.body.width();
        let top = self.scrollbar.top_position();
        let laid_out = self.layout.laid_out();
        self.body.make_transparent();
        for y in 0..self.body.height() {
            for x in 0..width {
                let index = ((top + y) * width + x) as usize;
                if let Some(cell) = laid_out.get(index) {
                    self.body.set_cell(Vec2::new(x, y), *cell);
                }
            }
        }

        self.surface.make_transparent();
        self.surface.blit(&self.body);
        if self.is_displaying_scroll() {
            self.surface.insert_surface(&mut self.scrollbar);
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new(SizeSpec::fill())
    }
}

impl Component for Text {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    fn resize_hook(&mut self) {
        self.adjust();
    }

    fn draw_hook(&mut self) {
        if !self.surface.is_dirty() {
            return;
        }
        self.apply_appearance();
        self.fill();
        self.surface.mark_clean();
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.is_active() {
            return false;
        }
        if *key == self.keys.back {
            self.line_up();
        } else if *key == self.keys.forward {
            self.line_down();
        } else if *key == self.keys.page_back {
            self.page_up();
        } else if *key == self.keys.page_forward {
            self.page_down();
        } else {
            return false;
        }
        true
    }

    fn as_active(&mut self) -> Option<&mut dyn ActiveElement> {
        Some(self)
    }
}

impl ActiveElement for Text {
    fn active_state(&self) -> &ActiveState {
        &self.active
    }

    fn active_state_mut(&mut self) -> &mut ActiveState {
        &mut self.active
    }

    fn on_activate(&mut self) {
        self.scrollbar.activate();
        self.surface.mark_dirty();
    }

    fn on_deactivate(&mut self) {
        self.scrollbar.deactivate();
        self.surface.mark_dirty();
    }
}
