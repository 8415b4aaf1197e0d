//! Editable text field.
//!
//! The value is shown through an inner [`Text`] laid out with
//! [`LayoutPolicy::raw`], followed by one extra blank cell so the caret has
//! somewhere to sit at the end. The caret is a logical index into the value;
//! its screen cell comes from the layout's position map.

use std::time::{Duration, Instant};

use crate::core::appearance::{InputAppearance, Shared};
use crate::core::cell::Cell;
use crate::core::component::{ActiveElement, ActiveState, Component};
use crate::core::geometry::Vec2;
use crate::core::keys::{Key, KeyEvent};
use crate::core::layout::SizeSpec;
use crate::core::text::layout::LayoutPolicy;
use crate::render::surface::Surface;
use crate::widgets::text::Text;

pub const DEFAULT_BLINK_PERIOD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputKeys {
    pub up: KeyEvent,
    pub down: KeyEvent,
    pub left: KeyEvent,
    pub right: KeyEvent,
    pub toggle_insert: KeyEvent,
}

impl Default for InputKeys {
    fn default() -> Self {
        Self {
            up: KeyEvent::new(Key::Up),
            down: KeyEvent::new(Key::Down),
            left: KeyEvent::new(Key::Left),
            right: KeyEvent::new(Key::Right),
            toggle_insert: KeyEvent::new(Key::Insert),
        }
    }
}

pub struct InputText {
    surface: Surface,
    text: Text,
    value: Vec<char>,
    caret: usize,
    caret_cell: Vec2,
    appearance: Shared<InputAppearance>,
    keys: InputKeys,
    active: ActiveState,
    insert_mode: bool,
    confidential: bool,
    blink_period: Option<Duration>,
    caret_shown: bool,
    next_blink: Option<Instant>,
}

impl InputText {
    pub fn new(size_spec: SizeSpec) -> Self {
        let mut text = Text::new(SizeSpec::fill());
        text.set_policy(LayoutPolicy::raw());
        let mut input = Self {
            surface: Surface::new(size_spec),
            text,
            value: Vec::new(),
            caret: 0,
            caret_cell: Vec2::ZERO,
            appearance: Shared::new(InputAppearance::default()),
            keys: InputKeys::default(),
            active: ActiveState::default(),
            insert_mode: true,
            confidential: false,
            blink_period: Some(DEFAULT_BLINK_PERIOD),
            caret_shown: true,
            next_blink: None,
        };
        input.sync_text_size();
        input.update_text();
        input
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replace the value and put the caret after its last character.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.caret = self.value.len();
        self.update_text();
    }

    pub fn clear(&mut self) {
        self.set_value("");
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.value.len());
        self.caret_moved();
    }

    /// Caret cell relative to this widget's top-left corner.
    pub fn caret_cell(&self) -> Vec2 {
        self.caret_cell
    }

    pub fn is_insert_mode(&self) -> bool {
        self.insert_mode
    }

    pub fn set_insert_mode(&mut self, insert_mode: bool) {
        self.insert_mode = insert_mode;
        self.surface.mark_dirty();
    }

    /// Show every character as the appearance's mask glyph.
    pub fn use_confidential_mode(&mut self, confidential: bool) {
        self.confidential = confidential;
        self.update_text();
    }

    pub fn is_confidential(&self) -> bool {
        self.confidential
    }

    /// `None` keeps the caret permanently visible.
    pub fn set_blink_period(&mut self, period: Option<Duration>) {
        self.blink_period = period;
        self.show_caret();
    }

    pub fn keys(&self) -> InputKeys {
        self.keys
    }

    pub fn set_keys(&mut self, keys: InputKeys) {
        self.keys = keys;
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn appearance(&self) -> &Shared<InputAppearance> {
        &self.appearance
    }

    pub fn set_appearance(&mut self, appearance: Shared<InputAppearance>) {
        self.appearance = appearance;
        self.update_text();
    }

    /// Advance the caret blink to `now`. Called from `draw_hook` with the
    /// current time.
    pub fn tick(&mut self, now: Instant) {
        let Some(period) = self.blink_period else {
            return;
        };
        if !self.is_active() {
            return;
        }
        match self.next_blink {
            Some(deadline) if now >= deadline => {
                self.caret_shown = !self.caret_shown;
                self.next_blink = Some(now + period);
                self.surface.mark_dirty();
            }
            Some(_) => {}
            None => self.next_blink = Some(now + period),
        }
    }

    fn show_caret(&mut self) {
        self.caret_shown = true;
        self.next_blink = None;
        self.surface.mark_dirty();
    }

    fn type_char(&mut self, ch: char) {
        if self.insert_mode || self.caret >= self.value.len() {
            self.value.insert(self.caret, ch);
        } else {
            self.value[self.caret] = ch;
        }
        self.caret += 1;
        self.update_text();
    }

    fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        self.caret -= 1;
        self.value.remove(self.caret);
        self.update_text();
    }

    fn delete(&mut self) {
        if self.caret < self.value.len() {
            self.value.remove(self.caret);
            self.update_text();
        }
    }

    fn update_text(&mut self) {
        let template = self.appearance.text.pick(self.is_active());
        let mut cells: Vec<Cell> = if self.confidential {
            vec![template.with_glyph(self.appearance.mask); self.value.len()]
        } else {
            self.value.iter().map(|ch| template.with_glyph(*ch)).collect()
        };
        cells.push(template.with_glyph(' '));
        self.text.set_text(cells);
        self.caret = self.caret.min(self.value.len());
        self.caret_moved();
    }

    /// Scroll the inner text by the fewest lines that bring the caret row
    /// into view, then cache the caret cell.
    fn caret_moved(&mut self) {
        let height = self.text.surface().height();
        let row = self.text.position_of(self.caret).y - self.text.line();
        if row >= height {
            self.text.go_to_line(self.text.line() + row - (height - 1));
        } else if row < 0 {
            self.text.go_to_line(self.text.line() + row);
        }
        self.caret_cell = self.text.position_of(self.caret) - Vec2::new(0, self.text.line());
        self.show_caret();
    }

    fn sync_text_size(&mut self) {
        if self.surface.apply_size_of(self.text.surface_mut()) {
            self.text.resize_hook();
        }
    }

    fn fill(&mut self) {
        self.surface.make_transparent();
        self.surface.insert_surface(&mut self.text);
        if self.is_active() && self.caret_shown {
            let glyph = if self.insert_mode {
                self.appearance.insert_cursor
            } else {
                self.appearance.overtype_cursor
            };
            self.surface
                .set_cell(self.caret_cell, self.appearance.cursor.with_glyph(glyph));
        }
    }
}

impl Default for InputText {
    fn default() -> Self {
        Self::new(SizeSpec::fill())
    }
}

impl Component for InputText {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    fn resize_hook(&mut self) {
        self.sync_text_size();
        self.caret_moved();
    }

    fn draw_hook(&mut self) {
        self.tick(Instant::now());
        if !self.surface.is_dirty() {
            return;
        }
        self.fill();
        self.surface.mark_clean();
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.is_active() {
            return false;
        }
        if let Some(ch) = key.printable() {
            self.type_char(ch);
            return true;
        }
        match key.key {
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete(),
            _ if *key == self.keys.left => self.set_caret(self.caret.saturating_sub(1)),
            _ if *key == self.keys.right => self.set_caret(self.caret + 1),
            _ if *key == self.keys.up => {
                let above = self.text.layout().index_above(self.caret, 1);
                self.set_caret(above);
            }
            _ if *key == self.keys.down => {
                let below = self.text.layout().index_below(self.caret, 1);
                self.set_caret(below);
            }
            _ if *key == self.keys.toggle_insert => self.set_insert_mode(!self.insert_mode),
            _ => return false,
        }
        true
    }

    fn as_active(&mut self) -> Option<&mut dyn ActiveElement> {
        Some(self)
    }
}

impl ActiveElement for InputText {
    fn active_state(&self) -> &ActiveState {
        &self.active
    }

    fn active_state_mut(&mut self) -> &mut ActiveState {
        &mut self.active
    }

    fn on_activate(&mut self) {
        self.text.activate();
        self.update_text();
    }

    fn on_deactivate(&mut self) {
        self.text.deactivate();
        self.update_text();
    }
}
