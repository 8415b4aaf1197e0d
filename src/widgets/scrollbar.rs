//! Scrollbar widget: draws a [`ScrollModel`] along one axis.

use crate::core::appearance::{Shared, ScrollbarAppearance};
use crate::core::component::{ActiveElement, ActiveState, Component};
use crate::core::geometry::Vec2;
use crate::core::keys::{Key, KeyEvent};
use crate::core::layout::SizeSpec;
use crate::core::scroll::{ScrollConfig, ScrollModel, ScrollPart};
use crate::render::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Keys that move a scrollbar while it is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollKeys {
    pub back: KeyEvent,
    pub forward: KeyEvent,
    pub page_back: KeyEvent,
    pub page_forward: KeyEvent,
}

impl ScrollKeys {
    pub fn vertical() -> Self {
        Self {
            back: KeyEvent::new(Key::Up),
            forward: KeyEvent::new(Key::Down),
            page_back: KeyEvent::new(Key::PageUp),
            page_forward: KeyEvent::new(Key::PageDown),
        }
    }

    pub fn horizontal() -> Self {
        Self {
            back: KeyEvent::new(Key::Left),
            forward: KeyEvent::new(Key::Right),
            ..Self::vertical()
        }
    }
}

pub struct Scrollbar {
    surface: Surface,
    orientation: Orientation,
    model: ScrollModel,
    appearance: Shared<ScrollbarAppearance>,
    keys: ScrollKeys,
    active: ActiveState,
    immobilized: bool,
}

impl Scrollbar {
    /// One cell thick, spanning the parent along `orientation`.
    pub fn new(orientation: Orientation) -> Self {
        Self::with_config(orientation, ScrollConfig::default())
    }

    pub fn with_config(orientation: Orientation, config: ScrollConfig) -> Self {
        let (size_spec, appearance, keys) = match orientation {
            Orientation::Vertical => (
                SizeSpec::new(Vec2::new(1, 0), Vec2::new(0, 100)),
                ScrollbarAppearance::vertical(),
                ScrollKeys::vertical(),
            ),
            Orientation::Horizontal => (
                SizeSpec::new(Vec2::new(0, 1), Vec2::new(100, 0)),
                ScrollbarAppearance::horizontal(),
                ScrollKeys::horizontal(),
            ),
        };
        let mut scrollbar = Self {
            surface: Surface::new(size_spec),
            orientation,
            model: ScrollModel::new(config),
            appearance: Shared::new(appearance),
            keys,
            active: ActiveState::default(),
            immobilized: false,
        };
        scrollbar.sync_viewport();
        scrollbar
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Cells along the scrolling axis.
    pub fn viewport(&self) -> i32 {
        match self.orientation {
            Orientation::Vertical => self.surface.height(),
            Orientation::Horizontal => self.surface.width(),
        }
    }

    /// Feed the current surface length to the model as its viewport.
    pub fn sync_viewport(&mut self) {
        let viewport = self.viewport();
        self.update_model(|model| model.set_viewport_length(viewport));
    }

    pub fn model(&self) -> &ScrollModel {
        &self.model
    }

    fn update_model(&mut self, change: impl FnOnce(&mut ScrollModel)) {
        let before = self.model.clone();
        change(&mut self.model);
        if self.model != before {
            self.surface.mark_dirty();
        }
    }

    pub fn set_content_length(&mut self, length: i32) {
        self.update_model(|model| model.set_content_length(length));
    }

    pub fn set_visible_length(&mut self, length: i32) {
        self.update_model(|model| model.set_visible_length(length));
    }

    pub fn clear_visible_length(&mut self) {
        self.update_model(ScrollModel::clear_visible_length);
    }

    pub fn set_top(&mut self, position: i32) {
        self.update_model(|model| model.set_top(position));
    }

    pub fn set_cursor(&mut self, position: i32) {
        self.update_model(|model| model.set_cursor(position));
    }

    pub fn move_by(&mut self, delta: i32) {
        self.update_model(|model| model.move_by(delta));
    }

    pub fn page(&mut self, pages: i32) {
        self.update_model(|model| model.page(pages));
    }

    pub fn top_position(&self) -> i32 {
        self.model.top_position()
    }

    pub fn current_position(&self) -> i32 {
        self.model.current_position()
    }

    pub fn is_needed(&self) -> bool {
        self.model.is_needed()
    }

    /// Ignore keys while still drawing. Owners that drive the position
    /// themselves immobilize their scrollbar.
    pub fn set_immobilized(&mut self, immobilized: bool) {
        self.immobilized = immobilized;
    }

    pub fn is_immobilized(&self) -> bool {
        self.immobilized
    }

    pub fn keys(&self) -> ScrollKeys {
        self.keys
    }

    pub fn set_keys(&mut self, keys: ScrollKeys) {
        self.keys = keys;
    }

    pub fn appearance(&self) -> &Shared<ScrollbarAppearance> {
        &self.appearance
    }

    pub fn set_appearance(&mut self, appearance: Shared<ScrollbarAppearance>) {
        self.appearance = appearance;
        self.surface.mark_dirty();
    }

    pub fn appearance_mut(&mut self) -> &mut ScrollbarAppearance {
        self.surface.mark_dirty();
        self.appearance.make_mut()
    }

    fn fill(&mut self) {
        self.surface.make_transparent();
        let viewport = self.viewport();
        let render = self.model.render(viewport);
        let active = self.is_active();
        for index in 0..viewport {
            let (Some(part), Some(glyph)) = (
                render.part_at(index),
                render.glyph_at(index, &self.appearance),
            ) else {
                continue;
            };
            let palette = match part {
                ScrollPart::Handle => self.appearance.handle,
                _ => self.appearance.track,
            };
            let pos = match self.orientation {
                Orientation::Vertical => Vec2::new(0, index),
                Orientation::Horizontal => Vec2::new(index, 0),
            };
            self.surface.set_cell(pos, palette.pick(active).with_glyph(glyph));
        }
    }
}

impl Component for Scrollbar {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    fn resize_hook(&mut self) {
        self.sync_viewport();
    }

    fn draw_hook(&mut self) {
        self.sync_viewport();
        if !self.surface.is_dirty() {
            return;
        }
        self.fill();
        self.surface.mark_clean();
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.is_active() || self.immobilized {
            return false;
        }
        if *key == self.keys.back {
            self.move_by(-1);
        } else if *key == self.keys.forward {
            self.move_by(1);
        } else if *key == self.keys.page_back {
            self.page(-1);
        } else if *key == self.keys.page_forward {
            self.page(1);
        } else {
            return false;
        }
        true
    }

    fn as_active(&mut self) -> Option<&mut dyn ActiveElement> {
        Some(self)
    }
}

impl ActiveElement for Scrollbar {
    fn active_state(&self) -> &ActiveState {
        &self.active
    }

    fn active_state_mut(&mut self) -> &mut ActiveState {
        &mut self.active
    }

    fn on_activate(&mut self) {
        self.surface.mark_dirty();
    }

    fn on_deactivate(&mut self) {
        self.surface.mark_dirty();
    }
}
