//! Bar chart drawn with half-block glyphs.
//!
//! Bars share a zero baseline: positive values grow up from it and negative
//! values hang below it. Each row holds two half-cells, so the vertical
//! resolution is twice the plot height. When the bars do not fit the width
//! a horizontal scrollbar takes the bottom row.

use crate::core::appearance::{ChartAppearance, Shared};
use crate::core::component::{ActiveElement, ActiveState, Component};
use crate::core::geometry::Vec2;
use crate::core::keys::KeyEvent;
use crate::core::layout::{Position, SizeSpec};
use crate::render::surface::Surface;
use crate::widgets::scrollbar::{Orientation, Scrollbar};

pub const DEFAULT_DISTANCE: i32 = 2;

pub struct Chart {
    surface: Surface,
    values: Vec<f64>,
    distance: i32,
    scrollbar: Scrollbar,
    appearance: Shared<ChartAppearance>,
    active: ActiveState,
}

impl Chart {
    pub fn new(size_spec: SizeSpec) -> Self {
        let appearance = Shared::new(ChartAppearance::default());
        let mut scrollbar = Scrollbar::new(Orientation::Horizontal);
        scrollbar.surface_mut().set_position(Position::BOTTOM_LEFT);
        scrollbar.set_appearance(Shared::new(appearance.scrollbar.clone()));
        let mut chart = Self {
            surface: Surface::new(size_spec),
            values: Vec::new(),
            distance: DEFAULT_DISTANCE,
            scrollbar,
            appearance,
            active: ActiveState::default(),
        };
        chart.adjust();
        chart
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn set_values(&mut self, values: Vec<f64>) {
        self.values = values;
        self.adjust();
    }

    /// Columns from one bar to the next, at least 1.
    pub fn distance(&self) -> i32 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: i32) {
        self.distance = distance.max(1);
        self.adjust();
    }

    pub fn scrollbar(&self) -> &Scrollbar {
        &self.scrollbar
    }

    /// First visible column of the bar strip.
    pub fn offset(&self) -> i32 {
        self.scrollbar.top_position()
    }

    pub fn set_offset(&mut self, offset: i32) {
        self.scrollbar.set_top(offset);
        self.surface.mark_dirty();
    }

    pub fn appearance(&self) -> &Shared<ChartAppearance> {
        &self.appearance
    }

    pub fn set_appearance(&mut self, appearance: Shared<ChartAppearance>) {
        self.scrollbar
            .set_appearance(Shared::new(appearance.scrollbar.clone()));
        self.appearance = appearance;
        self.surface.mark_dirty();
    }

    /// Columns occupied by all bars.
    fn strip_length(&self) -> i32 {
        match self.values.len() as i32 {
            0 => 0,
            count => count * self.distance - (self.distance - 1),
        }
    }

    fn adjust(&mut self) {
        self.surface.apply_size_of(self.scrollbar.surface_mut());
        self.scrollbar.sync_viewport();
        self.scrollbar.set_content_length(self.strip_length());
        self.surface.mark_dirty();
    }

    fn plot_height(&self) -> i32 {
        if self.scrollbar.is_needed() {
            self.surface.height() - 1
        } else {
            self.surface.height()
        }
    }

    fn fill(&mut self) {
        self.surface.make_transparent();
        let max = self.values.iter().copied().fold(0.0_f64, f64::max);
        let min = self.values.iter().copied().fold(0.0_f64, f64::min);
        let range = max - min;
        let height = self.plot_height();
        if range > 0.0 && height > 0 {
            let halves = height * 2;
            let baseline = (max / range * f64::from(halves)).round() as i32;
            let offset = self.offset();
            let first = (offset + self.distance - 1) / self.distance;
            let bar = self.appearance.bar;
            for (index, value) in self.values.iter().enumerate().skip(first as usize) {
                let x = index as i32 * self.distance - offset;
                if x >= self.surface.width() {
                    break;
                }
                let length = (value.abs() / range * f64::from(halves)).round() as i32;
                let filled = if *value >= 0.0 {
                    (baseline - length)..baseline
                } else {
                    baseline..(baseline + length)
                };
                for row in 0..height {
                    let glyph = match (
                        filled.contains(&(row * 2)),
                        filled.contains(&(row * 2 + 1)),
                    ) {
                        (true, true) => self.appearance.full,
                        (true, false) => self.appearance.upper_half,
                        (false, true) => self.appearance.lower_half,
                        (false, false) => continue,
                    };
                    self.surface.set_cell(Vec2::new(x, row), bar.with_glyph(glyph));
                }
            }
        }
        if self.scrollbar.is_needed() {
            self.surface.insert_surface(&mut self.scrollbar);
        }
    }
}

impl Default for Chart {
    fn default() -> Self {
        Self::new(SizeSpec::fill())
    }
}

impl Component for Chart {
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
        self.fill();
        self.surface.mark_clean();
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let before = self.offset();
        let consumed = self.scrollbar.handle_key(key);
        if self.offset() != before {
            self.surface.mark_dirty();
        }
        consumed
    }

    fn as_active(&mut self) -> Option<&mut dyn ActiveElement> {
        Some(self)
    }
}

impl ActiveElement for Chart {
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
