//! Surfaces and compositing.
//!
//! A [`Surface`] owns a cell grid together with the relative layout that
//! sizes and places it inside a parent. Compositing copies a child's opaque
//! cells into the parent at the child's resolved origin, clipped to the
//! parent's bounds; [`Cell::TRANSPARENT`] cells never overwrite anything.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::core::cell::{Cell, Grid};
use crate::core::component::Component;
use crate::core::geometry::{Rect, Vec2};
use crate::core::layout::{resolve_origin, resolve_size, Position, SizeSpec};

#[derive(Debug, Clone)]
pub struct Surface {
    grid: Grid,
    size_spec: SizeSpec,
    position: Position,
    dirty: bool,
}

impl Surface {
    /// A transparent surface. Fixed-only specs take effect immediately; the
    /// percentage part needs a parent and is applied when composited.
    pub fn new(size_spec: SizeSpec) -> Self {
        Self {
            grid: Grid::new(resolve_size(size_spec, Vec2::ZERO), Cell::TRANSPARENT),
            size_spec,
            position: Position::TOP_LEFT,
            dirty: true,
        }
    }

    /// Fixed-size surface.
    pub fn with_size(width: i32, height: i32) -> Self {
        Self::new(SizeSpec::fixed(width, height))
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn size(&self) -> Vec2 {
        self.grid.size()
    }

    pub fn width(&self) -> i32 {
        self.grid.size().x
    }

    pub fn height(&self) -> i32 {
        self.grid.size().y
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size_spec(&self) -> SizeSpec {
        self.size_spec
    }

    pub fn set_size(&mut self, size_spec: SizeSpec) {
        if self.size_spec != size_spec {
            self.size_spec = size_spec;
            self.dirty = true;
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        if self.position != position {
            self.position = position;
            self.dirty = true;
        }
    }

    /// Shift the fixed offset of this surface's position.
    pub fn move_by(&mut self, delta: Vec2) {
        self.set_position(Position {
            offset: self.position.offset + delta,
            ..self.position
        });
    }

    /// Reallocate the grid as transparent at `size` (clamped to 1x1). Returns
    /// `false` and keeps the contents when the size is unchanged.
    pub fn resize(&mut self, size: Vec2) -> bool {
        let size = size.max_each(1);
        if size == self.grid.size() {
            return false;
        }
        tracing::trace!(width = size.x, height = size.y, "surface resized");
        self.grid = Grid::new(size, Cell::TRANSPARENT);
        self.dirty = true;
        true
    }

    /// Resolve `child`'s size spec against this surface and apply it.
    pub fn apply_size_of(&self, child: &mut Surface) -> bool {
        child.resize(resolve_size(child.size_spec, self.size()))
    }

    /// Size, draw and blit `child` into this surface.
    pub fn insert_surface(&mut self, child: &mut dyn Component) {
        if self.apply_size_of(child.surface_mut()) {
            child.resize_hook();
        }
        child.draw_hook();
        self.blit(child.surface());
    }

    /// Copy the opaque cells of an already drawn `child` at its resolved origin.
    pub fn blit(&mut self, child: &Surface) {
        let origin = resolve_origin(child.position, self.size(), child.size());
        let visible = Rect::from_size(self.size()).intersection(&Rect::new(origin, child.size()));
        if visible.is_empty() {
            return;
        }
        for y in visible.origin.y..visible.bottom() {
            for x in visible.origin.x..visible.right() {
                let target = Vec2::new(x, y);
                match child.grid.get(target - origin) {
                    Some(cell) if !cell.is_transparent() => {
                        self.grid.set(target, *cell);
                    }
                    _ => {}
                }
            }
        }
        self.dirty = true;
    }

    pub fn cell(&self, pos: Vec2) -> Option<&Cell> {
        self.grid.get(pos)
    }

    /// Write one cell; out-of-range positions are ignored.
    pub fn set_cell(&mut self, pos: Vec2, cell: Cell) -> bool {
        let written = self.grid.set(pos, cell);
        self.dirty |= written;
        written
    }

    pub fn fill(&mut self, cell: Cell) {
        self.grid.fill(cell);
        self.dirty = true;
    }

    pub fn make_transparent(&mut self) {
        self.fill(Cell::TRANSPARENT);
    }

    pub fn make_blank(&mut self) {
        self.fill(Cell::BLANK);
    }

    /// Write `text` left to right from `pos` using `template`'s colors, one
    /// grapheme per cell (two for wide glyphs). Stops at the right edge.
    /// Returns the number of columns written.
    pub fn put_str(&mut self, pos: Vec2, text: &str, template: Cell) -> i32 {
        let mut x = pos.x;
        for grapheme in text.graphemes(true) {
            let Some(glyph) = grapheme.chars().next() else {
                continue;
            };
            let width = grapheme.width().clamp(1, 2) as i32;
            if x + width > self.width() {
                break;
            }
            self.set_cell(Vec2::new(x, pos.y), template.with_glyph(glyph));
            if width == 2 {
                self.set_cell(Vec2::new(x + 1, pos.y), template.with_glyph(' '));
            }
            x += width;
        }
        x - pos.x
    }

    /// Glyphs of row `y`, transparent cells shown as spaces.
    pub fn row_text(&self, y: i32) -> String {
        if y < 0 || y >= self.height() {
            return String::new();
        }
        self.grid
            .row(y as usize)
            .iter()
            .map(|cell| if cell.is_transparent() { ' ' } else { cell.glyph })
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(SizeSpec::fill())
    }
}
