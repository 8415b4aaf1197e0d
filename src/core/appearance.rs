//! Shared, copy-on-write widget appearance.
//!
//! Widgets of the same kind usually share one appearance value. [`Shared`]
//! keeps a single allocation until a widget customizes its copy, at which
//! point only that widget pays for a clone.

use std::ops::Deref;
use std::rc::Rc;

use crate::core::cell::{Cell, CellStyle, Color};

#[derive(Debug, PartialEq, Eq)]
pub struct Shared<T>(Rc<T>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Whether both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Clone> Shared<T> {
    /// Mutable access, detaching from other holders first.
    pub fn make_mut(&mut self) -> &mut T {
        Rc::make_mut(&mut self.0)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Deref for Shared<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Shared<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

/// Colors for widgets that have an active and an inactive look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub active: Cell,
    pub inactive: Cell,
}

impl Palette {
    pub fn pick(&self, active: bool) -> Cell {
        if active {
            self.active
        } else {
            self.inactive
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            active: Cell::BLANK.with_foreground(Color::WHITE),
            inactive: Cell::BLANK.with_foreground(Color::GRAY),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAppearance {
    /// Template for text set from a plain string.
    pub text: Cell,
    pub scrollbar: ScrollbarAppearance,
}

impl Default for TextAppearance {
    fn default() -> Self {
        Self {
            text: Cell::BLANK,
            scrollbar: ScrollbarAppearance::vertical(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputAppearance {
    pub text: Palette,
    pub insert_cursor: char,
    pub overtype_cursor: char,
    pub cursor: Cell,
    /// Glyph shown instead of each character in confidential mode.
    pub mask: char,
}

impl Default for InputAppearance {
    fn default() -> Self {
        Self {
            text: Palette::default(),
            insert_cursor: '_',
            overtype_cursor: '▄',
            cursor: Cell::BLANK
                .with_foreground(Color::WHITE)
                .with_style(CellStyle::BOLD),
            mask: '*',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollbarAppearance {
    pub track: Palette,
    pub handle: Palette,
    pub track_glyph: char,
    pub handle_glyph: char,
    pub prev_glyph: char,
    pub next_glyph: char,
}

impl ScrollbarAppearance {
    pub fn vertical() -> Self {
        let dimmed = Palette {
            active: Cell::BLANK.with_foreground(Color::WHITE),
            inactive: Cell::BLANK.with_foreground(Color::DARK_GRAY),
        };
        Self {
            track: dimmed,
            handle: dimmed,
            track_glyph: '│',
            handle_glyph: '║',
            prev_glyph: '▲',
            next_glyph: '▼',
        }
    }

    pub fn horizontal() -> Self {
        Self {
            track_glyph: '─',
            handle_glyph: '═',
            prev_glyph: '◀',
            next_glyph: '▶',
            ..Self::vertical()
        }
    }
}

impl Default for ScrollbarAppearance {
    fn default() -> Self {
        Self::vertical()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartAppearance {
    pub bar: Cell,
    pub full: char,
    pub lower_half: char,
    pub upper_half: char,
    pub scrollbar: ScrollbarAppearance,
}

impl Default for ChartAppearance {
    fn default() -> Self {
        Self {
            bar: Cell::BLANK.with_foreground(Color::WHITE),
            full: '█',
            lower_half: '▄',
            upper_half: '▀',
            scrollbar: ScrollbarAppearance::horizontal(),
        }
    }
}
