//! Styled character cells and the dense grid that stores them.

use crate::core::geometry::Vec2;

/// Terminal color. `Indexed` covers the 16 classic palette entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Default,
    Indexed(u8),
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Color = Color::Indexed(0);
    pub const RED: Color = Color::Indexed(1);
    pub const GREEN: Color = Color::Indexed(2);
    pub const YELLOW: Color = Color::Indexed(3);
    pub const BLUE: Color = Color::Indexed(4);
    pub const MAGENTA: Color = Color::Indexed(5);
    pub const CYAN: Color = Color::Indexed(6);
    pub const GRAY: Color = Color::Indexed(7);
    pub const DARK_GRAY: Color = Color::Indexed(8);
    pub const BRIGHT_RED: Color = Color::Indexed(9);
    pub const BRIGHT_GREEN: Color = Color::Indexed(10);
    pub const BRIGHT_YELLOW: Color = Color::Indexed(11);
    pub const BRIGHT_BLUE: Color = Color::Indexed(12);
    pub const BRIGHT_MAGENTA: Color = Color::Indexed(13);
    pub const BRIGHT_CYAN: Color = Color::Indexed(14);
    pub const WHITE: Color = Color::Indexed(15);
}

bitflags::bitflags! {
    /// Text attributes of a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellStyle: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const ITALIC    = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
        const BLINK     = 0b0001_0000;
        const REVERSE   = 0b0010_0000;
    }
}

const TRANSPARENT_GLYPH: char = '\0';

/// One screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub glyph: char,
    pub foreground: Color,
    pub background: Color,
    pub style: CellStyle,
}

impl Cell {
    /// Marker that never overwrites a parent cell during compositing.
    pub const TRANSPARENT: Cell = Cell {
        glyph: TRANSPARENT_GLYPH,
        foreground: Color::Default,
        background: Color::Default,
        style: CellStyle::empty(),
    };

    /// Default paintable background.
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        foreground: Color::Default,
        background: Color::Default,
        style: CellStyle::empty(),
    };

    pub const fn new(glyph: char) -> Self {
        Self {
            glyph,
            foreground: Color::Default,
            background: Color::Default,
            style: CellStyle::empty(),
        }
    }

    pub const fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub const fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub const fn with_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    /// Same colors and attributes, different glyph.
    pub const fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.glyph == TRANSPARENT_GLYPH
    }

    pub fn is_space(&self) -> bool {
        self.glyph == ' '
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::TRANSPARENT
    }
}

impl From<char> for Cell {
    fn from(glyph: char) -> Self {
        Cell::new(glyph)
    }
}

/// Dense row-major grid of cells, never smaller than 1x1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// New grid filled with `fill`; non-positive dimensions collapse to 1x1.
    pub fn new(size: Vec2, fill: Cell) -> Self {
        let (width, height) = if size.x > 0 && size.y > 0 {
            (size.x as usize, size.y as usize)
        } else {
            (1, 1)
        };
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as i32, self.height as i32)
    }

    fn index_of(&self, pos: Vec2) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn get(&self, pos: Vec2) -> Option<&Cell> {
        self.index_of(pos).map(|idx| &self.cells[idx])
    }

    /// Writes a cell; returns `false` when `pos` is out of range.
    pub fn set(&mut self, pos: Vec2, cell: Cell) -> bool {
        match self.index_of(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    pub fn is_fully_transparent(&self) -> bool {
        self.cells.iter().all(Cell::is_transparent)
    }
}
