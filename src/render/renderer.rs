//! Diff renderer: cell grid to ANSI output.
//!
//! Only rows that differ from the previously rendered grid are re-emitted. A
//! size change (or an explicit request) clears the screen and repaints
//! everything.

use std::fmt::Write as _;

use crate::core::cell::{Cell, CellStyle, Color, Grid};
use crate::core::text::width::is_wide;

const SYNC_START: &str = "\x1b[?2026h";
const SYNC_END: &str = "\x1b[?2026l";
const CLEAR_ALL: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";
pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// OSC sequence setting the window title. Control characters are stripped.
pub fn title_sequence(title: &str) -> String {
    let clean: String = title.chars().filter(|ch| !ch.is_control()).collect();
    format!("\x1b]0;{clean}\x07")
}

#[derive(Debug, Default)]
pub struct DiffRenderer {
    previous: Option<Grid>,
    force_full_redraw_next: bool,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_full_redraw_next(&mut self) {
        self.force_full_redraw_next = true;
    }

    /// Escape output bringing the screen from the last rendered grid to
    /// `grid`. Empty when nothing changed.
    pub fn render(&mut self, grid: &Grid) -> String {
        let force = std::mem::take(&mut self.force_full_redraw_next);
        let previous = self
            .previous
            .as_ref()
            .filter(|previous| !force && previous.size() == grid.size());

        let mut body = String::new();
        let mut changed_rows = 0usize;
        for (y, row) in grid.rows().enumerate() {
            if previous.is_some_and(|previous| previous.row(y) == row) {
                continue;
            }
            changed_rows += 1;
            let _ = write!(body, "\x1b[{};1H", y + 1);
            encode_row(row, &mut body);
        }

        let full = previous.is_none();
        if changed_rows == 0 && !full {
            return String::new();
        }
        tracing::trace!(changed_rows, full, "frame encoded");

        let mut out = String::with_capacity(body.len() + 32);
        out.push_str(SYNC_START);
        if full {
            out.push_str(CLEAR_ALL);
        }
        out.push_str(&body);
        out.push_str(RESET);
        out.push_str(SYNC_END);
        self.previous = Some(grid.clone());
        out
    }
}

fn encode_row(row: &[Cell], out: &mut String) {
    let mut current: Option<(Color, Color, CellStyle)> = None;
    let mut skip_next = false;
    for cell in row {
        if std::mem::take(&mut skip_next) {
            continue;
        }
        let attributes = (cell.foreground, cell.background, cell.style);
        if current != Some(attributes) {
            push_sgr(cell, out);
            current = Some(attributes);
        }
        let glyph = if cell.is_transparent() || cell.glyph.is_control() {
            ' '
        } else {
            cell.glyph
        };
        out.push(glyph);
        skip_next = is_wide(glyph);
    }
}

fn push_sgr(cell: &Cell, out: &mut String) {
    out.push_str("\x1b[0");
    for (flag, code) in [
        (CellStyle::BOLD, "1"),
        (CellStyle::DIM, "2"),
        (CellStyle::ITALIC, "3"),
        (CellStyle::UNDERLINE, "4"),
        (CellStyle::BLINK, "5"),
        (CellStyle::REVERSE, "7"),
    ] {
        if cell.style.contains(flag) {
            out.push(';');
            out.push_str(code);
        }
    }
    push_color(cell.foreground, 30, out);
    push_color(cell.background, 40, out);
    out.push('m');
}

fn push_color(color: Color, base: u8, out: &mut String) {
    let _ = match color {
        Color::Default => write!(out, ";{}", base + 9),
        Color::Indexed(index) if index < 8 => write!(out, ";{}", base + index),
        Color::Indexed(index) if index < 16 => write!(out, ";{}", base + 60 + index - 8),
        Color::Indexed(index) => write!(out, ";{};5;{index}", base + 8),
        Color::Rgb(r, g, b) => write!(out, ";{};2;{r};{g};{b}", base + 8),
    };
}
