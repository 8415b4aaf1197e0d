//! Text reflow with a logical-index to screen-cell map.
//!
//! [`TextLayout`] owns the raw styled text and derives the laid-out cell
//! stream for a given width. Every mutation recomputes both the laid-out
//! text and the position map in one step, so the two never disagree.
//!
//! Wrapping rules (word-aware mode, width > 2):
//! - a newline pads the line with blanks and moves to the next line;
//! - a word that would be cut at the last column gets a hyphen there;
//! - a space that would start a wrapped line is dropped.

use crate::core::cell::Cell;
use crate::core::geometry::Vec2;
use crate::core::text::{is_control, is_punctuation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPolicy {
    /// Word-aware wrapping. Off means a plain hard wrap at the width.
    pub wrap: bool,
    /// Never hyphenate next to punctuation.
    pub dense_punctuation: bool,
    /// Honor newlines. Other control characters are always dropped.
    pub control_characters: bool,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            wrap: true,
            dense_punctuation: false,
            control_characters: true,
        }
    }
}

impl LayoutPolicy {
    /// Hard wrap with newlines honored, as used by editable fields.
    pub fn raw() -> Self {
        Self {
            wrap: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout {
    raw: Vec<Cell>,
    laid_out: Vec<Cell>,
    positions: Vec<Vec2>,
    width: i32,
    policy: LayoutPolicy,
}

impl TextLayout {
    pub fn new(width: i32, policy: LayoutPolicy) -> Self {
        let mut layout = Self {
            raw: Vec::new(),
            laid_out: Vec::new(),
            positions: Vec::new(),
            width: width.max(1),
            policy,
        };
        layout.reflow();
        layout
    }

    pub fn raw(&self) -> &[Cell] {
        &self.raw
    }

    pub fn laid_out(&self) -> &[Cell] {
        &self.laid_out
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn policy(&self) -> LayoutPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn set_text(&mut self, text: Vec<Cell>) {
        self.raw = text;
        self.reflow();
    }

    /// Returns `true` when the width changed and the text was reflowed.
    pub fn set_width(&mut self, width: i32) -> bool {
        let width = width.max(1);
        if width == self.width {
            return false;
        }
        self.width = width;
        self.reflow();
        true
    }

    pub fn set_policy(&mut self, policy: LayoutPolicy) {
        if policy != self.policy {
            self.policy = policy;
            self.reflow();
        }
    }

    /// Rendered line count, `ceil(laid_out / width)`.
    pub fn line_count(&self) -> i32 {
        let width = self.width as usize;
        self.laid_out.len().div_ceil(width) as i32
    }

    /// Cells of rendered line `row`; shorter than the width on the last line.
    pub fn line(&self, row: i32) -> &[Cell] {
        if row < 0 {
            return &[];
        }
        let width = self.width as usize;
        let start = (row as usize).saturating_mul(width).min(self.laid_out.len());
        let end = start.saturating_add(width).min(self.laid_out.len());
        &self.laid_out[start..end]
    }

    /// One entry per raw character plus a final entry for the caret slot
    /// after the last character.
    pub fn position_map(&self) -> &[Vec2] {
        &self.positions
    }

    /// Cell of logical index `index`, clamped to the end-of-text slot.
    pub fn position_of(&self, index: usize) -> Vec2 {
        let last = self.positions.len() - 1;
        self.positions[index.min(last)]
    }

    /// Logical index shown at `pos`: the last index on that row whose column
    /// does not exceed `pos.x`. Rows with no match resolve to the first index
    /// of the nearest following row, or to the end of the text.
    pub fn index_at(&self, pos: Vec2) -> usize {
        let mut fallback = None;
        let mut found = None;
        for (index, cell) in self.positions.iter().enumerate() {
            if cell.y == pos.y && cell.x <= pos.x {
                found = Some(index);
            } else if cell.y > pos.y {
                fallback.get_or_insert(index);
                break;
            }
        }
        found
            .or(fallback)
            .unwrap_or(self.positions.len() - 1)
    }

    /// Caret index `lines` rows above `index`, scanning back from `index` for
    /// the nearest character at or left of the current column. Unchanged
    /// when already on the first row.
    pub fn index_above(&self, index: usize, lines: i32) -> usize {
        let index = index.min(self.raw.len());
        let current = self.position_of(index);
        if current.y <= 0 || lines <= 0 {
            return index;
        }
        let target = current.y - lines.min(current.y);
        (0..index)
            .rev()
            .find(|&candidate| {
                let pos = self.positions[candidate];
                pos.y == target && pos.x <= current.x
            })
            .unwrap_or(index)
    }

    /// Caret index `lines` rows below `index`. Picks the character in the same
    /// column, or the last character of a shorter target row, or the end of
    /// the text. Unchanged when already on the last row.
    pub fn index_below(&self, index: usize, lines: i32) -> usize {
        let end = self.raw.len();
        let index = index.min(end);
        let current = self.position_of(index);
        let last_row = self.line_count() - 1;
        if current.y >= last_row || lines <= 0 {
            return index;
        }
        let target = current.y + lines.min(last_row - current.y);
        for candidate in index + 1..=end {
            let pos = self.positions[candidate];
            if pos.y == target && (pos.x == current.x || candidate == end) {
                return candidate;
            }
            if pos.y > target {
                return candidate - 1;
            }
        }
        index
    }

    fn reflow(&mut self) {
        let width = self.width as usize;
        let word_aware = self.policy.wrap && self.width > 2;
        let mut laid_out = Vec::with_capacity(self.raw.len() + self.raw.len() / width + 1);
        let mut positions = Vec::with_capacity(self.raw.len() + 1);
        let cell_at = |pos: usize| Vec2::new((pos % width) as i32, (pos / width) as i32);

        for (i, cell) in self.raw.iter().enumerate() {
            let pos_in_line = laid_out.len() % width;
            positions.push(cell_at(laid_out.len()));

            if is_control(cell.glyph) {
                if self.policy.control_characters && cell.glyph == '\n' {
                    laid_out.extend(std::iter::repeat(Cell::BLANK).take(width - pos_in_line));
                }
                continue;
            }

            if word_aware && pos_in_line == width - 1 && self.hyphenates(i) {
                let previous = i.checked_sub(1).map_or(*cell, |prev| self.raw[prev]);
                let glyph = if previous.is_space() { ' ' } else { '-' };
                laid_out.push(previous.with_glyph(glyph));
                positions[i] = cell_at(laid_out.len());
            }

            if word_aware && pos_in_line == 0 && cell.is_space() {
                continue;
            }

            laid_out.push(*cell);
        }
        positions.push(cell_at(laid_out.len()));

        self.laid_out = laid_out;
        self.positions = positions;
    }

    /// Whether the run through `index` and `index + 1` would be cut by the
    /// line edge and needs a hyphen.
    fn hyphenates(&self, index: usize) -> bool {
        let Some(next) = self.raw.get(index + 1) else {
            return false;
        };
        let current = self.raw[index];
        if current.is_space() || next.is_space() || is_control(next.glyph) {
            return false;
        }
        !self.policy.dense_punctuation
            || (!is_punctuation(current.glyph) && !is_punctuation(next.glyph))
    }
}

#[cfg(test)]
mod tests {
    use super::{LayoutPolicy, TextLayout};
    use crate::core::cell::{Cell, Color};
    use crate::core::geometry::Vec2;
    use crate::core::text::{plain, styled};

    fn layout(text: &str, width: i32) -> TextLayout {
        layout_with(text, width, LayoutPolicy::default())
    }

    fn layout_with(text: &str, width: i32, policy: LayoutPolicy) -> TextLayout {
        let mut layout = TextLayout::new(width, policy);
        layout.set_text(styled(text, Cell::BLANK));
        layout
    }

    fn lines(layout: &TextLayout) -> Vec<String> {
        (0..layout.line_count())
            .map(|row| plain(layout.line(row)))
            .collect()
    }

    #[test]
    fn leading_space_of_wrapped_line_is_elided() {
        let layout = layout("abcdefghij klmnop", 10);
        assert_eq!(lines(&layout), vec!["abcdefghij", "klmnop"]);
        assert_eq!(layout.line_count(), 2);
        assert_eq!(layout.position_of(9), Vec2::new(9, 0));
        assert_eq!(layout.position_of(10), Vec2::new(0, 1), "elided space");
        assert_eq!(layout.position_of(11), Vec2::new(0, 1));
    }

    #[test]
    fn long_word_gets_hyphen_in_preceding_color() {
        let mut text = styled("abcd", Cell::BLANK.with_foreground(Color::RED));
        text.extend(styled("efgh", Cell::BLANK));
        let mut layout = TextLayout::new(4, LayoutPolicy::default());
        layout.set_text(text);

        assert_eq!(lines(&layout), vec!["abc-", "def-", "gh"]);
        assert_eq!(layout.laid_out()[3].foreground, Color::RED);
        assert_eq!(layout.position_of(3), Vec2::new(0, 1));
        assert_eq!(layout.position_of(8), Vec2::new(2, 2), "end slot");
    }

    #[test]
    fn single_letter_word_at_edge_gets_space() {
        let layout = layout("ab cd", 4);
        assert_eq!(lines(&layout), vec!["ab  ", "cd"]);
        assert_eq!(layout.position_of(3), Vec2::new(0, 1));
    }

    #[test]
    fn dense_punctuation_avoids_hyphen() {
        let policy = LayoutPolicy {
            dense_punctuation: true,
            ..LayoutPolicy::default()
        };
        assert_eq!(lines(&layout_with("abc.def", 4, policy)), vec!["abc.", "def"]);
        assert_eq!(lines(&layout("abc.def", 4)), vec!["abc-", ".def"]);
    }

    #[test]
    fn newline_pads_and_other_controls_drop() {
        let layout = layout("ab\ncd\tef", 4);
        assert_eq!(lines(&layout), vec!["ab  ", "cdef"]);
        assert_eq!(layout.position_of(2), Vec2::new(2, 0));
        assert_eq!(layout.position_of(3), Vec2::new(0, 1));
        assert_eq!(layout.position_of(5), Vec2::new(2, 1), "tab maps to next cell");

        let ignored = layout_with(
            "ab\ncd",
            4,
            LayoutPolicy {
                control_characters: false,
                ..LayoutPolicy::default()
            },
        );
        assert_eq!(lines(&ignored), vec!["abcd"]);
    }

    #[test]
    fn narrow_width_hard_wraps() {
        let layout = layout("ab cd", 2);
        assert_eq!(lines(&layout), vec!["ab", " c", "d"]);
        let zero = layout_with("abc", 0, LayoutPolicy::default());
        assert_eq!(zero.width(), 1);
        assert_eq!(zero.line_count(), 3);
    }

    #[test]
    fn raw_policy_never_hyphenates() {
        let layout = layout_with("abcdefgh ij", 4, LayoutPolicy::raw());
        assert_eq!(lines(&layout), vec!["abcd", "efgh", " ij"]);
    }

    #[test]
    fn index_at_reverses_position_map() {
        let layout = layout("the quick brown fox jumps", 7);
        for index in 0..=layout.len() {
            let pos = layout.position_of(index);
            assert_eq!(layout.position_of(layout.index_at(pos)), pos, "index {index}");
        }
        assert_eq!(layout.index_at(Vec2::new(0, 99)), layout.len());
    }

    #[test]
    fn vertical_caret_moves() {
        let layout = layout_with("abcdefgh\nxy", 4, LayoutPolicy::raw());
        // rows: "abcd" "efgh" "    " "xy"
        assert_eq!(layout.index_below(1, 1), 5);
        assert_eq!(layout.index_above(5, 1), 1);
        assert_eq!(layout.index_above(1, 1), 1, "first row stays");
        assert_eq!(layout.index_below(6, 1), 8, "newline slot on padded row");
        assert_eq!(layout.index_below(7, 5), layout.len(), "end of text");
        assert_eq!(layout.index_above(layout.len(), 1), 8);
    }

    #[test]
    fn reflow_is_deterministic() {
        let first = layout("lorem ipsum dolor sit amet", 6);
        let second = layout("lorem ipsum dolor sit amet", 6);
        assert_eq!(first, second);
    }
}
