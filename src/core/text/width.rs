//! Terminal column widths of glyphs.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns a glyph occupies: 0 for combining marks and controls, 2 for wide
/// glyphs, otherwise 1.
pub fn glyph_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

pub fn is_wide(ch: char) -> bool {
    glyph_width(ch) == 2
}

pub fn visible_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

#[cfg(test)]
mod tests {
    use super::{glyph_width, is_wide, visible_width};

    #[test]
    fn widths_follow_east_asian_width() {
        assert_eq!(glyph_width('a'), 1);
        assert_eq!(glyph_width('\u{301}'), 0);
        assert!(is_wide('漢'));
        assert_eq!(visible_width("漢a"), 3);
    }
}
