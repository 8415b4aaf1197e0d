//! Text helpers: styled character streams, character classes and reflow.

pub mod layout;
pub mod width;

use unicode_segmentation::UnicodeSegmentation;

use crate::core::cell::Cell;

/// One cell per grapheme of `text`, each carrying `template`'s colors.
/// Only the first scalar of a grapheme is kept.
pub fn styled(text: &str, template: Cell) -> Vec<Cell> {
    text.graphemes(true)
        .filter_map(|grapheme| grapheme.chars().next())
        .map(|glyph| template.with_glyph(glyph))
        .collect()
}

/// Glyphs of `cells` as a string; transparent cells become spaces.
pub fn plain(cells: &[Cell]) -> String {
    cells
        .iter()
        .map(|cell| if cell.is_transparent() { ' ' } else { cell.glyph })
        .collect()
}

pub fn is_control(ch: char) -> bool {
    ch.is_control()
}

/// Punctuation that may be packed against a line edge without a hyphen.
pub fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation()
        || matches!(
            ch,
            '…' | '–' | '—' | '«' | '»' | '„' | '“' | '”' | '‘' | '’' | '¡' | '¿'
        )
}

#[cfg(test)]
mod tests {
    use super::{is_punctuation, plain, styled};
    use crate::core::cell::{Cell, Color};

    #[test]
    fn styled_keeps_one_cell_per_grapheme() {
        let cells = styled("e\u{301}a", Cell::BLANK.with_foreground(Color::CYAN));
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].glyph, 'e');
        assert!(cells.iter().all(|cell| cell.foreground == Color::CYAN));
        assert_eq!(plain(&cells), "ea");
    }

    #[test]
    fn punctuation_classes() {
        for ch in ['.', ',', '!', '—', '»'] {
            assert!(is_punctuation(ch), "{ch}");
        }
        for ch in ['a', ' ', '7', 'ż'] {
            assert!(!is_punctuation(ch), "{ch}");
        }
    }
}
