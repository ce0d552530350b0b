//! 5x7 bitmap glyphs for overlay labels.
//!
//! Each glyph is seven rows, top to bottom; bit 4 of a row is the leftmost
//! column. Characters without a glyph render as `?`.

pub const GLYPH_W: usize = 5;
pub const GLYPH_H: usize = 7;
/// Horizontal advance in glyph cells, including one blank column.
pub const ADVANCE: usize = GLYPH_W + 1;

const UNKNOWN: [u8; GLYPH_H] = [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04];

pub fn glyph(c: char) -> [u8; GLYPH_H] {
    match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'n' => [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11],
        'o' => [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E],
        't' => [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06],
        'u' => [0x00, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        ' ' => [0x00; GLYPH_H],
        _ => UNKNOWN,
    }
}

#[inline]
pub fn is_set(rows: &[u8; GLYPH_H], col: usize, row: usize) -> bool {
    (rows[row] >> (GLYPH_W - 1 - col)) & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::{GLYPH_H, GLYPH_W, glyph, is_set};

    #[test]
    fn label_characters_have_glyphs() {
        let unknown = glyph('\u{2603}');
        for c in "Count: 0123456789".chars().filter(|&c| c != ' ') {
            assert_ne!(glyph(c), unknown, "missing glyph for {c:?}");
        }
    }

    #[test]
    fn one_has_a_centered_stem() {
        let g = glyph('1');
        for row in 1..GLYPH_H - 1 {
            assert!(is_set(&g, 2, row));
        }
        assert!(!is_set(&g, 0, 3));
        assert!(!is_set(&g, GLYPH_W - 1, 3));
    }
}
