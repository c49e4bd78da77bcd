//! Fixed-width 1bpp bitmap fonts

/// Fixed-width bitmap font.
///
/// Glyphs are stored back to back starting at `first_char`. Each glyph is
/// `height` rows; each row is packed MSB-first and padded to a whole byte,
/// so a glyph takes `ceil(width / 8) * height` bytes.
#[derive(Clone, Copy, Debug)]
pub struct Font {
    /// Glyph width in pixels, also the pen advance
    pub width: u8,
    /// Glyph height in pixels
    pub height: u8,
    /// First character with a glyph in `data`
    pub first_char: u8,
    /// Last character with a glyph in `data`
    pub last_char: u8,
    /// Packed glyph table
    pub data: &'static [u8],
}

impl Font {
    /// Font covering printable ASCII (`' '..='~'`).
    pub const fn new(width: u8, height: u8, data: &'static [u8]) -> Self {
        Font {
            width,
            height,
            first_char: b' ',
            last_char: b'~',
            data,
        }
    }

    /// Same font with a different character range
    pub const fn with_range(self, first_char: u8, last_char: u8) -> Self {
        Font {
            first_char,
            last_char,
            ..self
        }
    }

    /// Bytes per glyph row
    pub const fn row_bytes(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Glyph bytes for `c`, or `None` if `c` has no glyph.
    pub fn glyph(&self, c: char) -> Option<Glyph<'_>> {
        let code = u32::from(c);
        if code < u32::from(self.first_char) || code > u32::from(self.last_char) {
            return None;
        }
        let size = self.row_bytes() * usize::from(self.height);
        let start = (code - u32::from(self.first_char)) as usize * size;
        self.data.get(start..start + size).map(|bits| Glyph {
            bits,
            row_bytes: self.row_bytes(),
        })
    }
}

/// One glyph's bitmap
#[derive(Clone, Copy, Debug)]
pub struct Glyph<'a> {
    bits: &'a [u8],
    row_bytes: usize,
}

impl Glyph<'_> {
    /// Whether pixel `(x, y)` of the glyph is set
    pub fn is_set(&self, x: u8, y: u8) -> bool {
        let byte = self.bits[usize::from(y) * self.row_bytes + usize::from(x / 8)];
        byte & (0x80 >> (x % 8)) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // '!' and '"' in a 3x2 font
    static TINY: Font = Font::new(3, 2, &[0b0100_0000, 0b0100_0000, 0b1010_0000, 0b0000_0000])
        .with_range(b'!', b'"');

    #[test]
    fn glyph_lookup_respects_range() {
        assert!(TINY.glyph(' ').is_none());
        assert!(TINY.glyph('#').is_none());
        assert!(TINY.glyph('!').is_some());
        assert!(TINY.glyph('é').is_none());
    }

    #[test]
    fn glyph_bits_are_msb_first() {
        let g = TINY.glyph('"').unwrap();
        assert!(g.is_set(0, 0));
        assert!(!g.is_set(1, 0));
        assert!(g.is_set(2, 0));
        assert!(!g.is_set(0, 1));
    }

    #[test]
    fn rows_wider_than_a_byte_are_padded() {
        static WIDE: Font = Font::new(10, 1, &[0xFF, 0b0100_0000]).with_range(b'A', b'A');
        let g = WIDE.glyph('A').unwrap();
        assert_eq!(WIDE.row_bytes(), 2);
        assert!(g.is_set(7, 0));
        assert!(!g.is_set(8, 0));
        assert!(g.is_set(9, 0));
    }

    #[test]
    fn short_table_yields_no_glyph() {
        static SHORT: Font = Font::new(8, 2, &[0xFF]).with_range(b'A', b'B');
        assert!(SHORT.glyph('A').is_none());
    }
}
