//! RGB565 color handling

/// A 16-bit packed panel color: 5 bits red, 6 bits green, 5 bits blue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(u16);

impl Color {
    /// 0x0000
    pub const BLACK: Color = Color(0x0000);
    /// 0x001F
    pub const BLUE: Color = Color(0x001F);
    /// 0xF800
    pub const RED: Color = Color(0xF800);
    /// 0x07E0
    pub const GREEN: Color = Color(0x07E0);
    /// 0x07FF
    pub const CYAN: Color = Color(0x07FF);
    /// 0xF81F
    pub const MAGENTA: Color = Color(0xF81F);
    /// 0xFFE0
    pub const YELLOW: Color = Color(0xFFE0);
    /// 0xFFFF
    pub const WHITE: Color = Color(0xFFFF);

    /// Wrap an already packed RGB565 value.
    pub const fn from_raw(raw: u16) -> Self {
        Color(raw)
    }

    /// The packed RGB565 value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Wire representation, high byte first.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Color(raw)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Pack 8-bit channels into RGB565.
///
/// Only the top 5/6/5 bits of red/green/blue survive; the low bits are
/// discarded, so unpacking does not restore the input.
pub const fn pack(r: u8, g: u8, b: u8) -> Color {
    Color(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
}
