/// Data bytes sent alongside ST7735 commands.
pub struct Flag;
#[allow(dead_code)]
impl Flag {
    /// COLMOD: 16 bits per pixel, RGB565
    pub const PIXEL_FORMAT_16BIT: u8 = 0x05;
    /// MADCTL row address order
    pub const MADCTL_MY: u8 = 0x80;
    /// MADCTL column address order
    pub const MADCTL_MX: u8 = 0x40;
    /// MADCTL row/column exchange
    pub const MADCTL_MV: u8 = 0x20;
    /// MADCTL BGR subpixel order
    pub const MADCTL_BGR: u8 = 0x08;
}
