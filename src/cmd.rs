/// ST7735 command bytes.
pub struct Cmd;
#[allow(dead_code)]
impl Cmd {
    pub const NOP: u8 = 0x00;
    pub const SW_RESET: u8 = 0x01;
    pub const SLEEP_IN: u8 = 0x10;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const NORMAL_MODE_ON: u8 = 0x13;
    pub const INVERT_OFF: u8 = 0x20;
    pub const INVERT_ON: u8 = 0x21;
    pub const DISPLAY_OFF: u8 = 0x28;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDRESS_SET: u8 = 0x2A;
    pub const ROW_ADDRESS_SET: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const MEMORY_ACCESS_CTRL: u8 = 0x36;
    pub const PIXEL_FORMAT_SET: u8 = 0x3A;
    pub const FRAME_RATE_CTRL1: u8 = 0xB1;
    pub const FRAME_RATE_CTRL2: u8 = 0xB2;
    pub const FRAME_RATE_CTRL3: u8 = 0xB3;
    pub const INVERSION_CTRL: u8 = 0xB4;
    pub const POWER_CTRL1: u8 = 0xC0;
    pub const POWER_CTRL2: u8 = 0xC1;
    pub const POWER_CTRL3: u8 = 0xC2;
    pub const POWER_CTRL4: u8 = 0xC3;
    pub const POWER_CTRL5: u8 = 0xC4;
    pub const VCOM_CTRL1: u8 = 0xC5;
    pub const GAMMA_POSITIVE: u8 = 0xE0;
    pub const GAMMA_NEGATIVE: u8 = 0xE1;
}
