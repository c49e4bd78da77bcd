//! Driver for ST7735 TFT panels
use log::debug;

use crate::cmd::Cmd;
use crate::color::Color;
use crate::error::{DrawError, InitError, TransportError};
use crate::flag::Flag;
use crate::font::Font;
use crate::geometry::{Point, Rect};
use crate::interface::Transport;
use crate::protocol::Encoder;
use crate::raster::{self, PixelTarget};

/// Default panel width
pub const WIDTH: u16 = 128;
/// Default panel height
pub const HEIGHT: u16 = 160;

/// Init sequence for bare ST7735 panels: reset, sleep out, 16-bit color,
/// orientation, display on.
pub const DEFAULT_INIT_SEQUENCE: &[InitStep] = &[
    InitStep::HardwareReset,
    InitStep::Cmd(Cmd::SW_RESET),
    InitStep::DelayMs(150),
    // charge pump needs the full 255ms after sleep out
    InitStep::Cmd(Cmd::SLEEP_OUT),
    InitStep::DelayMs(255),
    InitStep::CmdData(Cmd::PIXEL_FORMAT_SET, &[Flag::PIXEL_FORMAT_16BIT]),
    InitStep::Orientation,
    InitStep::Cmd(Cmd::DISPLAY_ON),
    InitStep::DelayMs(100),
];

/// Full vendor sequence for ST7735R ("red tab") modules: frame rate, power,
/// VCOM and gamma are set explicitly instead of relying on reset defaults.
pub const ST7735R_INIT_SEQUENCE: &[InitStep] = &[
    InitStep::HardwareReset,
    InitStep::Cmd(Cmd::SW_RESET),
    InitStep::DelayMs(150),
    InitStep::Cmd(Cmd::SLEEP_OUT),
    InitStep::DelayMs(255),
    InitStep::CmdData(Cmd::FRAME_RATE_CTRL1, &[0x01, 0x2C, 0x2D]),
    InitStep::CmdData(Cmd::FRAME_RATE_CTRL2, &[0x01, 0x2C, 0x2D]),
    InitStep::CmdData(Cmd::FRAME_RATE_CTRL3, &[0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D]),
    InitStep::CmdData(Cmd::INVERSION_CTRL, &[0x07]),
    InitStep::CmdData(Cmd::POWER_CTRL1, &[0xA2, 0x02, 0x84]),
    InitStep::CmdData(Cmd::POWER_CTRL2, &[0xC5]),
    InitStep::CmdData(Cmd::POWER_CTRL3, &[0x0A, 0x00]),
    InitStep::CmdData(Cmd::POWER_CTRL4, &[0x8A, 0x2A]),
    InitStep::CmdData(Cmd::POWER_CTRL5, &[0x8A, 0xEE]),
    InitStep::CmdData(Cmd::VCOM_CTRL1, &[0x0E]),
    InitStep::Cmd(Cmd::INVERT_OFF),
    InitStep::CmdData(Cmd::PIXEL_FORMAT_SET, &[Flag::PIXEL_FORMAT_16BIT]),
    InitStep::Orientation,
    InitStep::CmdData(
        Cmd::GAMMA_POSITIVE,
        &[
            0x02, 0x1C, 0x07, 0x12, 0x37, 0x32, 0x29, 0x2D, 0x29, 0x25, 0x2B, 0x39, 0x00, 0x01,
            0x03, 0x10,
        ],
    ),
    InitStep::CmdData(
        Cmd::GAMMA_NEGATIVE,
        &[
            0x03, 0x1D, 0x07, 0x06, 0x2E, 0x2C, 0x29, 0x2D, 0x2E, 0x2E, 0x37, 0x3F, 0x00, 0x00,
            0x02, 0x10,
        ],
    ),
    InitStep::Cmd(Cmd::NORMAL_MODE_ON),
    InitStep::DelayMs(10),
    InitStep::Cmd(Cmd::DISPLAY_ON),
    InitStep::DelayMs(100),
];

/// Steps an init sequence can contain.
#[derive(Clone, Copy, Debug)]
pub enum InitStep {
    /// Pulse the reset line: low for 10ms, then high and wait 120ms
    HardwareReset,
    /// Blocking delay
    DelayMs(u16),
    /// Send a bare command byte
    Cmd(u8),
    /// Send a command with a static data slice
    CmdData(u8, &'static [u8]),
    /// Send MEMORY_ACCESS_CTRL for the configured rotation
    Orientation,
}

impl InitStep {
    /// The stage a failure during this step is reported against.
    /// Delays inherit the stage of the step before them.
    fn stage(&self) -> Option<InitStage> {
        match *self {
            InitStep::HardwareReset => Some(InitStage::HardwareReset),
            InitStep::DelayMs(_) => None,
            InitStep::Orientation => Some(InitStage::Orientation),
            InitStep::Cmd(c) | InitStep::CmdData(c, _) => Some(match c {
                Cmd::SW_RESET => InitStage::SoftwareReset,
                Cmd::SLEEP_OUT => InitStage::SleepOut,
                Cmd::PIXEL_FORMAT_SET => InitStage::PixelFormat,
                Cmd::MEMORY_ACCESS_CTRL => InitStage::Orientation,
                Cmd::DISPLAY_ON => InitStage::DisplayOn,
                _ => InitStage::PanelSetup,
            }),
        }
    }
}

/// Where in the init sequence a failure happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitStage {
    /// Claiming the bus and control lines
    Open,
    /// Reset line pulse
    HardwareReset,
    /// SW_RESET command
    SoftwareReset,
    /// SLEEP_OUT command
    SleepOut,
    /// Vendor-specific setup commands
    PanelSetup,
    /// PIXEL_FORMAT_SET command
    PixelFormat,
    /// MEMORY_ACCESS_CTRL command
    Orientation,
    /// DISPLAY_ON command
    DisplayOn,
}

/// Controller lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum State {
    /// Constructed, nothing sent
    Uninitialized,
    /// Transport open, resets and wake-up in progress
    Resetting,
    /// Selecting 16-bit color
    ConfiguringPixelFormat,
    /// Sending the orientation
    ConfiguringOrientation,
    /// Ready to draw
    On,
    /// A transport error aborted `init()`
    Failed,
}

impl State {
    fn for_stage(stage: InitStage) -> State {
        match stage {
            InitStage::PixelFormat => State::ConfiguringPixelFormat,
            InitStage::Orientation => State::ConfiguringOrientation,
            _ => State::Resetting,
        }
    }
}

/// Panel rotation, clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// Portrait
    #[default]
    Rotate0,
    /// Landscape
    Rotate90,
    /// Portrait, upside down
    Rotate180,
    /// Landscape, upside down
    Rotate270,
}

impl Rotation {
    /// MEMORY_ACCESS_CTRL data byte
    pub const fn madctl(self) -> u8 {
        match self {
            Rotation::Rotate0 => 0x00,
            Rotation::Rotate90 => Flag::MADCTL_MX | Flag::MADCTL_MV,
            Rotation::Rotate180 => Flag::MADCTL_MY | Flag::MADCTL_MX,
            Rotation::Rotate270 => Flag::MADCTL_MY | Flag::MADCTL_MV,
        }
    }

    /// Whether rows and columns are exchanged
    pub const fn is_landscape(self) -> bool {
        matches!(self, Rotation::Rotate90 | Rotation::Rotate270)
    }
}

/// Panel geometry and power-up behaviour.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Native width in pixels (unrotated)
    pub width: u16,
    /// Native height in pixels (unrotated)
    pub height: u16,
    /// Rotation sent during init
    pub rotation: Rotation,
    /// Steps run by `init()`
    pub init_sequence: &'static [InitStep],
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: WIDTH,
            height: HEIGHT,
            rotation: Rotation::Rotate0,
            init_sequence: DEFAULT_INIT_SEQUENCE,
        }
    }
}

impl Config {
    /// Native panel size
    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Rotation applied during init
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replace the init sequence
    pub fn init_sequence(mut self, init_sequence: &'static [InitStep]) -> Self {
        self.init_sequence = init_sequence;
        self
    }
}

/// An ST7735 panel behind a [`Transport`].
///
/// The controller is the only writer of pixel data. Drawing calls clip to
/// the panel and fail with [`DrawError::NotInitialized`] until `init()`
/// has succeeded.
pub struct St7735<T> {
    encoder: Encoder<T>,
    config: Config,
    rotation: Rotation,
    font: Option<&'static Font>,
    state: State,
}

impl<T: Transport> St7735<T> {
    /// Create the driver. Nothing is sent until [`St7735::init`].
    pub fn new(transport: T, config: Config) -> Self {
        debug!(
            "creating new St7735 instance ({}x{})",
            config.width, config.height
        );
        St7735 {
            encoder: Encoder::new(transport),
            rotation: config.rotation,
            config,
            font: None,
            state: State::Uninitialized,
        }
    }

    /// Open the transport and run the init sequence.
    ///
    /// Any transport failure leaves the controller [`State::Failed`] and
    /// is returned with the stage it happened in. There is no retry;
    /// calling `init()` again starts over from the top.
    pub fn init(&mut self) -> Result<(), InitError> {
        debug!("initializing st7735");
        self.state = State::Uninitialized;
        let mut stage = InitStage::Open;
        match self.run_init(&mut stage) {
            Ok(()) => {
                debug!("init sequence complete");
                self.state = State::On;
                Ok(())
            }
            Err(source) => {
                debug!("init failed during {:?}: {}", stage, source);
                self.state = State::Failed;
                Err(InitError { stage, source })
            }
        }
    }

    fn run_init(&mut self, stage: &mut InitStage) -> Result<(), TransportError> {
        self.encoder.transport().open()?;
        self.state = State::Resetting;

        let sequence = self.config.init_sequence;
        for step in sequence {
            debug!("init step: {:?}", step);
            if let Some(s) = step.stage() {
                *stage = s;
                self.state = self.state.max(State::for_stage(s));
            }
            match *step {
                InitStep::HardwareReset => {
                    let t = self.encoder.transport();
                    t.set_reset(false);
                    t.sleep_ms(10);
                    t.set_reset(true);
                    t.sleep_ms(120);
                }
                InitStep::DelayMs(ms) => self.encoder.transport().sleep_ms(u32::from(ms)),
                InitStep::Cmd(c) => self.encoder.send_command(c)?,
                InitStep::CmdData(c, d) => self.encoder.send_command_with_data(c, d)?,
                InitStep::Orientation => self
                    .encoder
                    .send_command_with_data(Cmd::MEMORY_ACCESS_CTRL, &[self.rotation.madctl()])?,
            }
        }
        Ok(())
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether drawing calls will be accepted
    pub fn is_ready(&self) -> bool {
        self.state == State::On
    }

    fn ensure_ready(&self) -> Result<(), DrawError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(DrawError::NotInitialized)
        }
    }

    /// Current rotation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Logical width under the current rotation
    pub fn width(&self) -> u16 {
        if self.rotation.is_landscape() {
            self.config.height
        } else {
            self.config.width
        }
    }

    /// Logical height under the current rotation
    pub fn height(&self) -> u16 {
        if self.rotation.is_landscape() {
            self.config.width
        } else {
            self.config.height
        }
    }

    /// Change the panel rotation. Width and height swap for 90° and 270°.
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DrawError> {
        self.ensure_ready()?;
        debug!("setting rotation {:?}", rotation);
        self.encoder
            .send_command_with_data(Cmd::MEMORY_ACCESS_CTRL, &[rotation.madctl()])?;
        self.rotation = rotation;
        Ok(())
    }

    /// Select the font used by [`St7735::draw_text`].
    pub fn set_font(&mut self, font: &'static Font) {
        self.font = Some(font);
    }

    /// The selected font, if any
    pub fn font(&self) -> Option<&'static Font> {
        self.font
    }

    /// Fill the whole panel.
    pub fn clear_screen(&mut self, color: Color) -> Result<(), DrawError> {
        let (w, h) = (self.width() as i16, self.height() as i16);
        self.fill_rect(Rect::new(0, 0, w, h), color)
    }

    /// Write one pixel; off-panel points are ignored.
    pub fn draw_pixel(&mut self, p: Point, color: Color) -> Result<(), DrawError> {
        self.ensure_ready()?;
        if p.x < 0 || p.y < 0 || p.x as u16 >= self.width() || p.y as u16 >= self.height() {
            return Ok(());
        }
        let (x, y) = (p.x as u16, p.y as u16);
        self.encoder.set_address_window(x, y, x, y)?;
        self.encoder.send_data(&color.to_be_bytes())?;
        Ok(())
    }

    /// Fill a rectangle: one address window, then one stream of
    /// `width * height` pixels. Nothing is sent if the clipped rectangle
    /// is empty.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DrawError> {
        self.ensure_ready()?;
        let Some(w) = rect.clip(self.width(), self.height()) else {
            return Ok(());
        };
        self.encoder.set_address_window(w.x0, w.y0, w.x1, w.y1)?;
        self.encoder.send_repeated(color, w.area())?;
        Ok(())
    }

    /// Draw a rectangle border.
    pub fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), DrawError> {
        self.ensure_ready()?;
        raster::rect_outline(self, rect, color)
    }

    /// Draw a line, both endpoints included.
    pub fn draw_line(&mut self, a: Point, b: Point, color: Color) -> Result<(), DrawError> {
        self.ensure_ready()?;
        raster::line(self, a, b, color)
    }

    /// Draw a circle outline.
    pub fn draw_circle(&mut self, center: Point, radius: i16, color: Color) -> Result<(), DrawError> {
        self.ensure_ready()?;
        raster::circle(self, center, radius, color)
    }

    /// Draw a filled circle.
    pub fn fill_circle(&mut self, center: Point, radius: i16, color: Color) -> Result<(), DrawError> {
        self.ensure_ready()?;
        raster::fill_circle(self, center, radius, color)
    }

    /// Draw `text` with the selected font, glyph top-left at `origin`.
    ///
    /// Returns the pen position after the text.
    pub fn draw_text(&mut self, origin: Point, text: &str, color: Color) -> Result<Point, DrawError> {
        self.ensure_ready()?;
        let font = self.font.ok_or(DrawError::NoFont)?;
        raster::text(self, font, origin, text, color)
    }

    /// Blit a row-major `width * height` image with its top-left at `origin`.
    ///
    /// The image is clipped to the panel and streamed through a single
    /// address window. `pixels` shorter than the visible part ends the
    /// stream early.
    pub fn draw_image(
        &mut self,
        origin: Point,
        width: i16,
        height: i16,
        pixels: &[Color],
    ) -> Result<(), DrawError> {
        self.ensure_ready()?;
        let rect = Rect::new(origin.x, origin.y, width, height);
        let Some(w) = rect.clip(self.width(), self.height()) else {
            return Ok(());
        };
        let stride = width as usize;
        let skip_x = (i32::from(w.x0) - i32::from(origin.x)) as usize;
        let skip_y = (i32::from(w.y0) - i32::from(origin.y)) as usize;
        let cols = w.width() as usize;

        self.encoder.set_address_window(w.x0, w.y0, w.x1, w.y1)?;
        let rows = (0..w.height() as usize).map_while(|row| {
            let start = (skip_y + row) * stride + skip_x;
            pixels.get(start..start + cols)
        });
        self.encoder.send_pixels(rows.flatten().copied())?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn transport_mut(&mut self) -> &mut T {
        self.encoder.transport()
    }

    /// Release the transport.
    pub fn release(self) -> T {
        debug!("releasing st7735 transport");
        self.encoder.release()
    }
}

impl<T: Transport> PixelTarget for St7735<T> {
    type Error = DrawError;

    fn pixel(&mut self, p: Point, color: Color) -> Result<(), DrawError> {
        self.draw_pixel(p, color)
    }

    fn fill(&mut self, rect: Rect, color: Color) -> Result<(), DrawError> {
        self.fill_rect(rect, color)
    }
}
