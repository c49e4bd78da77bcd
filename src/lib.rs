//! ST7735 TFT Display Driver
//!
//! Drives 128x160 ST7735 / ST7735R panels over SPI in 16-bit RGB565 mode
//! and draws on them directly: there is no frame buffer, every primitive
//! goes to the controller's RAM through an address window.
//!
//! ## Architecture
//!
//! The driver is layered so each part can be swapped or tested on its own:
//! - **Transport** ([`interface::Transport`]) moves bytes and toggles the
//!   data/command and reset lines. [`interface::SpiInterface`] wraps any
//!   embedded-hal 1.0 bus; with the `linux` feature,
//!   `interface::linux::LinuxInterface` opens spidev and GPIO by itself.
//! - **Protocol** ([`protocol::Encoder`]) frames commands, payloads and
//!   address windows.
//! - **Controller** ([`driver::St7735`]) runs the init sequence, tracks
//!   lifecycle state and clips every draw to the panel.
//! - **Rasterizer** ([`raster`]) turns lines, circles and text into pixel
//!   writes and runs.
//! - **Session** ([`session::Session`]) adds a cursor, brush, tools and
//!   undo on top of the controller.
//!
//! ## Usage
//!
//! ```rust, ignore
//! use st7735_draw::prelude::*;
//!
//! let transport = SpiInterface::new(spi, dc, rst, delay);
//! let mut display = St7735::new(transport, Config::default().rotation(Rotation::Rotate90));
//! display.init()?;
//!
//! display.clear_screen(Color::BLACK)?;
//! display.fill_rect(Rect::new(10, 10, 40, 20), Color::RED)?;
//! display.draw_circle(Point::new(80, 64), 30, st7735_draw::color::pack(0, 128, 255))?;
//! ```
//!
//! With the `graphics` feature (on by default) the controller is also an
//! `embedded-graphics` `DrawTarget<Color = Rgb565>`.
//!
#![no_std]
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

#[cfg(test)]
extern crate std;

mod cmd;
pub mod color;
pub mod driver;
pub mod error;
pub mod font;
pub mod geometry;
#[cfg(feature = "graphics")]
pub mod graphics;

mod flag;

pub mod interface;
pub mod protocol;
pub mod raster;
pub mod session;

#[cfg(test)]
mod testing;

/// Useful exports
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::driver::{Config, Rotation, State, St7735};
    pub use crate::error::{DrawError, InitError, TransportError};
    pub use crate::font::Font;
    pub use crate::geometry::{Point, Rect};
    pub use crate::interface::{SpiInterface, Transport};
    pub use crate::session::{Mark, Session, Tool};

    #[cfg(feature = "linux")]
    pub use crate::interface::linux::{LinuxConfig, LinuxInterface};
}
