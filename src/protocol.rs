//! Command/data framing on top of a [`Transport`].
use log::trace;

use crate::cmd::Cmd;
use crate::color::Color;
use crate::error::TransportError;
use crate::interface::Transport;

/// Pixels staged per bus write when streaming a buffer.
const PIXEL_CHUNK: usize = 32;

/// Frames controller commands and their payloads.
///
/// Errors from the transport are passed through unchanged.
pub struct Encoder<T> {
    transport: T,
}

impl<T: Transport> Encoder<T> {
    /// Wrap a transport
    pub fn new(transport: T) -> Self {
        Encoder { transport }
    }

    /// Direct access to the transport for open/reset/delay.
    pub fn transport(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    /// Send a single command byte
    pub fn send_command(&mut self, cmd: u8) -> Result<(), TransportError> {
        self.transport.set_command_mode(true);
        self.transport.write_bytes(&[cmd])
    }

    /// Send payload bytes
    pub fn send_data(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.transport.set_command_mode(false);
        self.transport.write_bytes(data)
    }

    /// Command followed by its payload; an empty payload sends the command alone.
    pub fn send_command_with_data(&mut self, cmd: u8, data: &[u8]) -> Result<(), TransportError> {
        self.send_command(cmd)?;
        if data.is_empty() {
            return Ok(());
        }
        self.send_data(data)
    }

    /// Prime the controller to receive pixels for the inclusive window
    /// `(x0, y0)..=(x1, y1)`, row-major from `(x0, y0)`.
    ///
    /// Coordinates go out big-endian, high byte first: column window, then
    /// row window, then MEMORY_WRITE.
    pub fn set_address_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), TransportError> {
        trace!("address window: x {}-{}, y {}-{}", x0, x1, y0, y1);
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        self.send_command_with_data(Cmd::COLUMN_ADDRESS_SET, &[x0h, x0l, x1h, x1l])?;

        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        self.send_command_with_data(Cmd::ROW_ADDRESS_SET, &[y0h, y0l, y1h, y1l])?;

        self.send_command(Cmd::MEMORY_WRITE)
    }

    /// Stream one color `count` times.
    pub fn send_repeated(&mut self, color: Color, count: u32) -> Result<(), TransportError> {
        self.transport.set_command_mode(false);
        self.transport.write_repeated(color.to_be_bytes(), count)
    }

    /// Stream pixels in order, two bytes each, high byte first.
    pub fn send_pixels<I>(&mut self, pixels: I) -> Result<(), TransportError>
    where
        I: IntoIterator<Item = Color>,
    {
        self.transport.set_command_mode(false);
        let mut buf = [0u8; PIXEL_CHUNK * 2];
        let mut len = 0;
        for color in pixels {
            buf[len..len + 2].copy_from_slice(&color.to_be_bytes());
            len += 2;
            if len == buf.len() {
                self.transport.write_bytes(&buf)?;
                len = 0;
            }
        }
        if len > 0 {
            self.transport.write_bytes(&buf[..len])?;
        }
        Ok(())
    }
}
