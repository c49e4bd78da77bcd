//! Byte transport between the driver and the panel.
//!
//! A [`Transport`] owns the serial write channel plus the data/command and
//! reset lines. It knows nothing about drawing: [`crate::protocol`] decides
//! which bytes are commands and which are payload.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use log::debug;

use crate::error::TransportError;

#[cfg(feature = "linux")]
pub mod linux;

/// Bytes staged on the stack per bus write when repeating a pixel.
const REPEAT_CHUNK: usize = 64;

/// Duplex serial channel with data/command select and hardware reset lines.
///
/// Everything blocks until the bus transaction completes. Implementations
/// hold no locks; a single owner drives them.
pub trait Transport {
    /// Claim the channel and drive both control lines to output mode.
    fn open(&mut self) -> Result<(), TransportError>;

    /// Blocking write of the whole buffer.
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Write `pixel` `count` times back to back.
    ///
    /// Line state is not touched between chunks, so the panel sees one
    /// uninterrupted data stream.
    fn write_repeated(&mut self, pixel: [u8; 2], count: u32) -> Result<(), TransportError> {
        let mut chunk = [0u8; REPEAT_CHUNK];
        for pair in chunk.chunks_exact_mut(2) {
            pair.copy_from_slice(&pixel);
        }
        let per_chunk = (REPEAT_CHUNK / 2) as u32;
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(per_chunk);
            self.write_bytes(&chunk[..n as usize * 2])?;
            remaining -= n;
        }
        Ok(())
    }

    /// Select command (`true`) or data (`false`) for the following bytes.
    fn set_command_mode(&mut self, command: bool);

    /// Drive the reset line; `false` holds the controller in reset.
    fn set_reset(&mut self, high: bool);

    /// Blocking delay.
    fn sleep_ms(&mut self, ms: u32);
}

/// [`Transport`] over embedded-hal SPI, GPIO and delay implementations.
///
/// Chip select is handled by the [`SpiDevice`].
pub struct SpiInterface<SPI, DC, RST, DELAY> {
    spi: SPI,
    dc: DC,
    rst: RST,
    delay: DELAY,
}

impl<SPI, DC, RST, DELAY> SpiInterface<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Wrap already constructed peripherals. No bus traffic happens here.
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: DELAY) -> Self {
        SpiInterface {
            spi,
            dc,
            rst,
            delay,
        }
    }

    /// Give the peripherals back.
    pub fn release(self) -> (SPI, DC, RST, DELAY) {
        (self.spi, self.dc, self.rst, self.delay)
    }
}

impl<SPI, DC, RST, DELAY> Transport for SpiInterface<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn open(&mut self) -> Result<(), TransportError> {
        debug!("driving dc and rst lines high");
        self.dc
            .set_high()
            .map_err(|_| TransportError::LineUnavailable)?;
        self.rst
            .set_high()
            .map_err(|_| TransportError::LineUnavailable)
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.spi.write(data).map_err(|_| TransportError::WriteFailed)
    }

    fn set_command_mode(&mut self, command: bool) {
        // line errors surface during open()
        let _ = if command {
            self.dc.set_low()
        } else {
            self.dc.set_high()
        };
    }

    fn set_reset(&mut self, high: bool) {
        let _ = if high {
            self.rst.set_high()
        } else {
            self.rst.set_low()
        };
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Chunked, Event, RecordingTransport};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
    use std::vec;

    #[test]
    fn open_drives_both_lines_high() {
        let mut spi = SpiMock::<u8>::new(&[]);
        let mut dc = PinMock::new(&[PinTransaction::set(State::High)]);
        let mut rst = PinMock::new(&[PinTransaction::set(State::High)]);

        let mut iface = SpiInterface::new(spi.clone(), dc.clone(), rst.clone(), NoopDelay::new());
        iface.open().unwrap();

        spi.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn command_then_data_toggles_dc() {
        let mut spi = SpiMock::new(&[
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x3A]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x05]),
            SpiTransaction::transaction_end(),
        ]);
        let mut dc = PinMock::new(&[
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);
        let mut rst = PinMock::new(&[]);

        let mut iface = SpiInterface::new(spi.clone(), dc.clone(), rst.clone(), NoopDelay::new());
        iface.set_command_mode(true);
        iface.write_bytes(&[0x3A]).unwrap();
        iface.set_command_mode(false);
        iface.write_bytes(&[0x05]).unwrap();

        spi.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn reset_line_follows_requested_level() {
        let mut spi = SpiMock::<u8>::new(&[]);
        let mut dc = PinMock::new(&[]);
        let mut rst = PinMock::new(&[
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);

        let mut iface = SpiInterface::new(spi.clone(), dc.clone(), rst.clone(), NoopDelay::new());
        iface.set_reset(false);
        iface.sleep_ms(10);
        iface.set_reset(true);

        spi.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn fill_rect_streams_with_dc_high_after_memory_write() {
        use crate::color::Color;
        use crate::driver::{Config, St7735};
        use crate::geometry::Rect;

        // 40 pixels: one full 64-byte chunk, then 16 bytes
        let mut spi = SpiMock::new(&[
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x2A]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x00, 0x00, 0x00, 0x27]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x2B]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x00, 0x05, 0x00, 0x05]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x2C]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec([0xF8u8, 0x00].repeat(32)),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec([0xF8u8, 0x00].repeat(8)),
            SpiTransaction::transaction_end(),
        ]);
        let mut dc = PinMock::new(&[
            // open
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            // pixel stream: one switch to data, none during it
            PinTransaction::set(State::High),
        ]);
        let mut rst = PinMock::new(&[PinTransaction::set(State::High)]);

        let iface = SpiInterface::new(spi.clone(), dc.clone(), rst.clone(), NoopDelay::new());
        let mut display = St7735::new(iface, Config::default().init_sequence(&[]));
        display.init().unwrap();
        display
            .fill_rect(Rect::new(0, 5, 40, 1), Color::RED)
            .unwrap();

        spi.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn default_repeat_splits_into_whole_pixels() {
        let mut t = Chunked(RecordingTransport::new());
        t.set_command_mode(false);
        t.write_repeated([0xAB, 0xCD], 40).unwrap();

        let total: usize = t
            .0
            .events
            .iter()
            .map(|e| match e {
                Event::Data(bytes) => {
                    assert_eq!(bytes.len() % 2, 0);
                    assert!(bytes.chunks(2).all(|p| p == [0xAB, 0xCD]));
                    bytes.len()
                }
                other => panic!("unexpected {other:?}"),
            })
            .sum();
        assert_eq!(total, 80);
    }
}
