//! Linux spidev + GPIO character device transport.
//!
//! Nothing is claimed until [`Transport::open`]. Any line or device
//! acquired before a failure is dropped again, so a failed open leaves no
//! resources held and can simply be retried.
use linux_embedded_hal::{
    gpio_cdev::{Chip, LineRequestFlags},
    spidev::{SpiModeFlags, SpidevOptions},
    CdevPin, Delay, SpidevDevice,
};
use log::debug;

use super::{SpiInterface, Transport};
use crate::error::TransportError;

/// Where the panel is wired on the host.
#[derive(Clone, Debug)]
pub struct LinuxConfig {
    /// spidev node, chip select included
    pub spi_path: &'static str,
    /// GPIO character device
    pub gpiochip_path: &'static str,
    /// Data/command line offset
    pub dc_line: u32,
    /// Reset line offset
    pub reset_line: u32,
    /// Bus clock
    pub speed_hz: u32,
    /// Bus mode
    pub mode: SpiModeFlags,
}

impl Default for LinuxConfig {
    fn default() -> Self {
        LinuxConfig {
            spi_path: "/dev/spidev0.0",
            gpiochip_path: "/dev/gpiochip0",
            dc_line: 24,
            reset_line: 25,
            speed_hz: 8_000_000,
            mode: SpiModeFlags::SPI_MODE_0,
        }
    }
}

type Bus = SpiInterface<SpidevDevice, CdevPin, CdevPin, Delay>;

/// [`Transport`] that opens spidev and the control lines on demand.
pub struct LinuxInterface {
    config: LinuxConfig,
    bus: Option<Bus>,
    delay: Delay,
}

impl LinuxInterface {
    /// Transport for `config`; no device is touched yet.
    pub fn new(config: LinuxConfig) -> Self {
        LinuxInterface {
            config,
            bus: None,
            delay: Delay,
        }
    }

    /// Whether `open()` has succeeded
    pub fn is_open(&self) -> bool {
        self.bus.is_some()
    }

    fn output(chip: &mut Chip, offset: u32, high: bool, label: &str) -> Result<CdevPin, TransportError> {
        let handle = chip
            .get_line(offset)
            .and_then(|line| line.request(LineRequestFlags::OUTPUT, u8::from(high), label))
            .map_err(|_| TransportError::LineUnavailable)?;
        CdevPin::new(handle).map_err(|_| TransportError::LineUnavailable)
    }

    fn acquire(&self) -> Result<Bus, TransportError> {
        let c = &self.config;
        debug!("opening {} at {} Hz", c.spi_path, c.speed_hz);
        let mut spi = SpidevDevice::open(c.spi_path).map_err(|_| TransportError::DeviceUnavailable)?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(c.speed_hz)
            .mode(c.mode)
            .build();
        spi.configure(&options)
            .map_err(|_| TransportError::DeviceUnavailable)?;

        debug!(
            "claiming dc={} rst={} on {}",
            c.dc_line, c.reset_line, c.gpiochip_path
        );
        let mut chip = Chip::new(c.gpiochip_path).map_err(|_| TransportError::LineUnavailable)?;
        let dc = Self::output(&mut chip, c.dc_line, true, "st7735-dc")?;
        let rst = Self::output(&mut chip, c.reset_line, true, "st7735-rst")?;

        Ok(SpiInterface::new(spi, dc, rst, Delay))
    }
}

impl Transport for LinuxInterface {
    fn open(&mut self) -> Result<(), TransportError> {
        if self.bus.is_none() {
            self.bus = Some(self.acquire()?);
        }
        match self.bus.as_mut() {
            Some(bus) => bus.open(),
            None => Err(TransportError::DeviceUnavailable),
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.bus
            .as_mut()
            .ok_or(TransportError::DeviceUnavailable)?
            .write_bytes(data)
    }

    fn write_repeated(&mut self, pixel: [u8; 2], count: u32) -> Result<(), TransportError> {
        self.bus
            .as_mut()
            .ok_or(TransportError::DeviceUnavailable)?
            .write_repeated(pixel, count)
    }

    fn set_command_mode(&mut self, command: bool) {
        if let Some(bus) = self.bus.as_mut() {
            bus.set_command_mode(command);
        }
    }

    fn set_reset(&mut self, high: bool) {
        if let Some(bus) = self.bus.as_mut() {
            bus.set_reset(high);
        }
    }

    fn sleep_ms(&mut self, ms: u32) {
        use embedded_hal::delay::DelayNs;
        self.delay.delay_ms(ms);
    }
}
