//! Fake transport used by the unit tests.
use std::vec::Vec;

use crate::error::TransportError;
use crate::interface::Transport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Open,
    Command(u8),
    Data(Vec<u8>),
    Repeat([u8; 2], u32),
    Reset(bool),
    Sleep(u32),
}

/// Records every transport call. Optionally fails on open or when a given
/// command byte goes out.
#[derive(Default)]
pub struct RecordingTransport {
    pub events: Vec<Event>,
    pub fail_open: Option<TransportError>,
    pub fail_on_command: Option<u8>,
    command_mode: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on_command(cmd: u8) -> Self {
        RecordingTransport {
            fail_on_command: Some(cmd),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    Event::Command(_) | Event::Data(_) | Event::Repeat(..)
                )
            })
            .count()
    }

    pub fn commands(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Command(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Decode the recorded stream into the pixels it paints, assuming a
    /// panel that honours the address window protocol.
    pub fn painted(&self) -> Vec<(u16, u16, u16)> {
        let mut out = Vec::new();
        let mut window = (0u16, 0u16, 0u16, 0u16);
        let mut pending: Option<u8> = None;
        let mut cursor: Option<(u16, u16)> = None;
        let mut push = |cursor: &mut Option<(u16, u16)>, window: (u16, u16, u16, u16), px: u16| {
            if let Some((x, y)) = *cursor {
                out.push((x, y, px));
                let (x0, _, x1, _) = window;
                *cursor = if x < x1 {
                    Some((x + 1, y))
                } else {
                    Some((x0, y + 1))
                };
            }
        };
        for e in &self.events {
            match e {
                Event::Command(c) => {
                    pending = Some(*c);
                    if *c == 0x2C {
                        cursor = Some((window.0, window.1));
                    } else {
                        cursor = None;
                    }
                }
                Event::Data(bytes) => match pending {
                    Some(0x2A) => {
                        window.0 = u16::from_be_bytes([bytes[0], bytes[1]]);
                        window.2 = u16::from_be_bytes([bytes[2], bytes[3]]);
                    }
                    Some(0x2B) => {
                        window.1 = u16::from_be_bytes([bytes[0], bytes[1]]);
                        window.3 = u16::from_be_bytes([bytes[2], bytes[3]]);
                    }
                    Some(0x2C) => {
                        for px in bytes.chunks(2) {
                            push(&mut cursor, window, u16::from_be_bytes([px[0], px[1]]));
                        }
                    }
                    _ => {}
                },
                Event::Repeat(px, n) => {
                    for _ in 0..*n {
                        push(&mut cursor, window, u16::from_be_bytes(*px));
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// Painted coordinates only, sorted and deduplicated.
    pub fn painted_points(&self) -> Vec<(u16, u16)> {
        let mut pts: Vec<(u16, u16)> = self.painted().into_iter().map(|(x, y, _)| (x, y)).collect();
        pts.sort_unstable();
        pts.dedup();
        pts
    }
}

impl Transport for RecordingTransport {
    fn open(&mut self) -> Result<(), TransportError> {
        if let Some(e) = self.fail_open {
            return Err(e);
        }
        self.events.push(Event::Open);
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), TransportError> {
        if self.command_mode {
            for &c in data {
                if self.fail_on_command == Some(c) {
                    return Err(TransportError::WriteFailed);
                }
                self.events.push(Event::Command(c));
            }
        } else {
            self.events.push(Event::Data(data.to_vec()));
        }
        Ok(())
    }

    fn write_repeated(&mut self, pixel: [u8; 2], count: u32) -> Result<(), TransportError> {
        self.events.push(Event::Repeat(pixel, count));
        Ok(())
    }

    fn set_command_mode(&mut self, command: bool) {
        self.command_mode = command;
    }

    fn set_reset(&mut self, high: bool) {
        self.events.push(Event::Reset(high));
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.events.push(Event::Sleep(ms));
    }
}

/// Delegates to the inner recorder but keeps the trait's chunked
/// `write_repeated`.
pub struct Chunked(pub RecordingTransport);

impl Transport for Chunked {
    fn open(&mut self) -> Result<(), TransportError> {
        self.0.open()
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.0.write_bytes(data)
    }

    fn set_command_mode(&mut self, command: bool) {
        self.0.set_command_mode(command)
    }

    fn set_reset(&mut self, high: bool) {
        self.0.set_reset(high)
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.0.sleep_ms(ms)
    }
}
