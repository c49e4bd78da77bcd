//! Error types for the transport, init sequence and drawing calls
use core::fmt;

use crate::driver::InitStage;

/// Failures at the physical bus / control line boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportError {
    /// The serial channel could not be claimed
    DeviceUnavailable,
    /// The data/command or reset line could not be claimed or driven
    LineUnavailable,
    /// A bus write failed or was cut short
    WriteFailed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::DeviceUnavailable => f.write_str("serial device unavailable"),
            TransportError::LineUnavailable => f.write_str("control line unavailable"),
            TransportError::WriteFailed => f.write_str("bus write failed"),
        }
    }
}

/// Initialization failed at `stage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitError {
    /// Stage that was running when the transport failed
    pub stage: InitStage,
    /// Underlying transport failure
    pub source: TransportError,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "display init failed during {:?}: {}", self.stage, self.source)
    }
}

/// Failures returned by drawing calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawError {
    /// `init()` has not completed successfully
    NotInitialized,
    /// Text was drawn with no font selected
    NoFont,
    /// The transport failed mid-draw; the panel may hold a partial update
    Transport(TransportError),
}

impl From<TransportError> for DrawError {
    fn from(e: TransportError) -> Self {
        DrawError::Transport(e)
    }
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::NotInitialized => f.write_str("display not initialized"),
            DrawError::NoFont => f.write_str("no font selected"),
            DrawError::Transport(e) => write!(f, "draw failed: {e}"),
        }
    }
}
