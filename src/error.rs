//! Unified error types for the SmartGate firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! top-level control loop's error handling uniform.  All variants are `Copy`
//! so they can be cheaply passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The climate sensor could not be read or returned a bad frame.
    Sensor(SensorError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Climate sensor errors
// ---------------------------------------------------------------------------

/// Failure modes of a single-wire frame read.
///
/// All of them leave the previously stored reading untouched; the control
/// loop retries on its normal polling cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor never answered the request (a handshake wait phase
    /// exhausted its spin budget).
    HandshakeTimeout,
    /// A bit-level wait phase exhausted its spin budget mid-frame.
    BitTimeout,
    /// The frame arrived but its checksum does not match the payload.
    ChecksumMismatch,
    /// The GPIO line itself reported an error.
    LineFault,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HandshakeTimeout => write!(f, "no response to frame request"),
            Self::BitTimeout => write!(f, "bit timing violation mid-frame"),
            Self::ChecksumMismatch => write!(f, "frame checksum mismatch"),
            Self::LineFault => write!(f, "data line fault"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
