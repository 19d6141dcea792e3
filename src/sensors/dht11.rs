//! Single-wire climate sensor driver (DHT11 class).
//!
//! One bidirectional open-drain data line carries a fixed
//! request/response/data sequence: the controller holds the line low for
//! 20 ms to request a frame, releases it, and the sensor answers with a
//! three-phase handshake followed by 40 bits — humidity int/frac,
//! temperature int/frac, checksum — each bit encoded in the duration of
//! its high phase.
//!
//! Every wait phase is a bounded 1 µs poll.  A sensor that stops
//! answering produces a typed timeout instead of wedging the control
//! loop; the stored reading is simply marked invalid until the next
//! successful poll.
//!
//! The driver is generic over [`InputPin`] + [`OutputPin`] for the line
//! and [`DelayNs`] for the microsecond delays, so the whole protocol is
//! exercised on the host against a scripted line.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::SensorError;

// ── Protocol timing ───────────────────────────────────────────

/// Request: hold the line low this long to wake the sensor.
const REQUEST_LOW_MS: u32 = 20;
/// Request: released (pulled-up) time before the sensor may answer.
const REQUEST_RELEASE_US: u32 = 30;
/// Delay from a bit's rising edge to its sample point.  A zero bit has
/// dropped again by now; a one bit is still high.
const BIT_SAMPLE_DELAY_US: u32 = 30;
/// Poll step inside every wait phase.
const POLL_STEP_US: u32 = 1;
/// Spin budget per handshake wait phase (nominal phases are ~80 µs).
const HANDSHAKE_BUDGET_US: u32 = 300;
/// Spin budget per bit-level wait phase (nominal phases are ≤ 70 µs).
const BIT_BUDGET_US: u32 = 200;

// ── Frame ─────────────────────────────────────────────────────

/// One raw five-byte frame as received off the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub humidity_int: u8,
    pub humidity_frac: u8,
    pub temperature_int: u8,
    pub temperature_frac: u8,
    pub checksum: u8,
}

impl Frame {
    pub fn from_bytes(bytes: [u8; 5]) -> Self {
        Self {
            humidity_int: bytes[0],
            humidity_frac: bytes[1],
            temperature_int: bytes[2],
            temperature_frac: bytes[3],
            checksum: bytes[4],
        }
    }

    /// The checksum is the wrapping 8-bit sum of the four payload bytes.
    pub fn checksum_ok(&self) -> bool {
        let sum = self
            .humidity_int
            .wrapping_add(self.humidity_frac)
            .wrapping_add(self.temperature_int)
            .wrapping_add(self.temperature_frac);
        sum == self.checksum
    }
}

// ── Wire driver ───────────────────────────────────────────────

pub struct Dht11<Line, Delay> {
    line: Line,
    delay: Delay,
}

impl<Line, Delay> Dht11<Line, Delay>
where
    Line: InputPin + OutputPin,
    Delay: DelayNs,
{
    pub fn new(line: Line, delay: Delay) -> Self {
        Self { line, delay }
    }

    /// Run one full request/response/data sequence and return the frame.
    ///
    /// Fails with a typed [`SensorError`] on any timing violation or a
    /// checksum mismatch; the caller decides what to retain.
    pub fn read_frame(&mut self) -> Result<Frame, SensorError> {
        self.request()?;
        self.handshake()?;

        let mut bytes = [0u8; 5];
        for byte in &mut bytes {
            *byte = self.read_byte()?;
        }

        let frame = Frame::from_bytes(bytes);
        if frame.checksum_ok() {
            Ok(frame)
        } else {
            Err(SensorError::ChecksumMismatch)
        }
    }

    /// Wake the sensor: 20 ms low, then release and give the pull-up
    /// at least 30 µs before expecting a response.
    fn request(&mut self) -> Result<(), SensorError> {
        self.line.set_low().map_err(|_| SensorError::LineFault)?;
        self.delay.delay_ms(REQUEST_LOW_MS);
        // Open-drain: writing high releases the line to the pull-up.
        self.line.set_high().map_err(|_| SensorError::LineFault)?;
        self.delay.delay_us(REQUEST_RELEASE_US);
        Ok(())
    }

    /// Response handshake: the sensor acknowledges with low → high →
    /// low, each phase nominally 80 µs.
    fn handshake(&mut self) -> Result<(), SensorError> {
        self.wait_for_level(false, HANDSHAKE_BUDGET_US, SensorError::HandshakeTimeout)?;
        self.wait_for_level(true, HANDSHAKE_BUDGET_US, SensorError::HandshakeTimeout)?;
        self.wait_for_level(false, HANDSHAKE_BUDGET_US, SensorError::HandshakeTimeout)?;
        Ok(())
    }

    /// Receive one byte, MSB first.  Each bit: low preamble, then a high
    /// phase whose length encodes the value — sampled a fixed 30 µs
    /// after the rising edge.
    fn read_byte(&mut self) -> Result<u8, SensorError> {
        let mut byte = 0u8;
        for _ in 0..8 {
            self.wait_for_level(true, BIT_BUDGET_US, SensorError::BitTimeout)?;
            self.delay.delay_us(BIT_SAMPLE_DELAY_US);
            let bit = self.line.is_high().map_err(|_| SensorError::LineFault)?;
            byte = (byte << 1) | u8::from(bit);
            self.wait_for_level(false, BIT_BUDGET_US, SensorError::BitTimeout)?;
        }
        Ok(byte)
    }

    /// Poll until the line reaches `level`, or fail with `on_timeout`
    /// once the spin budget is exhausted.
    fn wait_for_level(
        &mut self,
        level: bool,
        budget_us: u32,
        on_timeout: SensorError,
    ) -> Result<(), SensorError> {
        let mut waited = 0u32;
        loop {
            let high = self.line.is_high().map_err(|_| SensorError::LineFault)?;
            if high == level {
                return Ok(());
            }
            if waited >= budget_us {
                return Err(on_timeout);
            }
            self.delay.delay_us(POLL_STEP_US);
            waited += POLL_STEP_US;
        }
    }
}

// ── Reading cache ─────────────────────────────────────────────

/// Latest decoded climate values plus a validity flag.
///
/// On a failed poll the numeric fields keep their previous values and
/// only `valid` drops — stale data stays on display rather than
/// flashing to zero every transient glitch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClimateReading {
    pub humidity_int: u8,
    pub humidity_frac: u8,
    pub temperature_int: u8,
    pub temperature_frac: u8,
    pub valid: bool,
}

/// Owns the wire driver and the last reading.
pub struct ClimateSensor<Line, Delay> {
    dht: Dht11<Line, Delay>,
    reading: ClimateReading,
}

impl<Line, Delay> ClimateSensor<Line, Delay>
where
    Line: InputPin + OutputPin,
    Delay: DelayNs,
{
    pub fn new(line: Line, delay: Delay) -> Self {
        Self {
            dht: Dht11::new(line, delay),
            reading: ClimateReading::default(),
        }
    }

    /// Attempt one frame read, updating the cached reading.
    pub fn poll(&mut self) -> Result<(), SensorError> {
        match self.dht.read_frame() {
            Ok(frame) => {
                self.reading = ClimateReading {
                    humidity_int: frame.humidity_int,
                    humidity_frac: frame.humidity_frac,
                    temperature_int: frame.temperature_int,
                    temperature_frac: frame.temperature_frac,
                    valid: true,
                };
                Ok(())
            }
            Err(e) => {
                self.reading.valid = false;
                Err(e)
            }
        }
    }

    pub fn reading(&self) -> ClimateReading {
        self.reading
    }
}

// ── Hardware line + delay ─────────────────────────────────────

/// The physical open-drain data line, pre-configured by hw_init.
pub struct ClimateLine;

impl embedded_hal::digital::ErrorType for ClimateLine {
    type Error = core::convert::Infallible;
}

impl OutputPin for ClimateLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        crate::drivers::hw_init::gpio_write(crate::pins::CLIMATE_DATA_GPIO, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        crate::drivers::hw_init::gpio_write(crate::pins::CLIMATE_DATA_GPIO, true);
        Ok(())
    }
}

impl InputPin for ClimateLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(crate::drivers::hw_init::gpio_read(crate::pins::CLIMATE_DATA_GPIO))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!crate::drivers::hw_init::gpio_read(crate::pins::CLIMATE_DATA_GPIO))
    }
}

/// Calibrated spin-loop delay (ROM delay on the device, thread sleep on
/// the host).
pub struct SpinDelay;

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        crate::drivers::hw_init::delay_us(ns.div_ceil(1000));
    }
}

// ── Tests ─────────────────────────────────────────────────────
