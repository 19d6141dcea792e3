//! Port traits — the boundary between the control core and the outside
//! world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! The hardware adapter implements the input and actuator sides; the
//! display collaborator implements [`DisplayPort`].  The control loop
//! consumes them via generics and never touches a GPIO directly.

use crate::drivers::servo::GatePosition;
use crate::error::SensorError;
use crate::sensors::dht11::ClimateReading;

use super::status::StatusSnapshot;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the control loop calls this to sample inputs.
pub trait InputPort {
    /// Obstacle presence, polarity-corrected (true = object in beam).
    fn obstacle_present(&mut self) -> bool;

    /// Raw acoustic line level (true = quiet, idle high).
    fn sound_level_high(&mut self) -> bool;

    /// Run one climate frame read.  The cached reading is updated on
    /// success and merely invalidated on failure.
    fn poll_climate(&mut self) -> Result<(), SensorError>;

    /// Latest cached climate reading (possibly stale, see `valid`).
    fn climate_reading(&self) -> ClimateReading;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the control loop calls this to command outputs.
pub trait ActuatorPort {
    /// Command the gate servo to a fixed position.
    fn set_gate(&mut self, position: GatePosition);

    /// Drive the buzzer line.
    fn set_buzzer(&mut self, on: bool);

    /// Drive the clap-switched lamp.
    fn set_lamp(&mut self, on: bool);

    /// Drive the heartbeat LED.
    fn set_heartbeat(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → status collaborator)
// ───────────────────────────────────────────────────────────────

/// The display collaborator receives a full status snapshot on every
/// refresh and owns all formatting and layout decisions.
pub trait DisplayPort {
    fn render(&mut self, snapshot: &StatusSnapshot);
}
