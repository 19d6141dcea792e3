//! Outbound status snapshot.
//!
//! One record per display refresh, carrying everything the display
//! collaborator needs; it decides how to format and lay the fields out.

use serde::Serialize;

/// A point-in-time snapshot of the whole system.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusSnapshot {
    /// False while the last climate poll failed; the numeric fields
    /// below then still hold the previous good reading.
    pub climate_valid: bool,
    pub humidity_int: u8,
    pub humidity_frac: u8,
    pub temperature_int: u8,
    pub temperature_frac: u8,

    /// High-temperature alert session state.
    pub alert_active: bool,
    /// Whole seconds left in the running session (0 when inactive).
    pub alert_remaining_secs: u64,

    pub gate_open: bool,
    pub lamp_on: bool,

    /// True while the clap switch waits for a second clap.
    pub clap_waiting: bool,
    /// Clap session debug counter.
    pub clap_count: u8,

    /// Whole seconds since boot.
    pub uptime_secs: u64,
}
