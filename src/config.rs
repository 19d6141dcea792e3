//! System configuration parameters
//!
//! All tunable parameters for the SmartGate system.  There is no persistent
//! store; the defaults below are the shipped calibration and are constructed
//! once at boot.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Gate servo ---
    /// LEDC duty counts for the closed position (≈530 µs pulse at 50 Hz).
    pub servo_closed_duty: u16,
    /// LEDC duty counts for the open position (≈1470 µs pulse at 50 Hz).
    pub servo_open_duty: u16,
    /// Buzzer chirp length when the gate opens (milliseconds).
    pub chirp_duration_ms: u32,
    /// Hold-off after an opening before presence is sampled again (ms).
    pub gate_settle_ms: u32,

    // --- Temperature alert ---
    /// Temperature (integer °C) at or above which an alert session starts.
    pub alert_temp_c: u8,
    /// Total alert session length (milliseconds).
    pub alert_duration_ms: u32,
    /// Buzzer toggle interval during an alert session (milliseconds).
    pub alert_toggle_interval_ms: u32,

    // --- Double-clap switch ---
    /// Second edges at or below this gap are treated as contact bounce (ms).
    pub clap_bounce_ms: u32,
    /// A second clap must land inside this window after the first (ms).
    pub clap_window_ms: u32,

    // --- Timing ---
    /// Climate sensor polling interval (milliseconds).
    pub climate_poll_interval_ms: u32,
    /// Status snapshot refresh interval (milliseconds).
    pub status_refresh_interval_ms: u32,
    /// Heartbeat LED toggle interval (milliseconds).
    pub heartbeat_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Gate servo — duty counts at 14-bit/50 Hz resolution
            servo_closed_duty: 434,
            servo_open_duty: 1204,
            chirp_duration_ms: 200,
            gate_settle_ms: 1000,

            // Temperature alert
            alert_temp_c: 38,
            alert_duration_ms: 5000,
            alert_toggle_interval_ms: 200,

            // Double-clap switch
            clap_bounce_ms: 30,
            clap_window_ms: 200,

            // Timing
            climate_poll_interval_ms: 2000,
            status_refresh_interval_ms: 500,
            heartbeat_interval_ms: 1000,
        }
    }
}
