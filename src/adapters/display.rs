//! Log-based display adapter.
//!
//! Implements [`DisplayPort`] by writing the formatted status lines to
//! the logger (UART / USB-CDC in production).  A character-display
//! adapter would implement the same trait and own its cursor layout; the
//! control loop does not care which one is wired in.
//!
//! Lines are formatted into fixed-capacity buffers — nothing on the
//! refresh path allocates.

use core::fmt::Write;

use heapless::String;
use log::info;

use crate::app::ports::DisplayPort;
use crate::app::status::StatusSnapshot;

/// Adapter that renders every status snapshot to the serial console.
pub struct LogDisplay;

impl LogDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayPort for LogDisplay {
    fn render(&mut self, snapshot: &StatusSnapshot) {
        let mut climate: String<64> = String::new();
        if snapshot.climate_valid {
            let _ = write!(
                climate,
                "T={}.{}C H={}.{}%",
                snapshot.temperature_int,
                snapshot.temperature_frac,
                snapshot.humidity_int,
                snapshot.humidity_frac,
            );
        } else {
            let _ = write!(climate, "climate: no reading");
        }

        let mut state: String<64> = String::new();
        let _ = write!(
            state,
            "gate={} lamp={}",
            if snapshot.gate_open { "OPEN" } else { "CLOSED" },
            if snapshot.lamp_on { "on" } else { "off" },
        );
        if snapshot.alert_active {
            let _ = write!(state, " ALERT:{}s", snapshot.alert_remaining_secs);
        }
        if snapshot.clap_waiting {
            let _ = write!(state, " clap:wait2nd");
        } else if snapshot.clap_count > 0 {
            let _ = write!(state, " clap:{}", snapshot.clap_count);
        }

        info!(
            "STATUS | {} | {} | up={}s",
            climate, state, snapshot.uptime_secs
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> StatusSnapshot {
        StatusSnapshot {
            climate_valid: true,
            humidity_int: 55,
            humidity_frac: 0,
            temperature_int: 24,
            temperature_frac: 3,
            alert_active: false,
            alert_remaining_secs: 0,
            gate_open: false,
            lamp_on: false,
            clap_waiting: false,
            clap_count: 0,
            uptime_secs: 12,
        }
    }

    #[test]
    fn render_never_overflows_buffers() {
        // Worst-case field widths must fit the fixed buffers.
        let mut d = LogDisplay::new();
        let mut s = snapshot();
        s.humidity_int = 255;
        s.humidity_frac = 255;
        s.temperature_int = 255;
        s.temperature_frac = 255;
        s.alert_active = true;
        s.alert_remaining_secs = u64::MAX;
        s.clap_waiting = true;
        s.uptime_secs = u64::MAX;
        d.render(&s);
    }
}
