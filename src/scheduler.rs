//! Cooperative scheduler — rate gates and the per-iteration control flow.
//!
//! The main loop is a plain polling superloop: every iteration reads the
//! clock once and advances each task in a fixed order.  Low-frequency
//! work (climate polling, status refresh, heartbeat) sits behind
//! [`Cadence`] gates; everything else runs every cycle.  There is no
//! priority scheme beyond declaration order, and nothing here blocks.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  run_once(now)                                               │
//! │                                                              │
//! │  heartbeat (1 s gate)                                        │
//! │  climate poll (2 s gate) ──▶ cached ClimateReading           │
//! │  temp alert tick ──────────▶ buzzer (alert square wave)      │
//! │  gate tick ────────────────▶ servo + buzzer (chirp)          │
//! │  clap tick ────────────────▶ lamp                            │
//! │  status refresh (500 ms gate) ──▶ DisplayPort                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cadences are best-effort: an iteration inflated by a slow climate
//! read delays downstream gates by that iteration's length, never more.

use log::{info, warn};

use crate::app::ports::{ActuatorPort, DisplayPort, InputPort};
use crate::app::status::StatusSnapshot;
use crate::clock::{elapsed, Ticks};
use crate::config::SystemConfig;
use crate::tasks::clap::ClapSwitch;
use crate::tasks::gate::GateControl;
use crate::tasks::temp_alert::TempAlert;

// ═══════════════════════════════════════════════════════════════
//  Rate gate
// ═══════════════════════════════════════════════════════════════

/// Elapsed-time gate for a low-frequency task.
///
/// `ready()` answers at most once per period and stamps the fire time,
/// using wrapping subtraction so counter wraparound cannot wedge it.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    period_ms: u64,
    last_ms: Ticks,
}

impl Cadence {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: u64::from(period_ms),
            last_ms: 0,
        }
    }

    /// True when a full period has elapsed since the last fire; stamps
    /// the new fire time when it answers true.
    pub fn ready(&mut self, now_ms: Ticks) -> bool {
        if elapsed(now_ms, self.last_ms) >= self.period_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Control loop
// ═══════════════════════════════════════════════════════════════

/// Owns every state machine and runs one scheduler iteration at a time.
///
/// All I/O flows through the port traits, so the whole loop runs against
/// mock adapters on the host.
pub struct ControlLoop {
    gate: GateControl,
    alert: TempAlert,
    clap: ClapSwitch,
    climate_cadence: Cadence,
    status_cadence: Cadence,
    heartbeat_cadence: Cadence,
    heartbeat_on: bool,
}

impl ControlLoop {
    pub fn new(config: &SystemConfig) -> Self {
        info!(
            "scheduler: climate every {} ms, status every {} ms",
            config.climate_poll_interval_ms, config.status_refresh_interval_ms
        );
        Self {
            gate: GateControl::new(config.chirp_duration_ms, config.gate_settle_ms),
            alert: TempAlert::new(
                config.alert_temp_c,
                config.alert_duration_ms,
                config.alert_toggle_interval_ms,
            ),
            clap: ClapSwitch::new(config.clap_bounce_ms, config.clap_window_ms),
            climate_cadence: Cadence::new(config.climate_poll_interval_ms),
            status_cadence: Cadence::new(config.status_refresh_interval_ms),
            heartbeat_cadence: Cadence::new(config.heartbeat_interval_ms),
            heartbeat_on: false,
        }
    }

    /// One full scheduler iteration at clock time `now_ms`.
    pub fn run_once(
        &mut self,
        now_ms: Ticks,
        hw: &mut (impl InputPort + ActuatorPort),
        display: &mut impl DisplayPort,
    ) {
        // Heartbeat — visual confirmation that the loop and clock run.
        if self.heartbeat_cadence.ready(now_ms) {
            self.heartbeat_on = !self.heartbeat_on;
            hw.set_heartbeat(self.heartbeat_on);
        }

        // Climate poll.  Failures are absorbed here; the cached reading
        // keeps its last good values with the validity flag dropped.
        if self.climate_cadence.ready(now_ms) {
            if let Err(e) = hw.poll_climate() {
                warn!("climate: {e} — retrying next cycle");
            }
        }
        let reading = hw.climate_reading();

        // Temperature alert.
        self.alert.tick(now_ms, reading);

        // Gate control.  The alert owns the buzzer while it runs, so the
        // gate machine is told to skip its chirp.
        let present = hw.obstacle_present();
        self.gate.tick(now_ms, present, self.alert.is_active());
        hw.set_gate(self.gate.position());
        hw.set_buzzer(self.alert.output_on() || self.gate.chirp_on());

        // Clap switch.
        let level = hw.sound_level_high();
        self.clap.tick(now_ms, level);
        hw.set_lamp(self.clap.lamp_on());

        // Status refresh for the display collaborator.
        if self.status_cadence.ready(now_ms) {
            let snapshot = self.build_snapshot(now_ms, reading);
            display.render(&snapshot);
        }
    }

    fn build_snapshot(
        &self,
        now_ms: Ticks,
        reading: crate::sensors::dht11::ClimateReading,
    ) -> StatusSnapshot {
        StatusSnapshot {
            climate_valid: reading.valid,
            humidity_int: reading.humidity_int,
            humidity_frac: reading.humidity_frac,
            temperature_int: reading.temperature_int,
            temperature_frac: reading.temperature_frac,
            alert_active: self.alert.is_active(),
            alert_remaining_secs: self.alert.remaining_secs(now_ms),
            gate_open: self.gate.is_open(),
            lamp_on: self.clap.lamp_on(),
            clap_waiting: self.clap.waiting(),
            clap_count: self.clap.clap_count(),
            uptime_secs: now_ms / 1000,
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_holds_until_period_elapses() {
        let mut c = Cadence::new(500);
        assert!(!c.ready(100));
        assert!(!c.ready(499));
        assert!(c.ready(500));
    }

    #[test]
    fn cadence_stamps_on_fire() {
        let mut c = Cadence::new(500);
        assert!(c.ready(600));
        assert!(!c.ready(900));
        assert!(c.ready(1100));
    }

    #[test]
    fn cadence_survives_counter_wraparound() {
        let mut c = Cadence::new(1000);
        let near_wrap = Ticks::MAX - 200;
        assert!(c.ready(near_wrap));
        // 600 ms later, across the wrap point: not yet.
        assert!(!c.ready(near_wrap.wrapping_add(600)));
        // 1100 ms later: due.
        assert!(c.ready(near_wrap.wrapping_add(1100)));
    }

    #[test]
    fn cadence_fires_once_per_period_under_fast_polling() {
        let mut c = Cadence::new(100);
        let mut fires = 0;
        for now in 0..=1000u64 {
            if c.ready(now) {
                fires += 1;
            }
        }
        assert_eq!(fires, 10);
    }
}
