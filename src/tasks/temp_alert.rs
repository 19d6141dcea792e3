//! Bounded-duration high-temperature alert.
//!
//! When a valid reading reports the temperature at or above the
//! threshold, a session starts: the buzzer runs a square wave (one
//! toggle per interval) until either the session length elapses or the
//! condition clears, whichever comes first.  The output is forced low on
//! every deactivation — the buzzer can never be left keyed by a stale
//! session.
//!
//! If the temperature is still high after a timed-out session, a fresh
//! session starts on the next cycle.

use log::info;

use crate::clock::{elapsed, Ticks};
use crate::sensors::dht11::ClimateReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlertState {
    Inactive,
    Active {
        started_ms: Ticks,
        last_toggle_ms: Ticks,
    },
}

pub struct TempAlert {
    state: AlertState,
    output_on: bool,
    threshold_c: u8,
    duration_ms: u64,
    toggle_interval_ms: u64,
}

impl TempAlert {
    pub fn new(threshold_c: u8, duration_ms: u32, toggle_interval_ms: u32) -> Self {
        Self {
            state: AlertState::Inactive,
            output_on: false,
            threshold_c,
            duration_ms: u64::from(duration_ms),
            toggle_interval_ms: u64::from(toggle_interval_ms),
        }
    }

    /// Advance one cycle against the latest climate reading.
    pub fn tick(&mut self, now_ms: Ticks, reading: ClimateReading) {
        let condition = reading.valid && reading.temperature_int >= self.threshold_c;

        match self.state {
            AlertState::Inactive => {
                if condition {
                    info!(
                        "temp_alert: {} °C >= {} °C, session started",
                        reading.temperature_int, self.threshold_c
                    );
                    self.state = AlertState::Active {
                        started_ms: now_ms,
                        last_toggle_ms: now_ms,
                    };
                    self.output_on = false;
                }
            }

            AlertState::Active {
                started_ms,
                last_toggle_ms,
            } => {
                if !condition {
                    // Condition cleared — overrides the session timer.
                    info!("temp_alert: condition cleared, session stopped");
                    self.deactivate();
                } else if elapsed(now_ms, started_ms) > self.duration_ms {
                    info!("temp_alert: session complete");
                    self.deactivate();
                } else if elapsed(now_ms, last_toggle_ms) >= self.toggle_interval_ms {
                    self.output_on = !self.output_on;
                    self.state = AlertState::Active {
                        started_ms,
                        last_toggle_ms: now_ms,
                    };
                }
            }
        }
    }

    fn deactivate(&mut self) {
        self.state = AlertState::Inactive;
        self.output_on = false;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, AlertState::Active { .. })
    }

    /// Buzzer level requested by the alert.
    pub fn output_on(&self) -> bool {
        self.output_on
    }

    /// Whole seconds left in the running session (rounded up); zero when
    /// inactive.
    pub fn remaining_secs(&self, now_ms: Ticks) -> u64 {
        match self.state {
            AlertState::Inactive => 0,
            AlertState::Active { started_ms, .. } => {
                let run = elapsed(now_ms, started_ms);
                self.duration_ms.saturating_sub(run).div_ceil(1000)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hot(valid: bool, temp: u8) -> ClimateReading {
        ClimateReading {
            humidity_int: 40,
            humidity_frac: 0,
            temperature_int: temp,
            temperature_frac: 0,
            valid,
        }
    }

    fn alert() -> TempAlert {
        TempAlert::new(38, 5000, 200)
    }

    #[test]
    fn stays_inactive_below_threshold() {
        let mut a = alert();
        for t in 0..1000 {
            a.tick(t, hot(true, 37));
        }
        assert!(!a.is_active());
        assert!(!a.output_on());
    }

    #[test]
    fn invalid_reading_never_triggers() {
        let mut a = alert();
        a.tick(0, hot(false, 45));
        assert!(!a.is_active());
    }

    #[test]
    fn session_produces_square_wave() {
        let mut a = alert();
        a.tick(0, hot(true, 40));
        assert!(a.is_active());
        assert!(!a.output_on());
        a.tick(200, hot(true, 40));
        assert!(a.output_on());
        a.tick(400, hot(true, 40));
        assert!(!a.output_on());
    }

    #[test]
    fn sustained_heat_gives_25_toggles_then_forced_off() {
        let mut a = alert();
        let mut toggles = 0u32;
        let mut prev = false;
        for t in 0..=5001u64 {
            a.tick(t, hot(true, 40));
            if a.is_active() && a.output_on() != prev {
                toggles += 1;
                prev = a.output_on();
            }
        }
        assert_eq!(toggles, 25);
        assert!(!a.is_active());
        assert!(!a.output_on());
    }

    #[test]
    fn condition_clear_stops_session_immediately() {
        let mut a = alert();
        a.tick(0, hot(true, 40));
        a.tick(200, hot(true, 40));
        assert!(a.output_on());
        a.tick(201, hot(true, 30));
        assert!(!a.is_active());
        assert!(!a.output_on());
    }

    #[test]
    fn decode_failure_stops_session_immediately() {
        let mut a = alert();
        a.tick(0, hot(true, 40));
        a.tick(200, hot(true, 40));
        a.tick(201, hot(false, 40));
        assert!(!a.is_active());
        assert!(!a.output_on());
    }

    #[test]
    fn rearms_after_timed_out_session() {
        let mut a = alert();
        a.tick(0, hot(true, 40));
        for t in 1..=5001u64 {
            a.tick(t, hot(true, 40));
        }
        assert!(!a.is_active());
        a.tick(5002, hot(true, 40));
        assert!(a.is_active());
    }

    #[test]
    fn remaining_seconds_counts_down() {
        let mut a = alert();
        a.tick(0, hot(true, 40));
        assert_eq!(a.remaining_secs(0), 5);
        assert_eq!(a.remaining_secs(2100), 3);
        assert_eq!(a.remaining_secs(4999), 1);
    }
}
