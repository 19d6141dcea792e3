//! Obstacle-triggered gate control.
//!
//! Samples the presence input every cycle while monitoring.  A fresh
//! detection (edge from clear to present) opens the gate and — unless a
//! temperature alert owns the buzzer — starts a short chirp, followed by
//! a settle window during which presence is not re-sampled.  While the
//! beam is clear the gate is commanded closed on every cycle, not just
//! on the releasing edge.
//!
//! The chirp and settle windows are timed states rather than blocking
//! delays, so the rest of the loop keeps its cadence while they run.

use log::info;

use crate::clock::{elapsed, Ticks};
use crate::drivers::servo::GatePosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    /// Sampling presence every cycle.
    Monitoring,
    /// Gate just opened; buzzer chirping.
    Chirping { since_ms: Ticks },
    /// Post-opening hold-off; presence sampling suspended.
    Settling { since_ms: Ticks },
}

pub struct GateControl {
    state: GateState,
    prev_present: bool,
    position: GatePosition,
    chirp_on: bool,
    chirp_ms: u64,
    settle_ms: u64,
}

impl GateControl {
    pub fn new(chirp_ms: u32, settle_ms: u32) -> Self {
        Self {
            state: GateState::Monitoring,
            prev_present: false,
            position: GatePosition::Closed,
            chirp_on: false,
            chirp_ms: u64::from(chirp_ms),
            settle_ms: u64::from(settle_ms),
        }
    }

    /// Advance one cycle.  `present` is the polarity-corrected obstacle
    /// input; `alert_active` suppresses the chirp (the alert owns the
    /// buzzer while it runs).
    pub fn tick(&mut self, now_ms: Ticks, present: bool, alert_active: bool) {
        match self.state {
            GateState::Monitoring => {
                if present {
                    if !self.prev_present {
                        info!("gate: obstacle detected, opening");
                        self.position = GatePosition::Open;
                        if alert_active {
                            self.state = GateState::Settling { since_ms: now_ms };
                        } else {
                            self.chirp_on = true;
                            self.state = GateState::Chirping { since_ms: now_ms };
                        }
                    }
                } else {
                    self.position = GatePosition::Closed;
                }
                self.prev_present = present;
            }

            GateState::Chirping { since_ms } => {
                if elapsed(now_ms, since_ms) >= self.chirp_ms {
                    self.chirp_on = false;
                    self.state = GateState::Settling { since_ms: now_ms };
                }
            }

            GateState::Settling { since_ms } => {
                if elapsed(now_ms, since_ms) >= self.settle_ms {
                    self.state = GateState::Monitoring;
                }
            }
        }
    }

    /// Commanded gate position.
    pub fn position(&self) -> GatePosition {
        self.position
    }

    pub fn is_open(&self) -> bool {
        self.position == GatePosition::Open
    }

    /// Chirp level for the buzzer (only ever true while no alert runs).
    pub fn chirp_on(&self) -> bool {
        self.chirp_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> GateControl {
        GateControl::new(200, 1000)
    }

    #[test]
    fn closed_every_cycle_while_clear() {
        let mut g = gate();
        for t in 0..10 {
            g.tick(t, false, false);
            assert_eq!(g.position(), GatePosition::Closed);
            assert!(!g.chirp_on());
        }
    }

    #[test]
    fn opens_and_chirps_on_detection_edge() {
        let mut g = gate();
        g.tick(0, false, false);
        g.tick(1, true, false);
        assert!(g.is_open());
        assert!(g.chirp_on());
    }

    #[test]
    fn chirp_ends_after_its_window() {
        let mut g = gate();
        g.tick(0, true, false);
        g.tick(150, true, false);
        assert!(g.chirp_on());
        g.tick(200, true, false);
        assert!(!g.chirp_on());
    }

    #[test]
    fn alert_suppresses_chirp_but_still_opens() {
        let mut g = gate();
        g.tick(0, true, true);
        assert!(g.is_open());
        assert!(!g.chirp_on());
    }

    #[test]
    fn presence_ignored_during_settle_window() {
        let mut g = gate();
        g.tick(0, true, false);
        g.tick(200, true, false); // chirp done, settling starts
        // Beam clears mid-settle: the gate must not close yet.
        g.tick(700, false, false);
        assert!(g.is_open());
        // Settle elapses; the next monitored cycle sees the clear beam.
        g.tick(1200, false, false);
        g.tick(1201, false, false);
        assert_eq!(g.position(), GatePosition::Closed);
    }

    #[test]
    fn no_retrigger_while_object_lingers() {
        let mut g = gate();
        g.tick(0, true, false);
        g.tick(200, true, false);
        g.tick(1200, true, false); // back to monitoring, still present
        g.tick(1201, true, false); // no fresh edge
        assert!(g.is_open());
        assert!(!g.chirp_on());
    }

    #[test]
    fn reopens_on_fresh_edge_after_release() {
        let mut g = gate();
        g.tick(0, true, false);
        g.tick(200, true, false);
        g.tick(1200, true, false);
        g.tick(1300, false, false);
        assert_eq!(g.position(), GatePosition::Closed);
        g.tick(1400, true, false);
        assert!(g.is_open());
        assert!(g.chirp_on());
    }
}
