//! Two-stage double-clap light switch.
//!
//! The acoustic sensor idles high and pulses low per detected sound.
//! A first falling edge opens a session; a second edge landing strictly
//! inside the (bounce, window) interval toggles the lamp.  Edges at or
//! under the bounce bound are mechanical/acoustic ringing and are
//! ignored without restarting the window — the session can still be
//! resolved by a later clean edge or die at the window timeout.

use log::info;

use crate::clock::{elapsed, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClapState {
    Idle,
    WaitSecond { first_ms: Ticks },
}

pub struct ClapSwitch {
    state: ClapState,
    last_level_high: bool,
    lamp_on: bool,
    clap_count: u8,
    bounce_ms: u64,
    window_ms: u64,
}

impl ClapSwitch {
    pub fn new(bounce_ms: u32, window_ms: u32) -> Self {
        Self {
            state: ClapState::Idle,
            last_level_high: true, // sensor idles high
            lamp_on: false,
            clap_count: 0,
            bounce_ms: u64::from(bounce_ms),
            window_ms: u64::from(window_ms),
        }
    }

    /// Advance one cycle with the raw sensor level.
    pub fn tick(&mut self, now_ms: Ticks, level_high: bool) {
        let falling = self.last_level_high && !level_high;

        match self.state {
            ClapState::Idle => {
                if falling {
                    self.state = ClapState::WaitSecond { first_ms: now_ms };
                    self.clap_count = 1;
                }
            }

            ClapState::WaitSecond { first_ms } => {
                if falling {
                    let gap = elapsed(now_ms, first_ms);
                    if gap > self.bounce_ms && gap < self.window_ms {
                        self.lamp_on = !self.lamp_on;
                        info!(
                            "clap: double clap at {} ms gap, lamp {}",
                            gap,
                            if self.lamp_on { "on" } else { "off" }
                        );
                        self.reset();
                    }
                    // gap <= bounce: ringing, session stays eligible.
                    // gap >= window: no toggle; the timeout below resets.
                }

                if let ClapState::WaitSecond { first_ms } = self.state {
                    if elapsed(now_ms, first_ms) > self.window_ms {
                        self.reset();
                    }
                }
            }
        }

        self.last_level_high = level_high;
    }

    fn reset(&mut self) {
        self.state = ClapState::Idle;
        self.clap_count = 0;
    }

    /// Lamp output owned by this machine.
    pub fn lamp_on(&self) -> bool {
        self.lamp_on
    }

    /// True while a first clap is waiting for its partner.
    pub fn waiting(&self) -> bool {
        matches!(self.state, ClapState::WaitSecond { .. })
    }

    /// Debug counter surfaced on the status display.
    pub fn clap_count(&self) -> u8 {
        self.clap_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switch() -> ClapSwitch {
        ClapSwitch::new(30, 200)
    }

    /// Drive a full low pulse (one cycle low, back high the next).
    fn pulse(s: &mut ClapSwitch, at_ms: Ticks) {
        s.tick(at_ms, false);
        s.tick(at_ms + 1, true);
    }

    #[test]
    fn single_clap_times_out_without_toggle() {
        let mut s = switch();
        pulse(&mut s, 0);
        assert!(s.waiting());
        s.tick(300, true);
        assert!(!s.waiting());
        assert!(!s.lamp_on());
    }

    #[test]
    fn pair_inside_window_toggles_once() {
        let mut s = switch();
        pulse(&mut s, 0);
        pulse(&mut s, 100);
        assert!(s.lamp_on());
        assert!(!s.waiting());
        // And back off on the next pair.
        pulse(&mut s, 1000);
        pulse(&mut s, 1100);
        assert!(!s.lamp_on());
    }

    #[test]
    fn pair_too_far_apart_never_toggles() {
        let mut s = switch();
        pulse(&mut s, 0);
        pulse(&mut s, 250);
        assert!(!s.lamp_on());
        assert!(!s.waiting());
    }

    #[test]
    fn bounce_edge_is_ignored_but_session_survives() {
        let mut s = switch();
        pulse(&mut s, 0);
        pulse(&mut s, 10); // ringing — must not toggle nor reset
        assert!(!s.lamp_on());
        assert!(s.waiting());
        // A clean second clap still lands inside the original window.
        pulse(&mut s, 120);
        assert!(s.lamp_on());
    }

    #[test]
    fn bounce_then_timeout_resets_without_toggle() {
        let mut s = switch();
        pulse(&mut s, 0);
        pulse(&mut s, 10);
        s.tick(250, true);
        assert!(!s.waiting());
        assert!(!s.lamp_on());
    }

    #[test]
    fn gap_at_exact_bounce_bound_is_still_ringing() {
        let mut s = switch();
        pulse(&mut s, 0);
        pulse(&mut s, 30); // strictly-greater bound: 30 is ringing
        assert!(!s.lamp_on());
        assert!(s.waiting());
    }

    #[test]
    fn held_low_level_is_one_edge() {
        let mut s = switch();
        s.tick(0, false);
        s.tick(1, false);
        s.tick(2, false);
        assert!(s.waiting());
        assert_eq!(s.clap_count(), 1);
    }

    #[test]
    fn count_tracks_session_lifecycle() {
        let mut s = switch();
        assert_eq!(s.clap_count(), 0);
        pulse(&mut s, 0);
        assert_eq!(s.clap_count(), 1);
        pulse(&mut s, 100);
        assert_eq!(s.clap_count(), 0);
    }
}
