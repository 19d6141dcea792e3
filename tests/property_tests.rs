//! Property tests for the timing substrate and protocol validation.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets.  On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use proptest::prelude::*;
use smartgate::scheduler::Cadence;
use smartgate::sensors::dht11::Frame;
use smartgate::tasks::clap::ClapSwitch;

proptest! {
    /// A frame validates exactly when its checksum equals the wrapping
    /// 8-bit sum of the payload bytes — no other checksum ever passes.
    #[test]
    fn frame_valid_iff_checksum_matches_sum(
        h in any::<u8>(),
        hf in any::<u8>(),
        t in any::<u8>(),
        tf in any::<u8>(),
        c in any::<u8>(),
    ) {
        let frame = Frame::from_bytes([h, hf, t, tf, c]);
        let expected = h.wrapping_add(hf).wrapping_add(t).wrapping_add(tf);
        prop_assert_eq!(frame.checksum_ok(), c == expected);
    }

    /// Arbitrary level sequences never panic the clap machine, and the
    /// lamp only ever changes on a falling edge of the input.
    #[test]
    fn clap_lamp_changes_only_on_falling_edges(
        levels in proptest::collection::vec(any::<bool>(), 1..300),
    ) {
        let mut s = ClapSwitch::new(30, 200);
        let mut prev_level = true;
        let mut lamp = s.lamp_on();
        let mut t = 0u64;
        for level in levels {
            t += 7;
            s.tick(t, level);
            if s.lamp_on() != lamp {
                prop_assert!(
                    prev_level && !level,
                    "lamp changed without a falling edge"
                );
                lamp = s.lamp_on();
            }
            prev_level = level;
        }
    }

    /// However irregularly the loop polls, a cadence never fires twice
    /// inside one period.
    #[test]
    fn cadence_fires_are_at_least_a_period_apart(
        period in 1u32..5000,
        steps in proptest::collection::vec(1u64..50, 1..200),
    ) {
        let mut c = Cadence::new(period);
        let mut now = 0u64;
        let mut last_fire: Option<u64> = None;
        for step in steps {
            now += step;
            if c.ready(now) {
                if let Some(prev) = last_fire {
                    prop_assert!(now - prev >= u64::from(period));
                }
                last_fire = Some(now);
            }
        }
    }

    /// Any sequence of tick bursts yields a non-decreasing clock whose
    /// value is exactly the number of whole ticks delivered.
    ///
    /// Sole test in this binary that touches the process-global clock.
    #[test]
    fn clock_is_monotonic_under_arbitrary_tick_bursts(
        bursts in proptest::collection::vec(0u64..50, 1..100),
    ) {
        smartgate::clock::sim_reset();
        let mut prev = smartgate::clock::now();
        let mut total = 0u64;
        for burst in bursts {
            smartgate::clock::sim_advance(burst);
            total += burst;
            let now = smartgate::clock::now();
            prop_assert!(now >= prev);
            prop_assert_eq!(now, total);
            prev = now;
        }
    }
}
