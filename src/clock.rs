//! Monotonic millisecond clock.
//!
//! A 1 kHz periodic timer callback (see [`crate::drivers::hw_timer`])
//! increments a shared `u64` tick counter by exactly one per fire.  The
//! counter is wider than the CPU's native word, so a plain load from the
//! main loop could observe a torn value while the timer context is
//! mid-update.  Every read therefore goes through a critical section,
//! masking the timer interrupt for the few cycles the snapshot takes.
//!
//! The increment itself runs only in the timer context — single writer,
//! so there is no writer/writer race to guard against; the critical
//! section inside [`isr_tick`] exists solely to satisfy the shared-cell
//! access rules.
//!
//! ## Dual-target design
//!
//! On ESP-IDF the critical-section symbols come from
//! [`crate::esp_link_shims`].  On host targets the `sim` feature links
//! the std implementation, and [`sim_advance`] stands in for the timer
//! interrupt so tests control time deterministically.

use core::cell::Cell;

use critical_section::Mutex;

/// Milliseconds since [`crate::drivers::hw_timer::start_tick_timer`] ran.
pub type Ticks = u64;

/// The shared tick counter.  Written by the timer callback, snapshotted
/// by everyone else.
static TICKS: Mutex<Cell<Ticks>> = Mutex::new(Cell::new(0));

/// Advance the counter by one tick.
///
/// Timer-context only.  Does nothing but the increment, keeping the
/// time spent in the callback constant.
pub(crate) fn isr_tick() {
    critical_section::with(|cs| {
        let cell = TICKS.borrow(cs);
        cell.set(cell.get().wrapping_add(1));
    });
}

/// Current tick count as an atomic, non-partial snapshot.
///
/// Safe to call from any context; the read is protected against the
/// timer callback updating the counter halfway through.
pub fn now() -> Ticks {
    critical_section::with(|cs| TICKS.borrow(cs).get())
}

/// Whole seconds since boot, for the status snapshot.
pub fn uptime_secs() -> u64 {
    now() / 1000
}

/// Milliseconds elapsed from `earlier` to `later`, wraparound-safe as
/// long as the real interval is shorter than the counter period.
pub fn elapsed(later: Ticks, earlier: Ticks) -> u64 {
    later.wrapping_sub(earlier)
}

/// Advance the simulated clock by `ms` ticks, one increment at a time —
/// the same path the hardware timer takes.
#[cfg(not(target_os = "espidf"))]
pub fn sim_advance(ms: u64) {
    for _ in 0..ms {
        isr_tick();
    }
}

/// Reset the counter to zero.  Test-only; the hardware counter is never
/// rewound.
#[cfg(not(target_os = "espidf"))]
pub fn sim_reset() {
    critical_section::with(|cs| TICKS.borrow(cs).set(0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The counter is process-global; serialize the tests that drive it.
    static CLOCK_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn ticks_accumulate_one_per_increment() {
        let _guard = CLOCK_LOCK.lock().unwrap();
        sim_reset();
        let start = now();
        sim_advance(250);
        assert_eq!(elapsed(now(), start), 250);
    }

    #[test]
    fn now_is_monotonic_across_ticks() {
        let _guard = CLOCK_LOCK.lock().unwrap();
        sim_reset();
        let mut prev = now();
        for _ in 0..100 {
            isr_tick();
            let current = now();
            assert!(current >= prev);
            assert_eq!(current, prev + 1);
            prev = current;
        }
    }

    #[test]
    fn uptime_derives_whole_seconds() {
        let _guard = CLOCK_LOCK.lock().unwrap();
        sim_reset();
        sim_advance(2750);
        assert_eq!(uptime_secs(), 2);
    }

    #[test]
    fn elapsed_survives_wraparound() {
        // An interval that straddles the wrap point still measures correctly.
        let earlier = Ticks::MAX - 10;
        let later = earlier.wrapping_add(25);
        assert_eq!(elapsed(later, earlier), 25);
    }
}
