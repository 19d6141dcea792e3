//! Acoustic sensor (KY-037 class) digital output.
//!
//! Idle level is high; a detected sound pulses the line low for the
//! duration set by the module's onboard comparator.  Edge detection
//! happens in the clap state machine, not here.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the GPIO level via hw_init.
//! On host/test: reads from a static AtomicBool for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_LEVEL_HIGH: AtomicBool = AtomicBool::new(true);

/// Inject the raw line level (true = quiet).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(high: bool) {
    SIM_LEVEL_HIGH.store(high, Ordering::Relaxed);
}

pub struct SoundSensor {
    gpio: i32,
}

impl SoundSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// Raw line level: true while quiet, false during a sound pulse.
    pub fn level_high(&self) -> bool {
        self.read_level()
    }

    #[cfg(target_os = "espidf")]
    fn read_level(&self) -> bool {
        hw_init::gpio_read(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_level(&self) -> bool {
        let _ = self.gpio;
        SIM_LEVEL_HIGH.load(Ordering::Relaxed)
    }
}
