//! IR obstacle presence sensor (FC-51 class).
//!
//! Active-low open-collector output with pull-up: the line drops when an
//! object enters the beam.
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

/// Inject the raw line level (true = idle high, no object).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(high: bool) {
    SIM_LEVEL_HIGH.store(high, Ordering::Relaxed);
}

pub struct ObstacleSensor {
    gpio: i32,
}

impl ObstacleSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// True when an object is in the beam (line pulled low).
    pub fn present(&self) -> bool {
        !self.read_level()
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
