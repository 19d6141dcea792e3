//! Simple GPIO indicator driver.
//!
//! Used for both the clap-switched lamp and the heartbeat LED — same
//! electrical arrangement, different pins.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the assigned GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct Indicator {
    gpio: i32,
    on: bool,
}

impl Indicator {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    pub fn set(&mut self, on: bool) {
        if on != self.on {
            hw_init::gpio_write(self.gpio, on);
            self.on = on;
        }
    }

    pub fn toggle(&mut self) {
        let next = !self.on;
        self.set(next);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
