//! Piezo buzzer driver.
//!
//! Plain GPIO on/off; the alert square wave and the gate chirp are both
//! generated by the state machines, not here.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the buzzer GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct Buzzer {
    on: bool,
}

impl Buzzer {
    pub fn new() -> Self {
        Self { on: false }
    }

    pub fn set(&mut self, on: bool) {
        if on != self.on {
            hw_init::gpio_write(pins::BUZZER_GPIO, on);
            self.on = on;
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
