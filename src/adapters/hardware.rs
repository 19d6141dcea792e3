//! Hardware adapter — bridges real peripherals to the domain port traits.
//!
//! Owns every sensor and actuator driver, exposing them through
//! [`InputPort`] and [`ActuatorPort`].  This is the only module in the
//! system that touches actual hardware.  On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, InputPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::indicator::Indicator;
use crate::drivers::servo::{GatePosition, GateServo};
use crate::error::SensorError;
use crate::pins;
use crate::sensors::dht11::{ClimateLine, ClimateReading, ClimateSensor, SpinDelay};
use crate::sensors::presence::ObstacleSensor;
use crate::sensors::sound::SoundSensor;

/// Concrete adapter that combines all hardware behind the port traits.
pub struct HardwareAdapter {
    climate: ClimateSensor<ClimateLine, SpinDelay>,
    obstacle: ObstacleSensor,
    sound: SoundSensor,
    servo: GateServo,
    buzzer: Buzzer,
    lamp: Indicator,
    heartbeat: Indicator,
}

impl HardwareAdapter {
    pub fn new(servo_closed_duty: u16, servo_open_duty: u16) -> Self {
        Self {
            climate: ClimateSensor::new(ClimateLine, SpinDelay),
            obstacle: ObstacleSensor::new(pins::OBSTACLE_GPIO),
            sound: SoundSensor::new(pins::SOUND_GPIO),
            servo: GateServo::new(servo_closed_duty, servo_open_duty),
            buzzer: Buzzer::new(),
            lamp: Indicator::new(pins::LAMP_GPIO),
            heartbeat: Indicator::new(pins::HEARTBEAT_GPIO),
        }
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for HardwareAdapter {
    fn obstacle_present(&mut self) -> bool {
        self.obstacle.present()
    }

    fn sound_level_high(&mut self) -> bool {
        self.sound.level_high()
    }

    fn poll_climate(&mut self) -> Result<(), SensorError> {
        self.climate.poll()
    }

    fn climate_reading(&self) -> ClimateReading {
        self.climate.reading()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_gate(&mut self, position: GatePosition) {
        self.servo.set_position(position);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn set_lamp(&mut self, on: bool) {
        self.lamp.set(on);
    }

    fn set_heartbeat(&mut self, on: bool) {
        self.heartbeat.set(on);
    }
}
