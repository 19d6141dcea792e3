//! GPIO / peripheral pin assignments for the SmartGate main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Gate servo (standard 50 Hz hobby servo)
// ---------------------------------------------------------------------------

/// LEDC PWM channel output for the gate servo signal line.
pub const SERVO_PWM_GPIO: i32 = 1;

// ---------------------------------------------------------------------------
// Climate sensor (DHT11, single bidirectional data line)
// ---------------------------------------------------------------------------

/// Open-drain data line with external pull-up.  The decoder drives it low
/// to request a frame and releases it to let the sensor answer.
pub const CLIMATE_DATA_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Sensors — Digital
// ---------------------------------------------------------------------------

/// IR obstacle sensor (FC-51 class).  Active LOW: object present pulls the
/// line down; idle level is HIGH via pull-up.
pub const OBSTACLE_GPIO: i32 = 5;

/// Acoustic sensor (KY-037 class) digital output.  Idle HIGH, pulses LOW
/// on a detected sound.
pub const SOUND_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Indicators / buzzer
// ---------------------------------------------------------------------------

/// Piezo buzzer, active HIGH.  Shared between the obstacle chirp and the
/// temperature-alert square wave.
pub const BUZZER_GPIO: i32 = 7;

/// Lamp relay / LED toggled by the double-clap switch.
pub const LAMP_GPIO: i32 = 8;

/// Heartbeat LED, toggled once per second by the control loop.
pub const HEARTBEAT_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Servo frame rate — one pulse per 20 ms period.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution for the servo channel.  14-bit gives 16384 counts
/// across the 20 ms period (~1.2 µs per count), plenty for a hobby servo.
pub const SERVO_RESOLUTION_BITS: u32 = 14;
