//! SmartGate Firmware — Main Entry Point
//!
//! Single-threaded polling firmware with one asynchronous interrupt
//! source (the 1 kHz clock tick).
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter                LogDisplay                     │
//! │  (InputPort + ActuatorPort)     (DisplayPort)                  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ControlLoop (pure logic)                    │    │
//! │  │  Gate · TempAlert · ClapSwitch · Cadences              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Clock (ISR-fed tick counter, critical-section reads)          │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use smartgate::adapters::display::LogDisplay;
use smartgate::adapters::hardware::HardwareAdapter;
use smartgate::clock;
use smartgate::config::SystemConfig;
use smartgate::drivers::watchdog::Watchdog;
use smartgate::drivers::{hw_init, hw_timer};
use smartgate::scheduler::ControlLoop;

fn main() -> Result<()> {
    // ── 1. Platform bootstrap ─────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("SmartGate v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals + clock ────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    hw_timer::start_tick_timer();
    let watchdog = Watchdog::new();

    // ── 3. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();

    // ── 4. Adapters + control loop ────────────────────────────
    let mut hw = HardwareAdapter::new(config.servo_closed_duty, config.servo_open_duty);
    let mut display = LogDisplay::new();
    let mut control = ControlLoop::new(&config);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        // On real hardware the 1 kHz timer interrupt advances the
        // clock; on the host the loop drives it so the firmware runs
        // as a simulation.
        #[cfg(not(target_os = "espidf"))]
        {
            std::thread::sleep(std::time::Duration::from_millis(1));
            clock::sim_advance(1);
        }

        let now = clock::now();
        control.run_once(now, &mut hw, &mut display);

        // Feed the watchdog on every iteration.
        watchdog.feed();
    }
}
