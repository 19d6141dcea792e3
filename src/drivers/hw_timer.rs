//! Hardware tick timer using ESP-IDF's esp_timer API.
//!
//! Creates the single 1 kHz periodic timer that drives the monotonic
//! clock.  On simulation targets the control loop advances the clock
//! itself, so nothing is started here.
//!
//! The callback executes in the ESP timer task context; it does nothing
//! beyond the one counter increment, keeping its latency constant.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(_arg: *mut core::ffi::c_void) {
    crate::clock::isr_tick();
}

/// Start the 1 kHz clock tick timer.
///
/// Must run once at boot before anything reads [`crate::clock::now`].
#[cfg(target_os = "espidf")]
pub fn start_tick_timer() {
    // SAFETY: TICK_TIMER is written here once at boot from the single
    // main-task context before the first callback fires.  The callback
    // itself only increments the clock counter, which is ISR-safe.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"tick\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK {
            log::error!("hw_timer: tick timer create failed (rc={}) — clock will not advance", ret);
            return;
        }
        let ret = esp_timer_start_periodic(TICK_TIMER, 1_000); // 1ms
        if ret != ESP_OK {
            log::error!("hw_timer: tick timer start failed (rc={})", ret);
            return;
        }

        info!("hw_timer: 1 kHz clock tick started");
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer() {
    log::info!("hw_timer(sim): tick timer not started (clock driven by sim loop)");
}

/// Stop the clock tick timer.
#[cfg(target_os = "espidf")]
pub fn stop_tick_timer() {
    // SAFETY: TICK_TIMER is a valid handle if start_tick_timer()
    // succeeded; null-check prevents double-free.
    unsafe {
        if !TICK_TIMER.is_null() {
            esp_timer_stop(TICK_TIMER);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_tick_timer() {}
