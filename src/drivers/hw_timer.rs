//! Hardware tick timer using ESP-IDF's esp_timer API.
//!
//! One periodic timer at the configured tick period pushes
//! [`Event::TickElapsed`] into the lock-free SPSC queue; the main loop
//! turns each into a scheduler advance. On simulation targets the main
//! loop drives ticks via sleep instead.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), so
//! they can safely call push_event().

#[cfg(target_os = "espidf")]
use crate::events::{push_event, Event};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: TICK_TIMER is written once in `start_tick_timer()` before any
/// timer callbacks fire. Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn tick_timer() -> esp_timer_handle_t {
    unsafe { TICK_TIMER }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(_arg: *mut core::ffi::c_void) {
    push_event(Event::TickElapsed);
}

/// Start the periodic tick timer at `period_ms`.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer(period_ms: u32) {
    // SAFETY: TICK_TIMER is written here once at boot from the single
    // main-task context before any callbacks fire. The callback only
    // calls push_event(), which is ISR-safe.
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
            log::error!("hw_timer: tick timer create failed (rc={})", ret);
            return;
        }
        let ret = esp_timer_start_periodic(TICK_TIMER, u64::from(period_ms) * 1_000);
        if ret != ESP_OK {
            log::error!("hw_timer: tick timer start failed (rc={})", ret);
            return;
        }
    }
    log::info!("hw_timer: tick timer started ({}ms period)", period_ms);
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer(_period_ms: u32) {
    log::info!("hw_timer(sim): ticks driven by sleep loop");
}

/// Stop the tick timer.
#[cfg(target_os = "espidf")]
pub fn stop_tick_timer() {
    // SAFETY: tick_timer() contract — main task only; null-check guards
    // against a failed start.
    unsafe {
        let t = tick_timer();
        if !t.is_null() {
            esp_timer_stop(t);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_tick_timer() {}
