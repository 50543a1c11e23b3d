//! Button edge driver.
//!
//! ## Hardware
//!
//! Two active-low momentary switches with external pull-ups. Each GPIO
//! fires on the falling edge; the ISR applies a coarse time-based
//! debounce and pushes the corresponding [`Event`](crate::events::Event)
//! into the lock-free queue. Everything else — the tap delta, the
//! long-press window — is decided by the domain core, not here.
//!
//! Hold detection deliberately has no ISR component: the service arms a
//! scheduler task whose predicate calls [`is_pressed`] once per tick, so
//! release is observed at tick granularity rather than via a dedicated
//! release interrupt.

use crate::app::ports::ButtonId;
use crate::drivers::hw_init;
use crate::pins;

fn gpio_for(button: ButtonId) -> i32 {
    match button {
        ButtonId::Up => pins::BUTTON_UP_GPIO,
        ButtonId::Down => pins::BUTTON_DOWN_GPIO,
    }
}

/// Live pin sample. Active-low: pressed while the pin reads low.
pub fn is_pressed(button: ButtonId) -> bool {
    !hw_init::gpio_read(gpio_for(button))
}

// ── ISR path (ESP-IDF only) ───────────────────────────────────

#[cfg(target_os = "espidf")]
mod isr {
    use core::sync::atomic::{AtomicI64, AtomicU32, Ordering};

    use esp_idf_svc::sys::*;

    use crate::drivers::hw_init;
    use crate::events::{push_event, Event};
    use crate::pins;

    /// ISR-side debounce window, microseconds. Written once at registration.
    static DEBOUNCE_US: AtomicU32 = AtomicU32::new(50_000);

    /// Last accepted edge per button (µs since boot).
    static LAST_EDGE_UP_US: AtomicI64 = AtomicI64::new(0);
    static LAST_EDGE_DOWN_US: AtomicI64 = AtomicI64::new(0);

    fn edge_accepted(last: &AtomicI64) -> bool {
        // SAFETY: esp_timer_get_time is documented ISR-safe.
        let now = unsafe { esp_timer_get_time() };
        let debounce = i64::from(DEBOUNCE_US.load(Ordering::Relaxed));
        let prev = last.load(Ordering::Relaxed);
        if now - prev < debounce {
            return false;
        }
        last.store(now, Ordering::Relaxed);
        true
    }

    unsafe extern "C" fn button_up_isr(_arg: *mut core::ffi::c_void) {
        if edge_accepted(&LAST_EDGE_UP_US) {
            push_event(Event::ButtonUpEdge);
        }
    }

    unsafe extern "C" fn button_down_isr(_arg: *mut core::ffi::c_void) {
        if edge_accepted(&LAST_EDGE_DOWN_US) {
            push_event(Event::ButtonDownEdge);
        }
    }

    pub fn register(debounce_ms: u32) -> Result<(), hw_init::HwInitError> {
        DEBOUNCE_US.store(debounce_ms.saturating_mul(1_000), Ordering::Relaxed);

        // SAFETY: handlers are registered once at boot on configured pins;
        // both only touch atomics and the lock-free event queue.
        unsafe {
            let ret = gpio_isr_handler_add(
                pins::BUTTON_UP_GPIO,
                Some(button_up_isr),
                core::ptr::null_mut(),
            );
            if ret != ESP_OK as i32 {
                return Err(hw_init::HwInitError::IsrInstallFailed(ret));
            }
            let ret = gpio_isr_handler_add(
                pins::BUTTON_DOWN_GPIO,
                Some(button_down_isr),
                core::ptr::null_mut(),
            );
            if ret != ESP_OK as i32 {
                return Err(hw_init::HwInitError::IsrInstallFailed(ret));
            }
        }
        log::info!("buttons: edge ISRs registered ({}ms debounce)", debounce_ms);
        Ok(())
    }
}

/// Attach the falling-edge ISRs. Requires the ISR service to be
/// installed first (see [`hw_init::init_isr_service`]).
#[cfg(target_os = "espidf")]
pub fn register_buttons(debounce_ms: u32) -> Result<(), hw_init::HwInitError> {
    isr::register(debounce_ms)
}

#[cfg(not(target_os = "espidf"))]
pub fn register_buttons(_debounce_ms: u32) -> Result<(), hw_init::HwInitError> {
    log::info!("buttons(sim): no ISRs on host");
    Ok(())
}
