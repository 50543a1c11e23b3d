//! One-shot hardware peripheral initialization.
//!
//! Configures button GPIOs and the GPIO ISR service using raw ESP-IDF
//! sys calls. Called once from `main()` before the event loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    LedcInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
        }
    }
}

// ── Button inputs ─────────────────────────────────────────────

/// Configure both button pins: input, pull-up, falling-edge interrupt.
#[cfg(target_os = "espidf")]
pub fn init_button_inputs() -> Result<(), HwInitError> {
    for &pin in &[pins::BUTTON_UP_GPIO, pins::BUTTON_DOWN_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
        };
        // SAFETY: gpio_config validates the descriptor; called once from
        // the single main task before the event loop starts.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }
    info!("hw_init: button GPIOs configured (up={}, down={})",
        pins::BUTTON_UP_GPIO, pins::BUTTON_DOWN_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_button_inputs() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): button GPIO init skipped");
    Ok(())
}

/// Install the per-pin GPIO ISR dispatcher.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: idempotent-ish service install from the main task; an
    // INVALID_STATE return means another component installed it already.
    let ret = unsafe { gpio_install_isr_service(0) };
    if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
        return Err(HwInitError::IsrInstallFailed(ret));
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    Ok(())
}

// ── Level reads ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Simulation: pins idle high (buttons released).
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}
