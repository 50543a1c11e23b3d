//! System configuration parameters
//!
//! All tunable timing and input parameters for the Lumanode system.
//! State is held in memory only; there is no persistence layer, so these
//! are compiled-in defaults that future provisioning may override at boot.

use serde::{Deserialize, Serialize};

use crate::app::ports::ButtonId;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Ticking ---
    /// Hardware tick period (milliseconds). One scheduler advance per tick.
    pub tick_period_ms: u32,

    // --- Shadow push ---
    /// Debounce window before pushing local changes to the shadow (ms).
    pub push_debounce_ms: u32,

    // --- Buttons ---
    /// Hold duration that counts as a long press (ms).
    pub long_press_ms: u32,
    /// Brightness change applied per button tap (sign set per button).
    pub tap_delta: i16,
    /// ISR-side edge debounce window (ms).
    pub isr_debounce_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 50,

            push_debounce_ms: 100,

            long_press_ms: 500,
            tap_delta: 100,
            isr_debounce_ms: 50,
        }
    }
}

impl SystemConfig {
    /// Signed tap delta for a given button (`Up` raises, `Down` lowers).
    pub fn button_delta(&self, button: ButtonId) -> i16 {
        match button {
            ButtonId::Up => self.tap_delta,
            ButtonId::Down => -self.tap_delta,
        }
    }
}
