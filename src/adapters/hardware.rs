//! Hardware adapter — binds the domain's ports to the raw drivers.
//!
//! Implements [`ButtonPinPort`] over live GPIO reads and [`LampPort`]
//! over the LEDC dimmer. On non-ESP targets the underlying drivers are
//! simulation stubs, so this adapter compiles (and no-ops) everywhere.

use crate::app::ports::{ButtonId, ButtonPinPort, LampPort};
use crate::drivers::{button, dimmer};

/// Concrete port implementation over the Lumanode board peripherals.
pub struct HardwareAdapter;

impl HardwareAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ButtonPinPort for HardwareAdapter {
    fn is_pressed(&mut self, b: ButtonId) -> bool {
        button::is_pressed(b)
    }
}

impl LampPort for HardwareAdapter {
    fn set_level(&mut self, level: u16) {
        dimmer::set_level(level);
    }
}
