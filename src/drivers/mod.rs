//! Raw peripheral drivers (ESP-IDF sys calls).
//!
//! Everything here is behind `#[cfg(target_os = "espidf")]` with
//! simulation stubs for host builds, so the library compiles and tests
//! everywhere while the binary gets real hardware access.

pub mod button;
pub mod dimmer;
pub mod hw_init;
pub mod hw_timer;
