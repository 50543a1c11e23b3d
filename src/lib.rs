//! Lumanode firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod brightness;
pub mod config;
pub mod events;
pub mod scheduler;
pub mod shadow;

pub mod pins;

// Re-export the hardware-leaning modules so the crate compiles everywhere;
// the ESP-IDF implementations are guarded by cfg attributes inside.
pub mod adapters;
pub mod drivers;
