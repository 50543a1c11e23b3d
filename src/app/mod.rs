//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the Lumanode system:
//! button handling, brightness mutation, and shadow reconciliation, all
//! driven through the tick scheduler. Interaction with hardware and the
//! shadow transport happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
