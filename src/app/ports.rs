//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (buttons, lamp output, shadow link, event sinks)
//! implement these traits. The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! or the network directly.

use crate::shadow::{ReportedState, StateDelta};

// ───────────────────────────────────────────────────────────────
// Button identity
// ───────────────────────────────────────────────────────────────

/// Which physical button an edge or hold check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    /// Raises brightness by the configured tap delta.
    Up,
    /// Lowers brightness by the configured tap delta.
    Down,
}

// ───────────────────────────────────────────────────────────────
// Button pin port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Live pin-state source for hold detection.
///
/// Re-sampled once per tick while a hold check is pending; this polled
/// read *is* the cancellation mechanism for long presses.
pub trait ButtonPinPort {
    /// True while the button's pin reads as pressed (active-low switch).
    fn is_pressed(&mut self, button: ButtonId) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Lamp port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive the physical light.
pub trait LampPort {
    /// Apply a brightness level (0–1000) to the lamp output.
    fn set_level(&mut self, level: u16);
}

// ───────────────────────────────────────────────────────────────
// Shadow port (driven adapter: domain ↔ cloud shadow)
// ───────────────────────────────────────────────────────────────

/// Outbound half of the shadow protocol.
///
/// Failures are observed and logged but never retried — the reconciler
/// converges again on the next `Connected` or delta event.
pub trait ShadowPort {
    /// Push locally-changed fields into the shadow's `desired` section.
    fn push_desired(&mut self, desired: &StateDelta) -> Result<(), ShadowError>;

    /// Report the device's current state into the `reported` section.
    fn report_state(&mut self, state: &ReportedState) -> Result<(), ShadowError>;
}

/// Errors from [`ShadowPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowError {
    /// No shadow session is currently established.
    NotConnected,
    /// The shadow service rejected the update (carries the status code).
    Rejected(i32),
    /// The document could not be serialized.
    Encode,
}

impl core::fmt::Display for ShadowError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotConnected => write!(f, "shadow not connected"),
            Self::Rejected(rc) => write!(f, "shadow update rejected (rc={})", rc),
            Self::Encode => write!(f, "document encode failed"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, MQTT
/// telemetry topic, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Tick delegate (decouples the scheduler from the domain)
// ───────────────────────────────────────────────────────────────

/// Tagged payload carried by a deferred task.
///
/// Identifies the predicate/action pair the delegate runs for it — a
/// typed replacement for the opaque context blob timer frameworks tend
/// to grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPayload {
    /// Long-press watch: live while the pin stays pressed; fires the
    /// full-on/full-off action at the hold deadline.
    HoldCheck { button: ButtonId, delta: i16 },
    /// Debounced shadow push: live while a local change is pending;
    /// fires the push and clears the flag.
    ShadowPush,
}

/// A follow-up task requested by a fired action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub delay_ms: u32,
    pub payload: TaskPayload,
}

/// Callback trait the scheduler drives once per tick.
///
/// This decouples the [`TickScheduler`](crate::scheduler::TickScheduler)
/// from brightness, pins, and the shadow: the service layer implements it
/// over its ports, and the scheduler itself stays domain-blind.
pub trait TickDelegate {
    /// Liveness predicate, re-evaluated every tick. Returning `false`
    /// cancels the task without side effects.
    fn task_is_live(&mut self, payload: TaskPayload) -> bool;

    /// Invoked when a live task reaches its deadline. May request one
    /// follow-up task, scheduled for subsequent ticks.
    fn task_fired(&mut self, payload: TaskPayload) -> Option<ScheduleRequest>;
}
