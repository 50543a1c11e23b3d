//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — log to serial, publish over MQTT,
//! feed a metrics counter, etc.

/// What caused a brightness change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// A button tap applied the per-tap delta.
    Tap,
    /// A long press drove the value to an extremity.
    Hold,
    /// A shadow document was merged into local state.
    Remote,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The application service has started (carries initial brightness).
    Started { brightness: u16 },

    /// Local brightness moved.
    BrightnessChanged {
        from: u16,
        to: u16,
        source: ChangeSource,
    },

    /// A debounced push delivered `desired.brightness` to the shadow.
    DesiredPushed { brightness: u16 },

    /// A shadow push failed; the change is dropped until the next local
    /// edit or shadow event re-syncs state.
    PushFailed,

    /// Current state was reported to the shadow.
    StateReported { brightness: u16 },
}
