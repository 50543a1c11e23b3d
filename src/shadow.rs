//! Cloud shadow events and state documents.
//!
//! The shadow is a remote, persisted document holding `desired` and
//! `reported` sections for this device. The transport (MQTT session,
//! topic layout, connection lifecycle) lives behind the
//! [`ShadowPort`](crate::app::ports::ShadowPort) boundary; this module
//! only defines the event surface and the JSON document shapes.

use serde::{Deserialize, Serialize};

/// Partial state document. Absent fields mean "no opinion" and must leave
/// the corresponding local field untouched on merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u16>,
}

impl StateDelta {
    /// A delta carrying just a brightness value.
    pub fn brightness(value: u16) -> Self {
        Self {
            brightness: Some(value),
        }
    }
}

/// Full state snapshot for the shadow's `reported` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedState {
    pub brightness: u16,
}

/// Events delivered by the shadow transport.
///
/// `ReportedState` and `DesiredDelta` both carry the partial documents the
/// shadow service attached to the message; either may be absent. Anything
/// the reconciler does not understand arrives as `Other` and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowEvent {
    /// Shadow session established; the device should report its state.
    Connected,
    /// The shadow answered a get with its stored state.
    ReportedState {
        reported: Option<StateDelta>,
        desired: Option<StateDelta>,
    },
    /// The cloud changed `desired` and the device must converge and ack.
    DesiredDelta {
        reported: Option<StateDelta>,
        desired: Option<StateDelta>,
    },
    /// Any event the reconciler does not handle.
    Other,
}

// ── Wire envelopes ────────────────────────────────────────────

/// `{"desired":{...}}` — body of a shadow update pushing local changes.
#[derive(Debug, Serialize)]
pub struct DesiredEnvelope<'a> {
    pub desired: &'a StateDelta,
}

/// `{"reported":{...}}` — body of a shadow update acknowledging state.
#[derive(Debug, Serialize)]
pub struct ReportedEnvelope<'a> {
    pub reported: &'a ReportedState,
}
