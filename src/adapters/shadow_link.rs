//! Shadow link adapter.
//!
//! Two halves, mirroring the shadow protocol's two directions:
//!
//! - **Outbound**: [`LogShadowLink`] implements [`ShadowPort`] by
//!   serializing the update envelopes and logging them. It stands in for
//!   the MQTT shadow session the same way a null transport stands in for
//!   a TLS listener — the port boundary is real, the wire is not yet.
//! - **Inbound**: the transport callback runs in its own task context, so
//!   shadow events are funnelled through a bounded `embassy-sync` channel
//!   and drained by the main loop. Interrupt-style producers never touch
//!   the store or scheduler directly.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{info, warn};

use crate::app::ports::{ShadowError, ShadowPort};
use crate::shadow::{DesiredEnvelope, ReportedEnvelope, ReportedState, ShadowEvent, StateDelta};

// ── Inbound event funnel ──────────────────────────────────────

/// Channel depth for inbound shadow events.
const SHADOW_EVENT_DEPTH: usize = 8;

/// Transport callback → main loop.
static SHADOW_EVENTS: Channel<CriticalSectionRawMutex, ShadowEvent, SHADOW_EVENT_DEPTH> =
    Channel::new();

/// Enqueue an event from the transport callback context.
/// Returns `false` if the channel is full (event dropped).
pub fn push_shadow_event(event: ShadowEvent) -> bool {
    let accepted = SHADOW_EVENTS.try_send(event).is_ok();
    if !accepted {
        warn!("shadow_link: event channel full, dropping {:?}", event);
    }
    accepted
}

/// Drain one pending event; called from the main loop each iteration.
pub fn poll_shadow_event() -> Option<ShadowEvent> {
    SHADOW_EVENTS.try_receive().ok()
}

// ── Outbound port implementation ──────────────────────────────

/// Shadow port that logs the exact documents a live session would send.
pub struct LogShadowLink;

impl LogShadowLink {
    pub fn new() -> Self {
        Self
    }
}

impl ShadowPort for LogShadowLink {
    fn push_desired(&mut self, desired: &StateDelta) -> Result<(), ShadowError> {
        let body =
            serde_json::to_string(&DesiredEnvelope { desired }).map_err(|_| ShadowError::Encode)?;
        info!("shadow update: {}", body);
        Ok(())
    }

    fn report_state(&mut self, state: &ReportedState) -> Result<(), ShadowError> {
        let body = serde_json::to_string(&ReportedEnvelope { reported: state })
            .map_err(|_| ShadowError::Encode)?;
        info!("shadow report: {}", body);
        Ok(())
    }
}
