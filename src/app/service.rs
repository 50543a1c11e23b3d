//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the brightness store and interprets the three
//! inputs the node has: button edges, hardware ticks, and shadow events.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!  ButtonPinPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!  ShadowEvent   ──▶ │       AppService        │ ──▶ ShadowPort
//!  TickScheduler ◀──▶│  store · reconcile      │ ──▶ LampPort
//!                    └────────────────────────┘
//! ```

use log::{info, warn};

use crate::brightness::{BrightnessStore, BRIGHTNESS_MAX};
use crate::config::SystemConfig;
use crate::scheduler::TickScheduler;
use crate::shadow::{ReportedState, ShadowEvent, StateDelta};

use super::events::{AppEvent, ChangeSource};
use super::ports::{
    ButtonId, ButtonPinPort, EventSink, LampPort, ScheduleRequest, ShadowPort, TaskPayload,
    TickDelegate,
};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    store: BrightnessStore,
    config: SystemConfig,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            store: BrightnessStore::new(),
            config,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Apply the initial level to the lamp and announce startup.
    pub fn start(&mut self, lamp: &mut impl LampPort, sink: &mut impl EventSink) {
        lamp.set_level(self.store.value());
        sink.emit(&AppEvent::Started {
            brightness: self.store.value(),
        });
        info!("AppService started at brightness {}", self.store.value());
    }

    // ── Button handling ───────────────────────────────────────

    /// React to a debounced falling edge on a button.
    ///
    /// Applies the tap delta immediately (bounded tap response), then
    /// arms a hold check whose predicate re-samples the pin each tick.
    /// Each press arms its own check — stacked checks from rapid taps
    /// are harmless because every fire re-clamps into range.
    pub fn on_button_press(
        &mut self,
        button: ButtonId,
        sched: &mut TickScheduler,
        lamp: &mut impl LampPort,
        sink: &mut impl EventSink,
    ) {
        let delta = self.config.button_delta(button);
        apply_adjust(
            &mut self.store,
            i32::from(delta),
            ChangeSource::Tap,
            lamp,
            sink,
        );
        sched.schedule(self.config.push_debounce_ms, TaskPayload::ShadowPush);
        sched.schedule(
            self.config.long_press_ms,
            TaskPayload::HoldCheck { button, delta },
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one hardware tick: advance the scheduler, letting due tasks
    /// fire against the store and ports.
    ///
    /// The `hw` parameter satisfies **both** [`ButtonPinPort`] and
    /// [`LampPort`] — this avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn on_tick(
        &mut self,
        sched: &mut TickScheduler,
        hw: &mut (impl ButtonPinPort + LampPort),
        shadow: &mut impl ShadowPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let mut ctx = TickContext {
            store: &mut self.store,
            config: &self.config,
            hw,
            shadow,
            sink,
        };
        sched.advance(&mut ctx);
    }

    // ── Shadow reconciliation ─────────────────────────────────

    /// Merge an incoming shadow event into local state.
    ///
    /// `Connected` reports current state without merging. Reported and
    /// desired payloads merge in that fixed order, so desired overrides
    /// reported for any field both carry; a desired delta is additionally
    /// acknowledged by reporting the merged result.
    pub fn handle_shadow_event(
        &mut self,
        event: &ShadowEvent,
        lamp: &mut impl LampPort,
        shadow: &mut impl ShadowPort,
        sink: &mut impl EventSink,
    ) {
        match event {
            ShadowEvent::Connected => {
                report_state(&self.store, shadow, sink);
            }
            ShadowEvent::ReportedState { reported, desired } => {
                self.merge_remote(reported.as_ref(), desired.as_ref(), lamp, sink);
            }
            ShadowEvent::DesiredDelta { reported, desired } => {
                self.merge_remote(reported.as_ref(), desired.as_ref(), lamp, sink);
                report_state(&self.store, shadow, sink);
            }
            ShadowEvent::Other => {}
        }
    }

    fn merge_remote(
        &mut self,
        reported: Option<&StateDelta>,
        desired: Option<&StateDelta>,
        lamp: &mut impl LampPort,
        sink: &mut impl EventSink,
    ) {
        let from = self.store.value();
        if let Some(delta) = reported {
            self.store.apply_remote(delta);
        }
        if let Some(delta) = desired {
            self.store.apply_remote(delta);
        }
        let to = self.store.value();
        if to != from {
            lamp.set_level(to);
            sink.emit(&AppEvent::BrightnessChanged {
                from,
                to,
                source: ChangeSource::Remote,
            });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current local brightness.
    pub fn brightness(&self) -> u16 {
        self.store.value()
    }

    /// Whether a local change is still waiting for its debounced push.
    pub fn has_pending_push(&self) -> bool {
        self.store.has_pending()
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

// ───────────────────────────────────────────────────────────────
// Tick delegate — predicates and actions for deferred tasks
// ───────────────────────────────────────────────────────────────

/// Borrow bundle handed to the scheduler for one `advance` call.
struct TickContext<'a, H, S, E>
where
    H: ButtonPinPort + LampPort,
    S: ShadowPort,
    E: EventSink,
{
    store: &'a mut BrightnessStore,
    config: &'a SystemConfig,
    hw: &'a mut H,
    shadow: &'a mut S,
    sink: &'a mut E,
}

impl<H, S, E> TickDelegate for TickContext<'_, H, S, E>
where
    H: ButtonPinPort + LampPort,
    S: ShadowPort,
    E: EventSink,
{
    fn task_is_live(&mut self, payload: TaskPayload) -> bool {
        match payload {
            // The polled pin read is the long-press cancellation check.
            TaskPayload::HoldCheck { button, .. } => self.hw.is_pressed(button),
            // Only the earliest push task sees the flag still set; later
            // duplicates evaporate here instead of pushing redundantly.
            TaskPayload::ShadowPush => self.store.has_pending(),
        }
    }

    fn task_fired(&mut self, payload: TaskPayload) -> Option<ScheduleRequest> {
        match payload {
            TaskPayload::HoldCheck { delta, .. } => {
                // Held past the threshold: drive to the nearest extremity.
                apply_adjust(
                    self.store,
                    i32::from(delta) * i32::from(BRIGHTNESS_MAX),
                    ChangeSource::Hold,
                    self.hw,
                    self.sink,
                );
                Some(ScheduleRequest {
                    delay_ms: self.config.push_debounce_ms,
                    payload: TaskPayload::ShadowPush,
                })
            }
            TaskPayload::ShadowPush => {
                push_to_shadow(self.store, self.shadow, self.sink);
                None
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Internal helpers
// ───────────────────────────────────────────────────────────────

/// Mutate the store, mirror the result onto the lamp, and announce it.
fn apply_adjust(
    store: &mut BrightnessStore,
    delta: i32,
    source: ChangeSource,
    lamp: &mut impl LampPort,
    sink: &mut impl EventSink,
) {
    let from = store.value();
    let to = store.adjust(delta);
    lamp.set_level(to);
    sink.emit(&AppEvent::BrightnessChanged { from, to, source });
}

/// Deliver pending local state to the shadow's `desired` section.
///
/// The pending flag is cleared whether or not the transport accepted the
/// update: failed pushes are dropped, not retried, and the reconciler
/// re-converges on the next shadow event.
fn push_to_shadow(
    store: &mut BrightnessStore,
    shadow: &mut impl ShadowPort,
    sink: &mut impl EventSink,
) {
    if !store.has_pending() {
        return;
    }
    let desired = StateDelta::brightness(store.value());
    match shadow.push_desired(&desired) {
        Ok(()) => sink.emit(&AppEvent::DesiredPushed {
            brightness: store.value(),
        }),
        Err(e) => {
            warn!("shadow push failed: {}", e);
            sink.emit(&AppEvent::PushFailed);
        }
    }
    store.clear_pending();
}

/// Report the full current state (used on connect and delta ack).
fn report_state(store: &BrightnessStore, shadow: &mut impl ShadowPort, sink: &mut impl EventSink) {
    let state = ReportedState {
        brightness: store.value(),
    };
    match shadow.report_state(&state) {
        Ok(()) => sink.emit(&AppEvent::StateReported {
            brightness: state.brightness,
        }),
        Err(e) => warn!("state report failed: {}", e),
    }
}
