//! Integration tests for shadow reconciliation.
//!
//! Exercise the full event surface: connect, state responses, desired
//! deltas, and interleavings with local button edits.

use crate::mock_hw::{MockHardware, MockShadow, RecordingSink};

use lumanode::app::events::{AppEvent, ChangeSource};
use lumanode::app::ports::ButtonId;
use lumanode::app::service::AppService;
use lumanode::brightness::BRIGHTNESS_MAX;
use lumanode::config::SystemConfig;
use lumanode::scheduler::TickScheduler;
use lumanode::shadow::{ReportedState, ShadowEvent, StateDelta};

struct Fixture {
    app: AppService,
    hw: MockHardware,
    shadow: MockShadow,
    sink: RecordingSink,
}

fn make_fixture() -> Fixture {
    let mut f = Fixture {
        app: AppService::new(SystemConfig::default()),
        hw: MockHardware::new(),
        shadow: MockShadow::new(),
        sink: RecordingSink::new(),
    };
    f.app.start(&mut f.hw, &mut f.sink);
    f
}

fn deliver(f: &mut Fixture, event: ShadowEvent) {
    f.app
        .handle_shadow_event(&event, &mut f.hw, &mut f.shadow, &mut f.sink);
}

// ── Connect ───────────────────────────────────────────────────

#[test]
fn connect_reports_current_state_without_merging() {
    let mut f = make_fixture();
    deliver(&mut f, ShadowEvent::Connected);

    assert_eq!(f.shadow.reports, vec![ReportedState { brightness: 0 }]);
    assert_eq!(f.app.brightness(), 0, "connect must not change state");
    assert!(f.shadow.pushes.is_empty());
}

// ── State response merge ──────────────────────────────────────

#[test]
fn state_response_merges_without_acknowledging() {
    let mut f = make_fixture();
    deliver(
        &mut f,
        ShadowEvent::ReportedState {
            reported: Some(StateDelta::brightness(300)),
            desired: None,
        },
    );

    assert_eq!(f.app.brightness(), 300);
    assert_eq!(f.hw.last_lamp_level(), Some(300));
    assert!(
        f.shadow.reports.is_empty(),
        "a state response is not acknowledged with a report"
    );
}

#[test]
fn desired_wins_over_reported_in_a_state_response() {
    let mut f = make_fixture();
    deliver(
        &mut f,
        ShadowEvent::ReportedState {
            reported: Some(StateDelta::brightness(10)),
            desired: Some(StateDelta::brightness(20)),
        },
    );
    assert_eq!(f.app.brightness(), 20);
}

#[test]
fn empty_sections_leave_state_untouched() {
    let mut f = make_fixture();
    deliver(
        &mut f,
        ShadowEvent::ReportedState {
            reported: None,
            desired: Some(StateDelta::default()),
        },
    );
    assert_eq!(f.app.brightness(), 0);
    assert!(
        f.sink
            .count(|e| matches!(e, AppEvent::BrightnessChanged { .. }))
            == 0,
        "a no-op merge must not announce a change"
    );
}

// ── Desired delta ─────────────────────────────────────────────

#[test]
fn desired_delta_converges_and_acknowledges() {
    let mut f = make_fixture();
    deliver(
        &mut f,
        ShadowEvent::DesiredDelta {
            reported: None,
            desired: Some(StateDelta::brightness(750)),
        },
    );

    assert_eq!(f.app.brightness(), 750);
    assert_eq!(f.hw.last_lamp_level(), Some(750));
    assert_eq!(f.shadow.reports, vec![ReportedState { brightness: 750 }]);
    assert_eq!(
        f.sink.count(|e| matches!(
            e,
            AppEvent::BrightnessChanged {
                source: ChangeSource::Remote,
                ..
            }
        )),
        1
    );
}

#[test]
fn remote_values_above_range_are_clamped() {
    let mut f = make_fixture();
    deliver(
        &mut f,
        ShadowEvent::DesiredDelta {
            reported: None,
            desired: Some(StateDelta::brightness(40_000)),
        },
    );
    assert_eq!(f.app.brightness(), BRIGHTNESS_MAX);
    assert_eq!(
        f.shadow.reports,
        vec![ReportedState {
            brightness: BRIGHTNESS_MAX
        }],
        "the ack must carry the clamped value"
    );
}

#[test]
fn remote_merge_does_not_arm_a_push() {
    let mut f = make_fixture();
    deliver(
        &mut f,
        ShadowEvent::DesiredDelta {
            reported: None,
            desired: Some(StateDelta::brightness(500)),
        },
    );
    assert!(
        !f.app.has_pending_push(),
        "remote-sourced changes must not echo back as desired updates"
    );
}

#[test]
fn unknown_events_are_ignored() {
    let mut f = make_fixture();
    deliver(&mut f, ShadowEvent::Other);
    assert!(f.shadow.reports.is_empty());
    assert!(f.shadow.pushes.is_empty());
    assert_eq!(f.app.brightness(), 0);
}

// ── Interleaving with local edits ─────────────────────────────

#[test]
fn local_edit_then_remote_delta_converges_to_remote() {
    let mut f = make_fixture();
    let mut sched = TickScheduler::new(SystemConfig::default().tick_period_ms);

    f.app
        .on_button_press(ButtonId::Up, &mut sched, &mut f.hw, &mut f.sink);
    assert_eq!(f.app.brightness(), 100);

    deliver(
        &mut f,
        ShadowEvent::DesiredDelta {
            reported: None,
            desired: Some(StateDelta::brightness(600)),
        },
    );
    assert_eq!(f.app.brightness(), 600, "the cloud's desired value wins");

    // The earlier tap's debounced push now delivers the merged value.
    for _ in 0..3 {
        f.app
            .on_tick(&mut sched, &mut f.hw, &mut f.shadow, &mut f.sink);
    }
    assert_eq!(f.shadow.pushes, vec![StateDelta::brightness(600)]);
}
