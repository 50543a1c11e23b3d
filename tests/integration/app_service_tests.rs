//! Integration tests for the button → store → scheduler → shadow pipeline.
//!
//! These run on the host (x86_64) and drive the full service through its
//! public surface: simulated button edges plus explicit tick advances,
//! with every port call recorded by the mocks.

use crate::mock_hw::{MockHardware, MockShadow, RecordingSink};

use lumanode::app::events::{AppEvent, ChangeSource};
use lumanode::app::ports::ButtonId;
use lumanode::app::service::AppService;
use lumanode::brightness::BRIGHTNESS_MAX;
use lumanode::config::SystemConfig;
use lumanode::scheduler::TickScheduler;
use lumanode::shadow::StateDelta;

struct Fixture {
    app: AppService,
    sched: TickScheduler,
    hw: MockHardware,
    shadow: MockShadow,
    sink: RecordingSink,
}

/// Default timings: 50ms tick, 100ms push debounce (2 ticks), 500ms
/// long-press window (10 ticks), ±100 tap delta.
fn make_fixture() -> Fixture {
    let config = SystemConfig::default();
    let tick_period_ms = config.tick_period_ms;
    let mut f = Fixture {
        app: AppService::new(config),
        sched: TickScheduler::new(tick_period_ms),
        hw: MockHardware::new(),
        shadow: MockShadow::new(),
        sink: RecordingSink::new(),
    };
    f.app.start(&mut f.hw, &mut f.sink);
    f
}

fn run_ticks(f: &mut Fixture, n: u32) {
    for _ in 0..n {
        f.app
            .on_tick(&mut f.sched, &mut f.hw, &mut f.shadow, &mut f.sink);
    }
}

fn press(f: &mut Fixture, button: ButtonId) {
    f.hw.press(button);
    f.app
        .on_button_press(button, &mut f.sched, &mut f.hw, &mut f.sink);
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn startup_drives_lamp_to_initial_level() {
    let f = make_fixture();
    assert_eq!(f.hw.lamp_levels, vec![0], "lamp must mirror initial state");
    assert_eq!(
        f.sink.count(|e| matches!(e, AppEvent::Started { .. })),
        1
    );
}

// ── Tap path ──────────────────────────────────────────────────

#[test]
fn up_tap_applies_delta_and_pushes_after_debounce() {
    let mut f = make_fixture();
    press(&mut f, ButtonId::Up);

    assert_eq!(f.app.brightness(), 100, "tap delta applies immediately");
    assert_eq!(f.hw.last_lamp_level(), Some(100));
    assert!(f.app.has_pending_push());
    assert!(f.shadow.pushes.is_empty(), "push waits for the debounce");

    // 100ms debounce = 2 ticks: scheduled at tick 1, fires on the 3rd.
    run_ticks(&mut f, 2);
    assert!(f.shadow.pushes.is_empty());
    run_ticks(&mut f, 1);
    assert_eq!(f.shadow.pushes, vec![StateDelta::brightness(100)]);
    assert!(!f.app.has_pending_push());
}

#[test]
fn down_tap_at_zero_clamps_but_still_pushes() {
    let mut f = make_fixture();
    press(&mut f, ButtonId::Down);

    assert_eq!(f.app.brightness(), 0, "clamped at the low edge");
    assert!(f.app.has_pending_push(), "a clamped tap is still a change");

    f.hw.release_all();
    run_ticks(&mut f, 3);
    assert_eq!(f.shadow.pushes, vec![StateDelta::brightness(0)]);
}

#[test]
fn rapid_taps_coalesce_into_one_push() {
    let mut f = make_fixture();
    press(&mut f, ButtonId::Up);
    press(&mut f, ButtonId::Up);
    f.hw.release_all();

    assert_eq!(f.app.brightness(), 200);

    // Both push tasks share the same deadline; the first clears the
    // pending flag and the second's predicate cancels it in the same pass.
    run_ticks(&mut f, 3);
    assert_eq!(
        f.shadow.pushes,
        vec![StateDelta::brightness(200)],
        "coalesced taps must produce exactly one push with the final value"
    );
    assert!(!f.app.has_pending_push());
}

// ── Hold path ─────────────────────────────────────────────────

#[test]
fn held_button_drives_to_maximum_and_pushes_again() {
    let mut f = make_fixture();
    press(&mut f, ButtonId::Up); // stays pressed

    // Debounced push of the tap value first (3rd tick).
    run_ticks(&mut f, 3);
    assert_eq!(f.shadow.pushes, vec![StateDelta::brightness(100)]);

    // 500ms window = 10 ticks: the hold check fires on the 11th tick.
    run_ticks(&mut f, 7);
    assert_eq!(f.app.brightness(), 100, "hold must not fire early");
    run_ticks(&mut f, 1);
    assert_eq!(f.app.brightness(), BRIGHTNESS_MAX);
    assert_eq!(f.hw.last_lamp_level(), Some(BRIGHTNESS_MAX));
    assert_eq!(
        f.sink.count(|e| matches!(
            e,
            AppEvent::BrightnessChanged {
                source: ChangeSource::Hold,
                ..
            }
        )),
        1
    );

    // The hold schedules its own debounced push (2 more ticks).
    run_ticks(&mut f, 2);
    assert_eq!(
        f.shadow.pushes,
        vec![
            StateDelta::brightness(100),
            StateDelta::brightness(BRIGHTNESS_MAX)
        ]
    );
}

#[test]
fn held_down_button_drives_to_zero() {
    let mut f = make_fixture();
    press(&mut f, ButtonId::Up);
    f.hw.release_all();
    run_ticks(&mut f, 20); // settle at 100, queue drained

    press(&mut f, ButtonId::Down); // stays pressed
    assert_eq!(f.app.brightness(), 0, "tap from 100 clamps at the bottom");
    run_ticks(&mut f, 11);
    assert_eq!(f.app.brightness(), 0, "hold clamps at the bottom too");
}

#[test]
fn release_before_window_cancels_hold() {
    let mut f = make_fixture();
    press(&mut f, ButtonId::Up);

    // Released at ~200ms — the next tick's predicate drops the check.
    run_ticks(&mut f, 4);
    f.hw.release_all();
    run_ticks(&mut f, 20);

    assert_eq!(f.app.brightness(), 100, "only the tap delta survives");
    assert_eq!(
        f.sink.count(|e| matches!(
            e,
            AppEvent::BrightnessChanged {
                source: ChangeSource::Hold,
                ..
            }
        )),
        0
    );
}

// ── Push failure ──────────────────────────────────────────────

#[test]
fn failed_push_is_dropped_not_retried() {
    let mut f = make_fixture();
    f.shadow.fail_pushes = true;
    press(&mut f, ButtonId::Up);
    f.hw.release_all();

    run_ticks(&mut f, 3);
    assert!(f.shadow.pushes.is_empty());
    assert_eq!(f.sink.count(|e| matches!(e, AppEvent::PushFailed)), 1);
    assert!(!f.app.has_pending_push(), "failure still clears the flag");

    // Transport recovers, but the dropped change is not re-sent.
    f.shadow.fail_pushes = false;
    run_ticks(&mut f, 20);
    assert!(f.shadow.pushes.is_empty());
}

// ── Scheduler bookkeeping ─────────────────────────────────────

#[test]
fn tick_counter_resets_once_queue_drains() {
    let mut f = make_fixture();
    press(&mut f, ButtonId::Up);
    f.hw.release_all();

    run_ticks(&mut f, 2);
    assert!(f.sched.current_tick() > 1, "counter advances while busy");

    run_ticks(&mut f, 1); // push fires, hold check is already cancelled
    assert_eq!(f.sched.pending(), 0);
    assert_eq!(f.sched.current_tick(), 1);
}
