//! Mock adapters for integration tests.
//!
//! Record every port call so tests can assert on the full command
//! history without touching real GPIO/PWM registers or a live shadow
//! session.

use lumanode::app::events::AppEvent;
use lumanode::app::ports::{ButtonId, ButtonPinPort, EventSink, LampPort, ShadowError, ShadowPort};
use lumanode::shadow::{ReportedState, StateDelta};

// ── MockHardware ──────────────────────────────────────────────

/// Scriptable pin levels plus a full history of lamp writes.
pub struct MockHardware {
    pub up_pressed: bool,
    pub down_pressed: bool,
    pub lamp_levels: Vec<u16>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            up_pressed: false,
            down_pressed: false,
            lamp_levels: Vec::new(),
        }
    }

    pub fn last_lamp_level(&self) -> Option<u16> {
        self.lamp_levels.last().copied()
    }

    pub fn press(&mut self, button: ButtonId) {
        match button {
            ButtonId::Up => self.up_pressed = true,
            ButtonId::Down => self.down_pressed = true,
        }
    }

    pub fn release_all(&mut self) {
        self.up_pressed = false;
        self.down_pressed = false;
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonPinPort for MockHardware {
    fn is_pressed(&mut self, button: ButtonId) -> bool {
        match button {
            ButtonId::Up => self.up_pressed,
            ButtonId::Down => self.down_pressed,
        }
    }
}

impl LampPort for MockHardware {
    fn set_level(&mut self, level: u16) {
        self.lamp_levels.push(level);
    }
}

// ── MockShadow ────────────────────────────────────────────────

/// Shadow port that records both traffic directions and can be told to
/// reject the next push.
pub struct MockShadow {
    pub pushes: Vec<StateDelta>,
    pub reports: Vec<ReportedState>,
    pub fail_pushes: bool,
}

#[allow(dead_code)]
impl MockShadow {
    pub fn new() -> Self {
        Self {
            pushes: Vec::new(),
            reports: Vec::new(),
            fail_pushes: false,
        }
    }
}

impl Default for MockShadow {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadowPort for MockShadow {
    fn push_desired(&mut self, desired: &StateDelta) -> Result<(), ShadowError> {
        if self.fail_pushes {
            return Err(ShadowError::NotConnected);
        }
        self.pushes.push(*desired);
        Ok(())
    }

    fn report_state(&mut self, state: &ReportedState) -> Result<(), ShadowError> {
        self.reports.push(*state);
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Event sink that keeps everything the service emitted.
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
