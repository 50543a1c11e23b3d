//! Local brightness state.
//!
//! [`BrightnessStore`] owns the canonical brightness value and the
//! pending-push flag. Pure value logic — scheduling the debounced shadow
//! push and driving the lamp output are the service's job, so this stays
//! trivially testable.

use crate::shadow::StateDelta;

/// Upper clamp bound for brightness. A long press drives the value to
/// 0 or this bound.
pub const BRIGHTNESS_MAX: u16 = 1_000;

/// Canonical local brightness plus the dirty flag for shadow pushes.
#[derive(Debug, Clone, Default)]
pub struct BrightnessStore {
    value: u16,
    pending: bool,
}

impl BrightnessStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current brightness, always within `0..=BRIGHTNESS_MAX`.
    pub fn value(&self) -> u16 {
        self.value
    }

    /// True iff a local change has not yet been pushed to the shadow.
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Apply a signed local change, clamped to range.
    ///
    /// Marks the state pending even when clamping leaves the value
    /// unchanged — any local mutation dirties the shadow, matching the
    /// push protocol's last-writer-wins semantics.
    pub fn adjust(&mut self, delta: i32) -> u16 {
        let raw = i32::from(self.value) + delta;
        self.value = raw.clamp(0, i32::from(BRIGHTNESS_MAX)) as u16;
        self.pending = true;
        self.value
    }

    /// Merge a partial remote document into local state.
    ///
    /// Only fields present in the delta are overwritten. Remote values are
    /// clamped so the range invariant holds regardless of what the cloud
    /// sends. Does not mark the state pending — remote data is already in
    /// the shadow.
    pub fn apply_remote(&mut self, delta: &StateDelta) {
        if let Some(brightness) = delta.brightness {
            self.value = brightness.min(BRIGHTNESS_MAX);
        }
    }

    /// Clear the pending flag after a push attempt (successful or not).
    pub fn clear_pending(&mut self) {
        self.pending = false;
    }
}
