//! Tick-driven deferred-task scheduler.
//!
//! The only concurrency primitive in the firmware: a hardware timer calls
//! [`TickScheduler::advance`] once per period, and everything that needs a
//! delay — the long-press check, the shadow push debounce — is a one-shot
//! task keyed by an absolute tick deadline. Each task also carries a
//! liveness predicate that the delegate re-evaluates every tick; a false
//! predicate cancels the task without firing. Cancellation is therefore
//! cooperative and polled, never signalled.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Trigger Sources                          │
//! │                                                              │
//! │   ┌────────────┐   ┌──────────────┐   ┌──────────────────┐   │
//! │   │ Button ISR │   │ Local adjust │   │ Fired hold-check │   │
//! │   │ (tap+hold) │   │ (push debnc) │   │ (follow-up push) │   │
//! │   └─────┬──────┘   └──────┬───────┘   └────────┬─────────┘   │
//! │         ▼                 ▼                    ▼             │
//! │   ┌────────────────────────────────────────────────────┐     │
//! │   │            TickScheduler task list                 │     │
//! │   │   advance() per tick → TickDelegate callbacks      │     │
//! │   └────────────────────────────────────────────────────┘     │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use log::warn;

use crate::app::ports::{ScheduleRequest, TaskPayload, TickDelegate};

// ═══════════════════════════════════════════════════════════════
//  Task types
// ═══════════════════════════════════════════════════════════════

/// Maximum number of in-flight deferred tasks (stack-allocated).
///
/// Rapid tapping stacks one hold check and one push task per press, so the
/// cap needs headroom; overflow drops the new task with a warning rather
/// than growing without bound.
pub const MAX_TASKS: usize = 16;

/// A single deferred one-shot task.
#[derive(Debug, Clone, Copy)]
struct DeferredTask {
    /// Absolute tick at or after which the task fires.
    deadline_tick: u32,
    /// Tagged payload identifying the predicate/action pair.
    payload: TaskPayload,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// The tick scheduler.
///
/// Intentionally decoupled from the domain: predicates and actions live in
/// a [`TickDelegate`] implemented by the service layer, so the scheduler
/// knows nothing about brightness, pins, or the shadow. This keeps it
/// independently testable with a recording delegate.
pub struct TickScheduler {
    /// Hardware tick period in milliseconds.
    period_ms: u32,
    /// Current tick. Starts at 1 and resets to 1 whenever the task list
    /// drains, bounding integer growth. The reset is safe because
    /// deadlines are always computed from `current_tick` at schedule time,
    /// and a reset only happens when no task exists.
    current_tick: u32,
    /// Pending tasks in insertion order.
    tasks: heapless::Vec<DeferredTask, MAX_TASKS>,
}

impl TickScheduler {
    /// Create a scheduler with a fixed tick period.
    pub fn new(period_ms: u32) -> Self {
        debug_assert!(period_ms > 0);
        Self {
            period_ms,
            current_tick: 1,
            tasks: heapless::Vec::new(),
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Current tick counter (exposed for tests and diagnostics).
    pub fn current_tick(&self) -> u32 {
        self.current_tick
    }

    /// Number of tasks currently queued.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Queue a one-shot task to fire `delay_ms` from now.
    ///
    /// The deadline is `current_tick + delay_ms / period_ms` with
    /// truncating division, so a delay that is not an exact multiple of
    /// the period fires on the earlier tick boundary. Returns `false` if
    /// the task list is full (the task is dropped).
    pub fn schedule(&mut self, delay_ms: u32, payload: TaskPayload) -> bool {
        let deadline_tick = self.current_tick + delay_ms / self.period_ms;
        let task = DeferredTask {
            deadline_tick,
            payload,
        };
        if self.tasks.push(task).is_err() {
            warn!("scheduler: task list full, dropping {:?}", payload);
            return false;
        }
        true
    }

    /// Process one elapsed tick. Call exactly once per hardware period.
    ///
    /// For every task queued at entry, in insertion order:
    /// - predicate false → dropped without firing (polled cancellation);
    /// - due and live → `task_fired` is invoked and the task is dropped;
    /// - live but not yet due → retained for the next tick.
    ///
    /// A fired action may request a follow-up via [`ScheduleRequest`];
    /// follow-ups are appended after the pass with deadlines relative to
    /// the current (pre-increment) tick and are never evaluated within the
    /// same `advance` call. The task list is detached while processing, so
    /// a panicking delegate cannot leave it half-mutated.
    pub fn advance(&mut self, delegate: &mut dyn TickDelegate) {
        let snapshot = core::mem::take(&mut self.tasks);
        let mut follow_ups: heapless::Vec<ScheduleRequest, MAX_TASKS> = heapless::Vec::new();

        for task in &snapshot {
            if !delegate.task_is_live(task.payload) {
                continue;
            }
            if task.deadline_tick <= self.current_tick {
                if let Some(req) = delegate.task_fired(task.payload) {
                    if follow_ups.push(req).is_err() {
                        warn!("scheduler: follow-up overflow, dropping request");
                    }
                }
            } else {
                // Retained tasks cannot overflow: the snapshot held them all.
                let _ = self.tasks.push(*task);
            }
        }

        for req in &follow_ups {
            self.schedule(req.delay_ms, req.payload);
        }

        if self.tasks.is_empty() {
            self.current_tick = 1;
        } else {
            self.current_tick += 1;
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
