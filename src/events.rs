//! Interrupt-driven event system.
//!
//! Events are produced by:
//! - GPIO ISRs (button falling edges)
//! - the periodic tick timer callback
//!
//! and consumed by the main loop, which processes them one at a time.
//! Funnelling interrupts through this queue is what keeps the scheduler,
//! the brightness store, and the pending flag single-threaded: ISRs never
//! touch shared state directly.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Button ISR  │────▶│              │     │              │
//! │ Tick timer  │────▶│  Event Queue │────▶│  Main Loop   │
//! │             │     │  (lock-free) │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of pending events.
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 16;

/// System event types. Payload-free by design — anything carrying data
/// (shadow events) travels through its own channel instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// Falling edge on the brightness-up button.
    ButtonUpEdge = 0,
    /// Falling edge on the brightness-down button.
    ButtonDownEdge = 1,
    /// One hardware tick period elapsed; advance the scheduler.
    TickElapsed = 10,
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// ISRs and the timer callback write (produce), the main loop reads
// (consume). Atomic head/tail indices; the payload is the `Event`
// discriminant byte.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: each slot is written by the producer strictly before the
// Release store to EVENT_HEAD publishes it, and read by the consumer
// only after the Acquire load of EVENT_HEAD observes that store. The
// indices never allow a slot to be written and read concurrently.
static mut EVENT_BUFFER: [u8; EVENT_QUEUE_CAP] = [0; EVENT_QUEUE_CAP];

/// Push an event into the queue.
/// Safe to call from ISR context (lock-free).
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    // SAFETY: see EVENT_BUFFER — slot `head` is owned by the producer
    // until the Release store below.
    unsafe {
        EVENT_BUFFER[head as usize] = event as u8;
    }

    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event from the queue.
/// Called from the main loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<Event> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: slot `tail` was published by the producer's Release store.
    let raw = unsafe { EVENT_BUFFER[tail as usize] };
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    event_from_u8(raw)
}

/// Drain all pending events into a callback, in FIFO order.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

/// Number of pending events.
pub fn queue_len() -> usize {
    let head = EVENT_HEAD.load(Ordering::Relaxed) as usize;
    let tail = EVENT_TAIL.load(Ordering::Relaxed) as usize;
    (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
}

// ── Internal ──────────────────────────────────────────────────

fn event_from_u8(raw: u8) -> Option<Event> {
    match raw {
        0 => Some(Event::ButtonUpEdge),
        1 => Some(Event::ButtonDownEdge),
        10 => Some(Event::TickElapsed),
        _ => None,
    }
}
