//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production). A future MQTT telemetry
//! adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { brightness } => {
                info!("START | brightness={}", brightness);
            }
            AppEvent::BrightnessChanged { from, to, source } => {
                info!("LOCAL | {} -> {} ({:?})", from, to, source);
            }
            AppEvent::DesiredPushed { brightness } => {
                info!("PUSH  | desired.brightness={}", brightness);
            }
            AppEvent::PushFailed => {
                warn!("PUSH  | update failed, change dropped until next sync");
            }
            AppEvent::StateReported { brightness } => {
                info!("REPORT| reported.brightness={}", brightness);
            }
        }
    }
}
