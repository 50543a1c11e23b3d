//! Lumanode Firmware — Main Entry Point
//!
//! Hexagonal architecture with event-driven execution.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter      LogEventSink      LogShadowLink          │
//! │  (Buttons+Lamp)       (EventSink)       (ShadowPort)           │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  BrightnessStore · ShadowReconcile                     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  TickScheduler (delegate-driven, 50ms hardware tick)           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use lumanode::adapters::hardware::HardwareAdapter;
use lumanode::adapters::log_sink::LogEventSink;
use lumanode::adapters::shadow_link::{self, LogShadowLink};
use lumanode::app::ports::ButtonId;
use lumanode::app::service::AppService;
use lumanode::config::SystemConfig;
use lumanode::drivers;
use lumanode::events::{self, Event};
use lumanode::scheduler::TickScheduler;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Lumanode v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_button_inputs() {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = drivers::hw_init::init_isr_service() {
        log::error!("ISR service init failed: {} — continuing without ISRs", e);
    } else if let Err(e) = drivers::button::register_buttons(config.isr_debounce_ms) {
        log::error!("Button ISR registration failed: {}", e);
    }
    if let Err(e) = drivers::dimmer::init() {
        log::error!("Dimmer init failed: {} — lamp output disabled", e);
    }
    drivers::hw_timer::start_tick_timer(config.tick_period_ms);

    // ── 3. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new();
    let mut log_sink = LogEventSink::new();
    let mut shadow = LogShadowLink::new();
    let mut sched = TickScheduler::new(config.tick_period_ms);

    // ── 4. Construct app service ──────────────────────────────
    let mut app = AppService::new(config);
    app.start(&mut hw, &mut log_sink);

    info!("System ready. Entering event loop.");

    // ── 5. Event loop ─────────────────────────────────────────
    loop {
        events::drain_events(|event| match event {
            Event::ButtonUpEdge => {
                app.on_button_press(ButtonId::Up, &mut sched, &mut hw, &mut log_sink);
            }
            Event::ButtonDownEdge => {
                app.on_button_press(ButtonId::Down, &mut sched, &mut hw, &mut log_sink);
            }
            Event::TickElapsed => {
                app.on_tick(&mut sched, &mut hw, &mut shadow, &mut log_sink);
            }
        });

        // Shadow events arrive from the transport task via their own
        // bounded channel (they carry payloads the byte queue cannot).
        while let Some(event) = shadow_link::poll_shadow_event() {
            app.handle_shadow_event(&event, &mut hw, &mut shadow, &mut log_sink);
        }

        // Yield to FreeRTOS; the tick timer and ISRs wake us with work.
        esp_idf_hal::delay::FreeRtos::delay_ms(5);
    }
}
