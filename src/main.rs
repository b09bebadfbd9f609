//! Luxmeter firmware — main entry point.
//!
//! Hexagonal architecture with a fixed-cadence polling loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter   SerialDisplay   LogEventSink          │
//! │  (Buttons+Lux+Batt) (DisplayPort)  (EventSink)           │
//! │  NvsSettings       MonotonicClock                        │
//! │  (SettingsPort)    (tick timestamps)                     │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            MeterService (pure logic)               │  │
//! │  │  debounce · gestures · selection · exposure        │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use luxmeter::adapters::display::SerialDisplay;
use luxmeter::adapters::hardware::HardwareAdapter;
use luxmeter::adapters::log_sink::LogEventSink;
use luxmeter::adapters::nvs::NvsSettings;
use luxmeter::adapters::time::MonotonicClock;
use luxmeter::app::service::MeterService;
use luxmeter::drivers::hw_init;
use luxmeter::selection::SelectionMachine;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Luxmeter v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Settings store + configuration ─────────────────────
    // A dead NVS partition is unrecoverable at runtime; fail fast and let
    // the supervisor reset us. Everything after this point tolerates
    // storage errors by warning and carrying on.
    let mut settings =
        NvsSettings::new().map_err(|e| anyhow::anyhow!("NVS init failed: {e}"))?;
    let config = settings.load_config();
    let poll_interval_ms = config.poll_interval_ms;

    // ── 4. Restore the operator's selection ───────────────────
    let machine = SelectionMachine::load(&settings);

    // ── 5. Construct adapters + service ───────────────────────
    let mut hw = HardwareAdapter::new();
    let mut display = SerialDisplay::new();
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    let mut service = MeterService::new(config, machine);
    service.start(&mut display, &mut sink);

    info!("System ready. Entering meter loop.");

    // ── 6. Meter loop ─────────────────────────────────────────
    loop {
        service.tick(
            clock.now_ms(),
            &mut hw,
            &mut settings,
            &mut display,
            &mut sink,
        );
        esp_idf_hal::delay::FreeRtos::delay_ms(poll_interval_ms);
    }
}
