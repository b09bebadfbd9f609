//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured meter events to the
//! ESP-IDF logger (UART / USB-CDC in production). A future BLE telemetry
//! adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::MeterEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`MeterEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MeterEvent) {
        match event {
            MeterEvent::Started(sel) => {
                info!(
                    "START | f/{:.1} ISO {:.0} {:?}",
                    sel.aperture(),
                    sel.iso(),
                    sel.mode
                );
            }
            MeterEvent::SelectionChanged(sel) => {
                info!(
                    "SEL   | f/{:.1} ISO {:.0} {:?}",
                    sel.aperture(),
                    sel.iso(),
                    sel.mode
                );
            }
            MeterEvent::Measured { selection, result } => {
                info!(
                    "METER | f/{:.1} ISO {:.0} {:?} | EV {:.2} -> {}",
                    selection.aperture(),
                    selection.iso(),
                    selection.mode,
                    result.ev,
                    result.shutter.label(),
                );
            }
            MeterEvent::MeteringFailed(e) => {
                warn!("METER | failed: {e}");
            }
            MeterEvent::LowBattery { voltage } => {
                warn!("BATT  | low: {voltage:.2} V");
            }
            MeterEvent::BatteryRecovered { voltage } => {
                info!("BATT  | recovered: {voltage:.2} V");
            }
        }
    }
}
