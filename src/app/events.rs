//! Outbound application events and the display contract.
//!
//! The [`MeterService`](super::service::MeterService) emits [`MeterEvent`]s
//! through the [`EventSink`](super::ports::EventSink) port and pushes a
//! fresh [`DisplayFrame`] to the display port whenever anything visible
//! changes. Adapters on the other side decide what to do with them.

use crate::error::SensorError;
use crate::exposure::ExposureResult;
use crate::selection::{AdjustTarget, Selection};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy)]
pub enum MeterEvent {
    /// The meter service has started with the restored selection.
    Started(Selection),

    /// The operator changed aperture, ISO, adjust target, or mode.
    /// Emitted even for saturated no-op presses (the display refreshes).
    SelectionChanged(Selection),

    /// A metering cycle completed.
    Measured {
        selection: Selection,
        result: ExposureResult,
    },

    /// The light sensor could not be read; the loop carries on.
    MeteringFailed(SensorError),

    /// Pack voltage dropped below the configured minimum.
    LowBattery { voltage: f32 },

    /// Pack voltage recovered above the minimum plus hysteresis.
    BatteryRecovered { voltage: f32 },
}

/// What the metering area of the display currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReadingState {
    /// No measurement taken since the last selection change.
    Idle,
    /// Latest metering outcome (valid index or out-of-range marker).
    Result(ExposureResult),
    /// The last metering attempt failed at the sensor.
    Failed,
}

/// A point-in-time snapshot handed to the display collaborator.
#[derive(Debug, Clone, Copy)]
pub struct DisplayFrame {
    pub selection: Selection,
    pub target: AdjustTarget,
    pub reading: ReadingState,
    pub battery_low: bool,
}

impl DisplayFrame {
    /// Shutter text for the metering area: a speed label, the distinct
    /// out-of-range marker, `"ERR"` for a sensor fault, or blank.
    pub fn shutter_text(&self) -> &'static str {
        match self.reading {
            ReadingState::Idle => "",
            ReadingState::Result(r) => r.shutter.label(),
            ReadingState::Failed => "ERR",
        }
    }
}
