//! Port traits — the hexagonal boundary between domain logic and hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MeterService (domain)
//! ```
//!
//! Driven adapters (light sensor, battery ADC, button pins, settings
//! store, display) implement these traits. The
//! [`MeterService`](super::service::MeterService) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! All port errors are typed — callers handle every variant explicitly,
//! and no port failure is allowed to stop the meter loop.

use crate::control::debounce::Button;
use crate::error::{SensorError, StorageError};

use super::events::{DisplayFrame, MeterEvent};

// ───────────────────────────────────────────────────────────────
// Light sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the ambient light sensor.
pub trait LightSensorPort {
    /// One bounded-latency illuminance sample in lux.
    fn read_lux(&mut self) -> Result<f64, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Settings store port (driven adapter: domain ↔ non-volatile bytes)
// ───────────────────────────────────────────────────────────────

/// Byte-addressed persistent settings storage.
///
/// The meter persists three bytes: aperture index, ISO index, and
/// metering mode, at the fixed addresses in
/// [`selection`](crate::selection). Writes are atomic per byte and
/// idempotent — writing the same value twice is safe.
pub trait SettingsPort {
    fn load_byte(&self, addr: u8) -> Result<u8, StorageError>;
    fn save_byte(&mut self, addr: u8, value: u8) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Control surface port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw button levels, one sample per poll tick.
pub trait ControlSurfacePort {
    /// Electrically-decoded level for `button`: true = pin low = pressed
    /// (the pull-up keeps released pins high). Undebounced.
    fn raw_pressed(&self, button: Button) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Battery port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Battery pack voltage sampling.
pub trait BatteryPort {
    /// Current pack voltage in volts. A failed ADC read reports 0.0,
    /// which the advisory logic treats as low.
    fn read_voltage(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → display collaborator)
// ───────────────────────────────────────────────────────────────

/// Consumes the current selection plus metering outcome for rendering.
/// Layout and rasterisation live entirely on the adapter side.
pub trait DisplayPort {
    fn render(&mut self, frame: &DisplayFrame);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`MeterEvent`]s through this port.
/// Adapters decide where they go (serial log, future BLE, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &MeterEvent);
}
