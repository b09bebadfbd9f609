//! Exposure computation engine.
//!
//! Pure functions from a light reading plus the selected aperture/ISO/
//! metering mode to a quantized shutter speed. No I/O, no state — the
//! meter loop feeds in a lux sample and renders whatever comes out.
//!
//! The photographic relations used here:
//!
//! ```text
//! EV = log2(lux * iso / C)        C = per-mode calibration constant
//! t  = aperture^2 / 2^EV          required exposure time in seconds
//! ```
//!
//! `t` is then snapped to the nearest entry of the discrete shutter-speed
//! scale on a log2 axis (the scale steps are one stop apart). A reading the
//! scale cannot represent is reported as [`ShutterQuantization::OutOfRange`]
//! rather than clamped, so the operator sees that the current aperture/ISO
//! pairing cannot expose correctly under the measured light.

pub mod tables;

use tables::SHUTTER_SPEEDS;

/// Light metering mode, each bound to its standard calibration constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MeteringMode {
    /// Light reflected off the subject (through-the-meter reading).
    Reflected = 0,
    /// Light incident on the subject (dome toward the camera).
    Incident = 1,
}

impl MeteringMode {
    /// Standard meter calibration constant for the EV formula.
    pub const fn calibration_constant(self) -> f64 {
        match self {
            Self::Reflected => 12.5,
            Self::Incident => 250.0,
        }
    }

    /// The other mode — used by the mode-toggle control.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Reflected => Self::Incident,
            Self::Incident => Self::Reflected,
        }
    }

    /// Decode a persisted byte. Unknown values fall back to `Reflected`.
    pub const fn from_byte(b: u8) -> Self {
        match b {
            1 => Self::Incident,
            _ => Self::Reflected,
        }
    }
}

/// Outcome of snapping an exposure time onto the shutter-speed scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutterQuantization {
    /// Index into [`tables::SHUTTER_SPEEDS`].
    Index(usize),
    /// The required time is off either end of the scale, or the light
    /// reading was unusable (zero, negative, sensor fault).
    OutOfRange,
}

impl ShutterQuantization {
    /// Display label for the quantized speed, or a distinct out-of-range
    /// marker the display renders differently from a normal result.
    pub fn label(self) -> &'static str {
        match self {
            Self::Index(i) => SHUTTER_SPEEDS[i].1,
            Self::OutOfRange => "OUT",
        }
    }

    pub fn index(self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(i),
            Self::OutOfRange => None,
        }
    }
}

/// A complete metering outcome as handed to the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureResult {
    /// Exposure value of the scene for the selected ISO/mode.
    pub ev: f64,
    pub shutter: ShutterQuantization,
}

/// Exposure value for a light reading at the given ISO and mode.
///
/// Returns `None` for readings with no defined logarithm (`lux <= 0`)
/// or non-finite inputs, so a dead sensor can never smuggle a NaN into
/// the quantizer.
pub fn exposure_value(lux: f64, iso: f64, mode: MeteringMode) -> Option<f64> {
    if !lux.is_finite() || lux <= 0.0 {
        return None;
    }
    let ev = (lux * iso / mode.calibration_constant()).log2();
    ev.is_finite().then_some(ev)
}

/// Quantize a light reading to a shutter-speed table index.
///
/// Nearest-match is decided on a log2 scale; an exact tie between two
/// adjacent speeds resolves toward the faster one.
pub fn compute_shutter_index(
    lux: f64,
    aperture: f64,
    iso: f64,
    mode: MeteringMode,
) -> ShutterQuantization {
    let Some(ev) = exposure_value(lux, iso, mode) else {
        return ShutterQuantization::OutOfRange;
    };

    let t = aperture * aperture / ev.exp2();
    if !t.is_finite() {
        return ShutterQuantization::OutOfRange;
    }

    // Range check on the log axis; the epsilon absorbs round-trip error so
    // a reading that computes to exactly 1/2 s or 1/8000 s stays in range.
    const EPS: f64 = 1e-9;
    let log_t = t.log2();
    let log_slowest = SHUTTER_SPEEDS[0].0.log2();
    let log_fastest = SHUTTER_SPEEDS[SHUTTER_SPEEDS.len() - 1].0.log2();
    if log_t > log_slowest + EPS || log_t < log_fastest - EPS {
        return ShutterQuantization::OutOfRange;
    }

    // Distances within TIE_EPS of each other count as a tie; iterating from
    // slow to fast and taking the tied candidate means the faster speed wins.
    const TIE_EPS: f64 = 1e-12;
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, (secs, _)) in SHUTTER_SPEEDS.iter().enumerate() {
        let dist = (log_t - secs.log2()).abs();
        if dist < best_dist - TIE_EPS || (dist - best_dist).abs() <= TIE_EPS {
            best_dist = best_dist.min(dist);
            best = i;
        }
    }
    ShutterQuantization::Index(best)
}

/// Full metering computation: EV plus quantized shutter speed.
pub fn measure(lux: f64, aperture: f64, iso: f64, mode: MeteringMode) -> ExposureResult {
    ExposureResult {
        ev: exposure_value(lux, iso, mode).unwrap_or(f64::NEG_INFINITY),
        shutter: compute_shutter_index(lux, aperture, iso, mode),
    }
}
