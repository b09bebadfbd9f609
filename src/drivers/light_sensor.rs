//! Ambient light sensor driver.
//!
//! Reads the photodiode amplifier output through an ESP32-S3 ADC channel
//! and applies a two-point linear calibration from raw counts to lux.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the lux channel via the oneshot API (initialised by
//! hw_init). On host/test: reads from static atomics for injection.

use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use crate::error::SensorError;
use crate::pins;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_LUX_ADC: AtomicU16 = AtomicU16::new(0);
static SIM_LUX_FAIL: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_lux_adc(raw: u16) {
    SIM_LUX_ADC.store(raw, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_lux_fail(fail: bool) {
    SIM_LUX_FAIL.store(fail, Ordering::Relaxed);
}

/// 12-bit conversion ceiling; a pegged reading means the optics are
/// saturated and the lux value cannot be trusted.
const ADC_FULL_SCALE: u16 = 4095;

/// Two-point calibration from ADC counts to illuminance.
#[derive(Debug, Clone, Copy)]
pub struct Calibration {
    /// Counts read with the sensor capped.
    pub dark_adc: u16,
    /// Counts at the calibration illuminance.
    pub span_adc: u16,
    /// Illuminance at `span_adc`, in lux.
    pub span_lux: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            dark_adc: 40,
            span_adc: 4000,
            span_lux: 20_000.0,
        }
    }
}

pub struct LightSensor {
    cal: Calibration,
    _adc_gpio: i32,
}

impl LightSensor {
    pub fn new() -> Self {
        Self {
            cal: Calibration::default(),
            _adc_gpio: pins::LUX_ADC_GPIO,
        }
    }

    pub fn set_calibration(&mut self, cal: Calibration) {
        self.cal = cal;
    }

    /// One illuminance sample.
    ///
    /// `ReadFailed` when the conversion itself fails, `Implausible` when
    /// the ADC is pegged at full scale. A dark reading maps to 0.0 lux,
    /// which downstream quantization reports as out of range, not as a
    /// sensor fault.
    pub fn read_lux(&mut self) -> Result<f64, SensorError> {
        let raw = self.read_adc().ok_or(SensorError::ReadFailed)?;
        if raw >= ADC_FULL_SCALE {
            return Err(SensorError::Implausible);
        }
        Ok(self.adc_to_lux(raw))
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Option<u16> {
        hw_init::adc1_read(pins::LUX_ADC_CHANNEL)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Option<u16> {
        if SIM_LUX_FAIL.load(Ordering::Relaxed) {
            return None;
        }
        Some(SIM_LUX_ADC.load(Ordering::Relaxed))
    }

    fn adc_to_lux(&self, raw: u16) -> f64 {
        if raw <= self.cal.dark_adc {
            return 0.0;
        }
        let range = f64::from(self.cal.span_adc) - f64::from(self.cal.dark_adc);
        if range <= 0.0 {
            return 0.0;
        }
        let normalised = f64::from(raw - self.cal.dark_adc) / range;
        (normalised * self.cal.span_lux).max(0.0)
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    // The sim atomics are process-wide; serialise tests that touch them.
    static SIM_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn dark_counts_map_to_zero_lux() {
        let _guard = SIM_LOCK.lock().unwrap();
        let mut sensor = LightSensor::new();
        sim_set_lux_fail(false);
        sim_set_lux_adc(10);
        assert_eq!(sensor.read_lux().unwrap(), 0.0);
    }

    #[test]
    fn span_point_maps_to_span_lux() {
        let _guard = SIM_LOCK.lock().unwrap();
        let mut sensor = LightSensor::new();
        sim_set_lux_fail(false);
        sim_set_lux_adc(4000);
        let lux = sensor.read_lux().unwrap();
        assert!((lux - 20_000.0).abs() < 1e-6);
    }

    #[test]
    fn pegged_adc_is_implausible() {
        let _guard = SIM_LOCK.lock().unwrap();
        let mut sensor = LightSensor::new();
        sim_set_lux_fail(false);
        sim_set_lux_adc(4095);
        assert_eq!(sensor.read_lux(), Err(SensorError::Implausible));
    }

    #[test]
    fn conversion_failure_is_read_failed() {
        let _guard = SIM_LOCK.lock().unwrap();
        let mut sensor = LightSensor::new();
        sim_set_lux_fail(true);
        assert_eq!(sensor.read_lux(), Err(SensorError::ReadFailed));
        sim_set_lux_fail(false);
    }
}
