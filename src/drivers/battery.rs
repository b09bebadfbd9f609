//! Battery pack voltage monitor.
//!
//! Samples the pack through a 1:2 resistive divider on an ADC channel and
//! scales counts back to pack volts. A failed conversion reports 0.0 V,
//! which the advisory logic in the meter service treats as low.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::pins;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_BATTERY_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_battery_adc(raw: u16) {
    SIM_BATTERY_ADC.store(raw, Ordering::Relaxed);
}

/// ADC reference at 12 dB attenuation, volts.
const ADC_REF_V: f32 = 3.3;
/// 12-bit full scale.
const ADC_MAX: f32 = 4095.0;
/// External divider halves the pack voltage before the pin.
const DIVIDER_RATIO: f32 = 2.0;

pub struct BatteryMonitor {
    _adc_gpio: i32,
}

impl BatteryMonitor {
    pub fn new() -> Self {
        Self {
            _adc_gpio: pins::BATTERY_ADC_GPIO,
        }
    }

    /// Current pack voltage. 0.0 when the conversion fails.
    pub fn read_voltage(&mut self) -> f32 {
        let Some(raw) = self.read_adc() else {
            return 0.0;
        };
        f32::from(raw) / ADC_MAX * ADC_REF_V * DIVIDER_RATIO
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Option<u16> {
        hw_init::adc1_read(pins::BATTERY_ADC_CHANNEL)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Option<u16> {
        Some(SIM_BATTERY_ADC.load(Ordering::Relaxed))
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn full_scale_maps_to_divider_ceiling() {
        let mut mon = BatteryMonitor::new();
        sim_set_battery_adc(4095);
        let v = mon.read_voltage();
        assert!((v - 6.6).abs() < 0.01);
    }

    #[test]
    fn midpoint_counts_land_near_nominal_cell() {
        let mut mon = BatteryMonitor::new();
        // 4095 * 3.7 / 6.6 ~ 2296 counts for a nominal single cell.
        sim_set_battery_adc(2296);
        let v = mon.read_voltage();
        assert!((v - 3.7).abs() < 0.01, "got {v}");
    }
}
