//! Meter configuration parameters.
//!
//! All tunable timing and battery constants for the light meter. The values
//! are compile-time defaults matching the reference hardware; the struct is
//! serde-serialisable so a future provisioning path can override them.

use serde::{Deserialize, Serialize};

/// Core meter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterConfig {
    // --- Control surface ---
    /// Button poll interval (milliseconds). Must be well under the
    /// debounce window so a transition is sampled several times.
    pub poll_interval_ms: u32,
    /// Debounce stable window (milliseconds).
    pub debounce_ms: u32,
    /// Hold time for an Action long press (milliseconds).
    pub long_press_ms: u32,
    /// Gap allowed between presses of an Action double press (milliseconds).
    pub double_press_window_ms: u32,

    // --- Battery ---
    /// Number of series LiPo cells (1 for 1S, 2 for 2S, ...).
    pub battery_cells: u8,
    /// Minimum acceptable voltage per cell (volts).
    pub battery_min_volts_per_cell: f32,
    /// Hysteresis above the minimum before the low flag clears (volts).
    pub battery_recover_hysteresis_v: f32,
    /// Battery check interval (milliseconds).
    pub battery_check_interval_ms: u32,
}

impl MeterConfig {
    /// Pack voltage below which the low-battery advisory is raised.
    pub fn battery_min_voltage(&self) -> f32 {
        f32::from(self.battery_cells) * self.battery_min_volts_per_cell
    }
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            // Control surface
            poll_interval_ms: 10, // 100 Hz
            debounce_ms: 20,
            long_press_ms: 1200,
            double_press_window_ms: 300,

            // Battery: single LiPo cell, 3.7 V floor
            battery_cells: 1,
            battery_min_volts_per_cell: 3.7,
            battery_recover_hysteresis_v: 0.1,
            battery_check_interval_ms: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = MeterConfig::default();
        assert!(c.poll_interval_ms > 0);
        assert!(
            c.poll_interval_ms * 2 <= c.debounce_ms,
            "debounce window must span several poll samples"
        );
        assert!(c.long_press_ms > c.double_press_window_ms);
        assert!(c.battery_cells >= 1);
        assert!(c.battery_min_volts_per_cell > 0.0);
        assert!(c.battery_check_interval_ms >= c.poll_interval_ms);
    }

    #[test]
    fn battery_threshold_scales_with_cells() {
        let mut c = MeterConfig::default();
        assert!((c.battery_min_voltage() - 3.7).abs() < 1e-6);
        c.battery_cells = 2;
        assert!((c.battery_min_voltage() - 7.4).abs() < 1e-6);
    }

    #[test]
    fn serde_roundtrip() {
        let c = MeterConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: MeterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.poll_interval_ms, c2.poll_interval_ms);
        assert_eq!(c.debounce_ms, c2.debounce_ms);
        assert!((c.battery_min_volts_per_cell - c2.battery_min_volts_per_cell).abs() < 1e-6);
    }

    #[test]
    fn postcard_roundtrip() {
        let c = MeterConfig::default();
        let bytes = postcard::to_allocvec(&c).unwrap();
        let c2: MeterConfig = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(c.long_press_ms, c2.long_press_ms);
        assert_eq!(c.battery_cells, c2.battery_cells);
    }
}
