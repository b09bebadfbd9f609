//! Hardware adapter — bundles the peripheral drivers behind the port
//! traits the meter service consumes.
//!
//! One struct implements [`ControlSurfacePort`], [`LightSensorPort`], and
//! [`BatteryPort`] together so the service can take a single `&mut` for
//! all three concerns per tick.

use crate::app::ports::{BatteryPort, ControlSurfacePort, LightSensorPort};
use crate::control::debounce::Button;
use crate::drivers::battery::BatteryMonitor;
use crate::drivers::buttons;
use crate::drivers::light_sensor::{Calibration, LightSensor};
use crate::error::SensorError;

pub struct HardwareAdapter {
    light: LightSensor,
    battery: BatteryMonitor,
}

impl HardwareAdapter {
    pub fn new() -> Self {
        Self {
            light: LightSensor::new(),
            battery: BatteryMonitor::new(),
        }
    }

    /// Override the factory light calibration (field recalibration).
    pub fn set_light_calibration(&mut self, cal: Calibration) {
        self.light.set_calibration(cal);
    }
}

impl ControlSurfacePort for HardwareAdapter {
    fn raw_pressed(&self, button: Button) -> bool {
        buttons::raw_pressed(button)
    }
}

impl LightSensorPort for HardwareAdapter {
    fn read_lux(&mut self) -> Result<f64, SensorError> {
        self.light.read_lux()
    }
}

impl BatteryPort for HardwareAdapter {
    fn read_voltage(&mut self) -> f32 {
        self.battery.read_voltage()
    }
}
