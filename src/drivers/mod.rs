//! Peripheral drivers and one-shot hardware initialisation.

pub mod battery;
pub mod buttons;
pub mod hw_init;
pub mod light_sensor;
