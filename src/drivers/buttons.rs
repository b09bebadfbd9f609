//! Raw button level sampling for the three-switch control surface.
//!
//! Buttons are momentary switches to ground with internal pull-ups, read
//! by polling at the meter cadence. This driver only decodes the
//! electrical level (pin low = pressed); debouncing and gesture
//! classification live in [`control`](crate::control).
//!
//! On host/test targets the levels come from static atomics so the meter
//! loop can be driven without hardware.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

use crate::control::debounce::Button;
use crate::pins;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_INC_PRESSED: AtomicBool = AtomicBool::new(false);
#[cfg(not(target_os = "espidf"))]
static SIM_DEC_PRESSED: AtomicBool = AtomicBool::new(false);
#[cfg(not(target_os = "espidf"))]
static SIM_ACTION_PRESSED: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_pressed(button: Button, pressed: bool) {
    sim_atomic(button).store(pressed, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
fn sim_atomic(button: Button) -> &'static AtomicBool {
    match button {
        Button::Inc => &SIM_INC_PRESSED,
        Button::Dec => &SIM_DEC_PRESSED,
        Button::Action => &SIM_ACTION_PRESSED,
    }
}

pub const fn gpio_for(button: Button) -> i32 {
    match button {
        Button::Inc => pins::INC_BUTTON_GPIO,
        Button::Dec => pins::DEC_BUTTON_GPIO,
        Button::Action => pins::ACTION_BUTTON_GPIO,
    }
}

/// Undebounced level for `button`: true = pin low = switch closed.
#[cfg(target_os = "espidf")]
pub fn raw_pressed(button: Button) -> bool {
    !hw_init::gpio_read(gpio_for(button))
}

#[cfg(not(target_os = "espidf"))]
pub fn raw_pressed(button: Button) -> bool {
    sim_atomic(button).load(Ordering::Relaxed)
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn sim_levels_are_per_button() {
        sim_set_pressed(Button::Inc, true);
        assert!(raw_pressed(Button::Inc));
        assert!(!raw_pressed(Button::Dec));
        assert!(!raw_pressed(Button::Action));
        sim_set_pressed(Button::Inc, false);
        assert!(!raw_pressed(Button::Inc));
    }

    #[test]
    fn each_button_has_a_distinct_pin() {
        let pins = [
            gpio_for(Button::Inc),
            gpio_for(Button::Dec),
            gpio_for(Button::Action),
        ];
        assert_ne!(pins[0], pins[1]);
        assert_ne!(pins[1], pins[2]);
        assert_ne!(pins[0], pins[2]);
    }
}
