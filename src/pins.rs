//! GPIO / peripheral pin assignments for the meter main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Buttons (momentary switches, active-low with internal pull-ups)
// ---------------------------------------------------------------------------

/// Increment button — steps the active dimension up.
pub const INC_BUTTON_GPIO: i32 = 16;
/// Decrement button — steps the active dimension down.
pub const DEC_BUTTON_GPIO: i32 = 14;
/// Action button — measure (short), switch dimension (long),
/// toggle metering mode (double).
pub const ACTION_BUTTON_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Ambient light sensor — analog output via resistive divider.
/// ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const LUX_ADC_GPIO: i32 = 1;
pub const LUX_ADC_CHANNEL: u32 = 0;

/// Battery pack voltage through a 1:2 divider.
/// ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const BATTERY_ADC_GPIO: i32 = 4;
pub const BATTERY_ADC_CHANNEL: u32 = 3;

// ---------------------------------------------------------------------------
// OLED display (SPI, driven by the external display collaborator)
// ---------------------------------------------------------------------------

pub const OLED_MOSI_GPIO: i32 = 9;
pub const OLED_CLK_GPIO: i32 = 10;
pub const OLED_DC_GPIO: i32 = 11;
pub const OLED_CS_GPIO: i32 = 12;
pub const OLED_RESET_GPIO: i32 = 13;
