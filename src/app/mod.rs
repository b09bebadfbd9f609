//! Application core — pure domain logic, zero I/O.
//!
//! Business rules for the light meter: selection handling, the metering
//! cycle, and the battery advisory. All interaction with hardware happens
//! through the **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
