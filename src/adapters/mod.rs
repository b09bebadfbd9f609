//! Driven adapters — implementations of the port traits in
//! [`app::ports`](crate::app::ports) over real peripherals (or their
//! host-side simulations).

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod time;
