//! Control-surface input conditioning.
//!
//! Raw GPIO levels come in noisy (mechanical switch bounce) and active-low
//! (internal pull-ups keep the pins high until a switch closes). This
//! module turns them into clean, typed events in two stages:
//!
//! 1. [`debounce`] — per-button stable-window filtering that emits exactly
//!    one `Pressed`/`Released` edge per physical transition.
//! 2. [`gesture`] — classification of the Action button's edge stream into
//!    short, long, and double presses, which is how three physical buttons
//!    carry four operator functions.

pub mod debounce;
pub mod gesture;
