//! Press-gesture classification for the Action button.
//!
//! The meter has three buttons but four operator functions (adjust up,
//! adjust down, take a measurement, switch what's being adjusted / the
//! metering mode). The Action button therefore carries three gestures:
//!
//! | Gesture      | Condition                                   |
//! |--------------|---------------------------------------------|
//! | Short press  | Release < long window, no second press soon |
//! | Long press   | Held >= long window (fires while held)      |
//! | Double press | Second press within the double window       |
//!
//! Input is the *debounced* edge stream from
//! [`Debouncer`](super::debounce::Debouncer), so no bounce handling
//! happens here.

use super::debounce::Edge;

/// Classified Action-button gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    ShortPress,
    LongPress,
    DoublePress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureState {
    Idle,
    /// Button is down; waiting to see whether this becomes a long press.
    Pressed { since_ms: u32 },
    /// Button released quickly; waiting out the double-press window.
    AwaitSecond { released_ms: u32 },
    /// Gesture already emitted for the current press; swallow the rest.
    Latched,
}

pub struct GestureDetector {
    long_press_ms: u32,
    double_window_ms: u32,
    state: GestureState,
}

impl GestureDetector {
    pub fn new(long_press_ms: u32, double_window_ms: u32) -> Self {
        Self {
            long_press_ms,
            double_window_ms,
            state: GestureState::Idle,
        }
    }

    /// Advance the detector by one poll tick.
    ///
    /// `edge` is the Action button's debounced edge for this tick, if any.
    /// Returns at most one classified gesture.
    pub fn update(&mut self, edge: Option<Edge>, now_ms: u32) -> Option<Gesture> {
        match self.state {
            GestureState::Idle => {
                if edge == Some(Edge::Pressed) {
                    self.state = GestureState::Pressed { since_ms: now_ms };
                }
                None
            }

            GestureState::Pressed { since_ms } => {
                if now_ms.wrapping_sub(since_ms) >= self.long_press_ms {
                    self.state = GestureState::Latched;
                    return Some(Gesture::LongPress);
                }
                if edge == Some(Edge::Released) {
                    self.state = GestureState::AwaitSecond {
                        released_ms: now_ms,
                    };
                }
                None
            }

            GestureState::AwaitSecond { released_ms } => {
                if edge == Some(Edge::Pressed) {
                    if now_ms.wrapping_sub(released_ms) <= self.double_window_ms {
                        self.state = GestureState::Latched;
                        return Some(Gesture::DoublePress);
                    }
                    // Window expired on the same tick a new press arrived:
                    // emit the pending short press and start the new one.
                    self.state = GestureState::Pressed { since_ms: now_ms };
                    return Some(Gesture::ShortPress);
                }
                if now_ms.wrapping_sub(released_ms) > self.double_window_ms {
                    self.state = GestureState::Idle;
                    return Some(Gesture::ShortPress);
                }
                None
            }

            GestureState::Latched => {
                if edge == Some(Edge::Released) {
                    self.state = GestureState::Idle;
                }
                None
            }
        }
    }
}
