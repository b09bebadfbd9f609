//! Stable-window debouncer for the three-button control surface.
//!
//! Each button gets its own [`Debouncer`] instance — the channels share no
//! timers. A candidate level change is accepted only after it has held
//! continuously for the debounce window (20 ms by default); flicker shorter
//! than the window is discarded without emitting anything. On acceptance
//! the debouncer emits exactly one [`ButtonEvent`] for the edge.

/// Default stable window for tactile switches.
pub const DEBOUNCE_MS: u32 = 20;

/// The three physical controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Inc,
    Dec,
    Action,
}

/// Direction of an accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

/// One accepted transition on one button. Produced once per physical
/// press/release and consumed immediately — never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    pub button: Button,
    pub edge: Edge,
}

/// Per-button debounce state.
pub struct Debouncer {
    button: Button,
    window_ms: u32,
    /// Last accepted (stable) level, true = pressed.
    stable_pressed: bool,
    /// Tick time at which the pending candidate level first appeared.
    candidate_since_ms: Option<u32>,
}

impl Debouncer {
    /// New debouncer in the released state.
    pub fn new(button: Button, window_ms: u32) -> Self {
        Self {
            button,
            window_ms,
            stable_pressed: false,
            candidate_since_ms: None,
        }
    }

    pub fn button(&self) -> Button {
        self.button
    }

    /// Last accepted level (true = pressed).
    pub fn is_pressed(&self) -> bool {
        self.stable_pressed
    }

    /// Feed one raw sample taken at `now_ms`.
    ///
    /// `raw_pressed` is the electrically-decoded level: true when the pin
    /// reads low (switch closed against the pull-up).
    pub fn sample(&mut self, raw_pressed: bool, now_ms: u32) -> Option<ButtonEvent> {
        if raw_pressed == self.stable_pressed {
            // Back at (or still at) the stable level — any pending
            // candidate was bounce.
            self.candidate_since_ms = None;
            return None;
        }

        match self.candidate_since_ms {
            None => {
                self.candidate_since_ms = Some(now_ms);
                None
            }
            Some(since_ms) => {
                if now_ms.wrapping_sub(since_ms) >= self.window_ms {
                    self.stable_pressed = raw_pressed;
                    self.candidate_since_ms = None;
                    let edge = if raw_pressed {
                        Edge::Pressed
                    } else {
                        Edge::Released
                    };
                    Some(ButtonEvent {
                        button: self.button,
                        edge,
                    })
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(d: &mut Debouncer, samples: &[(bool, u32)]) -> Vec<ButtonEvent> {
        samples
            .iter()
            .filter_map(|&(raw, t)| d.sample(raw, t))
            .collect()
    }

    #[test]
    fn steady_released_emits_nothing() {
        let mut d = Debouncer::new(Button::Inc, DEBOUNCE_MS);
        let events = feed(&mut d, &[(false, 0), (false, 10), (false, 100)]);
        assert!(events.is_empty());
    }

    #[test]
    fn press_held_past_window_emits_exactly_one_pressed() {
        let mut d = Debouncer::new(Button::Inc, DEBOUNCE_MS);
        let events = feed(
            &mut d,
            &[(true, 0), (true, 10), (true, 20), (true, 30), (true, 40)],
        );
        assert_eq!(
            events,
            vec![ButtonEvent {
                button: Button::Inc,
                edge: Edge::Pressed
            }]
        );
        assert!(d.is_pressed());
    }

    #[test]
    fn flicker_below_window_is_discarded() {
        let mut d = Debouncer::new(Button::Dec, DEBOUNCE_MS);
        // Low for 10 ms, back high, low again for 15 ms, back high.
        let events = feed(
            &mut d,
            &[
                (true, 0),
                (true, 10),
                (false, 12),
                (true, 30),
                (true, 45),
                (false, 46),
                (false, 80),
            ],
        );
        assert!(
            events.is_empty(),
            "bounce must not produce events: {events:?}"
        );
        assert!(!d.is_pressed());
    }

    #[test]
    fn release_also_debounced_and_emits_once() {
        let mut d = Debouncer::new(Button::Action, DEBOUNCE_MS);
        assert!(d.sample(true, 0).is_none());
        assert!(d.sample(true, 25).is_some()); // Pressed accepted

        // Bounce on release: high for 5 ms, low again, then a clean release.
        assert!(d.sample(false, 100).is_none());
        assert!(d.sample(true, 105).is_none());
        assert!(d.sample(false, 110).is_none());
        let ev = d.sample(false, 135).expect("stable release must emit");
        assert_eq!(ev.edge, Edge::Released);
        assert!(!d.is_pressed());

        // No further events while the level stays put.
        assert!(d.sample(false, 200).is_none());
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let mut d = Debouncer::new(Button::Inc, DEBOUNCE_MS);
        assert!(d.sample(true, 100).is_none());
        // Exactly 20 ms later: accepted.
        assert!(d.sample(true, 120).is_some());
    }

    #[test]
    fn channels_are_independent() {
        let mut inc = Debouncer::new(Button::Inc, DEBOUNCE_MS);
        let mut dec = Debouncer::new(Button::Dec, DEBOUNCE_MS);
        assert!(inc.sample(true, 0).is_none());
        // Dec's timer is untouched by Inc's pending candidate.
        assert!(dec.sample(true, 15).is_none());
        assert!(inc.sample(true, 20).is_some());
        assert!(dec.sample(true, 20).is_none());
        assert!(dec.sample(true, 35).is_some());
    }

    #[test]
    fn tick_counter_wraparound_is_handled() {
        let mut d = Debouncer::new(Button::Inc, DEBOUNCE_MS);
        let near_max = u32::MAX - 5;
        assert!(d.sample(true, near_max).is_none());
        // 25 ms later the counter has wrapped; the window still closes.
        assert!(d.sample(true, near_max.wrapping_add(25)).is_some());
    }
}
