//! Photographic setting tables.
//!
//! Single source of truth for the discrete aperture, ISO, and shutter-speed
//! scales the meter can display. All three are process-wide constants,
//! initialised at compile time and never mutated. Adjacent shutter-speed
//! entries are one full stop (a factor of two in duration) apart.

/// Selectable f-numbers, strictly ascending.
pub const APERTURES: [f64; 10] = [1.2, 1.4, 1.8, 2.0, 2.8, 4.0, 5.6, 8.0, 11.0, 16.0];

/// Selectable ISO sensitivities, strictly ascending.
pub const ISOS: [f64; 7] = [100.0, 200.0, 400.0, 800.0, 1600.0, 3200.0, 6400.0];

/// Shutter speeds as `(duration_secs, display_label)`, strictly descending
/// duration — from the slowest (1/2 s) to the fastest (1/8000 s) the
/// mechanical scale covers.
pub const SHUTTER_SPEEDS: [(f64, &str); 13] = [
    (1.0 / 2.0, "1/2"),
    (1.0 / 4.0, "1/4"),
    (1.0 / 8.0, "1/8"),
    (1.0 / 15.0, "1/15"),
    (1.0 / 30.0, "1/30"),
    (1.0 / 60.0, "1/60"),
    (1.0 / 125.0, "1/125"),
    (1.0 / 250.0, "1/250"),
    (1.0 / 500.0, "1/500"),
    (1.0 / 1000.0, "1/1000"),
    (1.0 / 2000.0, "1/2000"),
    (1.0 / 4000.0, "1/4000"),
    (1.0 / 8000.0, "1/8000"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apertures_strictly_ascending() {
        for w in APERTURES.windows(2) {
            assert!(w[0] < w[1], "apertures must ascend: {} >= {}", w[0], w[1]);
        }
    }

    #[test]
    fn isos_strictly_ascending() {
        for w in ISOS.windows(2) {
            assert!(w[0] < w[1], "ISOs must ascend: {} >= {}", w[0], w[1]);
        }
    }

    #[test]
    fn shutter_durations_strictly_descending() {
        for w in SHUTTER_SPEEDS.windows(2) {
            assert!(
                w[0].0 > w[1].0,
                "shutter durations must descend: {} <= {}",
                w[0].0,
                w[1].0
            );
        }
    }

    #[test]
    fn shutter_scale_spans_half_to_eight_thousandth() {
        assert!((SHUTTER_SPEEDS[0].0 - 0.5).abs() < 1e-12);
        assert!((SHUTTER_SPEEDS[SHUTTER_SPEEDS.len() - 1].0 - 1.0 / 8000.0).abs() < 1e-12);
    }

    #[test]
    fn shutter_steps_are_roughly_one_stop() {
        // Steps like 1/8 -> 1/15 are nominal stops, not exact halvings;
        // allow the usual photographic rounding slack.
        for w in SHUTTER_SPEEDS.windows(2) {
            let ratio = w[0].0 / w[1].0;
            assert!(
                (1.8..=2.2).contains(&ratio),
                "step {} -> {} is not ~1 stop (ratio {ratio})",
                w[0].1,
                w[1].1
            );
        }
    }
}
