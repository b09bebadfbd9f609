//! Serial display adapter.
//!
//! Renders each [`DisplayFrame`] as a single fixed-layout console line,
//! mirroring what the OLED collaborator shows. Formatting goes through a
//! fixed-capacity `heapless::String`, so rendering never allocates and a
//! runaway format cannot exhaust the heap mid-loop.

use core::fmt::Write as _;

use heapless::String;
use log::info;

use crate::app::events::DisplayFrame;
use crate::app::ports::DisplayPort;
use crate::selection::AdjustTarget;

/// One rendered line fits comfortably in 96 bytes.
const LINE_CAP: usize = 96;

pub struct SerialDisplay;

impl SerialDisplay {
    pub fn new() -> Self {
        Self
    }

    fn format_line(frame: &DisplayFrame) -> String<LINE_CAP> {
        let mut line: String<LINE_CAP> = String::new();
        let sel = frame.selection;
        let (ap_mark, iso_mark) = match frame.target {
            AdjustTarget::Aperture => ('>', ' '),
            AdjustTarget::Iso => (' ', '>'),
        };
        // Truncation on overflow is acceptable for a status line.
        let _ = write!(
            line,
            "{}f/{:<4.1} {}ISO {:<5.0} {} {:>6}",
            ap_mark,
            sel.aperture(),
            iso_mark,
            sel.iso(),
            match sel.mode {
                crate::exposure::MeteringMode::Reflected => "REFL",
                crate::exposure::MeteringMode::Incident => "INCD",
            },
            frame.shutter_text(),
        );
        if frame.battery_low {
            let _ = write!(line, "  BAT LOW");
        }
        line
    }
}

impl DisplayPort for SerialDisplay {
    fn render(&mut self, frame: &DisplayFrame) {
        info!("DISP  | {}", Self::format_line(frame));
    }
}
