//! Selection state machine.
//!
//! Owns the operator's current aperture index, ISO index, and metering
//! mode — the only state that survives a power cycle. Index moves are
//! saturating, never wrapping: stepping past either end of a table is a
//! no-op on the index but still refreshes the display.
//!
//! Persistence is write-through: every confirmed change is flushed to the
//! settings store immediately (one retry on failure), so an unexpected
//! power loss costs at most the in-flight write. Saturated no-op presses
//! write nothing — the stored value is already current.

use log::warn;

use crate::app::ports::SettingsPort;
use crate::exposure::MeteringMode;
use crate::exposure::tables::{APERTURES, ISOS};

/// Settings-store byte addresses.
pub const APERTURE_ADDR: u8 = 0;
pub const ISO_ADDR: u8 = 1;
pub const MODE_ADDR: u8 = 2;

/// Which free dimension the Inc/Dec buttons currently drive.
///
/// Transient UI state — not persisted, resets to `Aperture` at power-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdjustTarget {
    #[default]
    Aperture,
    Iso,
}

impl AdjustTarget {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Aperture => Self::Iso,
            Self::Iso => Self::Aperture,
        }
    }
}

/// The persisted selection triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub aperture_idx: usize,
    pub iso_idx: usize,
    pub mode: MeteringMode,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            aperture_idx: 0,
            iso_idx: 0,
            mode: MeteringMode::Reflected,
        }
    }
}

impl Selection {
    /// Selected f-number.
    pub fn aperture(&self) -> f64 {
        APERTURES[self.aperture_idx]
    }

    /// Selected ISO sensitivity.
    pub fn iso(&self) -> f64 {
        ISOS[self.iso_idx]
    }
}

/// Flat state holder over [`Selection`] plus the one transient mode bit
/// for which dimension is being adjusted.
pub struct SelectionMachine {
    selection: Selection,
    target: AdjustTarget,
}

impl SelectionMachine {
    /// Start from an explicit selection (tests, defaults).
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            target: AdjustTarget::default(),
        }
    }

    /// Restore the persisted selection from the settings store.
    ///
    /// A fresh store (`NotFound`) or a failed read yields the default for
    /// that field; an out-of-range index from corrupt storage is clamped
    /// onto the table.
    pub fn load(settings: &impl SettingsPort) -> Self {
        let aperture_idx = match settings.load_byte(APERTURE_ADDR) {
            Ok(b) => (b as usize).min(APERTURES.len() - 1),
            Err(e) => {
                warn!("selection: aperture load failed ({e}), using default");
                0
            }
        };
        let iso_idx = match settings.load_byte(ISO_ADDR) {
            Ok(b) => (b as usize).min(ISOS.len() - 1),
            Err(e) => {
                warn!("selection: ISO load failed ({e}), using default");
                0
            }
        };
        let mode = match settings.load_byte(MODE_ADDR) {
            Ok(b) => MeteringMode::from_byte(b),
            Err(e) => {
                warn!("selection: mode load failed ({e}), using default");
                MeteringMode::Reflected
            }
        };

        Self::new(Selection {
            aperture_idx,
            iso_idx,
            mode,
        })
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn target(&self) -> AdjustTarget {
        self.target
    }

    /// Step the active dimension up. Saturates at the top index.
    /// Returns whether the index actually moved.
    pub fn increment(&mut self, settings: &mut impl SettingsPort) -> bool {
        match self.target {
            AdjustTarget::Aperture => {
                let next = (self.selection.aperture_idx + 1).min(APERTURES.len() - 1);
                self.set_aperture_idx(next, settings)
            }
            AdjustTarget::Iso => {
                let next = (self.selection.iso_idx + 1).min(ISOS.len() - 1);
                self.set_iso_idx(next, settings)
            }
        }
    }

    /// Step the active dimension down. Saturates at index 0.
    pub fn decrement(&mut self, settings: &mut impl SettingsPort) -> bool {
        match self.target {
            AdjustTarget::Aperture => {
                let next = self.selection.aperture_idx.saturating_sub(1);
                self.set_aperture_idx(next, settings)
            }
            AdjustTarget::Iso => {
                let next = self.selection.iso_idx.saturating_sub(1);
                self.set_iso_idx(next, settings)
            }
        }
    }

    /// Switch which dimension Inc/Dec drive. Not persisted.
    pub fn toggle_target(&mut self) {
        self.target = self.target.toggled();
    }

    /// Flip reflected/incident metering and persist the new mode.
    pub fn toggle_mode(&mut self, settings: &mut impl SettingsPort) {
        self.selection.mode = self.selection.mode.toggled();
        persist(settings, MODE_ADDR, self.selection.mode as u8);
    }

    fn set_aperture_idx(&mut self, idx: usize, settings: &mut impl SettingsPort) -> bool {
        if idx == self.selection.aperture_idx {
            return false;
        }
        self.selection.aperture_idx = idx;
        persist(settings, APERTURE_ADDR, idx as u8);
        true
    }

    fn set_iso_idx(&mut self, idx: usize, settings: &mut impl SettingsPort) -> bool {
        if idx == self.selection.iso_idx {
            return false;
        }
        self.selection.iso_idx = idx;
        persist(settings, ISO_ADDR, idx as u8);
        true
    }
}

/// Write-through with one immediate retry. A second failure is logged and
/// dropped — persistence is best-effort, the live selection stays valid.
fn persist(settings: &mut impl SettingsPort, addr: u8, value: u8) {
    if settings.save_byte(addr, value).is_ok() {
        return;
    }
    if let Err(e) = settings.save_byte(addr, value) {
        warn!("selection: save to addr {addr} failed twice ({e}), value kept in RAM");
    }
}
