//! Meter service — the hexagonal core.
//!
//! [`MeterService`] owns the selection state machine, the per-button
//! debouncers, and the Action-button gesture detector. It exposes a single
//! [`tick`](MeterService::tick) that the firmware loop calls at the poll
//! cadence. All I/O flows through port traits injected at the call site,
//! making the entire service testable with mock adapters.
//!
//! ```text
//! ControlSurfacePort ──▶ ┌──────────────────────────┐ ──▶ DisplayPort
//! LightSensorPort    ──▶ │       MeterService        │ ──▶ EventSink
//! BatteryPort        ──▶ │ debounce · gesture ·      │
//! SettingsPort       ◀──▶│ selection · exposure      │
//!                        └──────────────────────────┘
//! ```
//!
//! Per-cycle order: poll raw levels → debounce → selection / gesture
//! handling → (on measure) sensor sample → exposure engine → display.
//! No sub-step failure stops the loop; faults are surfaced as events and
//! polling continues (the device must never halt in the field).

use log::{info, warn};

use crate::config::MeterConfig;
use crate::control::debounce::{Button, Debouncer, Edge};
use crate::control::gesture::{Gesture, GestureDetector};
use crate::exposure;

use super::events::{DisplayFrame, MeterEvent, ReadingState};
use super::ports::{
    BatteryPort, ControlSurfacePort, DisplayPort, EventSink, LightSensorPort, SettingsPort,
};
use crate::selection::SelectionMachine;

/// The application service orchestrating one meter cycle per tick.
pub struct MeterService {
    config: MeterConfig,
    machine: SelectionMachine,
    inc: Debouncer,
    dec: Debouncer,
    action: Debouncer,
    gesture: GestureDetector,
    reading: ReadingState,
    battery_low: bool,
    /// Poll ticks between battery checks (>= 1).
    battery_check_ticks: u64,
    tick_count: u64,
}

impl MeterService {
    pub fn new(config: MeterConfig, machine: SelectionMachine) -> Self {
        let battery_check_ticks =
            u64::from((config.battery_check_interval_ms / config.poll_interval_ms).max(1));
        Self {
            inc: Debouncer::new(Button::Inc, config.debounce_ms),
            dec: Debouncer::new(Button::Dec, config.debounce_ms),
            action: Debouncer::new(Button::Action, config.debounce_ms),
            gesture: GestureDetector::new(config.long_press_ms, config.double_press_window_ms),
            machine,
            reading: ReadingState::Idle,
            battery_low: false,
            battery_check_ticks,
            tick_count: 0,
            config,
        }
    }

    /// Announce the restored selection and paint the first frame.
    pub fn start(&mut self, display: &mut impl DisplayPort, sink: &mut impl EventSink) {
        let selection = self.machine.selection();
        sink.emit(&MeterEvent::Started(selection));
        info!(
            "meter started: f/{} ISO {} {:?}",
            selection.aperture(),
            selection.iso(),
            selection.mode
        );
        self.render(display);
    }

    /// Run one full poll cycle.
    ///
    /// The `hw` parameter satisfies the control-surface, light-sensor, and
    /// battery ports together — this avoids a triple mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl ControlSurfacePort + LightSensorPort + BatteryPort),
        settings: &mut impl SettingsPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Debounce the raw levels. One event max per button per tick.
        let inc_edge = self.inc.sample(hw.raw_pressed(Button::Inc), now_ms);
        let dec_edge = self.dec.sample(hw.raw_pressed(Button::Dec), now_ms);
        let action_edge = self
            .action
            .sample(hw.raw_pressed(Button::Action), now_ms)
            .map(|ev| ev.edge);

        // 2. Inc/Dec drive the active dimension on their Pressed edge.
        //    Saturated presses still refresh the display (the operator sees
        //    the value re-asserted) but change nothing and write nothing.
        if inc_edge.is_some_and(|ev| ev.edge == Edge::Pressed) {
            self.machine.increment(settings);
            self.on_selection_touched(display, sink);
        }
        if dec_edge.is_some_and(|ev| ev.edge == Edge::Pressed) {
            self.machine.decrement(settings);
            self.on_selection_touched(display, sink);
        }

        // 3. Action gestures: measure / switch dimension / toggle mode.
        //    The detector runs every tick so long presses and expiring
        //    double windows fire without a fresh edge.
        match self.gesture.update(action_edge, now_ms) {
            Some(Gesture::ShortPress) => self.run_metering_cycle(hw, display, sink),
            Some(Gesture::LongPress) => {
                self.machine.toggle_target();
                self.on_selection_touched(display, sink);
            }
            Some(Gesture::DoublePress) => {
                self.machine.toggle_mode(settings);
                self.on_selection_touched(display, sink);
            }
            None => {}
        }

        // 4. Battery advisory at its own cadence.
        if self.tick_count % self.battery_check_ticks == 1 || self.battery_check_ticks == 1 {
            self.check_battery(hw, display, sink);
        }
    }

    /// Current selection (for telemetry or RPC read-back).
    pub fn selection(&self) -> crate::selection::Selection {
        self.machine.selection()
    }

    /// Latest metering outcome shown on the display.
    pub fn reading(&self) -> ReadingState {
        self.reading
    }

    /// Whether the low-battery advisory is currently raised.
    pub fn battery_low(&self) -> bool {
        self.battery_low
    }

    // ── Internal ──────────────────────────────────────────────

    /// One metering cycle: sensor sample → exposure engine → report.
    fn run_metering_cycle(
        &mut self,
        hw: &mut impl LightSensorPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        let selection = self.machine.selection();
        match hw.read_lux() {
            Ok(lux) => {
                let result = exposure::measure(
                    lux,
                    selection.aperture(),
                    selection.iso(),
                    selection.mode,
                );
                self.reading = ReadingState::Result(result);
                sink.emit(&MeterEvent::Measured { selection, result });
            }
            Err(e) => {
                warn!("metering failed: {e}");
                self.reading = ReadingState::Failed;
                sink.emit(&MeterEvent::MeteringFailed(e));
            }
        }
        self.render(display);
    }

    /// A selection field (or the adjust target) was touched: any previous
    /// reading no longer matches the settings it was computed for.
    fn on_selection_touched(&mut self, display: &mut impl DisplayPort, sink: &mut impl EventSink) {
        self.reading = ReadingState::Idle;
        sink.emit(&MeterEvent::SelectionChanged(self.machine.selection()));
        self.render(display);
    }

    fn check_battery(
        &mut self,
        hw: &mut impl BatteryPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        let voltage = hw.read_voltage();
        let min = self.config.battery_min_voltage();
        if !self.battery_low && voltage < min {
            self.battery_low = true;
            warn!("battery low: {voltage:.2} V < {min:.2} V");
            sink.emit(&MeterEvent::LowBattery { voltage });
            self.render(display);
        } else if self.battery_low && voltage >= min + self.config.battery_recover_hysteresis_v {
            self.battery_low = false;
            info!("battery recovered: {voltage:.2} V");
            sink.emit(&MeterEvent::BatteryRecovered { voltage });
            self.render(display);
        }
    }

    fn render(&self, display: &mut impl DisplayPort) {
        display.render(&DisplayFrame {
            selection: self.machine.selection(),
            target: self.machine.target(),
            reading: self.reading,
            battery_low: self.battery_low,
        });
    }
}
