//! Shared fakes for integration tests.
//!
//! Recording output pins, a scripted limit input, scripted buttons and a
//! scripted distance sensor, plus a rig that wires them into an [`Elevator`].

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use stepper_lift::driver::MockRegisters;
use stepper_lift::{DistanceSensor, Elevator, ElevatorConfig, SimulatedTimebase};

// =============================================================================
// Output pins
// =============================================================================

#[derive(Debug, Default)]
pub struct PinLog {
    pub high: bool,
    pub rising_edges: u64,
    pub writes: u64,
}

/// Output pin that records its level and rising edges.
#[derive(Debug, Clone, Default)]
pub struct RecordingPin {
    log: Rc<RefCell<PinLog>>,
}

/// Read-only view on a [`RecordingPin`] kept by the test.
#[derive(Debug, Clone)]
pub struct PinView {
    log: Rc<RefCell<PinLog>>,
}

impl RecordingPin {
    pub fn new() -> (Self, PinView) {
        let pin = Self::default();
        let view = PinView {
            log: Rc::clone(&pin.log),
        };
        (pin, view)
    }
}

impl PinView {
    pub fn is_high(&self) -> bool {
        self.log.borrow().high
    }

    pub fn rising_edges(&self) -> u64 {
        self.log.borrow().rising_edges
    }

    pub fn writes(&self) -> u64 {
        self.log.borrow().writes
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        let mut log = self.log.borrow_mut();
        log.high = false;
        log.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mut log = self.log.borrow_mut();
        if !log.high {
            log.rising_edges += 1;
        }
        log.high = true;
        log.writes += 1;
        Ok(())
    }
}

// =============================================================================
// Limit input
// =============================================================================

/// Limit switch input.
///
/// Plays back `script` first, then reads low for `trip_in` more samples and
/// high from then on. With `trip_in == None` it stays low forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLimit {
    script: VecDeque<bool>,
    trip_in: Option<u32>,
    samples: u32,
}

impl ScriptedLimit {
    /// Never asserted.
    pub fn released() -> Self {
        Self::default()
    }

    /// Asserted from the first sample on.
    pub fn at_ground() -> Self {
        Self::trip_after(0)
    }

    /// Low for `samples` samples, then high.
    pub fn trip_after(samples: u32) -> Self {
        Self {
            trip_in: Some(samples),
            ..Self::default()
        }
    }

    /// Play back `levels` (true = high) before the steady behaviour.
    pub fn with_script(mut self, levels: &[bool]) -> Self {
        self.script.extend(levels.iter().copied());
        self
    }

    /// Re-arm in place.
    pub fn arm(&mut self, samples: u32) {
        self.trip_in = Some(samples);
    }

    /// Release the switch.
    pub fn release(&mut self) {
        self.script.clear();
        self.trip_in = None;
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }
}

impl ErrorType for ScriptedLimit {
    type Error = Infallible;
}

impl InputPin for ScriptedLimit {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        self.samples += 1;
        if let Some(level) = self.script.pop_front() {
            return Ok(level);
        }
        Ok(match self.trip_in {
            Some(0) => true,
            Some(n) => {
                self.trip_in = Some(n - 1);
                false
            }
            None => false,
        })
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

// =============================================================================
// Buttons
// =============================================================================

/// Active-low push button driven by the test.
#[derive(Debug, Clone, Default)]
pub struct ScriptedButton {
    pressed: Rc<Cell<bool>>,
}

impl ScriptedButton {
    pub fn press(&self) {
        self.pressed.set(true);
    }

    pub fn release(&self) {
        self.pressed.set(false);
    }
}

impl ErrorType for ScriptedButton {
    type Error = Infallible;
}

impl InputPin for ScriptedButton {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(!self.pressed.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.pressed.get())
    }
}

/// `N` buttons plus the handles that press them.
pub fn button_panel<const N: usize>() -> ([ScriptedButton; N], [ScriptedButton; N]) {
    let pins: [ScriptedButton; N] = core::array::from_fn(|_| ScriptedButton::default());
    let handles = pins.clone();
    (pins, handles)
}

// =============================================================================
// Distance sensor
// =============================================================================

/// Replays one reading per sample; `None` once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSensor {
    readings: VecDeque<Option<i32>>,
    samples: u32,
}

impl ScriptedSensor {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn reading(mm: i32) -> Self {
        Self::with(&[Some(mm)])
    }

    pub fn with(readings: &[Option<i32>]) -> Self {
        Self {
            readings: readings.iter().copied().collect(),
            samples: 0,
        }
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }
}

impl DistanceSensor for ScriptedSensor {
    fn sample_mm(&mut self) -> Option<i32> {
        self.samples += 1;
        self.readings.pop_front().flatten()
    }
}

// =============================================================================
// Rig
// =============================================================================

pub type TestLift = Elevator<
    RecordingPin,
    RecordingPin,
    RecordingPin,
    ScriptedLimit,
    MockRegisters,
    SimulatedTimebase,
>;

pub struct Rig {
    pub lift: TestLift,
    pub step: PinView,
    pub dir: PinView,
    pub enable: PinView,
}

impl Rig {
    pub fn new(config: ElevatorConfig, limit: ScriptedLimit) -> Self {
        let (step_pin, step) = RecordingPin::new();
        let (dir_pin, dir) = RecordingPin::new();
        let (enable_pin, enable) = RecordingPin::new();

        let lift = Elevator::builder()
            .step_pin(step_pin)
            .dir_pin(dir_pin)
            .enable_pin(enable_pin)
            .limit(limit)
            .registers(MockRegisters::new())
            .timebase(SimulatedTimebase::new())
            .config(config)
            .build()
            .unwrap();

        Self {
            lift,
            step,
            dir,
            enable,
        }
    }

    /// Homed at ground with the limit released afterwards.
    pub fn homed(config: ElevatorConfig) -> Self {
        let mut rig = Self::new(config, ScriptedLimit::at_ground());
        rig.lift.home().unwrap();
        rig.lift.limit_mut().release();
        rig
    }
}

/// Default config with a coarse axis so moves stay short.
pub fn coarse_config() -> ElevatorConfig {
    let mut config = ElevatorConfig::default();
    config.motion.steps_per_mm = 2;
    config.motion.ramp_steps = 40;
    config.homing.bounce_steps = 10;
    config.homing.recalibration_bounce_steps = 20;
    config
}
