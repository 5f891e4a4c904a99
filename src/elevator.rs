//! Elevator controller.
//!
//! One aggregate owns the position, the target queue, the driver state and
//! every hardware handle. All work happens on the caller's thread through
//! [`Elevator::poll`]; step emission never overlaps with button scanning or
//! driver health checks.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::clock::Timebase;
use crate::config::{
    validate_config, ElevatorConfig, EmergencyStopPolicy, HomingConfig, Millimeters, MotionConfig,
};
use crate::correction::{Correction, DistanceSensor, PositionCorrection};
use crate::driver::{HealthReport, MotorDriver, RegisterInterface};
use crate::error::{ConfigError, Error, MotionError, Result};
use crate::floor::{DropReason, FloorId, FloorTable, RequestOutcome, RequestSource, TargetQueue};
use crate::motion::{MotionExecutor, MotionProfile, StepOutcome};
use crate::motor::homing::{bounce_off, run_homing};
use crate::motor::{
    CalibrationState, ElevatorState, HomingReport, Position, StateName, StepperOutputs,
};

/// How a dispatched target was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Within tolerance of the target; no steps emitted.
    AlreadyThere,
    /// Every step emitted; position set from the target (and sensor).
    Arrived {
        /// Steps emitted.
        steps: u32,
        /// How the final position was decided.
        correction: Correction,
    },
    /// Ground contact while moving down; bounced off and re-zeroed.
    Recalibrated {
        /// Steps emitted before contact.
        steps: u32,
    },
    /// Limit tripped while moving up; stopped in place.
    EmergencyStop {
        /// Steps emitted before the trip.
        steps: u32,
    },
}

/// Summary of one dispatched target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// Height that was requested.
    pub target: Millimeters,
    /// How it ended.
    pub outcome: MoveOutcome,
    /// Position afterwards.
    pub position: Position,
    /// Destination promoted from the pending slot, if any.
    pub next: Option<Millimeters>,
}

/// Everything that happened during one [`Elevator::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tick {
    /// Request read from the request source and what became of it.
    pub request: Option<(FloorId, RequestOutcome)>,
    /// Move dispatched this iteration.
    pub movement: Option<MoveReport>,
    /// Driver health poll, when it was due.
    pub health: Option<HealthReport>,
}

/// Single-axis stepper elevator.
///
/// Generic over:
/// - `STEP`, `DIR`, `EN`: output pins to the motor driver
/// - `LIMIT`: ground/safety limit input (high = asserted)
/// - `REG`: register interface to the motor driver
/// - `T`: delays and monotonic clock
pub struct Elevator<STEP, DIR, EN, LIMIT, REG, T>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    REG: RegisterInterface,
    T: Timebase,
{
    stepper: StepperOutputs<STEP, DIR, EN>,
    limit: LIMIT,
    driver: MotorDriver<REG>,
    timebase: T,
    floors: FloorTable,
    motion: MotionConfig,
    homing: HomingConfig,
    correction: PositionCorrection,
    position: Position,
    calibration: CalibrationState,
    state: ElevatorState,
    queue: TargetQueue,
}

impl<STEP, DIR, EN, LIMIT, REG, T> Elevator<STEP, DIR, EN, LIMIT, REG, T>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    REG: RegisterInterface,
    T: Timebase,
{
    /// Start building an elevator.
    pub fn builder() -> ElevatorBuilder<STEP, DIR, EN, LIMIT, REG, T> {
        ElevatorBuilder::new()
    }

    /// Configure the driver, enable the motor and establish the ground reference.
    ///
    /// Requests are refused until this succeeds.
    pub fn home(&mut self) -> Result<HomingReport> {
        log_info!("homing");
        self.calibration = CalibrationState::Homing;
        self.position.invalidate();
        self.queue.clear();

        let result = self.run_homing_sequence();
        match &result {
            Ok(_) => {
                self.position.set_origin();
                self.calibration = CalibrationState::Calibrated;
                self.set_state(ElevatorState::Idle);
                let now = self.timebase.now_ms();
                self.driver.restart_interval(now);
                log_info!("ready");
            }
            Err(_) => {
                self.calibration = CalibrationState::Uncalibrated;
                log_error!("homing failed");
            }
        }
        result
    }

    fn run_homing_sequence(&mut self) -> Result<HomingReport> {
        self.driver.configure()?;
        self.stepper.enable()?;
        run_homing(
            &mut self.stepper,
            &mut self.limit,
            &mut self.timebase,
            &self.homing,
        )
    }

    /// Request a floor by id.
    pub fn request_floor(&mut self, floor: FloorId) -> RequestOutcome {
        match self.floors.height(floor) {
            Some(height) => self.request_height(height),
            None => {
                log_warn!("unknown floor {} ignored", floor.0);
                RequestOutcome::Dropped(DropReason::UnknownFloor)
            }
        }
    }

    /// Request a height. Heights outside the served range are dropped.
    pub fn request_height(&mut self, height: Millimeters) -> RequestOutcome {
        if self.calibration != CalibrationState::Calibrated {
            log_warn!("request for {} mm ignored: not calibrated", height.0);
            return RequestOutcome::Dropped(DropReason::NotCalibrated);
        }

        if height < Millimeters::ZERO || height > self.floors.max_height() {
            log_warn!("request for {} mm ignored: out of range", height.0);
            return RequestOutcome::Dropped(DropReason::UnknownFloor);
        }

        let outcome = self.queue.push(height);
        match outcome {
            RequestOutcome::Activated => log_info!("departing for {} mm", height.0),
            RequestOutcome::Queued => log_info!("queued {} mm", height.0),
            RequestOutcome::Dropped(_) => log_debug!("request for {} mm dropped", height.0),
        }
        outcome
    }

    /// Request `floor` and run the active target right away.
    ///
    /// Unlike [`request_floor`](Self::request_floor), a call before homing
    /// is an error rather than a silent drop.
    pub fn move_to<S: DistanceSensor>(
        &mut self,
        floor: FloorId,
        sensor: &mut S,
    ) -> Result<Option<MoveReport>> {
        if self.calibration != CalibrationState::Calibrated {
            return Err(MotionError::NotCalibrated.into());
        }
        match self.request_floor(floor) {
            RequestOutcome::Dropped(_) => Ok(None),
            RequestOutcome::Activated | RequestOutcome::Queued => self.dispatch(sensor),
        }
    }

    /// Execute the active target, if any, to completion or interlock trip.
    pub fn dispatch<S: DistanceSensor>(&mut self, sensor: &mut S) -> Result<Option<MoveReport>> {
        let Some(target) = self.queue.active() else {
            return Ok(None);
        };

        let Some(current) = self.position.height() else {
            self.queue.clear();
            return Err(MotionError::NotCalibrated.into());
        };

        if current.distance_to(target) < self.motion.tolerance_mm.unsigned_abs() {
            log_info!("already at {} mm", current.0);
            let next = self.queue.complete();
            return Ok(Some(MoveReport {
                target,
                outcome: MoveOutcome::AlreadyThere,
                position: self.position,
                next,
            }));
        }

        let profile = MotionProfile::plan(current, target, &self.motion);
        if profile.is_short() {
            log_debug!("short move, no cruise phase");
        }
        log_info!(
            "travel {} mm ({} steps)",
            (target - current).0,
            profile.total_steps
        );

        self.set_state(ElevatorState::Moving);
        let stepped = MotionExecutor::new(profile).run(
            &mut self.stepper,
            &mut self.limit,
            &mut self.timebase,
        );
        let outcome = match stepped {
            Ok(outcome) => outcome,
            Err(e) => {
                self.set_state(ElevatorState::Idle);
                return Err(e);
            }
        };

        let report = match outcome {
            StepOutcome::Completed { steps } => self.arrive(target, steps, sensor),
            StepOutcome::GroundContact { steps } => self.recalibrate(target, steps),
            StepOutcome::EmergencyStop { steps } => Ok(self.emergency_stop(target, steps)),
        };
        self.set_state(ElevatorState::Idle);
        report.map(Some)
    }

    fn arrive<S: DistanceSensor>(
        &mut self,
        target: Millimeters,
        steps: u32,
        sensor: &mut S,
    ) -> Result<MoveReport> {
        log_info!("theoretical arrival at {} mm", target.0);
        let (height, correction) = self
            .correction
            .apply(target, sensor, self.floors.max_height());
        self.position.set(height);

        self.timebase.delay_ms(self.motion.settle_ms);

        let next = self.queue.complete();
        match next {
            Some(next) => log_info!("continuing to {} mm", next.0),
            None => log_info!("waiting"),
        }

        Ok(MoveReport {
            target,
            outcome: MoveOutcome::Arrived { steps, correction },
            position: self.position,
            next,
        })
    }

    fn recalibrate(&mut self, target: Millimeters, steps: u32) -> Result<MoveReport> {
        log_warn!("ground contact after {} steps, recalibrating", steps);
        self.set_state(ElevatorState::Recalibrating);
        self.queue.clear();
        if let Err(e) = bounce_off(
            &mut self.stepper,
            &mut self.timebase,
            self.homing.recalibration_bounce_steps,
            self.homing.bounce_delay_us,
        ) {
            log_error!("bounce after ground contact failed, homing required");
            self.position.invalidate();
            self.calibration = CalibrationState::Uncalibrated;
            return Err(e);
        }
        self.position.set_origin();

        Ok(MoveReport {
            target,
            outcome: MoveOutcome::Recalibrated { steps },
            position: self.position,
            next: None,
        })
    }

    fn emergency_stop(&mut self, target: Millimeters, steps: u32) -> MoveReport {
        log_error!("emergency stop while moving up after {} steps", steps);
        self.queue.clear();
        if self.homing.emergency_stop == EmergencyStopPolicy::Rehome {
            self.position.invalidate();
            self.calibration = CalibrationState::Uncalibrated;
        }

        MoveReport {
            target,
            outcome: MoveOutcome::EmergencyStop { steps },
            position: self.position,
            next: None,
        }
    }

    /// Poll driver health if the interval elapsed; re-enable after a reconfigure.
    ///
    /// Never called while steps are being emitted.
    pub fn service_driver(&mut self) -> Result<Option<HealthReport>> {
        let now = self.timebase.now_ms();
        let report = self.driver.poll(now)?;
        if let Some(HealthReport::Reconfigured(_)) = report {
            self.stepper.enable()?;
        }
        Ok(report)
    }

    /// One iteration of the control loop.
    ///
    /// Reads the request source when no target is active, runs the active
    /// move (if any), sleeps briefly when there was nothing to do, then
    /// services driver health.
    pub fn poll<R, S>(&mut self, requests: &mut R, sensor: &mut S) -> Result<Tick>
    where
        R: RequestSource,
        S: DistanceSensor,
    {
        let mut tick = Tick::default();

        if self.queue.active().is_none() {
            if let Some(floor) = requests.poll_request(&mut self.timebase)? {
                tick.request = Some((floor, self.request_floor(floor)));
            }
        }

        tick.movement = self.dispatch(sensor)?;
        if tick.movement.is_none() {
            self.timebase.delay_ms(self.motion.idle_poll_ms);
        }

        tick.health = self.service_driver()?;
        Ok(tick)
    }

    fn set_state(&mut self, state: ElevatorState) {
        if self.state != state {
            log_debug!("{} -> {}", self.state.name(), state.name());
            self.state = state;
        }
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Floor within tolerance of the current position.
    pub fn current_floor(&self) -> Option<FloorId> {
        let height = self.position.height()?;
        let floor = self.floors.nearest(height)?;
        let floor_height = self.floors.height(floor)?;
        (floor_height.distance_to(height) < self.motion.tolerance_mm.unsigned_abs()).then_some(floor)
    }

    /// Calibration state.
    #[inline]
    pub fn calibration(&self) -> CalibrationState {
        self.calibration
    }

    /// Controller state.
    #[inline]
    pub fn state(&self) -> ElevatorState {
        self.state
    }

    /// Active and pending targets.
    #[inline]
    pub fn queue(&self) -> &TargetQueue {
        &self.queue
    }

    /// Floor table.
    #[inline]
    pub fn floors(&self) -> &FloorTable {
        &self.floors
    }

    /// Motor driver.
    #[inline]
    pub fn driver(&self) -> &MotorDriver<REG> {
        &self.driver
    }

    /// Mutable motor driver (fault injection in tests).
    #[inline]
    pub fn driver_mut(&mut self) -> &mut MotorDriver<REG> {
        &mut self.driver
    }

    /// Step/dir outputs.
    #[inline]
    pub fn stepper(&self) -> &StepperOutputs<STEP, DIR, EN> {
        &self.stepper
    }

    /// Timebase.
    #[inline]
    pub fn timebase(&self) -> &T {
        &self.timebase
    }

    /// Mutable timebase.
    #[inline]
    pub fn timebase_mut(&mut self) -> &mut T {
        &mut self.timebase
    }

    /// Mutable limit input.
    #[inline]
    pub fn limit_mut(&mut self) -> &mut LIMIT {
        &mut self.limit
    }
}

/// Builder for [`Elevator`].
pub struct ElevatorBuilder<STEP, DIR, EN, LIMIT, REG, T> {
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    enable_pin: Option<EN>,
    limit: Option<LIMIT>,
    registers: Option<REG>,
    timebase: Option<T>,
    config: ElevatorConfig,
}

impl<STEP, DIR, EN, LIMIT, REG, T> Default for ElevatorBuilder<STEP, DIR, EN, LIMIT, REG, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, EN, LIMIT, REG, T> ElevatorBuilder<STEP, DIR, EN, LIMIT, REG, T> {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            step_pin: None,
            dir_pin: None,
            enable_pin: None,
            limit: None,
            registers: None,
            timebase: None,
            config: ElevatorConfig::default(),
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the ENABLE pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the ground/safety limit input.
    pub fn limit(mut self, pin: LIMIT) -> Self {
        self.limit = Some(pin);
        self
    }

    /// Set the motor driver register interface.
    pub fn registers(mut self, registers: REG) -> Self {
        self.registers = Some(registers);
        self
    }

    /// Set the timebase.
    pub fn timebase(mut self, timebase: T) -> Self {
        self.timebase = Some(timebase);
        self
    }

    /// Use a full configuration.
    pub fn config(mut self, config: ElevatorConfig) -> Self {
        self.config = config;
        self
    }
}

impl<STEP, DIR, EN, LIMIT, REG, T> ElevatorBuilder<STEP, DIR, EN, LIMIT, REG, T>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    REG: RegisterInterface,
    T: Timebase,
{
    /// Build the Elevator.
    ///
    /// # Errors
    ///
    /// Returns an error if a hardware handle is missing or the configuration
    /// is invalid.
    pub fn build(self) -> Result<Elevator<STEP, DIR, EN, LIMIT, REG, T>> {
        validate_config(&self.config)?;

        let step_pin = self.step_pin.ok_or_else(|| missing("step_pin"))?;
        let dir_pin = self.dir_pin.ok_or_else(|| missing("dir_pin"))?;
        let enable_pin = self.enable_pin.ok_or_else(|| missing("enable_pin"))?;
        let limit = self.limit.ok_or_else(|| missing("limit"))?;
        let registers = self.registers.ok_or_else(|| missing("registers"))?;
        let timebase = self.timebase.ok_or_else(|| missing("timebase"))?;

        let config = self.config;
        let floors = FloorTable::from_config(&config);
        let stepper = StepperOutputs::new(step_pin, dir_pin, enable_pin, &config.motion);
        Ok(Elevator {
            stepper,
            limit,
            driver: MotorDriver::new(registers, config.driver),
            timebase,
            floors,
            motion: config.motion,
            homing: config.homing,
            correction: PositionCorrection::new(config.correction),
            position: Position::unknown(),
            calibration: CalibrationState::Uncalibrated,
            state: ElevatorState::Idle,
            queue: TargetQueue::new(),
        })
    }
}

fn missing(field: &'static str) -> Error {
    Error::Config(ConfigError::MissingField(field))
}
