//! Motion execution - step pulse generation with the limit interlock.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::{HardwareError, Result};
use crate::motor::StepperOutputs;

use super::profile::{Direction, MotionPhase, MotionProfile};

/// How a move ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// Every planned step was emitted.
    Completed {
        /// Steps emitted.
        steps: u32,
    },
    /// Limit asserted while moving down: the platform is on the ground.
    GroundContact {
        /// Steps emitted before the trip, including the one that tripped it.
        steps: u32,
    },
    /// Limit asserted while moving up: stop immediately.
    EmergencyStop {
        /// Steps emitted before the trip, including the one that tripped it.
        steps: u32,
    },
}

/// Runtime state during motion execution.
#[derive(Debug, Clone)]
pub struct MotionExecutor {
    /// The computed profile being executed.
    profile: MotionProfile,

    /// Next step to emit (0 to total_steps).
    current_step: u32,
}

impl MotionExecutor {
    /// Create a new executor for a motion profile.
    pub fn new(profile: MotionProfile) -> Self {
        Self {
            profile,
            current_step: 0,
        }
    }

    /// Check if motion is complete.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.current_step >= self.profile.total_steps
    }

    /// Get the current phase.
    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.profile.phase_at(self.current_step)
    }

    /// Delay to wait after the current step's pulse.
    #[inline]
    pub fn current_delay_us(&self) -> u32 {
        self.profile.delay_us(self.current_step)
    }

    /// Advance to the next step.
    ///
    /// Returns `true` if another step remains.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.current_step += 1;
        !self.is_complete()
    }

    /// Emit the remaining steps, sampling the limit input after every one.
    ///
    /// The limit is read raw once per step, so the interlock reacts within
    /// one step period. No step is emitted after the limit reads high.
    pub fn run<STEP, DIR, EN, LIMIT, D>(
        &mut self,
        stepper: &mut StepperOutputs<STEP, DIR, EN>,
        limit: &mut LIMIT,
        delay: &mut D,
    ) -> Result<StepOutcome>
    where
        STEP: OutputPin,
        DIR: OutputPin,
        EN: OutputPin,
        LIMIT: InputPin,
        D: DelayNs,
    {
        let direction = self.profile.direction;
        stepper.set_direction(direction)?;

        while !self.is_complete() {
            stepper.pulse(delay, self.current_delay_us())?;
            self.advance();

            if limit.is_high().map_err(|_| HardwareError::Pin)? {
                let steps = self.current_step;
                log_debug!("limit asserted at step {} ({:?})", steps, self.phase());
                return Ok(match direction {
                    Direction::Down => StepOutcome::GroundContact { steps },
                    Direction::Up => StepOutcome::EmergencyStop { steps },
                });
            }
        }

        Ok(StepOutcome::Completed {
            steps: self.current_step,
        })
    }
}
