//! Homing sequence: seek the ground limit, confirm it, bounce off.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::HomingConfig;
use crate::error::{HardwareError, HomingError, Result};
use crate::motion::Direction;

use super::stepper::StepperOutputs;

/// Travel toward the ground limit.
const SEEK: Direction = Direction::Down;

/// Step counts from a completed homing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomingReport {
    /// Downward steps until the limit was confirmed.
    pub seek_steps: u32,
    /// Upward steps emitted to release the switch.
    pub bounce_steps: u32,
}

/// Drive down until the limit reads high twice, `limit_debounce_us` apart.
///
/// A single high sample followed by a low one is treated as noise and the
/// seek continues. Returns the number of steps emitted.
pub fn seek_ground<STEP, DIR, EN, LIMIT, D>(
    stepper: &mut StepperOutputs<STEP, DIR, EN>,
    limit: &mut LIMIT,
    delay: &mut D,
    config: &HomingConfig,
) -> Result<u32>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    D: DelayNs,
{
    stepper.set_direction(SEEK)?;
    let mut steps: u32 = 0;

    loop {
        if limit.is_high().map_err(|_| HardwareError::Pin)? {
            delay.delay_us(config.limit_debounce_us);
            if limit.is_high().map_err(|_| HardwareError::Pin)? {
                return Ok(steps);
            }
            log_debug!("limit glitch ignored after {} steps", steps);
        }

        if let Some(max) = config.max_steps {
            if steps >= max {
                return Err(HomingError::LimitNotFound { steps }.into());
            }
        }

        stepper.pulse(delay, config.step_delay_us)?;
        steps += 1;
    }
}

/// Reverse pulse train that mechanically releases the limit switch.
pub fn bounce_off<STEP, DIR, EN, D>(
    stepper: &mut StepperOutputs<STEP, DIR, EN>,
    delay: &mut D,
    steps: u32,
    delay_us: u32,
) -> Result<()>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    D: DelayNs,
{
    stepper.pulse_train(delay, SEEK.reverse(), steps, delay_us)
}

/// Full homing run: seek, confirm, bounce off.
///
/// On success the platform sits at the ground reference.
pub fn run_homing<STEP, DIR, EN, LIMIT, D>(
    stepper: &mut StepperOutputs<STEP, DIR, EN>,
    limit: &mut LIMIT,
    delay: &mut D,
    config: &HomingConfig,
) -> Result<HomingReport>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    D: DelayNs,
{
    let seek_steps = seek_ground(stepper, limit, delay, config)?;
    log_info!("ground found after {} steps", seek_steps);

    bounce_off(stepper, delay, config.bounce_steps, config.bounce_delay_us)?;

    Ok(HomingReport {
        seek_steps,
        bounce_steps: config.bounce_steps,
    })
}
