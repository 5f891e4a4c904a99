//! STEP/DIR/ENABLE outputs to the motor driver.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::MotionConfig;
use crate::error::{HardwareError, Result};
use crate::motion::Direction;

/// Digital lines driving the motor driver's step/dir interface.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `EN`: ENABLE pin type (must implement `OutputPin`)
pub struct StepperOutputs<STEP, DIR, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
{
    /// STEP pin (one pulse per microstep).
    step_pin: STEP,

    /// DIR pin (low = up unless inverted).
    dir_pin: DIR,

    /// ENABLE pin.
    enable_pin: EN,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Whether ENABLE is active low.
    enable_active_low: bool,

    /// STEP high time in microseconds.
    pulse_width_us: u32,

    /// Pulses emitted since construction.
    pulses: u64,
}

impl<STEP, DIR, EN> StepperOutputs<STEP, DIR, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
{
    /// Take ownership of the three output lines.
    pub fn new(step_pin: STEP, dir_pin: DIR, enable_pin: EN, motion: &MotionConfig) -> Self {
        Self {
            step_pin,
            dir_pin,
            enable_pin,
            current_direction: None,
            invert_direction: motion.invert_direction,
            enable_active_low: motion.enable_active_low,
            pulse_width_us: motion.pulse_width_us,
            pulses: 0,
        }
    }

    /// Energise the driver outputs.
    pub fn enable(&mut self) -> Result<()> {
        if !self.enable_active_low {
            self.enable_pin.set_high().map_err(|_| HardwareError::Pin)?;
        } else {
            self.enable_pin.set_low().map_err(|_| HardwareError::Pin)?;
        }
        Ok(())
    }

    /// Drive DIR for the requested direction.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Up => self.invert_direction,
            Direction::Down => !self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| HardwareError::Pin)?;
        } else {
            self.dir_pin.set_low().map_err(|_| HardwareError::Pin)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    /// One STEP pulse followed by `wait_us` of idle time.
    pub fn pulse<D: DelayNs>(&mut self, delay: &mut D, wait_us: u32) -> Result<()> {
        self.step_pin.set_high().map_err(|_| HardwareError::Pin)?;
        delay.delay_us(self.pulse_width_us);
        self.step_pin.set_low().map_err(|_| HardwareError::Pin)?;
        delay.delay_us(wait_us);
        self.pulses += 1;
        Ok(())
    }

    /// Fixed-rate pulse train in one direction.
    pub fn pulse_train<D: DelayNs>(
        &mut self,
        delay: &mut D,
        direction: Direction,
        count: u32,
        wait_us: u32,
    ) -> Result<()> {
        self.set_direction(direction)?;
        for _ in 0..count {
            self.pulse(delay, wait_us)?;
        }
        Ok(())
    }

    /// Direction last written to DIR.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.current_direction
    }

    /// Total STEP pulses emitted.
    #[inline]
    pub fn pulses_emitted(&self) -> u64 {
        self.pulses
    }

    /// Give the pins back.
    pub fn release(self) -> (STEP, DIR, EN) {
        (self.step_pin, self.dir_pin, self.enable_pin)
    }
}
