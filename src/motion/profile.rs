//! Motion profile calculation.
//!
//! Linear-delay trapezoid: the per-step wait falls from the slow delay to
//! the cruise delay over the first `ramp_steps`, holds, and rises back over
//! the last `ramp_steps`.

use crate::config::{Millimeters, MotionConfig};

/// Direction of platform travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Increasing height.
    Up,
    /// Decreasing height, toward the ground limit.
    Down,
}

impl Direction {
    /// Get direction from a signed height difference (target - current).
    #[inline]
    pub fn from_delta(delta_mm: i32) -> Self {
        if delta_mm >= 0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Current phase of motion execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Delay shrinking toward cruise.
    Accelerating,
    /// Constant cruise delay.
    Cruising,
    /// Delay growing back toward the slow end.
    Decelerating,
    /// Motion complete.
    Complete,
}

/// Computed profile for one move. Derived per move, never stored across moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionProfile {
    /// Direction of motion.
    pub direction: Direction,

    /// Total steps to move (absolute value).
    pub total_steps: u32,

    /// Steps in each ramp.
    pub ramp_steps: u32,

    /// Slowest per-step delay (microseconds), at both ends of the move.
    pub min_speed_delay_us: u32,

    /// Fastest per-step delay (microseconds), during cruise.
    pub max_speed_delay_us: u32,
}

impl MotionProfile {
    /// Plan a move from `current` to `target`.
    ///
    /// `total_steps = |target - current| * steps_per_mm`.
    pub fn plan(current: Millimeters, target: Millimeters, motion: &MotionConfig) -> Self {
        let delta = target - current;
        Self {
            direction: Direction::from_delta(delta.0),
            total_steps: delta.to_steps(motion.steps_per_mm).0,
            ramp_steps: motion.ramp_steps.max(1),
            min_speed_delay_us: motion.min_speed_delay_us,
            max_speed_delay_us: motion.max_speed_delay_us.min(motion.min_speed_delay_us),
        }
    }

    /// Moves shorter than two ramps never reach cruise; their delay curve
    /// jumps where the deceleration branch takes over.
    #[inline]
    pub fn is_short(&self) -> bool {
        self.total_steps < self.ramp_steps.saturating_mul(2)
    }

    /// Get the phase at a given step number.
    pub fn phase_at(&self, step: u32) -> MotionPhase {
        if step >= self.total_steps {
            MotionPhase::Complete
        } else if step < self.ramp_steps {
            MotionPhase::Accelerating
        } else if step + self.ramp_steps > self.total_steps {
            MotionPhase::Decelerating
        } else {
            MotionPhase::Cruising
        }
    }

    /// Per-step delay in microseconds for step `step` (0-based).
    ///
    /// Always within `[max_speed_delay_us, min_speed_delay_us]`. Deceleration
    /// counts the steps still to go after this one, so the final step of any
    /// move waits the full slow delay, mirroring the first.
    pub fn delay_us(&self, step: u32) -> u32 {
        let span = u64::from(self.min_speed_delay_us - self.max_speed_delay_us);
        let ramp = u64::from(self.ramp_steps);

        match self.phase_at(step) {
            MotionPhase::Accelerating => {
                self.min_speed_delay_us - (span * u64::from(step) / ramp) as u32
            }
            MotionPhase::Decelerating => {
                let steps_left = self.total_steps - 1 - step;
                self.min_speed_delay_us - (span * u64::from(steps_left) / ramp) as u32
            }
            MotionPhase::Cruising => self.max_speed_delay_us,
            MotionPhase::Complete => self.min_speed_delay_us,
        }
    }

    /// Iterate the per-step delays of the whole move.
    pub fn delays(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.total_steps).map(move |i| self.delay_us(i))
    }
}
