//! Unit types for physical quantities.
//!
//! Provides type-safe representations of heights and motor steps to prevent
//! unit confusion at compile time.

use core::ops::Sub;

use serde::Deserialize;

/// Vertical height in millimeters, 0 at the calibrated ground floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub i32);

impl Millimeters {
    /// Ground reference.
    pub const ZERO: Self = Self(0);

    /// Absolute distance to another height.
    #[inline]
    pub fn distance_to(self, other: Millimeters) -> u32 {
        (other.0 - self.0).unsigned_abs()
    }

    /// Clamp into an inclusive range.
    #[inline]
    pub fn clamp_to(self, min: Millimeters, max: Millimeters) -> Self {
        Self(self.0.clamp(min.0, max.0))
    }

    /// Convert to steps using the axis resolution.
    #[inline]
    pub fn to_steps(self, steps_per_mm: u32) -> Steps {
        Steps(self.0.unsigned_abs().saturating_mul(steps_per_mm))
    }
}

impl Sub for Millimeters {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Unsigned step count for a single move or pulse train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct Steps(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millimeters_to_steps() {
        assert_eq!(Millimeters(170).to_steps(350), Steps(59_500));
        assert_eq!(Millimeters(-170).to_steps(350), Steps(59_500));
    }

    #[test]
    fn test_distance_is_symmetric() {
        assert_eq!(Millimeters(336).distance_to(Millimeters(170)), 166);
        assert_eq!(Millimeters(170).distance_to(Millimeters(336)), 166);
    }
}
