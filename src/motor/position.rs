//! Position tracking for the platform.

use crate::config::Millimeters;

/// Authoritative platform height.
///
/// Unknown until homing completes; afterwards a height in millimeters
/// relative to the calibrated ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    height: Option<Millimeters>,
}

impl Position {
    /// Position not yet established.
    #[inline]
    pub const fn unknown() -> Self {
        Self { height: None }
    }

    /// Position at a known height.
    #[inline]
    pub const fn at(height: Millimeters) -> Self {
        Self {
            height: Some(height),
        }
    }

    /// Current height, if known.
    #[inline]
    pub fn height(&self) -> Option<Millimeters> {
        self.height
    }

    /// Whether a reference has been established.
    #[inline]
    pub fn is_known(&self) -> bool {
        self.height.is_some()
    }

    /// Set the height.
    #[inline]
    pub fn set(&mut self, height: Millimeters) {
        self.height = Some(height);
    }

    /// Reset position to the ground reference.
    #[inline]
    pub fn set_origin(&mut self) {
        self.height = Some(Millimeters::ZERO);
    }

    /// Forget the reference.
    #[inline]
    pub fn invalidate(&mut self) {
        self.height = None;
    }

    /// Absolute distance to a target, if the position is known.
    #[inline]
    pub fn distance_to(&self, target: Millimeters) -> Option<u32> {
        self.height.map(|h| h.distance_to(target))
    }
}
