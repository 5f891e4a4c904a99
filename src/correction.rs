//! Post-move position correction from an optional distance sensor.

use crate::config::{CorrectionConfig, Millimeters};

/// On-demand distance sample, in millimeters from the ground reference.
pub trait DistanceSensor {
    /// Take one sample. `None` when the sensor is absent, not ready or the
    /// fetch failed.
    fn sample_mm(&mut self) -> Option<i32>;
}

/// No sensor fitted.
impl DistanceSensor for () {
    fn sample_mm(&mut self) -> Option<i32> {
        None
    }
}

impl<S: DistanceSensor + ?Sized> DistanceSensor for &mut S {
    fn sample_mm(&mut self) -> Option<i32> {
        (**self).sample_mm()
    }
}

/// Convert a fixed-point sensor value (whole meters + millionths) to millimeters.
#[inline]
pub fn millimeters_from_meters(whole: i32, micro: i32) -> i32 {
    whole.saturating_mul(1000).saturating_add(micro / 1000)
}

/// How the post-move position was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Correction {
    /// No reading available; theoretical height kept.
    Theoretical,
    /// Reading within the trust threshold replaced the theoretical height.
    Sensed {
        /// Accepted reading.
        reading_mm: i32,
    },
    /// Reading too far from the theoretical height; ignored.
    Discarded {
        /// Rejected reading.
        reading_mm: i32,
    },
}

/// Reconciles theoretical and sensed heights.
#[derive(Debug, Clone, Copy)]
pub struct PositionCorrection {
    config: CorrectionConfig,
}

impl PositionCorrection {
    /// Create from configuration.
    pub fn new(config: CorrectionConfig) -> Self {
        Self { config }
    }

    /// Decide the post-move height from an optional reading.
    ///
    /// An accepted reading is clamped into `[0, max_height]`.
    pub fn reconcile(
        &self,
        theoretical: Millimeters,
        reading_mm: Option<i32>,
        max_height: Millimeters,
    ) -> (Millimeters, Correction) {
        let Some(reading_mm) = reading_mm else {
            return (theoretical, Correction::Theoretical);
        };

        let disagreement = reading_mm.abs_diff(theoretical.0);
        if disagreement < self.config.trust_threshold_mm.unsigned_abs() {
            let sensed = Millimeters(reading_mm).clamp_to(Millimeters::ZERO, max_height);
            (sensed, Correction::Sensed { reading_mm })
        } else {
            (theoretical, Correction::Discarded { reading_mm })
        }
    }

    /// Sample the sensor (if enabled) and reconcile.
    pub fn apply<S: DistanceSensor>(
        &self,
        theoretical: Millimeters,
        sensor: &mut S,
        max_height: Millimeters,
    ) -> (Millimeters, Correction) {
        let reading = if self.config.enabled {
            sensor.sample_mm()
        } else {
            None
        };

        let (height, correction) = self.reconcile(theoretical, reading, max_height);
        match correction {
            Correction::Sensed { reading_mm } => {
                log_info!("position corrected to {} mm (theoretical {} mm)", reading_mm, theoretical.0)
            }
            Correction::Discarded { reading_mm } => {
                log_warn!("distance reading {} mm out of range, kept {} mm", reading_mm, theoretical.0)
            }
            Correction::Theoretical => {}
        }
        (height, correction)
    }
}
