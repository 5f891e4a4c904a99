//! Homing and interlock configuration from TOML.

use serde::Deserialize;

/// What to do with the position reference after the limit trips on an upward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyStopPolicy {
    /// Keep the last known position and stay calibrated.
    #[default]
    Hold,
    /// Forget the position and require homing before new requests.
    Rehome,
}

/// Homing sequence and bounce-off settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HomingConfig {
    /// Per-step delay while seeking the ground limit.
    #[serde(default = "default_step_delay_us")]
    pub step_delay_us: u32,

    /// Wait before re-sampling a raw limit reading during homing.
    #[serde(default = "default_limit_debounce_us")]
    pub limit_debounce_us: u32,

    /// Reverse steps emitted after homing finds the limit.
    #[serde(default = "default_bounce_steps")]
    pub bounce_steps: u32,

    /// Reverse steps emitted after a ground contact during a downward move.
    #[serde(default = "default_recalibration_bounce_steps")]
    pub recalibration_bounce_steps: u32,

    /// Per-step delay during bounce-off.
    #[serde(default = "default_bounce_delay_us")]
    pub bounce_delay_us: u32,

    /// Give up homing after this many steps (unbounded when absent).
    #[serde(default)]
    pub max_steps: Option<u32>,

    /// Upward limit-trip handling.
    #[serde(default)]
    pub emergency_stop: EmergencyStopPolicy,
}

fn default_step_delay_us() -> u32 {
    300
}

fn default_limit_debounce_us() -> u32 {
    2000
}

fn default_bounce_steps() -> u32 {
    2000
}

fn default_recalibration_bounce_steps() -> u32 {
    3500
}

fn default_bounce_delay_us() -> u32 {
    500
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            step_delay_us: default_step_delay_us(),
            limit_debounce_us: default_limit_debounce_us(),
            bounce_steps: default_bounce_steps(),
            recalibration_bounce_steps: default_recalibration_bounce_steps(),
            bounce_delay_us: default_bounce_delay_us(),
            max_steps: None,
            emergency_stop: EmergencyStopPolicy::Hold,
        }
    }
}
