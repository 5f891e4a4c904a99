//! Motion constants from TOML.

use serde::Deserialize;

/// Step generation and ramp constants.
///
/// Delays are per-step waits after the pulse: `min_speed_delay_us` is the
/// slow end of the ramp, `max_speed_delay_us` the cruise delay.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MotionConfig {
    /// Microsteps emitted per millimeter of platform travel.
    #[serde(default = "default_steps_per_mm")]
    pub steps_per_mm: u32,

    /// Steps over which the delay changes linearly at each end of a move.
    #[serde(default = "default_ramp_steps")]
    pub ramp_steps: u32,

    /// Per-step delay at standstill (slowest).
    #[serde(default = "default_min_speed_delay_us")]
    pub min_speed_delay_us: u32,

    /// Per-step delay at cruise (fastest).
    #[serde(default = "default_max_speed_delay_us")]
    pub max_speed_delay_us: u32,

    /// STEP pulse high time.
    #[serde(default = "default_pulse_width_us")]
    pub pulse_width_us: u32,

    /// Requests closer than this to the current position are already satisfied.
    #[serde(default = "default_tolerance_mm")]
    pub tolerance_mm: i32,

    /// Pause after arriving at a floor before the next move may start.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u32,

    /// Sleep between loop iterations when nothing is queued.
    #[serde(default = "default_idle_poll_ms")]
    pub idle_poll_ms: u32,

    /// Invert DIR logic (default: up = low, down = high).
    #[serde(default)]
    pub invert_direction: bool,

    /// ENABLE line is active low.
    #[serde(default)]
    pub enable_active_low: bool,
}

fn default_steps_per_mm() -> u32 {
    350
}

fn default_ramp_steps() -> u32 {
    2000
}

fn default_min_speed_delay_us() -> u32 {
    1200
}

fn default_max_speed_delay_us() -> u32 {
    200
}

fn default_pulse_width_us() -> u32 {
    10
}

fn default_tolerance_mm() -> i32 {
    10
}

fn default_settle_ms() -> u32 {
    500
}

fn default_idle_poll_ms() -> u32 {
    10
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            steps_per_mm: default_steps_per_mm(),
            ramp_steps: default_ramp_steps(),
            min_speed_delay_us: default_min_speed_delay_us(),
            max_speed_delay_us: default_max_speed_delay_us(),
            pulse_width_us: default_pulse_width_us(),
            tolerance_mm: default_tolerance_mm(),
            settle_ms: default_settle_ms(),
            idle_poll_ms: default_idle_poll_ms(),
            invert_direction: false,
            enable_active_low: false,
        }
    }
}
