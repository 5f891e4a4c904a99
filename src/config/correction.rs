//! Distance-sensor correction configuration from TOML.

use serde::Deserialize;

/// Post-move position correction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CorrectionConfig {
    /// Sample the distance sensor after each completed move.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Maximum disagreement with the theoretical height for a reading to be trusted.
    #[serde(default = "default_trust_threshold_mm")]
    pub trust_threshold_mm: i32,
}

fn default_enabled() -> bool {
    true
}

fn default_trust_threshold_mm() -> i32 {
    50
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            trust_threshold_mm: default_trust_threshold_mm(),
        }
    }
}
