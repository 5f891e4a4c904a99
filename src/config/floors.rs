//! Floor and floor-button configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::Millimeters;

/// One served floor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FloorConfig {
    /// Human-readable name (max 16 chars).
    pub name: String<16>,

    /// Platform height at this floor, relative to the calibrated ground.
    pub height_mm: Millimeters,
}

impl FloorConfig {
    /// Create a floor entry. Names longer than 16 chars are truncated to empty.
    pub fn new(name: &str, height_mm: i32) -> Self {
        Self {
            name: String::try_from(name).unwrap_or_default(),
            height_mm: Millimeters(height_mm),
        }
    }
}

/// Floor request button settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ButtonConfig {
    /// Confirmation delay between the two samples of a press.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
}

fn default_debounce_ms() -> u32 {
    50
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}
