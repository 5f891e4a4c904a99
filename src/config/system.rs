//! System configuration - root configuration structure.

use heapless::Vec;
use serde::Deserialize;

use super::correction::CorrectionConfig;
use super::driver::DriverConfig;
use super::floors::{ButtonConfig, FloorConfig};
use super::homing::HomingConfig;
use super::motion::MotionConfig;
use super::units::Millimeters;

/// Maximum number of served floors.
pub const MAX_FLOORS: usize = 8;

/// Root configuration structure from TOML.
///
/// Every section is optional; omitted values fall back to the stock
/// three-floor lift (0, 170 and 336 mm, 350 steps/mm).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElevatorConfig {
    /// Served floors, lowest first.
    #[serde(default = "default_floors")]
    pub floors: Vec<FloorConfig, MAX_FLOORS>,

    /// Step generation and ramp constants.
    #[serde(default)]
    pub motion: MotionConfig,

    /// Homing and interlock settings.
    #[serde(default)]
    pub homing: HomingConfig,

    /// Motor driver registers and health polling.
    #[serde(default)]
    pub driver: DriverConfig,

    /// Distance-sensor correction.
    #[serde(default)]
    pub correction: CorrectionConfig,

    /// Floor request buttons.
    #[serde(default)]
    pub buttons: ButtonConfig,
}

fn default_floors() -> Vec<FloorConfig, MAX_FLOORS> {
    let mut floors = Vec::new();
    for (name, height) in [("ground", 0), ("first", 170), ("second", 336)] {
        let _ = floors.push(FloorConfig::new(name, height));
    }
    floors
}

impl ElevatorConfig {
    /// Get a floor configuration by name.
    pub fn floor(&self, name: &str) -> Option<&FloorConfig> {
        self.floors.iter().find(|f| f.name.as_str() == name)
    }

    /// List all floor names, lowest first.
    pub fn floor_names(&self) -> impl Iterator<Item = &str> {
        self.floors.iter().map(|f| f.name.as_str())
    }

    /// Height of the highest configured floor.
    pub fn max_height(&self) -> Millimeters {
        self.floors
            .iter()
            .map(|f| f.height_mm)
            .max()
            .unwrap_or(Millimeters::ZERO)
    }
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        Self {
            floors: default_floors(),
            motion: MotionConfig::default(),
            homing: HomingConfig::default(),
            driver: DriverConfig::default(),
            correction: CorrectionConfig::default(),
            buttons: ButtonConfig::default(),
        }
    }
}
