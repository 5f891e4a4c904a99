//! Configuration module for stepper-lift.
//!
//! Provides types for loading and validating the floor table, motion
//! constants, homing, driver and correction settings from TOML files (with
//! `std` feature) or pre-parsed data.

mod correction;
mod driver;
mod floors;
mod homing;
mod motion;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use correction::CorrectionConfig;
pub use driver::DriverConfig;
pub use floors::{ButtonConfig, FloorConfig};
pub use homing::{EmergencyStopPolicy, HomingConfig};
pub use motion::MotionConfig;
pub use system::{ElevatorConfig, MAX_FLOORS};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Millimeters, Steps};
