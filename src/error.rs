//! Error types for stepper-lift.
//!
//! Only startup (configuration, homing) and hardware transport failures are
//! errors. Driver faults, sensor disagreement, interlock trips and duplicate
//! floor requests are ordinary control flow and are reported through
//! outcome values instead.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-lift operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Pin or bus transport error
    Hardware(HardwareError),
    /// Homing sequence error
    Homing(HomingError),
    /// Move request or execution error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Floor table is empty
    NoFloors,
    /// Floor height is negative
    NegativeHeight {
        /// Floor name
        floor: heapless::String<16>,
        /// Offending height
        height_mm: i32,
    },
    /// Floor heights are not strictly ascending
    UnorderedFloors {
        /// Floor name that breaks the ordering
        floor: heapless::String<16>,
    },
    /// Two floors share a name
    DuplicateFloorName(heapless::String<16>),
    /// Steps per millimeter must be > 0
    InvalidStepsPerMm(u32),
    /// Ramp length must be > 0
    InvalidRampSteps(u32),
    /// Step delays must satisfy min_speed >= max_speed > 0
    InvalidSpeedDelays {
        /// Slowest per-step delay (ramp start/end)
        min_speed_us: u32,
        /// Fastest per-step delay (cruise)
        max_speed_us: u32,
    },
    /// Tolerance must be > 0
    InvalidTolerance(i32),
    /// Health poll interval must be > 0
    InvalidHealthInterval(u32),
    /// Trust threshold must be > 0
    InvalidTrustThreshold(i32),
    /// Top floor height in steps does not fit the step counter
    TravelTooLong {
        /// Highest floor
        max_height_mm: i32,
        /// Axis resolution
        steps_per_mm: u32,
    },
    /// A required builder field was not provided
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Pin and bus transport errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// GPIO pin operation failed
    Pin,
    /// SPI transfer to the motor driver failed
    Bus,
}

/// Homing sequence errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomingError {
    /// Ground limit was not reached within the configured step budget
    LimitNotFound {
        /// Steps emitted before giving up
        steps: u32,
    },
}

/// Move request errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionError {
    /// Position reference not established; run homing first
    NotCalibrated,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Hardware(e) => write!(f, "Hardware error: {}", e),
            Error::Homing(e) => write!(f, "Homing error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::NoFloors => write!(f, "At least one floor must be configured"),
            ConfigError::NegativeHeight { floor, height_mm } => {
                write!(f, "Floor '{}' has negative height {} mm", floor, height_mm)
            }
            ConfigError::UnorderedFloors { floor } => {
                write!(f, "Floor '{}' is not higher than the floor below it", floor)
            }
            ConfigError::DuplicateFloorName(name) => write!(f, "Duplicate floor name: '{}'", name),
            ConfigError::InvalidStepsPerMm(v) => write!(f, "Invalid steps per mm: {}. Must be > 0", v),
            ConfigError::InvalidRampSteps(v) => write!(f, "Invalid ramp steps: {}. Must be > 0", v),
            ConfigError::InvalidSpeedDelays { min_speed_us, max_speed_us } => write!(
                f,
                "Invalid step delays: min speed delay ({} us) must be >= max speed delay ({} us) > 0",
                min_speed_us, max_speed_us
            ),
            ConfigError::InvalidTolerance(v) => write!(f, "Invalid tolerance: {} mm. Must be > 0", v),
            ConfigError::InvalidHealthInterval(v) => {
                write!(f, "Invalid health interval: {} ms. Must be > 0", v)
            }
            ConfigError::InvalidTrustThreshold(v) => {
                write!(f, "Invalid trust threshold: {} mm. Must be > 0", v)
            }
            ConfigError::TravelTooLong {
                max_height_mm,
                steps_per_mm,
            } => write!(
                f,
                "Travel of {} mm at {} steps/mm exceeds the step counter range",
                max_height_mm, steps_per_mm
            ),
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareError::Pin => write!(f, "GPIO pin operation failed"),
            HardwareError::Bus => write!(f, "SPI transfer failed"),
        }
    }
}

impl fmt::Display for HomingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomingError::LimitNotFound { steps } => {
                write!(f, "Ground limit not reached after {} steps", steps)
            }
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::NotCalibrated => write!(f, "Elevator is not calibrated"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Error::Hardware(e)
    }
}

impl From<HomingError> for Error {
    fn from(e: HomingError) -> Self {
        Error::Homing(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for HardwareError {}

#[cfg(feature = "std")]
impl std::error::Error for HomingError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}
