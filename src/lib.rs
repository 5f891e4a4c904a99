//! # stepper-lift
//!
//! Single-axis stepper elevator controller with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Configuration-driven**: floor table, motion constants, homing and
//!   driver settings in one TOML file
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR/ENABLE, `InputPin` for the
//!   limit switch and buttons, `SpiDevice` for the motor driver, `DelayNs`
//!   for timing
//! - **no_std compatible**: core library works without standard library
//! - **Trapezoidal ramps**: linear step-delay acceleration and deceleration
//! - **Limit interlock**: sampled after every step; ground contact re-zeroes,
//!   an upward trip stops in place
//! - **Driver supervision**: periodic fault check with automatic reconfiguration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_lift::{Elevator, FloorButtons, StdTimebase};
//!
//! let config = stepper_lift::load_config("lift.toml")?;
//! let mut buttons = FloorButtons::new([ground, first, second], &config.buttons);
//!
//! let mut lift = Elevator::builder()
//!     .step_pin(step)
//!     .dir_pin(dir)
//!     .enable_pin(enable)
//!     .limit(limit)
//!     .registers(SpiRegisters::new(spi))
//!     .timebase(StdTimebase::new())
//!     .config(config)
//!     .build()?;
//!
//! lift.home()?;
//! loop {
//!     lift.poll(&mut buttons, &mut ())?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): file I/O, TOML parsing and `log` output
//! - `alloc`: heap allocation for no_std with allocator
//! - `defmt`: defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod logging;

// Core modules
pub mod clock;
pub mod config;
pub mod correction;
pub mod driver;
pub mod elevator;
pub mod error;
pub mod floor;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use clock::{SimulatedTimebase, Timebase};
pub use config::{validate_config, ElevatorConfig, Millimeters, Steps};
pub use correction::{Correction, DistanceSensor, PositionCorrection};
pub use driver::{HealthReport, MotorDriver, RegisterInterface, SpiRegisters};
pub use elevator::{Elevator, ElevatorBuilder, MoveOutcome, MoveReport, Tick};
pub use error::{Error, Result};
pub use floor::{FloorButtons, FloorId, FloorTable, RequestOutcome, RequestSource, TargetQueue};
pub use motion::{Direction, MotionPhase, MotionProfile};
pub use motor::{state, CalibrationState, ElevatorState, Position};

#[cfg(feature = "std")]
pub use clock::StdTimebase;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
