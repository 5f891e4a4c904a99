//! Motor module for stepper-lift.
//!
//! Provides the step/dir outputs, position tracking, controller states and
//! the homing sequence.

pub mod homing;
mod position;
pub mod state;
mod stepper;

pub use homing::HomingReport;
pub use position::Position;
pub use state::{CalibrationState, ElevatorState, StateName};
pub use stepper::StepperOutputs;
