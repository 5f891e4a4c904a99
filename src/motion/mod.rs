//! Motion module for stepper-lift.
//!
//! Provides motion profile calculation and interlocked step execution.

mod executor;
mod profile;

pub use executor::{MotionExecutor, StepOutcome};
pub use profile::{Direction, MotionPhase, MotionProfile};
