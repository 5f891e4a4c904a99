//! Floor module for stepper-lift.
//!
//! Floor table, request arbitration and the button input layer.

mod buttons;
mod queue;
mod table;

pub use buttons::{FloorButtons, RequestSource};
pub use queue::{DropReason, RequestOutcome, TargetQueue};
pub use table::{Floor, FloorId, FloorTable};
