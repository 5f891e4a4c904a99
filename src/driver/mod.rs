//! Motor driver module for stepper-lift.
//!
//! Typed TMC5160 registers, a register read/write capability with SPI and
//! in-memory implementations, and the configure/health logic on top.

mod interface;
pub mod mock;
mod registers;
mod spi;
mod tmc;

pub use interface::RegisterInterface;
pub use mock::MockRegisters;
pub use registers::{DriverHealth, DrvStatus, Register, RegisterReading, SpiStatus};
pub use spi::{SpiRegisters, MODE};
pub use tmc::{DriverState, HealthReport, MotorDriver};
