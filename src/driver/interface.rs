//! Register read/write capability.

use crate::error::Result;

use super::registers::{Register, RegisterReading};

/// Synchronous access to the motor driver's registers.
///
/// Implemented once over SPI for the real TMC5160 and once in memory for
/// tests. Calls block until the transfer finishes; there is no timeout.
pub trait RegisterInterface {
    /// Write a 32-bit value to a register.
    fn write(&mut self, register: Register, value: u32) -> Result<()>;

    /// Read a register's 32-bit value and the status byte reported with it.
    fn read(&mut self, register: Register) -> Result<RegisterReading>;
}

impl<T: RegisterInterface + ?Sized> RegisterInterface for &mut T {
    fn write(&mut self, register: Register, value: u32) -> Result<()> {
        (**self).write(register, value)
    }

    fn read(&mut self, register: Register) -> Result<RegisterReading> {
        (**self).read(register)
    }
}
