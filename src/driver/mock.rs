//! In-memory register file for tests and host simulation.

use heapless::Vec;

use crate::error::Result;

use super::interface::RegisterInterface;
use super::registers::{Register, RegisterReading, SpiStatus};

/// Maximum number of recorded writes.
pub const MAX_WRITE_LOG: usize = 64;

/// In-memory stand-in for the TMC5160.
///
/// Stores the last value written per register, logs every write (oldest
/// entries are kept once the log is full), and reports an injectable status
/// byte on reads.
#[derive(Debug, Clone, Default)]
pub struct MockRegisters {
    values: Vec<(Register, u32), 8>,
    writes: Vec<(Register, u32), MAX_WRITE_LOG>,
    reads: u32,
    status: SpiStatus,
    clear_status_on_gstat: bool,
}

impl MockRegisters {
    /// Healthy driver with all registers zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Status byte returned by subsequent reads.
    pub fn set_status(&mut self, status: u8) {
        self.status = SpiStatus::from_raw(status);
    }

    /// When set, a GSTAT write clears the status byte like a real reset flag.
    pub fn clear_status_on_gstat(&mut self, clear: bool) {
        self.clear_status_on_gstat = clear;
    }

    /// Preload a register value (e.g. DRV_STATUS flags).
    pub fn set_value(&mut self, register: Register, value: u32) {
        if let Some(slot) = self.values.iter_mut().find(|(r, _)| *r == register) {
            slot.1 = value;
        } else {
            let _ = self.values.push((register, value));
        }
    }

    /// Current stored value of a register.
    pub fn value(&self, register: Register) -> u32 {
        self.values
            .iter()
            .find(|(r, _)| *r == register)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }

    /// Every write seen, in order.
    pub fn writes(&self) -> &[(Register, u32)] {
        &self.writes
    }

    /// Number of register reads served.
    pub fn read_count(&self) -> u32 {
        self.reads
    }

    /// Forget the write log.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl RegisterInterface for MockRegisters {
    fn write(&mut self, register: Register, value: u32) -> Result<()> {
        let _ = self.writes.push((register, value));
        if register == Register::Gstat && self.clear_status_on_gstat {
            self.status = SpiStatus::default();
        }
        self.set_value(register, value);
        Ok(())
    }

    fn read(&mut self, register: Register) -> Result<RegisterReading> {
        self.reads += 1;
        Ok(RegisterReading {
            value: self.value(register),
            status: self.status,
        })
    }
}
