//! TMC5160 configuration and self-healing health checks.

use heapless::Vec;

use crate::config::DriverConfig;
use crate::error::Result;

use super::interface::RegisterInterface;
use super::registers::{DrvStatus, DriverHealth, Register};

/// Register values last written plus the most recent fault flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DriverState {
    written: Vec<(Register, u32), 8>,
    health: DriverHealth,
}

impl DriverState {
    /// Last value written to a register, if any.
    pub fn written(&self, register: Register) -> Option<u32> {
        self.written
            .iter()
            .find(|(r, _)| *r == register)
            .map(|(_, v)| *v)
    }

    /// All registers written so far, in first-write order.
    pub fn registers(&self) -> &[(Register, u32)] {
        &self.written
    }

    /// Flags from the most recent health read.
    pub fn health(&self) -> DriverHealth {
        self.health
    }

    fn record(&mut self, register: Register, value: u32) {
        if let Some(slot) = self.written.iter_mut().find(|(r, _)| *r == register) {
            slot.1 = value;
        } else {
            let _ = self.written.push((register, value));
        }
    }
}

/// Result of a scheduled health poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthReport {
    /// No fault flags set.
    Healthy(DriverHealth),
    /// Fault flags were set and the configuration was re-applied.
    Reconfigured(DriverHealth),
}

impl HealthReport {
    /// Flags that were read.
    pub fn health(&self) -> DriverHealth {
        match self {
            HealthReport::Healthy(h) | HealthReport::Reconfigured(h) => *h,
        }
    }
}

/// Motor driver peripheral with a known-good configuration.
#[derive(Debug)]
pub struct MotorDriver<R> {
    registers: R,
    config: DriverConfig,
    state: DriverState,
    last_poll_ms: u64,
}

impl<R: RegisterInterface> MotorDriver<R> {
    /// Wrap a register interface. Nothing is written until [`configure`](Self::configure).
    pub fn new(registers: R, config: DriverConfig) -> Self {
        Self {
            registers,
            config,
            state: DriverState::default(),
            last_poll_ms: 0,
        }
    }

    /// Write the fixed register set: clear latched flags, current scaling,
    /// chopper/microstep mode, hold/run current.
    ///
    /// Idempotent: repeated calls leave the driver in the same state.
    pub fn configure(&mut self) -> Result<()> {
        let writes = [
            (Register::Gstat, self.config.gstat_clear),
            (Register::GlobalScaler, self.config.global_scaler),
            (Register::Chopconf, self.config.chopconf),
            (Register::IholdIrun, self.config.ihold_irun),
        ];

        for (register, value) in writes {
            self.registers.write(register, value)?;
            self.state.record(register, value);
        }

        log_debug!("driver configured");
        Ok(())
    }

    /// Read DRV_STATUS and extract fault flags.
    pub fn health(&mut self) -> Result<DriverHealth> {
        let reading = self.registers.read(Register::DrvStatus)?;
        let health = DriverHealth {
            status: reading.status,
            drv_status: DrvStatus::from_raw(reading.value),
        };
        self.state.health = health;
        Ok(health)
    }

    /// Read health and re-apply the configuration if any fault flag is set.
    pub fn check_and_heal(&mut self) -> Result<HealthReport> {
        let health = self.health()?;
        if health.has_fault() {
            log_warn!(
                "driver fault (status 0x{:x}, drv_status 0x{:x}), reconfiguring",
                health.status.raw(),
                health.drv_status.raw()
            );
            self.configure()?;
            Ok(HealthReport::Reconfigured(health))
        } else {
            Ok(HealthReport::Healthy(health))
        }
    }

    /// Run [`check_and_heal`](Self::check_and_heal) once the poll interval has elapsed.
    ///
    /// Returns `None` when the poll is not yet due.
    pub fn poll(&mut self, now_ms: u64) -> Result<Option<HealthReport>> {
        if now_ms.saturating_sub(self.last_poll_ms) <= u64::from(self.config.health_interval_ms) {
            return Ok(None);
        }
        self.last_poll_ms = now_ms;
        self.check_and_heal().map(Some)
    }

    /// Start the poll interval from `now_ms`.
    pub fn restart_interval(&mut self, now_ms: u64) {
        self.last_poll_ms = now_ms;
    }

    /// Register values written and last fault flags.
    pub fn state(&self) -> &DriverState {
        &self.state
    }

    /// Underlying register interface.
    pub fn registers(&self) -> &R {
        &self.registers
    }

    /// Mutable access to the register interface.
    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.registers
    }

    /// Give the register interface back.
    pub fn release(self) -> R {
        self.registers
    }
}
