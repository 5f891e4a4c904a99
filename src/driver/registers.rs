//! TMC5160 register map and status decoding.

/// Registers touched by the elevator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Global configuration flags.
    Gconf,
    /// Global status flags (write 1 to clear).
    Gstat,
    /// Global motor current scaling.
    GlobalScaler,
    /// Hold and run current.
    IholdIrun,
    /// Chopper and microstep configuration.
    Chopconf,
    /// StallGuard, temperature and short detection status.
    DrvStatus,
}

impl Register {
    /// Register address (7 bits).
    #[inline]
    pub const fn addr(self) -> u8 {
        match self {
            Register::Gconf => 0x00,
            Register::Gstat => 0x01,
            Register::GlobalScaler => 0x0B,
            Register::IholdIrun => 0x10,
            Register::Chopconf => 0x6C,
            Register::DrvStatus => 0x6F,
        }
    }

    /// Look up a register by address.
    pub fn from_addr(addr: u8) -> Option<Self> {
        match addr & 0x7F {
            0x00 => Some(Register::Gconf),
            0x01 => Some(Register::Gstat),
            0x0B => Some(Register::GlobalScaler),
            0x10 => Some(Register::IholdIrun),
            0x6C => Some(Register::Chopconf),
            0x6F => Some(Register::DrvStatus),
            _ => None,
        }
    }
}

/// Status byte returned as the first byte of every SPI datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpiStatus {
    raw: u8,
}

impl SpiStatus {
    /// Wrap a raw status byte.
    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        Self { raw }
    }

    #[inline]
    pub fn raw(&self) -> u8 {
        self.raw
    }

    /// Driver was reset since GSTAT was last cleared.
    #[inline]
    pub fn reset_flag(&self) -> bool {
        (self.raw & (1 << 0)) != 0
    }

    /// Driver shut down on overtemperature or short circuit.
    #[inline]
    pub fn driver_error(&self) -> bool {
        (self.raw & (1 << 1)) != 0
    }

    /// StallGuard flag.
    #[inline]
    pub fn stallguard(&self) -> bool {
        (self.raw & (1 << 2)) != 0
    }

    /// Motor at standstill.
    #[inline]
    pub fn standstill(&self) -> bool {
        (self.raw & (1 << 3)) != 0
    }
}

/// DRV_STATUS register contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrvStatus {
    raw: u32,
}

impl DrvStatus {
    /// Wrap a raw DRV_STATUS value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self { raw }
    }

    #[inline]
    pub fn raw(&self) -> u32 {
        self.raw
    }

    #[inline]
    fn bit(&self, n: u32) -> bool {
        (self.raw & (1 << n)) != 0
    }

    /// Low-side short on phase A.
    #[inline]
    pub fn s2vsa(&self) -> bool {
        self.bit(12)
    }

    /// Low-side short on phase B.
    #[inline]
    pub fn s2vsb(&self) -> bool {
        self.bit(13)
    }

    /// Motor stall detected.
    #[inline]
    pub fn stallguard(&self) -> bool {
        self.bit(24)
    }

    /// Overtemperature shutdown.
    #[inline]
    pub fn ot(&self) -> bool {
        self.bit(25)
    }

    /// Overtemperature pre-warning.
    #[inline]
    pub fn otpw(&self) -> bool {
        self.bit(26)
    }

    /// Short to ground on phase A.
    #[inline]
    pub fn s2ga(&self) -> bool {
        self.bit(27)
    }

    /// Short to ground on phase B.
    #[inline]
    pub fn s2gb(&self) -> bool {
        self.bit(28)
    }

    /// Open load on phase A.
    #[inline]
    pub fn ola(&self) -> bool {
        self.bit(29)
    }

    /// Open load on phase B.
    #[inline]
    pub fn olb(&self) -> bool {
        self.bit(30)
    }

    /// Standstill indicator.
    #[inline]
    pub fn stst(&self) -> bool {
        self.bit(31)
    }

    /// Any short-circuit flag.
    #[inline]
    pub fn short_circuit(&self) -> bool {
        self.s2ga() || self.s2gb() || self.s2vsa() || self.s2vsb()
    }
}

/// Value and status byte from one register read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterReading {
    /// 32-bit register contents.
    pub value: u32,
    /// Status byte reported alongside the value.
    pub status: SpiStatus,
}

/// Fault flags extracted from a health read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriverHealth {
    /// Status byte of the DRV_STATUS read.
    pub status: SpiStatus,
    /// DRV_STATUS register contents.
    pub drv_status: DrvStatus,
}

impl DriverHealth {
    /// Whether the driver needs its configuration re-applied.
    ///
    /// A stall in either the status byte or DRV_STATUS counts. Open load is
    /// informational only: it reads true at standstill on some motors.
    pub fn has_fault(&self) -> bool {
        self.status.reset_flag()
            || self.status.driver_error()
            || self.status.stallguard()
            || self.drv_status.stallguard()
            || self.drv_status.ot()
            || self.drv_status.short_circuit()
    }
}
