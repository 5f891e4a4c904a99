//! SPI transport for TMC5160 register datagrams.
//!
//! Each datagram is 40 bits, MSB first: an address byte (bit 7 set for
//! writes) followed by the 32-bit value big-endian. The chip answers with its
//! status byte and the data requested by the *previous* datagram, so a read
//! is sent twice and the second answer carries the value.

use embedded_hal::spi::{Mode, Phase, Polarity, SpiDevice};

use crate::error::{HardwareError, Result};

use super::interface::RegisterInterface;
use super::registers::{Register, RegisterReading, SpiStatus};

/// SPI mode 3 as required by the TMC5160.
pub const MODE: Mode = Mode {
    phase: Phase::CaptureOnSecondTransition,
    polarity: Polarity::IdleHigh,
};

const WRITE_FLAG: u8 = 0x80;

/// TMC5160 register access over an embedded-hal `SpiDevice`.
#[derive(Debug)]
pub struct SpiRegisters<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> SpiRegisters<SPI> {
    /// Wrap an SPI device with chip select already managed.
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Give the SPI device back.
    pub fn release(self) -> SPI {
        self.spi
    }

    fn exchange(&mut self, addr: u8) -> Result<[u8; 5]> {
        let request = [addr, 0, 0, 0, 0];
        let mut response = [0u8; 5];
        self.spi
            .transfer(&mut response, &request)
            .map_err(|_| HardwareError::Bus)?;
        Ok(response)
    }
}

impl<SPI: SpiDevice> RegisterInterface for SpiRegisters<SPI> {
    fn write(&mut self, register: Register, value: u32) -> Result<()> {
        let [b3, b2, b1, b0] = value.to_be_bytes();
        let datagram = [register.addr() | WRITE_FLAG, b3, b2, b1, b0];
        self.spi.write(&datagram).map_err(|_| HardwareError::Bus)?;
        Ok(())
    }

    fn read(&mut self, register: Register) -> Result<RegisterReading> {
        // First answer belongs to whatever was sent before.
        let _ = self.exchange(register.addr())?;
        let response = self.exchange(register.addr())?;

        Ok(RegisterReading {
            value: u32::from_be_bytes([response[1], response[2], response[3], response[4]]),
            status: SpiStatus::from_raw(response[0]),
        })
    }
}
