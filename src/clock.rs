//! Timebase capability.
//!
//! All waiting in the controller goes through a single [`Timebase`]: blocking
//! delays come from embedded-hal's `DelayNs`, and the health poll reads a
//! monotonic millisecond counter. Tests substitute [`SimulatedTimebase`],
//! which advances its counter on every delay instead of sleeping.

use embedded_hal::delay::DelayNs;

/// Blocking delays plus a monotonic millisecond clock.
pub trait Timebase: DelayNs {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&mut self) -> u64;
}

/// Deterministic timebase: time only moves when something waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedTimebase {
    elapsed_ns: u64,
}

impl SimulatedTimebase {
    /// Create a timebase starting at zero.
    pub const fn new() -> Self {
        Self { elapsed_ns: 0 }
    }

    /// Total simulated time in microseconds.
    #[inline]
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_ns / 1_000
    }

    /// Move the clock forward without a delay call (e.g. to simulate idle time).
    pub fn advance_ms(&mut self, ms: u64) {
        self.elapsed_ns += ms * 1_000_000;
    }
}

impl DelayNs for SimulatedTimebase {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}

impl Timebase for SimulatedTimebase {
    fn now_ms(&mut self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

/// Host timebase backed by `std::time`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdTimebase {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdTimebase {
    /// Start counting from now.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdTimebase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl DelayNs for StdTimebase {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

#[cfg(feature = "std")]
impl Timebase for StdTimebase {
    fn now_ms(&mut self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_time_follows_delays() {
        let mut clock = SimulatedTimebase::new();
        clock.delay_us(1500);
        clock.delay_ms(2);
        assert_eq!(clock.elapsed_us(), 3500);
        assert_eq!(clock.now_ms(), 3);
    }

    #[test]
    fn test_advance_without_delay() {
        let mut clock = SimulatedTimebase::new();
        clock.advance_ms(2001);
        assert_eq!(clock.now_ms(), 2001);
    }
}
