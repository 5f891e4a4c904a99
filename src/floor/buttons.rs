//! Floor request inputs.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::config::ButtonConfig;
use crate::error::{HardwareError, Result};

use super::table::FloorId;

/// Anything that can produce floor requests between moves.
///
/// May block (e.g. for debouncing); the controller only calls it while no
/// move is running.
pub trait RequestSource {
    /// Return the next requested floor, if any.
    fn poll_request<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<FloorId>>;
}

/// No request source.
impl RequestSource for () {
    fn poll_request<D: DelayNs>(&mut self, _delay: &mut D) -> Result<Option<FloorId>> {
        Ok(None)
    }
}

/// One active-low push button per floor, index = floor id.
pub struct FloorButtons<BTN, const N: usize> {
    pins: [BTN; N],
    debounce_ms: u32,
}

impl<BTN: InputPin, const N: usize> FloorButtons<BTN, N> {
    /// Take ownership of the button inputs.
    pub fn new(pins: [BTN; N], config: &ButtonConfig) -> Self {
        Self {
            pins,
            debounce_ms: config.debounce_ms,
        }
    }

    /// Scan buttons lowest floor first; the first confirmed press wins.
    ///
    /// A press is confirmed when the pin reads low, stays low after the
    /// debounce delay.
    pub fn scan<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<FloorId>> {
        for (i, pin) in self.pins.iter_mut().enumerate() {
            if pin.is_low().map_err(|_| HardwareError::Pin)? {
                delay.delay_ms(self.debounce_ms);
                if pin.is_low().map_err(|_| HardwareError::Pin)? {
                    return Ok(Some(FloorId(i)));
                }
            }
        }
        Ok(None)
    }

    /// Give the pins back.
    pub fn release(self) -> [BTN; N] {
        self.pins
    }
}

impl<BTN: InputPin, const N: usize> RequestSource for FloorButtons<BTN, N> {
    fn poll_request<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<FloorId>> {
        self.scan(delay)
    }
}
