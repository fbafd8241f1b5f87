//! GPIO pin abstractions
//!
//! The control core only drives outputs: wheel direction lines, the
//! rangefinder channel select lines and the trigger line. Echo inputs are
//! read by the capture timer, never polled.

/// Digital output pin
///
/// Implementations write a single port bit. A write must be visible to the
/// hardware as soon as the call returns.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}
