//! Rangefinder channel multiplexer

use trundle_hal::OutputPin;

/// Routes the trigger and echo lines to one physical sensor
pub trait ChannelSelect {
    /// Number of physical sensors the lines can address
    const CHANNELS: usize;

    /// Drive the select lines for `channel`
    fn select(&mut self, channel: usize);
}

/// Single sensor, nothing to switch
impl ChannelSelect for () {
    const CHANNELS: usize = 1;

    fn select(&mut self, _channel: usize) {}
}

/// Binary-coded select lines; pin `b` carries bit `b` of the channel index
pub struct SelectLines<P, const B: usize> {
    pins: [P; B],
}

impl<P: OutputPin, const B: usize> SelectLines<P, B> {
    pub fn new(pins: [P; B]) -> Self {
        Self { pins }
    }
}

impl<P: OutputPin, const B: usize> ChannelSelect for SelectLines<P, B> {
    const CHANNELS: usize = 1 << B;

    fn select(&mut self, channel: usize) {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            pin.set_state(channel & (1 << bit) != 0);
        }
    }
}
