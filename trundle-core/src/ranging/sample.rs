//! Echo edge timing state

use crate::traits::NO_SIGNAL;

/// Which echo edge the capture unit is armed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeState {
    /// Armed for the start of an echo
    #[default]
    WaitingForRise,
    /// Echo in progress, armed for its end
    WaitingForFall,
}

/// Edge timestamps for the channel measured in the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeSample {
    /// Counter value latched on the last rising edge
    pub rise_timestamp: u16,
    /// Counter value latched on the last falling edge
    pub fall_timestamp: u16,
    /// Edge the capture unit is armed for
    pub edge_state: EdgeState,
    /// Duration of the last complete echo in this window
    pub echo_ticks: Option<u16>,
}

impl RangeSample {
    /// Latch a rising edge; returns the new state
    pub fn rise(&mut self, captured: u16) -> EdgeState {
        self.rise_timestamp = captured;
        self.edge_state = EdgeState::WaitingForFall;
        self.edge_state
    }

    /// Latch a falling edge and time the echo; returns the new state
    pub fn fall(&mut self, captured: u16, modulus: u32) -> EdgeState {
        self.fall_timestamp = captured;
        self.edge_state = EdgeState::WaitingForRise;
        self.echo_ticks = Some(echo_duration(self.rise_timestamp, captured, modulus));
        self.edge_state
    }

    /// Value to publish at the end of the window
    pub fn published(&self) -> u16 {
        self.echo_ticks.unwrap_or(NO_SIGNAL)
    }

    /// Clear timestamps and re-arm for a rising edge
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// `fall - rise` in the counter's modulus
///
/// Correct as long as the echo is shorter than one counter period. A
/// result that would collide with [`NO_SIGNAL`] is pulled one tick below it.
pub fn echo_duration(rise: u16, fall: u16, modulus: u32) -> u16 {
    let modulus = modulus.clamp(1, 1 << 16);
    let rise = rise as u32 % modulus;
    let fall = fall as u32 % modulus;
    let ticks = (fall + modulus - rise) % modulus;
    ticks.min(NO_SIGNAL as u32 - 1) as u16
}
