//! Step channel trait

/// Wheel rotation direction, as driven on the direction line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Direction line high
    #[default]
    Forward,
    /// Direction line low
    Reverse,
}

impl Direction {
    /// Level of the direction line
    pub fn is_high(self) -> bool {
        matches!(self, Direction::Forward)
    }
}

impl From<bool> for Direction {
    fn from(high: bool) -> Self {
        if high {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }
}

/// One counted pulse-train output
///
/// A "step" is one compare-match event, i.e. one toggle of the step line.
/// A full high/low pulse on the driver input is two steps.
pub trait StepChannel {
    /// Drive the direction line; takes effect immediately, even mid-move
    fn set_direction(&self, direction: Direction);

    /// Current direction
    fn direction(&self) -> Direction;

    /// Start a pulse train of `steps` toggles
    ///
    /// `speed` is the compare interval in timer ticks: larger is slower.
    /// Values above the register width are clamped. A speed of zero
    /// produces no toggles and never completes; call [`StepChannel::stop`].
    fn start(&self, speed: u16, steps: u32);

    /// Halt the pulse train regardless of the remaining count
    fn stop(&self);

    /// Toggles still to be produced by the current move
    fn remaining_steps(&self) -> u32;

    /// Check if the timer clock is running
    fn is_running(&self) -> bool;
}
