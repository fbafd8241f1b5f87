//! Published range readings

/// Distance published for a window without a completed echo
pub const NO_SIGNAL: u16 = u16::MAX;

/// Read side of the per-channel distance slots
pub trait RangeReadings {
    /// Number of multiplexed channels
    fn channel_count(&self) -> usize;

    /// Latest echo duration in capture ticks for `channel`
    ///
    /// Returns [`NO_SIGNAL`] when the last window on that channel saw no
    /// complete echo, or when `channel` is out of range.
    fn distance(&self, channel: usize) -> u16;

    /// Completed rotations across all channels since the last init
    fn sweeps(&self) -> u32;

    /// Latest reading, `None` for [`NO_SIGNAL`]
    fn reading(&self, channel: usize) -> Option<u16> {
        match self.distance(channel) {
            NO_SIGNAL => None,
            ticks => Some(ticks),
        }
    }
}
