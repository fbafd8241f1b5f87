//! Bounded queue of framed lines

use crate::traits::Line;

/// What the framer did with one received byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxOutcome {
    /// Appended to the in-progress line
    Stored,
    /// In-progress line full, or no slot for it
    Dropped,
    /// Newline completed the in-progress line
    LineCompleted,
    /// Newline arrived while the queue was at its limit; line discarded
    LineDropped,
    /// Carriage return, not part of any line
    Ignored,
}

/// Drop counters since startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxStats {
    pub dropped_bytes: u32,
    pub dropped_lines: u32,
}

/// `L` line slots of up to `C` characters each
///
/// Slots `0..completed` hold finished lines, oldest first. The slot at
/// `completed` holds the line being received; every slot after it is empty.
/// At most `L - 1` lines are ever completed: a newline that would fill the
/// last slot discards the line instead.
#[derive(Debug, Clone)]
pub struct LineQueue<const L: usize, const C: usize> {
    lines: [Line<C>; L],
    completed: usize,
    stats: RxStats,
}

impl<const L: usize, const C: usize> LineQueue<L, C> {
    const HAS_SLOTS: () = assert!(L >= 2, "a line queue needs at least two slots");

    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::HAS_SLOTS;
        Self {
            lines: core::array::from_fn(|_| Line::new()),
            completed: 0,
            stats: RxStats::default(),
        }
    }

    /// Frame one received byte
    pub fn push_byte(&mut self, byte: u8) -> RxOutcome {
        match byte {
            b'\n' => {
                if self.completed < L - 1 {
                    self.completed += 1;
                    RxOutcome::LineCompleted
                } else {
                    self.lines[self.completed].clear();
                    self.stats.dropped_lines = self.stats.dropped_lines.saturating_add(1);
                    RxOutcome::LineDropped
                }
            }
            b'\r' => RxOutcome::Ignored,
            _ => {
                let stored = self.completed < L && self.lines[self.completed].push(byte).is_ok();
                if stored {
                    RxOutcome::Stored
                } else {
                    self.stats.dropped_bytes = self.stats.dropped_bytes.saturating_add(1);
                    RxOutcome::Dropped
                }
            }
        }
    }

    /// Number of completed lines
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Characters received so far on the line in progress
    pub fn in_progress(&self) -> &[u8] {
        self.lines
            .get(self.completed)
            .map_or(&[][..], |line| line.as_slice())
    }

    /// Move the oldest completed line into `dst` and shift the rest down
    ///
    /// Returns the number of completed lines left. No-op returning 0 when
    /// the queue holds no completed line.
    pub fn pop_into(&mut self, dst: &mut Line<C>) -> usize {
        if self.completed == 0 {
            return 0;
        }
        dst.clear();
        core::mem::swap(dst, &mut self.lines[0]);
        // Slot 0 is now empty and rotates to the back
        self.lines.rotate_left(1);
        self.completed -= 1;
        self.completed
    }

    pub fn stats(&self) -> RxStats {
        self.stats
    }
}

impl<const L: usize, const C: usize> Default for LineQueue<L, C> {
    fn default() -> Self {
        Self::new()
    }
}
