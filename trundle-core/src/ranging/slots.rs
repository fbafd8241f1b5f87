//! Published per-channel distances

use portable_atomic::{AtomicU16, AtomicU32, AtomicUsize, Ordering};

use crate::traits::NO_SIGNAL;

/// Latest distance per channel plus the round-robin index
///
/// Written only by the window handler, read by the main loop. Every slot is
/// a single atomic word, so a reader never sees half an update.
pub struct SensorSlots<const N: usize> {
    slots: [AtomicU16; N],
    active: AtomicUsize,
    sweeps: AtomicU32,
}

impl<const N: usize> SensorSlots<N> {
    const HAS_CHANNELS: () = assert!(N > 0, "at least one sensor channel is required");

    /// All slots at [`NO_SIGNAL`], channel 0 active
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::HAS_CHANNELS;
        Self {
            slots: core::array::from_fn(|_| AtomicU16::new(NO_SIGNAL)),
            active: AtomicUsize::new(0),
            sweeps: AtomicU32::new(0),
        }
    }

    /// Store the active channel's result and move to the next channel
    ///
    /// Returns the newly active channel.
    pub fn publish_and_advance(&self, distance: u16) -> usize {
        let active = self.active.load(Ordering::Relaxed);
        self.slots[active].store(distance, Ordering::Release);
        let next = (active + 1) % N;
        self.active.store(next, Ordering::Release);
        if next == 0 {
            self.sweeps.fetch_add(1, Ordering::Release);
        }
        next
    }

    /// Forget all readings and the sweep count, restart at channel 0
    pub fn clear(&self) {
        for slot in &self.slots {
            slot.store(NO_SIGNAL, Ordering::Release);
        }
        self.active.store(0, Ordering::Release);
        self.sweeps.store(0, Ordering::Release);
    }

    /// Latest distance for `channel`, [`NO_SIGNAL`] if out of range
    pub fn get(&self, channel: usize) -> u16 {
        self.slots
            .get(channel)
            .map_or(NO_SIGNAL, |slot| slot.load(Ordering::Acquire))
    }

    /// Channel being measured in the current window
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Completed rotations across all channels
    pub fn sweeps(&self) -> u32 {
        self.sweeps.load(Ordering::Acquire)
    }

    /// Copy every slot; each element is read atomically
    pub fn snapshot(&self) -> [u16; N] {
        core::array::from_fn(|channel| self.get(channel))
    }
}

impl<const N: usize> Default for SensorSlots<N> {
    fn default() -> Self {
        Self::new()
    }
}
