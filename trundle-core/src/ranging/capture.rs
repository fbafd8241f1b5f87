//! Echo capture and window rotation

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use trundle_hal::timer::{CaptureTimer, CaptureTimerConfig, Edge};
use trundle_hal::OutputPin;

use super::sample::{EdgeState, RangeSample};
use super::select::ChannelSelect;
use super::slots::SensorSlots;
use crate::traits::RangeReadings;

struct Unit<T, S, P> {
    timer: T,
    select: S,
    trigger: P,
    config: CaptureTimerConfig,
    sample: RangeSample,
}

/// Rangefinder front end multiplexed over `N` channels
///
/// The platform routes four interrupts of the capture timer here:
///
/// | interrupt          | handler                                  |
/// |--------------------|------------------------------------------|
/// | input capture      | [`RangeCapture::on_edge_captured`]       |
/// | overflow (TOP)     | [`RangeCapture::on_window_elapsed`]      |
/// | compare A          | [`RangeCapture::on_trigger_assert`]      |
/// | compare B          | [`RangeCapture::on_trigger_release`]     |
///
/// The edge state lives behind a critical-section mutex; published
/// distances live in [`SensorSlots`] and are read without locking.
///
/// `N` may not exceed [`ChannelSelect::CHANNELS`]: every logical channel
/// must map to its own sensor. Violations fail to build.
pub struct RangeCapture<T, S, P, const N: usize> {
    unit: Mutex<CriticalSectionRawMutex, RefCell<Unit<T, S, P>>>,
    slots: SensorSlots<N>,
}

impl<T: CaptureTimer, S: ChannelSelect, P: OutputPin, const N: usize> RangeCapture<T, S, P, N> {
    const SELECT_FITS: () = assert!(
        N <= S::CHANNELS,
        "more channels than the select lines can address"
    );

    /// Wrap the capture timer, select lines and trigger line
    pub fn new(timer: T, select: S, trigger: P, config: CaptureTimerConfig) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SELECT_FITS;
        Self {
            unit: Mutex::new(RefCell::new(Unit {
                timer,
                select,
                trigger,
                config,
                sample: RangeSample::default(),
            })),
            slots: SensorSlots::new(),
        }
    }

    fn with_unit<R>(&self, f: impl FnOnce(&mut Unit<T, S, P>) -> R) -> R {
        self.unit.lock(|unit| f(&mut unit.borrow_mut()))
    }

    /// Select channel 0, release the trigger and start the timer
    pub fn init(&self) {
        self.slots.clear();
        self.with_unit(|unit| {
            unit.sample.reset();
            unit.select.select(0);
            unit.trigger.set_low();
            let mut config = unit.config;
            config.initial_edge = Edge::Rising;
            unit.timer.configure(&config);
        });
    }

    /// Input capture interrupt handler
    ///
    /// `captured` is the counter value the hardware latched on the edge.
    pub fn on_edge_captured(&self, captured: u16) {
        self.with_unit(|unit| match unit.sample.edge_state {
            EdgeState::WaitingForRise => {
                unit.sample.rise(captured);
                unit.timer.set_capture_edge(Edge::Falling);
            }
            EdgeState::WaitingForFall => {
                let modulus = unit.config.modulus();
                unit.sample.fall(captured, modulus);
                unit.timer.set_capture_edge(Edge::Rising);
            }
        });
    }

    /// Overflow interrupt handler, closes the ranging window
    ///
    /// Publishes the active channel, rotates to the next one and clears the
    /// sample. An echo still in flight is discarded with the sample, so a
    /// late fall can never be credited to the next channel.
    pub fn on_window_elapsed(&self) {
        self.with_unit(|unit| {
            let next = self.slots.publish_and_advance(unit.sample.published());
            unit.select.select(next);
            unit.sample.reset();
            unit.timer.set_capture_edge(Edge::Rising);
        });
    }

    /// Compare A interrupt handler, starts the trigger pulse
    pub fn on_trigger_assert(&self) {
        self.with_unit(|unit| unit.trigger.set_high());
    }

    /// Compare B interrupt handler, ends the trigger pulse
    pub fn on_trigger_release(&self) {
        self.with_unit(|unit| unit.trigger.set_low());
    }

    /// Copy of the in-window edge state
    pub fn sample(&self) -> RangeSample {
        self.with_unit(|unit| unit.sample)
    }

    /// Channel being measured in the current window
    pub fn active_channel(&self) -> usize {
        self.slots.active()
    }

    /// All published distances
    pub fn snapshot(&self) -> [u16; N] {
        self.slots.snapshot()
    }
}

impl<T: CaptureTimer, S: ChannelSelect, P: OutputPin, const N: usize> RangeReadings
    for RangeCapture<T, S, P, N>
{
    fn channel_count(&self) -> usize {
        N
    }

    fn distance(&self, channel: usize) -> u16 {
        self.slots.get(channel)
    }

    fn sweeps(&self) -> u32 {
        self.slots.sweeps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SENSOR_CHANNELS;
    use crate::ranging::SelectLines;
    use crate::traits::NO_SIGNAL;
    use proptest::prelude::*;
    use trundle_hal::mock::{MockCaptureTimer, MockPin};

    type Capture = RangeCapture<MockCaptureTimer, SelectLines<MockPin, 2>, MockPin, SENSOR_CHANNELS>;

    struct Rig {
        capture: Capture,
        timer: MockCaptureTimer,
        select: [MockPin; 2],
        trigger: MockPin,
    }

    impl Rig {
        fn new() -> Self {
            let timer = MockCaptureTimer::new();
            let select = [MockPin::new(), MockPin::new()];
            let trigger = MockPin::new();
            let capture = RangeCapture::new(
                timer.clone(),
                SelectLines::new(select.clone()),
                trigger.clone(),
                CaptureTimerConfig::default(),
            );
            capture.init();
            Self {
                capture,
                timer,
                select,
                trigger,
            }
        }

        fn selected(&self) -> usize {
            self.select
                .iter()
                .enumerate()
                .map(|(bit, pin)| (pin.is_set_high() as usize) << bit)
                .sum()
        }

        fn echo(&self, rise: u16, fall: u16) {
            self.capture.on_edge_captured(rise);
            self.capture.on_edge_captured(fall);
        }
    }

    #[test]
    fn test_init_starts_timer_on_channel_zero() {
        let rig = Rig::new();
        assert!(rig.timer.config().is_some());
        assert_eq!(rig.timer.capture_edge(), Edge::Rising);
        assert_eq!(rig.selected(), 0);
        assert!(rig.trigger.is_set_low());
        assert_eq!(rig.capture.snapshot(), [NO_SIGNAL; SENSOR_CHANNELS]);
    }

    #[test]
    fn test_edges_toggle_capture_polarity() {
        let rig = Rig::new();
        rig.capture.on_edge_captured(100);
        assert_eq!(rig.timer.capture_edge(), Edge::Falling);
        assert_eq!(rig.capture.sample().edge_state, EdgeState::WaitingForFall);
        assert_eq!(rig.capture.sample().rise_timestamp, 100);

        rig.capture.on_edge_captured(160);
        assert_eq!(rig.timer.capture_edge(), Edge::Rising);
        assert_eq!(rig.capture.sample().edge_state, EdgeState::WaitingForRise);
        assert_eq!(rig.capture.sample().fall_timestamp, 160);
        assert_eq!(rig.timer.edge_writes(), [Edge::Falling, Edge::Rising]);
    }

    #[test]
    fn test_completed_echo_is_published() {
        let rig = Rig::new();
        rig.echo(12, 112);
        rig.capture.on_window_elapsed();
        assert_eq!(rig.capture.distance(0), 100);
        assert_eq!(rig.capture.reading(0), Some(100));
    }

    #[test]
    fn test_missing_fall_publishes_no_signal() {
        let rig = Rig::new();
        rig.capture.on_edge_captured(50);
        rig.capture.on_window_elapsed();
        assert_eq!(rig.capture.distance(0), NO_SIGNAL);
        assert_eq!(rig.capture.reading(0), None);

        let sample = rig.capture.sample();
        assert_eq!(sample.rise_timestamp, 0);
        assert_eq!(sample.fall_timestamp, 0);
        assert_eq!(sample.edge_state, EdgeState::WaitingForRise);
        assert_eq!(rig.timer.capture_edge(), Edge::Rising);
    }

    #[test]
    fn test_stale_reading_is_replaced_by_no_signal() {
        let rig = Rig::new();
        rig.echo(0, 40);
        for _ in 0..SENSOR_CHANNELS {
            rig.capture.on_window_elapsed();
        }
        assert_eq!(rig.capture.distance(0), 40);

        // Channel 0 again, this time silent
        rig.capture.on_window_elapsed();
        assert_eq!(rig.capture.distance(0), NO_SIGNAL);
    }

    #[test]
    fn test_channel_rotation_drives_select_lines() {
        let rig = Rig::new();
        let mut seen = std::vec::Vec::new();
        for _ in 0..9 {
            rig.capture.on_window_elapsed();
            seen.push((rig.capture.active_channel(), rig.selected()));
        }
        let expected: std::vec::Vec<(usize, usize)> =
            [1, 2, 3, 0, 1, 2, 3, 0, 1].iter().map(|&c| (c, c)).collect();
        assert_eq!(seen, expected);
        assert_eq!(rig.capture.sweeps(), 2);
    }

    #[test]
    fn test_trigger_pulse() {
        let rig = Rig::new();
        rig.capture.on_trigger_assert();
        assert!(rig.trigger.is_set_high());
        rig.capture.on_trigger_release();
        assert!(rig.trigger.is_set_low());
        // init low, then high, then low
        assert_eq!(rig.trigger.history(), [false, true, false]);
    }

    #[test]
    fn test_one_trigger_pulse_per_window() {
        let rig = Rig::new();
        for _ in 0..6 {
            rig.capture.on_trigger_assert();
            rig.capture.on_trigger_release();
            rig.capture.on_window_elapsed();
        }
        assert_eq!(rig.trigger.rising_writes(), 6);
        assert!(rig.trigger.is_set_low());
    }

    #[test]
    fn test_every_channel_has_its_own_sensor() {
        let addressable = <SelectLines<MockPin, 2> as ChannelSelect>::CHANNELS;
        assert!(SENSOR_CHANNELS <= addressable);

        let rig = Rig::new();
        let mut physical = std::vec::Vec::new();
        for _ in 0..SENSOR_CHANNELS {
            physical.push(rig.selected());
            rig.capture.on_window_elapsed();
        }
        physical.sort_unstable();
        physical.dedup();
        assert_eq!(physical.len(), SENSOR_CHANNELS);
    }

    #[test]
    fn test_window_boundary_rearms_rising_edge() {
        let rig = Rig::new();
        rig.capture.on_edge_captured(10);
        rig.capture.on_window_elapsed();
        assert_eq!(rig.timer.edge_writes(), [Edge::Falling, Edge::Rising]);
    }

    #[test]
    fn test_reinit_restarts_sweep_count() {
        let rig = Rig::new();
        rig.echo(0, 40);
        for _ in 0..SENSOR_CHANNELS * 3 {
            rig.capture.on_window_elapsed();
        }
        assert_eq!(rig.capture.sweeps(), 3);

        rig.capture.init();
        assert_eq!(rig.capture.sweeps(), 0);
        assert_eq!(rig.capture.active_channel(), 0);
        assert_eq!(rig.selected(), 0);
        assert_eq!(rig.capture.snapshot(), [NO_SIGNAL; SENSOR_CHANNELS]);
    }

    #[test]
    fn test_readings_are_per_channel() {
        let rig = Rig::new();
        let echoes = [(10, 30), (0, 0), (5, 505), (900, 1000)];
        for (channel, &(rise, fall)) in echoes.iter().enumerate() {
            if channel != 1 {
                rig.echo(rise, fall);
            }
            rig.capture.on_window_elapsed();
        }
        assert_eq!(rig.capture.snapshot(), [20, NO_SIGNAL, 500, 100]);
        assert_eq!(rig.capture.channel_count(), SENSOR_CHANNELS);
        assert_eq!(rig.capture.distance(9), NO_SIGNAL);
    }

    proptest! {
        #[test]
        fn prop_published_distance_is_fall_minus_rise(rise in 0u16..1023, len in 1u16..1023) {
            let fall = rise + len.min(1023 - rise);
            prop_assume!(fall > rise);
            let rig = Rig::new();
            rig.echo(rise, fall);
            rig.capture.on_window_elapsed();
            prop_assert_eq!(rig.capture.distance(0), fall - rise);
        }

        #[test]
        fn prop_rotation_ignores_echo_presence(echoes in proptest::collection::vec(any::<bool>(), 1..40)) {
            let rig = Rig::new();
            for (window, &echo) in echoes.iter().enumerate() {
                prop_assert_eq!(rig.capture.active_channel(), window % SENSOR_CHANNELS);
                if echo {
                    rig.echo(3, 9);
                }
                rig.capture.on_window_elapsed();
            }
            prop_assert_eq!(rig.capture.active_channel(), echoes.len() % SENSOR_CHANNELS);
            prop_assert_eq!(rig.capture.sweeps() as usize, echoes.len() / SENSOR_CHANNELS);
        }
    }
}
