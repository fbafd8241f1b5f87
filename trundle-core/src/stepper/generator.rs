//! Counted pulse-train generator on a compare-match timer

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use trundle_hal::timer::{ClockSelect, PulseTimer, PulseTimerConfig};
use trundle_hal::OutputPin;

use crate::traits::{Direction, StepChannel};

/// Snapshot of one wheel channel
///
/// Invariant: `remaining_steps == 0` implies `!running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperChannel {
    /// Level on the direction line
    pub direction: Direction,
    /// Toggles left in the current move
    pub remaining_steps: u32,
    /// Compare register value
    pub pulse_period: u8,
    /// Timer clock enabled
    pub running: bool,
}

struct Unit<T, D> {
    timer: T,
    dir_pin: D,
    config: PulseTimerConfig,
    channel: StepperChannel,
}

/// Step pulse generator for one wheel
///
/// Owns the wheel's pulse timer and direction pin. The platform routes the
/// timer's compare interrupt to [`StepPulseGenerator::on_compare_match`];
/// everything else is called from the main loop. All state sits behind a
/// critical-section mutex, so the handler and the control calls never see
/// each other half-done.
pub struct StepPulseGenerator<T, D> {
    unit: Mutex<CriticalSectionRawMutex, RefCell<Unit<T, D>>>,
}

impl<T: PulseTimer, D: OutputPin> StepPulseGenerator<T, D> {
    /// Wrap a timer and direction pin; hardware is untouched until [`init`]
    ///
    /// [`init`]: StepPulseGenerator::init
    pub fn new(timer: T, dir_pin: D, config: PulseTimerConfig) -> Self {
        Self {
            unit: Mutex::new(RefCell::new(Unit {
                timer,
                dir_pin,
                config,
                channel: StepperChannel::default(),
            })),
        }
    }

    fn with_unit<R>(&self, f: impl FnOnce(&mut Unit<T, D>) -> R) -> R {
        self.unit.lock(|unit| f(&mut unit.borrow_mut()))
    }

    /// Configure toggle-on-compare output with the clock stopped
    pub fn init(&self) {
        self.with_unit(|unit| {
            let config = unit.config;
            unit.timer.configure(&config);
            unit.timer.set_clock(ClockSelect::Stopped);
            unit.dir_pin.set_state(unit.channel.direction.is_high());
            unit.channel.running = false;
            unit.channel.remaining_steps = 0;
        });
    }

    /// Compare-match interrupt handler
    ///
    /// Counts one toggle. The match that brings the count to zero stops the
    /// clock before returning, so a move of N steps never produces more than
    /// N toggles.
    pub fn on_compare_match(&self) {
        self.with_unit(|unit| {
            let channel = &mut unit.channel;
            if !channel.running || channel.remaining_steps == 0 {
                return;
            }
            channel.remaining_steps -= 1;
            if channel.remaining_steps == 0 {
                unit.timer.set_clock(ClockSelect::Stopped);
                channel.running = false;
            }
        });
    }

    /// Copy of the channel state
    pub fn channel(&self) -> StepperChannel {
        self.with_unit(|unit| unit.channel)
    }
}

impl<T: PulseTimer, D: OutputPin> StepChannel for StepPulseGenerator<T, D> {
    fn set_direction(&self, direction: Direction) {
        self.with_unit(|unit| {
            unit.dir_pin.set_state(direction.is_high());
            unit.channel.direction = direction;
        });
    }

    fn direction(&self) -> Direction {
        self.with_unit(|unit| unit.channel.direction)
    }

    fn start(&self, speed: u16, steps: u32) {
        let period = u8::try_from(speed).unwrap_or(u8::MAX);
        self.with_unit(|unit| {
            unit.timer.set_compare(period);
            unit.channel.pulse_period = period;
            unit.channel.remaining_steps = steps;
            if steps == 0 {
                // Nothing to count; keep the clock off so the invariant holds
                unit.timer.set_clock(ClockSelect::Stopped);
                unit.channel.running = false;
                return;
            }
            let run_clock = unit.config.run_clock;
            unit.timer.set_clock(run_clock);
            unit.channel.running = true;
        });
    }

    fn stop(&self) {
        self.with_unit(|unit| {
            unit.timer.set_clock(ClockSelect::Stopped);
            unit.channel.running = false;
        });
    }

    fn remaining_steps(&self) -> u32 {
        self.with_unit(|unit| unit.channel.remaining_steps)
    }

    fn is_running(&self) -> bool {
        self.with_unit(|unit| unit.channel.running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use trundle_hal::mock::{MockPin, MockPulseTimer};

    type Generator = StepPulseGenerator<MockPulseTimer, MockPin>;

    fn make() -> (Generator, MockPulseTimer, MockPin) {
        let timer = MockPulseTimer::new();
        let pin = MockPin::new();
        let gen = StepPulseGenerator::new(timer.clone(), pin.clone(), PulseTimerConfig::default());
        gen.init();
        (gen, timer, pin)
    }

    /// Advance the simulated timer tick by tick, dispatching the interrupt
    /// handler for every compare match. Returns the number of matches.
    fn run(gen: &Generator, timer: &MockPulseTimer, ticks: u32) -> u32 {
        let mut fired = 0;
        for _ in 0..ticks {
            for _ in 0..timer.advance(1) {
                gen.on_compare_match();
                fired += 1;
            }
        }
        fired
    }

    #[test]
    fn test_init_configures_toggle_and_stops_clock() {
        let (gen, timer, _) = make();
        let config = timer.config().unwrap();
        assert_eq!(config, PulseTimerConfig::default());
        assert_eq!(timer.clock(), ClockSelect::Stopped);
        assert!(!gen.is_running());
    }

    #[test]
    fn test_move_stops_after_exact_count() {
        let (gen, timer, _) = make();
        gen.start(3, 10);
        assert!(gen.is_running());
        assert_eq!(timer.clock(), ClockSelect::Div256);
        assert_eq!(timer.compare(), 3);

        let fired = run(&gen, &timer, 1000);
        assert_eq!(fired, 10);
        assert_eq!(gen.remaining_steps(), 0);
        assert!(!gen.is_running());
        assert_eq!(timer.clock(), ClockSelect::Stopped);
    }

    #[test]
    fn test_speed_zero_never_completes() {
        let (gen, timer, _) = make();
        gen.start(0, 5);
        let fired = run(&gen, &timer, 10_000);
        assert_eq!(fired, 0);
        assert_eq!(gen.remaining_steps(), 5);
        assert!(gen.is_running());
        assert!(timer.clock().is_running());

        gen.stop();
        assert!(!gen.is_running());
        assert_eq!(timer.clock(), ClockSelect::Stopped);
    }

    #[test]
    fn test_speed_is_clamped_to_register_width() {
        let (gen, timer, _) = make();
        gen.start(1000, 1);
        assert_eq!(timer.compare(), u8::MAX);
        assert_eq!(gen.channel().pulse_period, u8::MAX);
    }

    #[test]
    fn test_stop_keeps_remaining_count() {
        let (gen, timer, _) = make();
        gen.start(1, 10);
        run(&gen, &timer, 4);
        gen.stop();
        assert_eq!(gen.remaining_steps(), 6);
        assert!(!gen.is_running());
        assert_eq!(run(&gen, &timer, 100), 0);
    }

    #[test]
    fn test_spurious_match_after_stop_is_ignored() {
        let (gen, _, _) = make();
        gen.start(1, 3);
        gen.stop();
        gen.on_compare_match();
        assert_eq!(gen.remaining_steps(), 3);
    }

    #[test]
    fn test_zero_steps_does_not_run() {
        let (gen, timer, _) = make();
        gen.start(10, 0);
        assert!(!gen.is_running());
        assert_eq!(timer.clock(), ClockSelect::Stopped);
    }

    #[test]
    fn test_direction_change_mid_move() {
        let (gen, timer, pin) = make();
        gen.set_direction(Direction::Forward);
        gen.start(2, 8);
        run(&gen, &timer, 4);
        gen.set_direction(Direction::Reverse);
        assert!(pin.is_set_low());
        assert_eq!(gen.direction(), Direction::Reverse);
        assert_eq!(run(&gen, &timer, 1000), 6);
    }

    #[test]
    fn test_restart_replaces_remaining_count() {
        let (gen, timer, _) = make();
        gen.start(1, 10);
        run(&gen, &timer, 3);
        gen.start(1, 2);
        assert_eq!(run(&gen, &timer, 100), 2);
        assert!(!gen.is_running());
    }

    proptest! {
        #[test]
        fn prop_start_produces_exactly_n_matches(
            speed in 1u16..600,
            steps in 1u32..300,
            forward in any::<bool>(),
        ) {
            let (gen, timer, pin) = make();
            let direction = Direction::from(forward);
            gen.set_direction(direction);
            gen.start(speed, steps);

            let period = speed.min(u8::MAX as u16) as u32;
            let fired = run(&gen, &timer, period * (steps + 4));

            prop_assert_eq!(fired, steps);
            prop_assert_eq!(timer.matches(), steps as u64);
            prop_assert!(!gen.is_running());
            prop_assert_eq!(gen.direction(), direction);
            prop_assert_eq!(pin.is_set_high(), forward);
        }
    }
}
