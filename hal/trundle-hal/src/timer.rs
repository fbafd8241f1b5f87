//! Hardware timer abstractions
//!
//! Two timer roles exist on the robot:
//!
//! - A *pulse timer* per wheel. The counter runs up to the compare register
//!   and the output pin toggles on every compare match. Each match also
//!   raises an interrupt, which is where steps are counted.
//! - One *capture timer* for the rangefinder. It free-runs over a fixed
//!   period (the ranging window), latches the counter on echo edges and
//!   raises two compare interrupts per window that frame the trigger pulse.
//!
//! The register bits behind each role are described by a configuration
//! struct so that the core never touches raw control registers.

/// Timer clock source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSelect {
    /// No clock, the counter is frozen
    #[default]
    Stopped,
    /// CPU clock
    Div1,
    /// CPU clock / 8
    Div8,
    /// CPU clock / 64
    Div64,
    /// CPU clock / 256
    Div256,
    /// CPU clock / 1024
    Div1024,
}

impl ClockSelect {
    /// Prescaler divisor, `None` when stopped
    pub const fn divisor(self) -> Option<u16> {
        match self {
            ClockSelect::Stopped => None,
            ClockSelect::Div1 => Some(1),
            ClockSelect::Div8 => Some(8),
            ClockSelect::Div64 => Some(64),
            ClockSelect::Div256 => Some(256),
            ClockSelect::Div1024 => Some(1024),
        }
    }

    /// Check whether the counter advances
    pub const fn is_running(self) -> bool {
        !matches!(self, ClockSelect::Stopped)
    }

    /// Duration of one counter tick in nanoseconds
    pub const fn tick_ns(self, cpu_hz: u32) -> Option<u32> {
        match self.divisor() {
            Some(div) if cpu_hz > 0 => Some((div as u64 * 1_000_000_000 / cpu_hz as u64) as u32),
            _ => None,
        }
    }
}

/// Waveform generation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Waveform {
    /// Count up and down with the compare register as TOP
    PhaseCorrectCompareTop,
    /// Count up to a fixed TOP, then restart at BOTTOM
    FastFixedTop,
}

/// Input capture edge selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Latch on a low-to-high transition
    Rising,
    /// Latch on a high-to-low transition
    Falling,
}

/// Configuration of a wheel pulse timer
///
/// The step pin is always driven in toggle-on-compare mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseTimerConfig {
    /// Waveform mode
    pub waveform: Waveform,
    /// Clock applied while a move is in progress
    pub run_clock: ClockSelect,
}

impl PulseTimerConfig {
    /// Toggle-on-compare configuration at the given run clock
    pub const fn toggle(run_clock: ClockSelect) -> Self {
        Self {
            waveform: Waveform::PhaseCorrectCompareTop,
            run_clock,
        }
    }
}

impl Default for PulseTimerConfig {
    fn default() -> Self {
        Self::toggle(ClockSelect::Div256)
    }
}

/// Configuration of the rangefinder capture timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CaptureTimerConfig {
    /// Waveform mode
    pub waveform: Waveform,
    /// Counter TOP; one window is `top + 1` ticks
    pub top: u16,
    /// Clock source
    pub clock: ClockSelect,
    /// Edge armed after configuration
    pub initial_edge: Edge,
    /// Enable the capture noise canceler
    pub noise_canceler: bool,
    /// Counter value at which the trigger line is asserted
    pub trigger_assert_at: u16,
    /// Counter value at which the trigger line is released
    pub trigger_release_at: u16,
}

impl CaptureTimerConfig {
    /// Counter modulus, the number of ticks in one window
    pub const fn modulus(&self) -> u32 {
        self.top as u32 + 1
    }
}

impl Default for CaptureTimerConfig {
    fn default() -> Self {
        Self {
            waveform: Waveform::FastFixedTop,
            top: 0x03FF,
            clock: ClockSelect::Div1024,
            initial_edge: Edge::Rising,
            noise_canceler: false,
            trigger_assert_at: 1,
            trigger_release_at: 2,
        }
    }
}

/// Compare-match pulse timer
///
/// Implementations own one 8-bit timer unit and its compare output pin.
/// The compare interrupt must be routed to the core's step handler.
pub trait PulseTimer {
    /// Apply waveform and output mode, leaving the clock stopped
    fn configure(&mut self, config: &PulseTimerConfig);

    /// Load the compare register
    ///
    /// A value of zero leaves no room between BOTTOM and TOP: the output
    /// never toggles and no compare interrupt fires.
    fn set_compare(&mut self, value: u8);

    /// Select the clock source; [`ClockSelect::Stopped`] halts the timer
    fn set_clock(&mut self, clock: ClockSelect);

    /// Currently selected clock source
    fn clock(&self) -> ClockSelect;
}

/// Edge-capture timer
///
/// Implementations read the latched capture register inside their capture
/// interrupt and pass it to the core. Overflow and both trigger compares
/// must be routed to the core as well.
pub trait CaptureTimer {
    /// Apply the full configuration and start the counter
    fn configure(&mut self, config: &CaptureTimerConfig);

    /// Select which echo edge is latched next
    fn set_capture_edge(&mut self, edge: Edge);

    /// Edge currently armed
    fn capture_edge(&self) -> Edge;
}
