//! Robot configuration
//!
//! Compile-time configuration for every peripheral the core drives. The
//! defaults describe the reference board: a 16 MHz MCU, two 8-bit wheel
//! timers at clk/256, a 10-bit capture window at clk/1024 (64 us per tick,
//! about 65 ms per window) and a 9600 baud command link.

use trundle_hal::timer::{CaptureTimerConfig, ClockSelect, PulseTimerConfig};
use trundle_hal::uart::UartConfig;

/// CPU clock of the reference board
pub const CPU_HZ: u32 = 16_000_000;

/// Queued line slots, including the in-progress line
pub const LINE_SLOTS: usize = 8;

/// Characters per queued line, excluding the terminator
pub const LINE_CAPACITY: usize = 32;

/// Multiplexed rangefinder channels
pub const SENSOR_CHANNELS: usize = 4;

/// Tokens kept from one command line
pub const MAX_TOKENS: usize = 4;

/// Serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Frame format and baud rate
    pub uart: UartConfig,
    /// Clock feeding the baud generator
    pub cpu_hz: u32,
}

impl SerialConfig {
    /// Baud rate register value, `None` if the baud rate is unreachable
    pub const fn baud_divisor(&self) -> Option<u16> {
        self.uart.divisor(self.cpu_hz)
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            uart: UartConfig::new(9600),
            cpu_hz: CPU_HZ,
        }
    }
}

/// Wheel geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    /// Step edges per millimetre of straight travel
    pub steps_per_mm: u32,
    /// Step edges per degree of turn in place
    pub steps_per_degree: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            steps_per_mm: 24,
            steps_per_degree: 23,
        }
    }
}

/// Telemetry bar layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryConfig {
    /// Distances below this many capture ticks are drawn as an obstacle
    pub near_threshold_ticks: u16,
    /// Characters per channel field
    pub field_width: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            // ~960 us of echo, roughly 16 cm
            near_threshold_ticks: 15,
            field_width: 4,
        }
    }
}

/// Complete robot configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RobotConfig {
    pub left_stepper: PulseTimerConfig,
    pub right_stepper: PulseTimerConfig,
    pub ranging: CaptureTimerConfig,
    pub serial: SerialConfig,
    pub motion: MotionConfig,
    pub telemetry: TelemetryConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            left_stepper: PulseTimerConfig::toggle(ClockSelect::Div256),
            right_stepper: PulseTimerConfig::toggle(ClockSelect::Div256),
            ranging: CaptureTimerConfig::default(),
            serial: SerialConfig::default(),
            motion: MotionConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}
