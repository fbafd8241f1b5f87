//! Rangefinder telemetry bar
//!
//! One line per completed sweep, one fixed-width field per channel:
//!
//! ```text
//! |----|    |    |----|
//! ```
//!
//! A field is filled with dashes while its channel reports an obstacle
//! closer than the configured threshold.

use heapless::Vec;

use crate::config::TelemetryConfig;
use crate::traits::{RangeReadings, NO_SIGNAL};

/// Longest rendered bar, excluding the line terminator
pub const BAR_CAPACITY: usize = 64;

/// One rendered bar
pub type BarLine = Vec<u8, BAR_CAPACITY>;

/// Telemetry state owned by the main loop
#[derive(Debug, Clone)]
pub struct Telemetry {
    config: TelemetryConfig,
    enabled: bool,
    last_sweep: u32,
}

impl Telemetry {
    pub const fn new(config: TelemetryConfig) -> Self {
        Self {
            config,
            enabled: false,
            last_sweep: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start reporting from the sweep after `current_sweep`
    pub fn enable(&mut self, current_sweep: u32) {
        self.enabled = true;
        self.last_sweep = current_sweep;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Check whether a new sweep completed since the last report
    ///
    /// Several sweeps completing between two checks yield one report.
    pub fn due(&mut self, current_sweep: u32) -> bool {
        if !self.enabled || current_sweep == self.last_sweep {
            return false;
        }
        self.last_sweep = current_sweep;
        true
    }

    /// Check whether a distance counts as an obstacle
    pub fn is_near(&self, distance: u16) -> bool {
        distance != NO_SIGNAL && distance < self.config.near_threshold_ticks
    }

    /// Render the bar for every channel of `readings`
    ///
    /// Channels that no longer fit in [`BAR_CAPACITY`] are left out.
    pub fn render<R: RangeReadings + ?Sized>(&self, readings: &R) -> BarLine {
        let mut bar = BarLine::new();
        let _ = bar.push(b'|');
        for channel in 0..readings.channel_count() {
            let fill = if self.is_near(readings.distance(channel)) {
                b'-'
            } else {
                b' '
            };
            if bar.len() + self.config.field_width + 1 > BAR_CAPACITY {
                break;
            }
            for _ in 0..self.config.field_width {
                let _ = bar.push(fill);
            }
            let _ = bar.push(b'|');
        }
        bar
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new(TelemetryConfig::default())
    }
}
