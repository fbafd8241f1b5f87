//! Mock timers

use core::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use crate::timer::{
    CaptureTimer, CaptureTimerConfig, ClockSelect, Edge, PulseTimer, PulseTimerConfig,
};

#[derive(Debug, Default)]
struct PulseState {
    config: Option<PulseTimerConfig>,
    compare: u8,
    clock: ClockSelect,
    ticks_since_match: u32,
    matches: u64,
    output_high: bool,
}

/// Mock compare-match pulse timer
///
/// The counter only advances when the test calls [`MockPulseTimer::advance`].
/// A compare match happens every `compare` prescaled ticks while the clock
/// runs; a compare value of zero never matches.
#[derive(Debug, Clone, Default)]
pub struct MockPulseTimer {
    state: Rc<RefCell<PulseState>>,
}

impl MockPulseTimer {
    /// Create an unconfigured, stopped timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter by `ticks` prescaled ticks
    ///
    /// Returns the number of compare matches that occurred. Callers that
    /// dispatch an interrupt handler per match should advance one tick at a
    /// time so that a handler stopping the clock takes effect immediately.
    pub fn advance(&self, ticks: u32) -> u32 {
        let mut state = self.state.borrow_mut();
        let mut fired = 0;
        for _ in 0..ticks {
            if !state.clock.is_running() || state.compare == 0 {
                break;
            }
            if state.config.is_none() {
                break;
            }
            state.ticks_since_match += 1;
            if state.ticks_since_match >= state.compare as u32 {
                state.ticks_since_match = 0;
                state.matches += 1;
                state.output_high = !state.output_high;
                fired += 1;
            }
        }
        fired
    }

    /// Applied configuration, if any
    pub fn config(&self) -> Option<PulseTimerConfig> {
        self.state.borrow().config
    }

    /// Current compare register value
    pub fn compare(&self) -> u8 {
        self.state.borrow().compare
    }

    /// Total compare matches since creation
    pub fn matches(&self) -> u64 {
        self.state.borrow().matches
    }

    /// Level of the compare output pin
    pub fn output_high(&self) -> bool {
        self.state.borrow().output_high
    }
}

impl PulseTimer for MockPulseTimer {
    fn configure(&mut self, config: &PulseTimerConfig) {
        let mut state = self.state.borrow_mut();
        state.config = Some(*config);
        state.clock = ClockSelect::Stopped;
        state.ticks_since_match = 0;
    }

    fn set_compare(&mut self, value: u8) {
        self.state.borrow_mut().compare = value;
    }

    fn set_clock(&mut self, clock: ClockSelect) {
        self.state.borrow_mut().clock = clock;
    }

    fn clock(&self) -> ClockSelect {
        self.state.borrow().clock
    }
}

#[derive(Debug)]
struct CaptureState {
    config: Option<CaptureTimerConfig>,
    edge: Edge,
    edge_writes: Vec<Edge>,
}

/// Mock edge-capture timer
///
/// Holds the configuration and the armed edge. Tests feed latched counter
/// values straight into the capture handler under test.
#[derive(Debug, Clone)]
pub struct MockCaptureTimer {
    state: Rc<RefCell<CaptureState>>,
}

impl MockCaptureTimer {
    /// Create an unconfigured timer armed for rising edges
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(CaptureState {
                config: None,
                edge: Edge::Rising,
                edge_writes: Vec::new(),
            })),
        }
    }

    /// Applied configuration, if any
    pub fn config(&self) -> Option<CaptureTimerConfig> {
        self.state.borrow().config
    }

    /// Every edge selection written after configuration, oldest first
    pub fn edge_writes(&self) -> Vec<Edge> {
        self.state.borrow().edge_writes.clone()
    }
}

impl Default for MockCaptureTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureTimer for MockCaptureTimer {
    fn configure(&mut self, config: &CaptureTimerConfig) {
        let mut state = self.state.borrow_mut();
        state.config = Some(*config);
        state.edge = config.initial_edge;
    }

    fn set_capture_edge(&mut self, edge: Edge) {
        let mut state = self.state.borrow_mut();
        state.edge = edge;
        state.edge_writes.push(edge);
    }

    fn capture_edge(&self) -> Edge {
        self.state.borrow().edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_timer_needs_clock() {
        let mut timer = MockPulseTimer::new();
        timer.configure(&PulseTimerConfig::default());
        timer.set_compare(4);
        assert_eq!(timer.advance(100), 0);

        timer.set_clock(ClockSelect::Div256);
        assert_eq!(timer.advance(8), 2);
        assert_eq!(timer.matches(), 2);
    }

    #[test]
    fn test_pulse_timer_zero_compare_never_matches() {
        let mut timer = MockPulseTimer::new();
        timer.configure(&PulseTimerConfig::default());
        timer.set_compare(0);
        timer.set_clock(ClockSelect::Div256);
        assert_eq!(timer.advance(1000), 0);
        assert!(!timer.output_high());
    }

    #[test]
    fn test_pulse_timer_toggles_output() {
        let mut timer = MockPulseTimer::new();
        timer.configure(&PulseTimerConfig::default());
        timer.set_compare(1);
        timer.set_clock(ClockSelect::Div256);
        timer.advance(1);
        assert!(timer.output_high());
        timer.advance(1);
        assert!(!timer.output_high());
    }

    #[test]
    fn test_capture_timer_edges() {
        let mut timer = MockCaptureTimer::new();
        timer.configure(&CaptureTimerConfig::default());
        assert_eq!(timer.capture_edge(), Edge::Rising);
        timer.set_capture_edge(Edge::Falling);
        assert_eq!(timer.capture_edge(), Edge::Falling);
        assert_eq!(timer.edge_writes(), [Edge::Falling]);
    }
}
