//! Mock output pin

use std::rc::Rc;
use std::vec::Vec;
use core::cell::RefCell;

use crate::gpio::OutputPin;

#[derive(Debug, Default)]
struct PinState {
    high: bool,
    history: Vec<bool>,
}

/// Mock output pin
///
/// Records every write so tests can assert on pulse shapes as well as the
/// final level.
#[derive(Debug, Clone, Default)]
pub struct MockPin {
    state: Rc<RefCell<PinState>>,
}

impl MockPin {
    /// Create a pin that starts low
    pub fn new() -> Self {
        Self::default()
    }

    /// Every level written so far, oldest first
    pub fn history(&self) -> Vec<bool> {
        self.state.borrow().history.clone()
    }

    /// Number of low-to-high writes
    pub fn rising_writes(&self) -> usize {
        let state = self.state.borrow();
        let mut previous = false;
        let mut count = 0;
        for &level in &state.history {
            if level && !previous {
                count += 1;
            }
            previous = level;
        }
        count
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        let mut state = self.state.borrow_mut();
        state.high = true;
        state.history.push(true);
    }

    fn set_low(&mut self) {
        let mut state = self.state.borrow_mut();
        state.high = false;
        state.history.push(false);
    }

    fn is_set_high(&self) -> bool {
        self.state.borrow().high
    }
}
