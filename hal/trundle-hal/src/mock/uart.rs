//! Mock UART transmitter

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use crate::uart::{UartConfig, UartTx};

#[derive(Debug, Default)]
struct UartState {
    tx: Vec<u8>,
    busy_polls: usize,
    ready_polls: usize,
}

/// Mock UART transmitter
///
/// Collects transmitted bytes in memory. [`MockUart::hold_busy`] makes the
/// ready flag read false for a number of polls, which exercises the busy
/// wait in the caller.
#[derive(Debug, Clone)]
pub struct MockUart {
    config: UartConfig,
    state: Rc<RefCell<UartState>>,
}

impl MockUart {
    /// Create a new mock UART
    pub fn new(config: UartConfig) -> Self {
        Self {
            config,
            state: Rc::new(RefCell::new(UartState::default())),
        }
    }

    /// Transmitted data (for test verification)
    pub fn tx_buffer(&self) -> Vec<u8> {
        self.state.borrow().tx.clone()
    }

    /// Transmitted data as text, lossy
    pub fn tx_string(&self) -> std::string::String {
        std::string::String::from_utf8_lossy(&self.state.borrow().tx).into_owned()
    }

    /// Clear transmit buffer
    pub fn clear_tx_buffer(&self) {
        self.state.borrow_mut().tx.clear();
    }

    /// Report "not ready" for the next `polls` ready checks
    pub fn hold_busy(&self, polls: usize) {
        self.state.borrow_mut().busy_polls = polls;
    }

    /// Number of ready checks performed so far
    pub fn ready_polls(&self) -> usize {
        self.state.borrow().ready_polls
    }

    /// Configured baud rate
    pub fn baud_rate(&self) -> u32 {
        self.config.baudrate
    }
}

impl Default for MockUart {
    fn default() -> Self {
        Self::new(UartConfig::default())
    }
}

impl UartTx for MockUart {
    type Error = Infallible;

    fn is_tx_ready(&self) -> bool {
        let mut state = self.state.borrow_mut();
        state.ready_polls += 1;
        if state.busy_polls > 0 {
            state.busy_polls -= 1;
            false
        } else {
            true
        }
    }

    fn write_data(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.state.borrow_mut().tx.push(byte);
        Ok(())
    }
}
