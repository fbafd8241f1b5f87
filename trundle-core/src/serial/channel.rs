//! Interrupt-fed line receiver with a blocking transmitter

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::{AtomicU32, Ordering};
use trundle_hal::UartTx;

use super::queue::{LineQueue, RxOutcome, RxStats};
use crate::traits::{Line, LineSink, LineSource};

/// Digits written by [`SerialLineChannel::send_unsigned`]
pub const UNSIGNED_DIGITS: usize = 6;

/// Serial command link
///
/// The platform's receive interrupt reads the data register and calls
/// [`SerialLineChannel::on_byte_received`]. The main loop consumes lines
/// through [`LineSource`] and transmits through [`LineSink`].
///
/// Transmission busy-waits for the ready flag one byte at a time. Each
/// check-and-write runs in its own short critical section, so interrupts
/// are serviced between bytes. A byte the UART rejects is lost and counted
/// in [`SerialLineChannel::tx_dropped_bytes`].
pub struct SerialLineChannel<U, const L: usize, const C: usize> {
    rx: Mutex<CriticalSectionRawMutex, RefCell<LineQueue<L, C>>>,
    tx: Mutex<CriticalSectionRawMutex, RefCell<U>>,
    tx_dropped: AtomicU32,
}

impl<U: UartTx, const L: usize, const C: usize> SerialLineChannel<U, L, C> {
    pub fn new(uart: U) -> Self {
        Self {
            rx: Mutex::new(RefCell::new(LineQueue::new())),
            tx: Mutex::new(RefCell::new(uart)),
            tx_dropped: AtomicU32::new(0),
        }
    }

    /// Receive interrupt handler, O(1) per byte
    pub fn on_byte_received(&self, byte: u8) -> RxOutcome {
        self.rx.lock(|queue| queue.borrow_mut().push_byte(byte))
    }

    /// Drop counters since startup
    pub fn rx_stats(&self) -> RxStats {
        self.rx.lock(|queue| queue.borrow().stats())
    }

    /// Bytes the UART refused to transmit since startup
    pub fn tx_dropped_bytes(&self) -> u32 {
        self.tx_dropped.load(Ordering::Relaxed)
    }

    /// Send one byte, waiting for the transmitter to become ready
    pub fn send_byte(&self, byte: u8) {
        loop {
            let sent = self.tx.lock(|tx| {
                let mut tx = tx.borrow_mut();
                if !tx.is_tx_ready() {
                    return false;
                }
                if tx.write_data(byte).is_err() {
                    self.tx_dropped.fetch_add(1, Ordering::Relaxed);
                }
                true
            });
            if sent {
                return;
            }
            core::hint::spin_loop();
        }
    }

    /// Send text
    pub fn send_str(&self, text: &str) {
        self.send_bytes(text.as_bytes());
    }

    /// Send the low six decimal digits of `value`, zero padded
    pub fn send_unsigned(&self, value: u32) {
        self.send_bytes(&format_unsigned(value));
    }
}

/// Fixed-width decimal rendering used by [`SerialLineChannel::send_unsigned`]
pub fn format_unsigned(value: u32) -> [u8; UNSIGNED_DIGITS] {
    let mut digits = [b'0'; UNSIGNED_DIGITS];
    let mut rest = value;
    for digit in digits.iter_mut().rev() {
        *digit = b'0' + (rest % 10) as u8;
        rest /= 10;
    }
    digits
}

impl<U: UartTx, const L: usize, const C: usize> LineSource<C> for SerialLineChannel<U, L, C> {
    fn available_lines(&self) -> usize {
        self.rx.lock(|queue| queue.borrow().completed())
    }

    fn pop_line(&self, dst: &mut Line<C>) -> usize {
        // The shift runs with the receive interrupt held off
        self.rx.lock(|queue| queue.borrow_mut().pop_into(dst))
    }
}

impl<U: UartTx, const L: usize, const C: usize> LineSink for SerialLineChannel<U, L, C> {
    fn send_bytes(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.send_byte(byte);
        }
    }
}
