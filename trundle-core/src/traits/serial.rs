//! Line transport traits

use heapless::Vec;

/// One framed command line, terminator stripped
pub type Line<const C: usize> = Vec<u8, C>;

/// Consumer side of the receive line queue
pub trait LineSource<const C: usize> {
    /// Number of completed lines waiting; never blocks
    fn available_lines(&self) -> usize;

    /// Move the oldest completed line into `dst`
    ///
    /// Returns the number of lines still waiting. With no line waiting this
    /// is a no-op that returns 0 and leaves `dst` untouched.
    fn pop_line(&self, dst: &mut Line<C>) -> usize;
}

/// Synchronous transmit side of the serial link
pub trait LineSink {
    /// Send raw bytes, blocking until the last one is in the data register
    fn send_bytes(&self, bytes: &[u8]);

    /// Send bytes followed by a newline
    fn send_line(&self, bytes: &[u8]) {
        self.send_bytes(bytes);
        self.send_bytes(b"\n");
    }
}
