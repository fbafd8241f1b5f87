//! UART serial communication abstractions
//!
//! Reception is interrupt driven: the platform's receive handler reads the
//! data register and hands the byte to the core, so only the transmit side
//! needs a trait.

/// UART transmitter
///
/// Register-level view of the transmit path: a ready flag and a data
/// register. Waiting for the flag is the caller's business.
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Check whether the data register can accept another byte
    fn is_tx_ready(&self) -> bool;

    /// Write one byte to the data register
    ///
    /// Only valid after [`UartTx::is_tx_ready`] returned true.
    fn write_data(&mut self, byte: u8) -> Result<(), Self::Error>;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// Create an 8N1 configuration at the given baud rate
    pub const fn new(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }

    /// Baud rate register value for a 16x oversampling UART
    ///
    /// Returns `None` when the baud rate is zero or too fast for the clock.
    pub const fn divisor(&self, cpu_hz: u32) -> Option<u16> {
        if self.baudrate == 0 {
            return None;
        }
        let per_bit = cpu_hz / self.baudrate.saturating_mul(16);
        if per_bit == 0 || per_bit - 1 > u16::MAX as u32 {
            return None;
        }
        Some((per_bit - 1) as u16)
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::new(9600)
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
