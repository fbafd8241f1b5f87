//! Simulated peripherals for host-side testing
//!
//! Every mock is a cheap handle around shared state: clone it, hand one
//! copy to the component under test and keep the other to drive the
//! simulation and inspect what the component did to the "hardware".
//!
//! # Feature Gate
//!
//! Available during this crate's own tests and when the `mock` feature is
//! enabled. Requires `std`.
//!
//! # Example
//!
//! ```ignore
//! use trundle_hal::mock::MockPin;
//! use trundle_hal::OutputPin;
//!
//! let pin = MockPin::new();
//! let mut driver_side = pin.clone();
//! driver_side.set_high();
//! assert!(pin.is_set_high());
//! ```

mod gpio;
mod timer;
mod uart;

pub use gpio::MockPin;
pub use timer::{MockCaptureTimer, MockPulseTimer};
pub use uart::MockUart;
