//! Component interfaces
//!
//! The controller and the motion facade talk to the interrupt-driven
//! components through these traits. All methods take `&self`: every
//! implementor is a process-lifetime singleton shared with at least one
//! interrupt handler, and does its own exclusion internally.

pub mod ranging;
pub mod serial;
pub mod stepper;

pub use ranging::{RangeReadings, NO_SIGNAL};
pub use serial::{Line, LineSink, LineSource};
pub use stepper::{Direction, StepChannel};
