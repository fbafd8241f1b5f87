//! Wheel step pulse generation
//!
//! One [`StepPulseGenerator`] per wheel. A move is a counted train of
//! compare-match toggles that stops itself from the compare interrupt when
//! the count reaches zero; the main loop only starts, stops and steers.

mod generator;

pub use generator::{StepPulseGenerator, StepperChannel};
