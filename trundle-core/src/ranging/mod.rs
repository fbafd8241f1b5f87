//! Multiplexed ultrasonic ranging
//!
//! One capture timer serves every rangefinder channel. Each overflow of the
//! timer closes a ranging window: the active channel's echo duration is
//! published, the select lines move to the next channel and the sample is
//! cleared. Echo edges inside a window are timed by the capture unit.
//!
//! ```text
//!  window k (channel i)                      window k+1 (channel i+1)
//! |trig|......rise====echo====fall.........|trig|.......................
//!  ^ compare A/B                            ^ overflow: publish i, select i+1
//! ```

mod capture;
mod sample;
mod select;
mod slots;

pub use capture::RangeCapture;
pub use sample::{EdgeState, RangeSample};
pub use select::{ChannelSelect, SelectLines};
pub use slots::SensorSlots;
