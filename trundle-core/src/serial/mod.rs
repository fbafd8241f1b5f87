//! Serial command link
//!
//! Inbound bytes are framed into lines by the receive interrupt and queued
//! for the main loop; outbound bytes are written synchronously.

mod channel;
mod queue;

pub use channel::SerialLineChannel;
pub use queue::{LineQueue, RxOutcome, RxStats};
