//! Trundle Hardware Abstraction Layer
//!
//! This crate defines the peripheral traits the control core is written
//! against. A chip-specific HAL implements them on top of its register
//! blocks; the `mock` feature implements them in memory so the core can be
//! exercised on a host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  trundle-core (stepper, ranging, serial)│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  trundle-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip HAL     │       │  mock (host)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Direction, select and trigger lines
//! - [`uart::UartTx`] - Synchronous serial transmit
//! - [`timer::PulseTimer`] - 8-bit compare-match pulse generator
//! - [`timer::CaptureTimer`] - 16-bit edge-capture timer with trigger compares

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "mock"))]
extern crate std;

pub mod gpio;
pub mod timer;
pub mod uart;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use timer::{CaptureTimer, PulseTimer};
pub use uart::UartTx;
