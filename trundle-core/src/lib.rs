//! Board-agnostic control core for the Trundle robot
//!
//! Trundle is a two-wheeled robot with stepper-driven wheels, a ring of
//! multiplexed ultrasonic rangefinders and a serial command link. This
//! crate contains everything above the register level:
//!
//! - Step pulse generation with exact step counts
//! - Rangefinder channel rotation and echo timing
//! - Interrupt-fed line framing and blocking transmit
//! - Motion composition, command decoding and telemetry
//! - The cooperative main-loop controller
//!
//! Interrupt handlers are plain `&self` methods (`on_compare_match`,
//! `on_edge_captured`, `on_window_elapsed`, `on_byte_received`, ...) that the
//! platform calls from its vector table. State shared with the main loop
//! lives behind critical-section mutexes or atomics, so every peripheral
//! object can sit in a `static`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

mod log;

pub mod command;
pub mod config;
pub mod controller;
pub mod motion;
pub mod ranging;
pub mod serial;
pub mod stepper;
pub mod telemetry;
pub mod traits;

pub use controller::Controller;
