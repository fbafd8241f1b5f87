//! Motion composition
//!
//! Turns (speed, distance) requests into per-wheel direction and step
//! counts and starts both wheel generators.

mod drive;

pub use drive::Drive;
