//! Differential drive facade over two step channels

use crate::config::MotionConfig;
use crate::traits::{Direction, StepChannel};

/// Two-wheel motion facade
///
/// Direction levels follow the reference chassis wiring: both lines high
/// drives forward, and a left turn in place drives the left line high and
/// the right line low.
pub struct Drive<'a, L, R> {
    left: &'a L,
    right: &'a R,
    config: MotionConfig,
}

impl<'a, L: StepChannel, R: StepChannel> Drive<'a, L, R> {
    pub fn new(left: &'a L, right: &'a R, config: MotionConfig) -> Self {
        Self {
            left,
            right,
            config,
        }
    }

    /// Drive straight ahead `mm` millimetres
    pub fn forward(&self, speed: u16, mm: u32) {
        let steps = mm.saturating_mul(self.config.steps_per_mm);
        self.both(Direction::Forward, Direction::Forward, speed, steps);
    }

    /// Drive straight back `mm` millimetres
    pub fn backward(&self, speed: u16, mm: u32) {
        let steps = mm.saturating_mul(self.config.steps_per_mm);
        self.both(Direction::Reverse, Direction::Reverse, speed, steps);
    }

    /// Turn left in place by `degrees`
    pub fn left(&self, speed: u16, degrees: u32) {
        let steps = degrees.saturating_mul(self.config.steps_per_degree);
        self.both(Direction::Forward, Direction::Reverse, speed, steps);
    }

    /// Turn right in place by `degrees`
    pub fn right(&self, speed: u16, degrees: u32) {
        let steps = degrees.saturating_mul(self.config.steps_per_degree);
        self.both(Direction::Reverse, Direction::Forward, speed, steps);
    }

    /// Raw step count on the left wheel, direction unchanged
    pub fn step_left(&self, speed: u16, steps: u32) {
        self.left.start(speed, steps);
    }

    /// Raw step count on the right wheel, direction unchanged
    pub fn step_right(&self, speed: u16, steps: u32) {
        self.right.start(speed, steps);
    }

    /// Raw step count on both wheels, directions unchanged
    pub fn step_both(&self, speed: u16, steps: u32) {
        self.left.start(speed, steps);
        self.right.start(speed, steps);
    }

    /// Halt both wheels
    pub fn stop(&self) {
        self.left.stop();
        self.right.stop();
    }

    /// Check if either wheel is still stepping
    pub fn is_moving(&self) -> bool {
        self.left.is_running() || self.right.is_running()
    }

    fn both(&self, left: Direction, right: Direction, speed: u16, steps: u32) {
        self.left.set_direction(left);
        self.right.set_direction(right);
        self.left.start(speed, steps);
        self.right.start(speed, steps);
    }
}
