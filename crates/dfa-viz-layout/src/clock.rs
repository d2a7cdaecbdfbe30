//! Fixed-timestep accumulator.
//!
//! The render loop runs at whatever rate the display manages; the physics
//! must not. Each frame's wall-clock delta is paid into the accumulator and
//! whole fixed steps are drained from it, so the simulation sees the same
//! sequence of states regardless of frame rate.

/// Converts variable frame deltas into a whole number of fixed steps.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Create with an explicit step duration in seconds.
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(f32::EPSILON),
            accumulator: 0.0,
        }
    }

    /// Create from a steps-per-second rate.
    pub fn from_rate(rate: f32) -> Self {
        Self::new(1.0 / rate)
    }

    /// The fixed step duration.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time paid in but not yet consumed by a whole step.
    pub fn remainder(&self) -> f32 {
        self.accumulator
    }

    /// Pay in a frame delta and drain the number of whole steps now due.
    pub fn accumulate(&mut self, dt: f32) -> usize {
        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }
}
