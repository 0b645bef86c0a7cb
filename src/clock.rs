//! Per-frame elapsed time for the simulation.
//!
//! Bevy's [`Time`](bevy::time::Time) measures the wall clock; [`FrameClock`]
//! turns that raw delta into the step the session actually simulates and keeps
//! the running session time used by cosmetic oscillators.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    elapsed: Duration,
    max_step: Duration,
}

impl FrameClock {
    pub fn new(max_step: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            max_step,
        }
    }

    /// Advance by one frame of `raw` wall-clock time and return the step to
    /// simulate, capped at `max_step`.
    pub fn advance(&mut self, raw: Duration) -> Duration {
        let step = raw.min(self.max_step);
        self.elapsed += step;
        step
    }

    /// Total simulated time since the session started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}
