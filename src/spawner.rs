//! Timed meteor spawning.

use std::time::Duration;

use crate::meteor::{Meteor, MeteorParams};
use rand::Rng;

/// Emits one meteor every `interval` of simulated time.
///
/// The live set is not capped here; meteors leave it through interception or
/// ground impact.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnManager {
    interval: Duration,
    /// Time accumulated toward the next spawn.
    accumulated: Duration,
    params: MeteorParams,
    spawned: u64,
}

impl SpawnManager {
    pub fn new(interval: Duration, params: MeteorParams) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            params,
            spawned: 0,
        }
    }

    #[inline]
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total meteors produced so far.
    #[inline]
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    #[inline]
    pub fn params(&self) -> &MeteorParams {
        &self.params
    }

    /// Advance by `dt`; returns a new meteor when the interval is reached.
    ///
    /// The accumulator keeps any overshoot past the interval, so it is exactly
    /// zero after a spawn that lands on the interval.  At most one meteor is
    /// produced per call.
    pub fn update<R: Rng>(&mut self, dt: Duration, rng: &mut R) -> Option<Meteor> {
        self.accumulated += dt;
        if self.accumulated < self.interval {
            return None;
        }
        self.accumulated = (self.accumulated - self.interval).min(self.interval);
        self.spawned += 1;
        Some(Meteor::spawn(rng, &self.params))
    }
}
