use glam::Vec2;
use thiserror::Error;

/// Error returned when seeding a [`FastRand`] with a non-positive value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("sampler seed must be a positive integer, got {0}")]
pub struct InvalidSeed(pub i32);

/// Deterministic pseudo-random sampler behind every stochastic parameter and
/// emission profile.
///
/// A linear congruential generator (`state = 214013 * state + 2531011`,
/// output bits 16..30). Visual plausibility and throughput matter more here
/// than statistical strength: the generator is branch-free and cheap at
/// millions of calls per frame, and a fixed seed reproduces an entire run.
///
/// Each [`ParticleEmitter`](crate::ParticleEmitter) owns its own instance, so
/// emitters on different threads never contend over shared generator state.
#[derive(Debug, Clone)]
pub struct FastRand {
    state: i32,
}

impl FastRand {
    /// Creates a sampler seeded from the system clock.
    pub fn new() -> Self {
        Self {
            state: clock_seed(),
        }
    }

    /// Creates a sampler with a fixed seed for reproducible runs.
    ///
    /// Fails if `seed` is not a positive integer.
    pub fn with_seed(seed: i32) -> Result<Self, InvalidSeed> {
        if seed <= 0 {
            return Err(InvalidSeed(seed));
        }
        Ok(Self { state: seed })
    }

    /// Resets the generator state to `seed`.
    ///
    /// Fails if `seed` is not a positive integer.
    pub fn reseed(&mut self, seed: i32) -> Result<(), InvalidSeed> {
        if seed <= 0 {
            return Err(InvalidSeed(seed));
        }
        self.state = seed;
        Ok(())
    }

    /// Next integer in `[0, 32767]`.
    pub fn next_int(&mut self) -> i32 {
        self.state = self.state.wrapping_mul(214013).wrapping_add(2531011);
        (self.state >> 16) & 0x7FFF
    }

    /// Next integer in `[0, max]`.
    pub fn next_int_max(&mut self, max: i32) -> i32 {
        (max as f32 * self.next_float()) as i32
    }

    /// Next integer in `[min, max]`.
    pub fn next_int_range(&mut self, min: i32, max: i32) -> i32 {
        ((max - min) as f32 * self.next_float()) as i32 + min
    }

    /// Next float in `[0, 1]`.
    pub fn next_float(&mut self) -> f32 {
        self.next_int() as f32 / i16::MAX as f32
    }

    /// Next float in `[0, max]`.
    pub fn next_float_max(&mut self, max: f32) -> f32 {
        max * self.next_float()
    }

    /// Next float in `[min, max]`.
    pub fn next_float_range(&mut self, min: f32, max: f32) -> f32 {
        (max - min) * self.next_float() + min
    }

    /// Next angle in `[-PI, PI]` radians.
    pub fn next_angle(&mut self) -> f32 {
        self.next_float_range(-std::f32::consts::PI, std::f32::consts::PI)
    }

    /// Next unit-length direction vector.
    pub fn next_unit_vector(&mut self) -> Vec2 {
        Vec2::from_angle(self.next_angle())
    }
}

impl Default for FastRand {
    fn default() -> Self {
        Self::new()
    }
}

fn clock_seed() -> i32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let seed = (duration.as_nanos() & 0x7FFF_FFFF) as i32;
    seed.max(1)
}
