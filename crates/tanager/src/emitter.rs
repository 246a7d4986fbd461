use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::asset::Rect;
use crate::buffer::ParticleBuffer;
use crate::modifier::{ExecutionStrategy, Modifier};
use crate::param::ReleaseParameters;
use crate::particle::Particle;
use crate::profile::Profile;
use crate::rng::{FastRand, InvalidSeed};

/// A line in 2D space along which particles can be triggered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    point1: Vec2,
    point2: Vec2,
}

impl LineSegment {
    pub fn from_points(point1: Vec2, point2: Vec2) -> Self {
        Self { point1, point2 }
    }

    pub fn from_origin(origin: Vec2, vector: Vec2) -> Self {
        Self {
            point1: origin,
            point2: origin + vector,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.point1
    }

    pub fn direction(&self) -> Vec2 {
        self.point2 - self.point1
    }

    pub fn translate(&self, vector: Vec2) -> Self {
        Self {
            point1: self.point1 + vector,
            point2: self.point2 + vector,
        }
    }
}

/// Draw order the renderer should use for this emitter's particles,
/// selecting between [`ParticleBuffer::copy_to`] and
/// [`ParticleBuffer::copy_to_reverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RenderingOrder {
    #[default]
    FrontToBack,
    BackToFront,
}

/// Owner of one particle buffer: releases particles in bursts and advances
/// their state every frame.
///
/// An emitter belongs to exactly one update loop; neither `update` nor
/// `trigger` may be called concurrently with the other on the same emitter.
pub struct ParticleEmitter {
    total_seconds: f32,
    seconds_since_reclaim: f32,
    next_auto_trigger: f32,
    buffer: ParticleBuffer,
    rng: FastRand,

    pub name: String,
    /// Seconds a particle lives before it is reclaimed.
    pub lifespan: f32,
    /// Offset from the effect position at which this emitter triggers.
    pub offset: Vec2,
    pub layer_depth: f32,
    pub auto_trigger: bool,
    /// Auto-triggers per second while `auto_trigger` is on.
    pub auto_trigger_frequency: f32,
    /// How often per second the expired-particle scan runs.
    pub reclaim_frequency: f32,
    pub rendering_order: RenderingOrder,
    pub parameters: ReleaseParameters,
    pub strategy: ExecutionStrategy,
    pub modifiers: Vec<Modifier>,
    pub profile: Profile,
    /// Opaque key the renderer resolves to a texture; never interpreted here.
    pub texture_name: String,
    pub source_rectangle: Option<Rect>,
}

impl ParticleEmitter {
    pub fn new(capacity: usize) -> Self {
        Self {
            total_seconds: 0.0,
            seconds_since_reclaim: 0.0,
            next_auto_trigger: 0.0,
            buffer: ParticleBuffer::new(capacity),
            rng: FastRand::new(),
            name: "Emitter".to_string(),
            lifespan: 1.0,
            offset: Vec2::ZERO,
            layer_depth: 0.0,
            auto_trigger: true,
            auto_trigger_frequency: 1.0,
            reclaim_frequency: 60.0,
            rendering_order: RenderingOrder::default(),
            parameters: ReleaseParameters::default(),
            strategy: ExecutionStrategy::default(),
            modifiers: Vec::new(),
            profile: Profile::default(),
            texture_name: String::new(),
            source_rectangle: None,
        }
    }

    /// Like [`ParticleEmitter::new`] but with a fixed sampler seed, for
    /// reproducible simulations.
    pub fn with_seed(capacity: usize, seed: i32) -> Result<Self, InvalidSeed> {
        let mut emitter = Self::new(capacity);
        emitter.rng.reseed(seed)?;
        Ok(emitter)
    }

    /// Resets the emitter's deterministic sampler.
    pub fn reseed(&mut self, seed: i32) -> Result<(), InvalidSeed> {
        self.rng.reseed(seed)
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn active_particles(&self) -> usize {
        self.buffer.count()
    }

    /// Read-only view of the active particles, oldest first.
    pub fn particles(&self) -> &[Particle] {
        self.buffer.active()
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    /// Replaces the buffer with one of `capacity` slots, discarding every
    /// in-flight particle.
    pub fn change_capacity(&mut self, capacity: usize) {
        if self.buffer.capacity() == capacity {
            return;
        }
        debug!(
            emitter = %self.name,
            discarded = self.buffer.count(),
            capacity,
            "changing emitter capacity"
        );
        self.buffer = ParticleBuffer::new(capacity);
    }

    /// Advances the simulation by `elapsed_seconds`.
    ///
    /// Runs the auto-trigger countdown, reclaims expired particles at the
    /// reclaim frequency, integrates positions, recomputes ages, and drives
    /// the modifier pipeline over the remaining active range.
    pub fn update(&mut self, elapsed_seconds: f32, position: Vec2) {
        self.total_seconds += elapsed_seconds;
        self.seconds_since_reclaim += elapsed_seconds;

        if self.auto_trigger {
            self.next_auto_trigger -= elapsed_seconds;
            if self.next_auto_trigger <= 0.0 {
                self.trigger(position, self.layer_depth);
                self.next_auto_trigger = 1.0 / self.auto_trigger_frequency;
            }
        }

        if self.buffer.is_empty() {
            return;
        }

        if self.seconds_since_reclaim > 1.0 / self.reclaim_frequency {
            self.reclaim_expired();
            self.seconds_since_reclaim -= 1.0 / self.reclaim_frequency;
        }

        if self.buffer.is_empty() {
            return;
        }

        let total_seconds = self.total_seconds;
        let lifespan = self.lifespan;
        for particle in self.buffer.active_mut() {
            particle.age = (total_seconds - particle.inception) / lifespan;
            particle.position[0] += particle.velocity[0] * elapsed_seconds;
            particle.position[1] += particle.velocity[1] * elapsed_seconds;
        }

        let strategy = self.strategy;
        strategy.execute(
            &mut self.modifiers,
            elapsed_seconds,
            self.buffer.active_mut(),
        );
    }

    /// Releases a burst of particles at `position`.
    ///
    /// The burst size comes from the quantity parameter; if the buffer lacks
    /// headroom the burst clamps to what fits.
    pub fn trigger(&mut self, position: Vec2, layer_depth: f32) {
        let quantity = self.parameters.quantity.sample(&mut self.rng).max(0) as usize;
        self.release(position, quantity, layer_depth);
    }

    /// Releases a burst spread uniformly along `line`, one particle at a
    /// time. Line triggering places particles directly on the segment and
    /// bypasses the emission profile's offset.
    pub fn trigger_line(&mut self, line: LineSegment, layer_depth: f32) {
        let quantity = self.parameters.quantity.sample(&mut self.rng).max(0) as usize;
        let direction = line.direction();

        for _ in 0..quantity {
            let offset = direction * self.rng.next_float();
            self.release(line.origin() + offset, 1, layer_depth);
        }
    }

    fn release(&mut self, position: Vec2, quantity: usize, layer_depth: f32) {
        let total_seconds = self.total_seconds;
        for particle in self.buffer.release(quantity) {
            let (offset, heading) = self.profile.sample(&mut self.rng);

            particle.age = 0.0;
            particle.inception = total_seconds;
            particle.set_position(position + offset);
            particle.trigger_pos = position.to_array();

            let speed = self.parameters.speed.sample(&mut self.rng);
            particle.set_velocity(heading * speed);

            particle.set_color(self.parameters.color.sample(&mut self.rng));
            particle.opacity = self.parameters.opacity.sample(&mut self.rng);
            particle.scale = self.parameters.scale.sample(&mut self.rng);
            particle.rotation = self.parameters.rotation.sample(&mut self.rng);
            particle.mass = self.parameters.mass.sample(&mut self.rng);
            particle.layer_depth = layer_depth;
        }
    }

    /// Retires the run of consecutive expired particles at the front of the
    /// buffer. The scan stops at the first live particle: release order is
    /// monotonic in inception time, so nothing past it can be expired.
    fn reclaim_expired(&mut self) {
        let expired = self
            .buffer
            .active()
            .iter()
            .take_while(|p| self.total_seconds - p.inception >= self.lifespan)
            .count();

        if expired > 0 {
            self.buffer.reclaim(expired);
        }
    }
}
