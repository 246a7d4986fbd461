use glam::Vec2;

use crate::emitter::{LineSegment, ParticleEmitter};

/// An ordered collection of emitters sharing a world transform and trigger
/// fan-out. Purely a container: all the physics lives in the emitters.
pub struct ParticleEffect {
    pub name: String,
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
    pub emitters: Vec<ParticleEmitter>,
}

impl ParticleEffect {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            emitters: Vec::new(),
        }
    }

    /// Total active particles across all emitters.
    pub fn active_particles(&self) -> usize {
        self.emitters.iter().map(|e| e.active_particles()).sum()
    }

    /// Advances every emitter by `elapsed_seconds`.
    pub fn update(&mut self, elapsed_seconds: f32) {
        let position = self.position;
        for emitter in &mut self.emitters {
            emitter.update(elapsed_seconds, position);
        }
    }

    /// Triggers every emitter at the effect's own position.
    pub fn trigger(&mut self) {
        self.trigger_at(self.position, 0.0);
    }

    /// Triggers every emitter at `position`.
    pub fn trigger_at(&mut self, position: Vec2, layer_depth: f32) {
        for emitter in &mut self.emitters {
            emitter.trigger(position, layer_depth);
        }
    }

    /// Triggers every emitter along `line`.
    pub fn trigger_line(&mut self, line: LineSegment, layer_depth: f32) {
        for emitter in &mut self.emitters {
            emitter.trigger_line(line, layer_depth);
        }
    }

    /// Repeatedly triggers and updates at `trigger_period` intervals until
    /// `seconds` of simulated time have elapsed. Useful to warm an effect up
    /// so it looks established on its first drawn frame.
    pub fn fast_forward(&mut self, position: Vec2, seconds: f32, trigger_period: f32) {
        let mut time = 0.0;
        while time < seconds {
            self.update(trigger_period);
            self.trigger_at(position, 0.0);
            time += trigger_period;
        }
    }
}
