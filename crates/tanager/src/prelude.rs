//! Convenience re-exports for typical hosts.

pub use crate::asset::{AssetError, ParticleEffectData, ParticleEmitterData, Rect};
pub use crate::buffer::ParticleBuffer;
pub use crate::color::{hsl_to_rgb, normalize_hue, rgb_to_hsl};
pub use crate::effect::ParticleEffect;
pub use crate::emitter::{LineSegment, ParticleEmitter, RenderingOrder};
pub use crate::interpolator::Interpolator;
pub use crate::modifier::{ExecutionStrategy, Modifier, ModifierKind};
pub use crate::param::{
    ColorParameter, FloatParameter, IntParameter, ReleaseParameters, Vector2Parameter,
};
pub use crate::particle::Particle;
pub use crate::profile::{CircleRadiation, Profile};
pub use crate::rng::FastRand;

pub use glam::{Vec2, Vec3};
