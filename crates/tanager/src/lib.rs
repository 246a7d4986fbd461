//! Real-time CPU particle simulation core.
//!
//! An emitter owns a fixed-capacity [`ParticleBuffer`], releases particles in
//! configurable bursts through an emission [`Profile`], advances them every
//! frame, and retires them deterministically by age. Behavior comes from an
//! ordered list of [`Modifier`]s, each independently rate-limited and run
//! either serially or fanned out across the rule list.
//!
//! Rendering, the host loop, and persistence formats are external: the host
//! drives [`ParticleEffect::update`] / [`ParticleEffect::trigger`], renderers
//! read the active particle slice, and the [`asset`] module exposes the
//! plain-data schema they configure the core with.

pub mod asset;
pub mod buffer;
pub mod color;
pub mod effect;
pub mod emitter;
pub mod interpolator;
pub mod modifier;
pub mod param;
pub mod particle;
pub mod prelude;
pub mod profile;
pub mod rng;

pub use asset::{AssetError, ParticleEffectData, ParticleEmitterData, Rect};
pub use buffer::ParticleBuffer;
pub use effect::ParticleEffect;
pub use emitter::{LineSegment, ParticleEmitter, RenderingOrder};
pub use interpolator::Interpolator;
pub use modifier::{ExecutionStrategy, Modifier, ModifierKind};
pub use param::{
    ColorParameter, FloatParameter, IntParameter, ReleaseParameters, Vector2Parameter,
};
pub use particle::Particle;
pub use profile::{CircleRadiation, Profile};
pub use rng::{FastRand, InvalidSeed};
