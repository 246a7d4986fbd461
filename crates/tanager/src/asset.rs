//! Plain-data schema for persisting and inspecting effects.
//!
//! This mirrors the runtime tree (effect → emitters → profile / parameters /
//! modifiers / strategy) as serde-friendly data. Polymorphic nodes are closed
//! enums, so their symbolic variant names are the type discriminators, and an
//! unknown discriminator fails deserialization with an error naming the tag.
//! Vector values travel as delimited numeric strings (`"x,y"`). The on-disk
//! format here is RON; converters for other formats live with the host.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::effect::ParticleEffect;
use crate::emitter::{ParticleEmitter, RenderingOrder};
use crate::modifier::{ExecutionStrategy, Modifier};
use crate::param::ReleaseParameters;
use crate::profile::Profile;

/// Errors from reading or writing effect data.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Could not load particle effect: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Could not write RON: {0}")]
    RonSer(#[from] ron::Error),
}

/// An integer source rectangle into the emitter's texture. The core never
/// interprets it; it rides along for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Serializable snapshot of one emitter's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleEmitterData {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_lifespan")]
    pub lifespan: f32,
    #[serde(default = "default_offset", with = "vec2_string")]
    pub offset: glam::Vec2,
    #[serde(default)]
    pub layer_depth: f32,
    #[serde(default = "default_auto_trigger")]
    pub auto_trigger: bool,
    #[serde(default = "default_auto_trigger_frequency")]
    pub auto_trigger_frequency: f32,
    #[serde(default = "default_reclaim_frequency")]
    pub reclaim_frequency: f32,
    #[serde(default)]
    pub rendering_order: RenderingOrder,
    #[serde(default)]
    pub parameters: ReleaseParameters,
    #[serde(default)]
    pub strategy: ExecutionStrategy,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub texture_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_rectangle: Option<Rect>,
}

fn default_name() -> String {
    "Emitter".to_string()
}

fn default_capacity() -> usize {
    1000
}

fn default_lifespan() -> f32 {
    1.0
}

fn default_offset() -> glam::Vec2 {
    glam::Vec2::ZERO
}

fn default_auto_trigger() -> bool {
    true
}

fn default_auto_trigger_frequency() -> f32 {
    1.0
}

fn default_reclaim_frequency() -> f32 {
    60.0
}

impl Default for ParticleEmitterData {
    fn default() -> Self {
        Self {
            name: default_name(),
            capacity: default_capacity(),
            lifespan: default_lifespan(),
            offset: default_offset(),
            layer_depth: 0.0,
            auto_trigger: default_auto_trigger(),
            auto_trigger_frequency: default_auto_trigger_frequency(),
            reclaim_frequency: default_reclaim_frequency(),
            rendering_order: RenderingOrder::default(),
            parameters: ReleaseParameters::default(),
            strategy: ExecutionStrategy::default(),
            modifiers: Vec::new(),
            profile: Profile::default(),
            texture_name: String::new(),
            source_rectangle: None,
        }
    }
}

impl ParticleEmitterData {
    /// Builds a live emitter from this configuration with a fresh buffer.
    pub fn to_emitter(&self) -> ParticleEmitter {
        let mut emitter = ParticleEmitter::new(self.capacity);
        emitter.name = self.name.clone();
        emitter.lifespan = self.lifespan;
        emitter.offset = self.offset;
        emitter.layer_depth = self.layer_depth;
        emitter.auto_trigger = self.auto_trigger;
        emitter.auto_trigger_frequency = self.auto_trigger_frequency;
        emitter.reclaim_frequency = self.reclaim_frequency;
        emitter.rendering_order = self.rendering_order;
        emitter.parameters = self.parameters.clone();
        emitter.strategy = self.strategy;
        emitter.modifiers = self.modifiers.clone();
        emitter.profile = self.profile;
        emitter.texture_name = self.texture_name.clone();
        emitter.source_rectangle = self.source_rectangle;
        emitter
    }

    /// Snapshots a live emitter's configuration. Runtime state (clock,
    /// in-flight particles, sampler) is not part of the schema.
    pub fn from_emitter(emitter: &ParticleEmitter) -> Self {
        Self {
            name: emitter.name.clone(),
            capacity: emitter.capacity(),
            lifespan: emitter.lifespan,
            offset: emitter.offset,
            layer_depth: emitter.layer_depth,
            auto_trigger: emitter.auto_trigger,
            auto_trigger_frequency: emitter.auto_trigger_frequency,
            reclaim_frequency: emitter.reclaim_frequency,
            rendering_order: emitter.rendering_order,
            parameters: emitter.parameters.clone(),
            strategy: emitter.strategy,
            modifiers: emitter.modifiers.clone(),
            profile: emitter.profile,
            texture_name: emitter.texture_name.clone(),
            source_rectangle: emitter.source_rectangle,
        }
    }
}

/// Serializable snapshot of a whole effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ParticleEffectData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub emitters: Vec<ParticleEmitterData>,
}

impl ParticleEffectData {
    pub fn from_effect(effect: &ParticleEffect) -> Self {
        Self {
            name: effect.name.clone(),
            emitters: effect
                .emitters
                .iter()
                .map(ParticleEmitterData::from_emitter)
                .collect(),
        }
    }

    pub fn to_effect(&self) -> ParticleEffect {
        let mut effect = ParticleEffect::new(self.name.clone());
        effect.emitters = self.emitters.iter().map(|e| e.to_emitter()).collect();
        effect
    }

    pub fn from_ron_str(text: &str) -> Result<Self, AssetError> {
        Ok(ron::de::from_str(text)?)
    }

    pub fn to_ron_string(&self) -> Result<String, AssetError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let data = ron::de::from_bytes::<Self>(&bytes)?;
        debug!(path = %path.display(), emitters = data.emitters.len(), "loaded particle effect");
        Ok(data)
    }

    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        std::fs::write(path.as_ref(), self.to_ron_string()?)?;
        Ok(())
    }
}

/// Serializes a [`glam::Vec2`] as a `"x,y"` string.
pub mod vec2_string {
    use glam::Vec2;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Vec2, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{},{}", value.x, value.y))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec2, D::Error> {
        let text = String::deserialize(deserializer)?;
        let invalid = || Error::custom(format!("invalid vector \"{text}\", expected \"x,y\""));

        let mut parts = text.split(',');
        let x = parts
            .next()
            .and_then(|p| p.trim().parse::<f32>().ok())
            .ok_or_else(invalid)?;
        let y = parts
            .next()
            .and_then(|p| p.trim().parse::<f32>().ok())
            .ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Vec2::new(x, y))
    }
}

/// Serializes a [`glam::Vec3`] as a `"x,y,z"` string.
pub mod vec3_string {
    use glam::Vec3;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{},{},{}", value.x, value.y, value.z))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let text = String::deserialize(deserializer)?;
        let invalid = || Error::custom(format!("invalid vector \"{text}\", expected \"x,y,z\""));

        let mut components = [0.0f32; 3];
        let mut parts = text.split(',');
        for component in &mut components {
            *component = parts
                .next()
                .and_then(|p| p.trim().parse::<f32>().ok())
                .ok_or_else(invalid)?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Vec3::from_array(components))
    }
}
