//! "Constant or random range" value samplers.
//!
//! Every stochastic release attribute (quantity, speed, color, ...) is one of
//! these tagged values. `Constant` returns its value unchanged; `Random`
//! draws uniformly per component from the owning emitter's [`FastRand`].

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::rng::FastRand;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FloatParameter {
    Constant(f32),
    Random { min: f32, max: f32 },
}

impl FloatParameter {
    pub fn sample(&self, rng: &mut FastRand) -> f32 {
        match *self {
            Self::Constant(value) => value,
            Self::Random { min, max } => rng.next_float_range(min, max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntParameter {
    Constant(i32),
    Random { min: i32, max: i32 },
}

impl IntParameter {
    pub fn sample(&self, rng: &mut FastRand) -> i32 {
        match *self {
            Self::Constant(value) => value,
            Self::Random { min, max } => rng.next_int_range(min, max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Vector2Parameter {
    Constant(#[serde(with = "crate::asset::vec2_string")] Vec2),
    Random {
        #[serde(with = "crate::asset::vec2_string")]
        min: Vec2,
        #[serde(with = "crate::asset::vec2_string")]
        max: Vec2,
    },
}

impl Vector2Parameter {
    pub fn sample(&self, rng: &mut FastRand) -> Vec2 {
        match *self {
            Self::Constant(value) => value,
            Self::Random { min, max } => Vec2::new(
                rng.next_float_range(min.x, max.x),
                rng.next_float_range(min.y, max.y),
            ),
        }
    }
}

/// HSL color sampler; components are (hue, saturation, lightness).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColorParameter {
    Constant(#[serde(with = "crate::asset::vec3_string")] Vec3),
    Random {
        #[serde(with = "crate::asset::vec3_string")]
        min: Vec3,
        #[serde(with = "crate::asset::vec3_string")]
        max: Vec3,
    },
}

impl ColorParameter {
    pub fn sample(&self, rng: &mut FastRand) -> Vec3 {
        match *self {
            Self::Constant(value) => value,
            Self::Random { min, max } => Vec3::new(
                rng.next_float_range(min.x, max.x),
                rng.next_float_range(min.y, max.y),
                rng.next_float_range(min.z, max.z),
            ),
        }
    }
}

/// One sampler per particle attribute initialized at release time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseParameters {
    #[serde(default = "default_quantity")]
    pub quantity: IntParameter,
    #[serde(default = "default_speed")]
    pub speed: FloatParameter,
    #[serde(default = "default_color")]
    pub color: ColorParameter,
    #[serde(default = "default_opacity")]
    pub opacity: FloatParameter,
    #[serde(default = "default_scale")]
    pub scale: FloatParameter,
    #[serde(default = "default_rotation")]
    pub rotation: FloatParameter,
    #[serde(default = "default_mass")]
    pub mass: FloatParameter,
}

fn default_quantity() -> IntParameter {
    IntParameter::Constant(5)
}

fn default_speed() -> FloatParameter {
    FloatParameter::Random {
        min: 50.0,
        max: 100.0,
    }
}

fn default_color() -> ColorParameter {
    ColorParameter::Constant(Vec3::new(0.0, 0.0, 1.0))
}

fn default_opacity() -> FloatParameter {
    FloatParameter::Random { min: 0.0, max: 1.0 }
}

fn default_scale() -> FloatParameter {
    FloatParameter::Constant(1.0)
}

fn default_rotation() -> FloatParameter {
    FloatParameter::Random { min: -PI, max: PI }
}

fn default_mass() -> FloatParameter {
    FloatParameter::Constant(1.0)
}

impl Default for ReleaseParameters {
    fn default() -> Self {
        Self {
            quantity: default_quantity(),
            speed: default_speed(),
            color: default_color(),
            opacity: default_opacity(),
            scale: default_scale(),
            rotation: default_rotation(),
            mass: default_mass(),
        }
    }
}
