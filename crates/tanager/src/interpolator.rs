use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::color::normalize_hue;
use crate::particle::Particle;

/// Linear blend of one particle field between a start and end value.
///
/// Interpolators are owned by the [`Age`](crate::ModifierKind::Age) and
/// [`Velocity`](crate::ModifierKind::Velocity) modifiers, which supply the
/// blend amount (particle age, or speed relative to a threshold).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Interpolator {
    Opacity {
        start: f32,
        end: f32,
    },
    Scale {
        start: f32,
        end: f32,
    },
    Rotation {
        start: f32,
        end: f32,
    },
    Velocity {
        #[serde(with = "crate::asset::vec2_string")]
        start: Vec2,
        #[serde(with = "crate::asset::vec2_string")]
        end: Vec2,
    },
    /// HSL color blend; the hue channel wraps through [`normalize_hue`].
    Color {
        #[serde(with = "crate::asset::vec3_string")]
        start: Vec3,
        #[serde(with = "crate::asset::vec3_string")]
        end: Vec3,
    },
    /// Blends only the hue channel, leaving saturation and lightness alone.
    Hue {
        start: f32,
        end: f32,
    },
}

impl Interpolator {
    /// Writes `start + (end - start) * amount` into the target field(s) of
    /// `particle`. `amount` is expected in `[0, 1]`.
    pub fn update(&self, amount: f32, particle: &mut Particle) {
        match *self {
            Self::Opacity { start, end } => {
                particle.opacity = start + (end - start) * amount;
            }
            Self::Scale { start, end } => {
                particle.scale = start + (end - start) * amount;
            }
            Self::Rotation { start, end } => {
                particle.rotation = start + (end - start) * amount;
            }
            Self::Velocity { start, end } => {
                particle.velocity[0] = start.x + (end.x - start.x) * amount;
                particle.velocity[1] = start.y + (end.y - start.y) * amount;
            }
            Self::Color { start, end } => {
                let hue = start.x + (end.x - start.x) * amount;
                particle.color[0] = normalize_hue(hue);
                particle.color[1] = start.y + (end.y - start.y) * amount;
                particle.color[2] = start.z + (end.z - start.z) * amount;
            }
            Self::Hue { start, end } => {
                particle.color[0] = normalize_hue(start + (end - start) * amount);
            }
        }
    }
}
