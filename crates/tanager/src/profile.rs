//! Emission shapes.
//!
//! A profile turns one release request into an `(offset, heading)` pair: the
//! offset is added to the trigger position to place the particle, the heading
//! is a unit vector that initial speed scales into a velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rng::FastRand;

/// How circular shapes orient the initial heading relative to the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CircleRadiation {
    /// Heading points back toward the center.
    In,
    /// Heading points away from the center.
    #[default]
    Out,
    /// Placement and heading are decoupled: the heading is redrawn after the
    /// offset is computed.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Profile {
    /// Emit from the trigger point itself, heading in a random direction.
    #[default]
    Point,
    /// Emit along a line through the origin, heading in a random direction.
    Line {
        #[serde(with = "crate::asset::vec2_string")]
        axis: Vec2,
        length: f32,
    },
    /// Emit along a line, heading in a fixed direction perpendicular to it.
    LineUniform {
        #[serde(with = "crate::asset::vec2_string")]
        axis: Vec2,
        length: f32,
        #[serde(with = "crate::asset::vec2_string")]
        perpendicular: Vec2,
    },
    /// Emit from the edges of a rectangle, each edge equally likely
    /// regardless of its length.
    Box { width: f32, height: f32 },
    /// Emit from anywhere inside a rectangle.
    BoxFill { width: f32, height: f32 },
    /// Emit from the edges of a rectangle, edges weighted by length so the
    /// perimeter is covered uniformly.
    BoxUniform { width: f32, height: f32 },
    /// Emit from anywhere inside a circle.
    Circle {
        radius: f32,
        radiate: CircleRadiation,
    },
    /// Emit from the circumference of a circle.
    Ring {
        radius: f32,
        radiate: CircleRadiation,
    },
    /// Emit from the trigger point within a cone around `direction`.
    Spray {
        #[serde(with = "crate::asset::vec2_string")]
        direction: Vec2,
        spread: f32,
    },
}

impl Profile {
    /// A [`Profile::LineUniform`] with the perpendicular heading precomputed
    /// from `axis`.
    pub fn line_uniform(axis: Vec2, length: f32) -> Self {
        Self::LineUniform {
            axis,
            length,
            perpendicular: axis.perp().normalize_or_zero(),
        }
    }

    /// Produces the `(offset, heading)` pair for one newly released particle.
    pub fn sample(&self, rng: &mut FastRand) -> (Vec2, Vec2) {
        match *self {
            Self::Point => (Vec2::ZERO, rng.next_unit_vector()),

            Self::Line { axis, length } => {
                let distance = rng.next_float_range(length * -0.5, length * 0.5);
                (axis * distance, rng.next_unit_vector())
            }

            Self::LineUniform {
                axis,
                length,
                perpendicular,
            } => {
                let distance = rng.next_float_range(length * -0.5, length * 0.5);
                (axis * distance, perpendicular)
            }

            Self::Box { width, height } => {
                let offset = match rng.next_int_max(4) {
                    // left
                    0 => Vec2::new(
                        width * -0.5,
                        rng.next_float_range(height * -0.5, height * 0.5),
                    ),
                    // top
                    1 => Vec2::new(
                        rng.next_float_range(width * -0.5, width * 0.5),
                        height * -0.5,
                    ),
                    // right
                    2 => Vec2::new(
                        width * 0.5,
                        rng.next_float_range(height * -0.5, height * 0.5),
                    ),
                    // bottom
                    _ => Vec2::new(
                        rng.next_float_range(width * -0.5, width * 0.5),
                        height * 0.5,
                    ),
                };
                (offset, rng.next_unit_vector())
            }

            Self::BoxFill { width, height } => {
                let offset = Vec2::new(
                    rng.next_float_range(width * -0.5, width * 0.5),
                    rng.next_float_range(height * -0.5, height * 0.5),
                );
                (offset, rng.next_unit_vector())
            }

            Self::BoxUniform { width, height } => {
                let perimeter = (2.0 * width + 2.0 * height) as i32;
                let value = rng.next_int_max(perimeter) as f32;

                let offset = if value < width {
                    // top
                    Vec2::new(
                        rng.next_float_range(width * -0.5, width * 0.5),
                        height * -0.5,
                    )
                } else if value < 2.0 * width {
                    // bottom
                    Vec2::new(
                        rng.next_float_range(width * -0.5, width * 0.5),
                        height * 0.5,
                    )
                } else if value < 2.0 * width + height {
                    // left
                    Vec2::new(
                        width * -0.5,
                        rng.next_float_range(height * -0.5, height * 0.5),
                    )
                } else {
                    // right
                    Vec2::new(
                        width * 0.5,
                        rng.next_float_range(height * -0.5, height * 0.5),
                    )
                };
                (offset, rng.next_unit_vector())
            }

            Self::Circle { radius, radiate } => {
                let distance = rng.next_float_max(radius);
                radiated(rng, distance, radiate)
            }

            Self::Ring { radius, radiate } => radiated(rng, radius, radiate),

            Self::Spray { direction, spread } => {
                let center = f32::atan2(direction.y, direction.x);
                let angle = rng.next_float_range(center - spread * 0.5, center + spread * 0.5);
                (Vec2::ZERO, Vec2::from_angle(angle))
            }
        }
    }
}

fn radiated(rng: &mut FastRand, distance: f32, radiate: CircleRadiation) -> (Vec2, Vec2) {
    let heading = rng.next_unit_vector();
    match radiate {
        CircleRadiation::In => (-heading * distance, heading),
        CircleRadiation::Out => (heading * distance, heading),
        CircleRadiation::None => (heading * distance, rng.next_unit_vector()),
    }
}
