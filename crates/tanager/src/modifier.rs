//! The behavior pipeline: per-particle update rules, each independently
//! rate-limited, executed serially or fanned out across rules.

use glam::{Vec2, Vec3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::normalize_hue;
use crate::interpolator::Interpolator;
use crate::particle::Particle;

const DEFAULT_FREQUENCY: f32 = 60.0;

/// One update rule in an emitter's pipeline.
///
/// `frequency` is the rule's own target rate in Hz, independent of the frame
/// rate: each frame the rule visits only as many particles as needed to have
/// covered the whole active range once per cycle (`1 / frequency` seconds),
/// and the physics receives the cycle time (not the frame delta) as its
/// elapsed-time argument. A frequency at or above the frame rate degenerates
/// to an ordinary every-particle-every-frame update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    pub kind: ModifierKind,
    /// Particles already visited in the current cycle.
    #[serde(skip)]
    particles_updated: usize,
}

fn default_frequency() -> f32 {
    DEFAULT_FREQUENCY
}

impl Modifier {
    pub fn new(kind: ModifierKind) -> Self {
        Self {
            name: kind.label().to_string(),
            frequency: DEFAULT_FREQUENCY,
            kind,
            particles_updated: 0,
        }
    }

    pub fn with_frequency(mut self, frequency: f32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Runs the rate-limited slice of this rule's work for one frame.
    ///
    /// Every particle is visited exactly once per cycle and visits are spread
    /// evenly across the frames within it; when the cycle completes the next
    /// frame starts a new pass from index 0.
    pub fn throttled_update(&mut self, elapsed_seconds: f32, particles: &mut [Particle]) {
        let count = particles.len();
        let cycle_time = 1.0 / self.frequency;

        let remaining = count.saturating_sub(self.particles_updated);
        let due = ((elapsed_seconds / cycle_time) * count as f32).ceil() as usize;
        let to_update = remaining.min(due);

        if to_update > 0 {
            let start = self.particles_updated;
            self.kind
                .update(cycle_time, &mut particles[start..start + to_update]);
            self.particles_updated += to_update;
        }

        if self.particles_updated >= count {
            self.particles_updated = 0;
        }
    }
}

/// The closed set of update rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Runs its interpolators with the particle's age as the blend amount.
    Age { interpolators: Vec<Interpolator> },
    /// Constant acceleration, scaled by particle mass: heavier particles
    /// accelerate faster under this model, deliberately unphysical.
    LinearGravity {
        #[serde(with = "crate::asset::vec2_string")]
        direction: Vec2,
        strength: f32,
    },
    Drag {
        drag_coefficient: f32,
        density: f32,
    },
    Rotation {
        rotation_rate: f32,
    },
    /// `opacity = 1 - age`; ignores elapsed time entirely.
    OpacityFastFade,
    /// Runs its interpolators with the particle's speed relative to
    /// `velocity_threshold` as the blend amount, saturating at 1.
    Velocity {
        velocity_threshold: f32,
        interpolators: Vec<Interpolator>,
    },
    /// Blends between two HSL colors by speed relative to a threshold.
    VelocityColor {
        #[serde(with = "crate::asset::vec3_string")]
        stationary_color: Vec3,
        #[serde(with = "crate::asset::vec3_string")]
        velocity_color: Vec3,
        velocity_threshold: f32,
    },
    /// Inverse-square attraction toward a point, clamped to `max_speed`.
    Vortex {
        #[serde(with = "crate::asset::vec2_string")]
        position: Vec2,
        mass: f32,
        max_speed: f32,
    },
    /// Reflects particles off a rectangle centered on each particle's
    /// trigger position, damping velocity by the restitution coefficient.
    RectangleContainer {
        width: f32,
        height: f32,
        restitution_coefficient: f32,
    },
    /// Wraps particles around a rectangle centered on each particle's
    /// trigger position instead of reflecting them.
    RectangleLoopContainer {
        width: f32,
        height: f32,
    },
    /// Reflects particles off a circle centered on each particle's trigger
    /// position; `inside` keeps them in, otherwise keeps them out.
    CircleContainer {
        radius: f32,
        inside: bool,
        restitution_coefficient: f32,
    },
}

impl ModifierKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Age { .. } => "Age",
            Self::LinearGravity { .. } => "LinearGravity",
            Self::Drag { .. } => "Drag",
            Self::Rotation { .. } => "Rotation",
            Self::OpacityFastFade => "OpacityFastFade",
            Self::Velocity { .. } => "Velocity",
            Self::VelocityColor { .. } => "VelocityColor",
            Self::Vortex { .. } => "Vortex",
            Self::RectangleContainer { .. } => "RectangleContainer",
            Self::RectangleLoopContainer { .. } => "RectangleLoopContainer",
            Self::CircleContainer { .. } => "CircleContainer",
        }
    }

    /// Applies this rule's physics to `particles`, treating `elapsed_seconds`
    /// as the time step (the throttle passes the cycle time here).
    pub fn update(&self, elapsed_seconds: f32, particles: &mut [Particle]) {
        match self {
            Self::Age { interpolators } => {
                for particle in particles {
                    for interpolator in interpolators {
                        interpolator.update(particle.age, particle);
                    }
                }
            }

            Self::LinearGravity {
                direction,
                strength,
            } => {
                let vector = *direction * (strength * elapsed_seconds);
                for particle in particles {
                    particle.velocity[0] += vector.x * particle.mass;
                    particle.velocity[1] += vector.y * particle.mass;
                }
            }

            Self::Drag {
                drag_coefficient,
                density,
            } => {
                for particle in particles {
                    let drag = -drag_coefficient * density * particle.mass * elapsed_seconds;
                    particle.velocity[0] += particle.velocity[0] * drag;
                    particle.velocity[1] += particle.velocity[1] * drag;
                }
            }

            Self::Rotation { rotation_rate } => {
                for particle in particles {
                    particle.rotation += rotation_rate * elapsed_seconds;
                }
            }

            Self::OpacityFastFade => {
                for particle in particles {
                    particle.opacity = 1.0 - particle.age;
                }
            }

            Self::Velocity {
                velocity_threshold,
                interpolators,
            } => {
                let threshold_sq = velocity_threshold * velocity_threshold;
                for particle in particles {
                    let velocity_sq = particle.velocity[0] * particle.velocity[0]
                        + particle.velocity[1] * particle.velocity[1];
                    let amount = if velocity_sq >= threshold_sq {
                        1.0
                    } else {
                        velocity_sq.sqrt() / velocity_threshold
                    };
                    for interpolator in interpolators {
                        interpolator.update(amount, particle);
                    }
                }
            }

            Self::VelocityColor {
                stationary_color,
                velocity_color,
                velocity_threshold,
            } => {
                let threshold_sq = velocity_threshold * velocity_threshold;
                for particle in particles {
                    let velocity_sq = particle.velocity[0] * particle.velocity[0]
                        + particle.velocity[1] * particle.velocity[1];
                    if velocity_sq >= threshold_sq {
                        particle.set_color(*velocity_color);
                    } else {
                        let t = velocity_sq.sqrt() / velocity_threshold;
                        let delta = *velocity_color - *stationary_color;
                        particle.color[0] = normalize_hue(stationary_color.x + delta.x * t);
                        particle.color[1] = stationary_color.y + delta.y * t;
                        particle.color[2] = stationary_color.z + delta.z * t;
                    }
                }
            }

            Self::Vortex {
                position,
                mass,
                max_speed,
            } => {
                // Not real gravitation; tuned so strengths stay in a usable range.
                const GRAVITY: f32 = 100_000.0;
                for particle in particles {
                    let dist_x = position.x - particle.position[0];
                    let dist_y = position.y - particle.position[1];
                    let distance_sq = dist_x * dist_x + dist_y * dist_y;
                    let distance = distance_sq.sqrt();

                    let m = (GRAVITY * mass * particle.mass) / distance_sq;
                    let m = m.clamp(-max_speed, *max_speed) * elapsed_seconds;

                    particle.velocity[0] += (dist_x / distance) * m;
                    particle.velocity[1] += (dist_y / distance) * m;
                }
            }

            Self::RectangleContainer {
                width,
                height,
                restitution_coefficient,
            } => {
                for particle in particles {
                    let left = particle.trigger_pos[0] + width * -0.5;
                    let right = particle.trigger_pos[0] + width * 0.5;
                    let top = particle.trigger_pos[1] + height * -0.5;
                    let bottom = particle.trigger_pos[1] + height * 0.5;

                    // Mirror the overshoot back across the boundary rather
                    // than clamping onto it.
                    if particle.position[0] < left {
                        particle.position[0] = left + (left - particle.position[0]);
                        particle.velocity[0] = -particle.velocity[0] * restitution_coefficient;
                    } else if particle.position[0] > right {
                        particle.position[0] = right - (particle.position[0] - right);
                        particle.velocity[0] = -particle.velocity[0] * restitution_coefficient;
                    }

                    if particle.position[1] < top {
                        particle.position[1] = top + (top - particle.position[1]);
                        particle.velocity[1] = -particle.velocity[1] * restitution_coefficient;
                    } else if particle.position[1] > bottom {
                        particle.position[1] = bottom - (particle.position[1] - bottom);
                        particle.velocity[1] = -particle.velocity[1] * restitution_coefficient;
                    }
                }
            }

            Self::RectangleLoopContainer { width, height } => {
                for particle in particles {
                    let left = particle.trigger_pos[0] + width * -0.5;
                    let right = particle.trigger_pos[0] + width * 0.5;
                    let top = particle.trigger_pos[1] + height * -0.5;
                    let bottom = particle.trigger_pos[1] + height * 0.5;

                    if particle.position[0] < left {
                        particle.position[0] += width;
                    } else if particle.position[0] > right {
                        particle.position[0] -= width;
                    }

                    if particle.position[1] < top {
                        particle.position[1] += height;
                    } else if particle.position[1] > bottom {
                        particle.position[1] -= height;
                    }
                }
            }

            Self::CircleContainer {
                radius,
                inside,
                restitution_coefficient,
            } => {
                let radius_sq = radius * radius;
                for particle in particles {
                    let local = particle.position() - particle.trigger_pos();
                    let dist_sq = local.length_squared();
                    let normal = local.normalize_or_zero();

                    if *inside {
                        if dist_sq < radius_sq {
                            continue;
                        }
                        reflect_circle(particle, dist_sq, *radius, normal, *restitution_coefficient);
                    } else {
                        if dist_sq > radius_sq {
                            continue;
                        }
                        reflect_circle(
                            particle,
                            dist_sq,
                            *radius,
                            -normal,
                            *restitution_coefficient,
                        );
                    }
                }
            }
        }
    }
}

fn reflect_circle(
    particle: &mut Particle,
    dist_sq: f32,
    radius: f32,
    normal: Vec2,
    restitution: f32,
) {
    // Overshoot past the boundary along the contact normal.
    let overshoot = dist_sq.sqrt() - radius;

    let two_rest_dot = 2.0 * restitution * particle.velocity().dot(normal);
    particle.velocity[0] -= two_rest_dot * normal.x;
    particle.velocity[1] -= two_rest_dot * normal.y;

    particle.position[0] -= normal.x * overshoot;
    particle.position[1] -= normal.y * overshoot;
}

/// How the modifier list is driven for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExecutionStrategy {
    /// Modifiers run strictly in list order, each seeing the previous
    /// modifier's writes.
    #[default]
    Serial,
    /// All modifiers' throttled updates run concurrently over the same
    /// particle range (fan-out across the rule list, not across particles).
    ///
    /// This trades determinism for throughput: nothing reconciles two rules
    /// writing the same particle field at the same time. Use it only when
    /// the modifier set is field-disjoint or write-order-insensitive; with
    /// overlapping writers, results are unpredictable.
    Parallel,
}

impl ExecutionStrategy {
    /// Runs every modifier's throttled update for one frame over the active
    /// particle range.
    pub fn execute(
        &self,
        modifiers: &mut [Modifier],
        elapsed_seconds: f32,
        particles: &mut [Particle],
    ) {
        match self {
            Self::Serial => {
                for modifier in modifiers.iter_mut() {
                    modifier.throttled_update(elapsed_seconds, particles);
                }
            }
            Self::Parallel => {
                let shared = SharedParticles {
                    ptr: particles.as_mut_ptr(),
                    len: particles.len(),
                };
                modifiers.par_iter_mut().for_each(|modifier| {
                    // SAFETY: each task has exclusive access to its own
                    // modifier; the particle range is intentionally shared
                    // unsynchronized across tasks. See the variant docs for
                    // the field-disjointness requirement the caller accepts.
                    let particles = unsafe { shared.slice() };
                    modifier.throttled_update(elapsed_seconds, particles);
                });
            }
        }
    }
}

/// Unsynchronized view of the active particle range handed to every parallel
/// modifier task.
struct SharedParticles {
    ptr: *mut Particle,
    len: usize,
}

unsafe impl Send for SharedParticles {}
unsafe impl Sync for SharedParticles {}

impl SharedParticles {
    /// SAFETY: callers accept unsynchronized aliased writes; see
    /// [`ExecutionStrategy::Parallel`].
    #[allow(clippy::mut_from_ref)]
    unsafe fn slice(&self) -> &mut [Particle] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr, self.len) }
    }
}
