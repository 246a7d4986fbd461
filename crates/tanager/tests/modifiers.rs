use glam::{Vec2, Vec3};
use tanager::{Interpolator, Modifier, ModifierKind, Particle};

fn particles(count: usize) -> Vec<Particle> {
    vec![Particle::default(); count]
}

// --- throttling ---

#[test]
fn test_throttle_spreads_one_cycle_across_frames() {
    // 30 Hz modifier driven at 60 fps: half the particles per frame.
    let mut modifier =
        Modifier::new(ModifierKind::Rotation { rotation_rate: 1.0 }).with_frequency(30.0);
    let mut particles = particles(10);
    let dt = 1.0 / 60.0;
    let cycle_time = 1.0 / 30.0;

    modifier.throttled_update(dt, &mut particles);

    let visited: Vec<bool> = particles
        .iter()
        .map(|p| (p.rotation - cycle_time).abs() < 1e-6)
        .collect();
    assert_eq!(visited.iter().filter(|&&v| v).count(), 5);
    assert!(visited[..5].iter().all(|&v| v), "first half visited first");

    modifier.throttled_update(dt, &mut particles);

    // Cycle complete: every particle visited exactly once.
    for particle in &particles {
        assert!((particle.rotation - cycle_time).abs() < 1e-6);
    }
}

#[test]
fn test_throttle_never_revisits_before_cycle_completes() {
    let mut modifier =
        Modifier::new(ModifierKind::Rotation { rotation_rate: 1.0 }).with_frequency(10.0);
    let mut particles = particles(30);
    let dt = 1.0 / 60.0;
    let cycle_time = 1.0 / 10.0;

    // Six frames make up one full cycle at 10 Hz / 60 fps.
    for _ in 0..6 {
        modifier.throttled_update(dt, &mut particles);
        for particle in &particles {
            assert!(
                particle.rotation <= cycle_time + 1e-6,
                "particle visited twice within one cycle"
            );
        }
    }

    for particle in &particles {
        assert!((particle.rotation - cycle_time).abs() < 1e-6);
    }
}

#[test]
fn test_throttle_at_frame_rate_visits_everything_every_frame() {
    let mut modifier =
        Modifier::new(ModifierKind::Rotation { rotation_rate: 1.0 }).with_frequency(60.0);
    let mut particles = particles(100);
    let dt = 1.0 / 60.0;

    modifier.throttled_update(dt, &mut particles);
    for particle in &particles {
        assert!((particle.rotation - dt).abs() < 1e-6);
    }

    modifier.throttled_update(dt, &mut particles);
    for particle in &particles {
        assert!((particle.rotation - 2.0 * dt).abs() < 1e-6);
    }
}

#[test]
fn test_throttle_passes_cycle_time_not_frame_delta() {
    // 10 Hz at 60 fps: each visited particle integrates 1/10 s, not 1/60 s.
    let mut modifier =
        Modifier::new(ModifierKind::Rotation { rotation_rate: 1.0 }).with_frequency(10.0);
    let mut particles = particles(6);

    modifier.throttled_update(1.0 / 60.0, &mut particles);
    assert!((particles[0].rotation - 0.1).abs() < 1e-6);
}

#[test]
fn test_throttle_handles_shrinking_particle_count() {
    let mut modifier =
        Modifier::new(ModifierKind::Rotation { rotation_rate: 1.0 }).with_frequency(30.0);
    let mut particles = particles(10);

    modifier.throttled_update(1.0 / 60.0, &mut particles);

    // The active range shrank below the cycle progress; the next call must
    // start a fresh cycle instead of indexing out of range.
    let mut shrunk = particles[..3].to_vec();
    modifier.throttled_update(1.0 / 60.0, &mut shrunk);
    modifier.throttled_update(1.0 / 60.0, &mut shrunk);
    assert!(shrunk[0].rotation > 0.0);
}

// --- physics ---

#[test]
fn test_linear_gravity_scales_with_mass() {
    let kind = ModifierKind::LinearGravity {
        direction: Vec2::new(0.0, 1.0),
        strength: 10.0,
    };
    let mut particles = particles(2);
    particles[0].mass = 1.0;
    particles[1].mass = 2.0;

    kind.update(0.5, &mut particles);

    assert!((particles[0].velocity[1] - 5.0).abs() < 1e-6);
    assert!((particles[1].velocity[1] - 10.0).abs() < 1e-6);
}

#[test]
fn test_drag_slows_particles_down() {
    let kind = ModifierKind::Drag {
        drag_coefficient: 0.47,
        density: 0.5,
    };
    let mut particles = particles(1);
    particles[0].mass = 1.0;
    particles[0].velocity = [10.0, -10.0];

    kind.update(1.0, &mut particles);

    // velocity += velocity * (-0.47 * 0.5 * 1.0 * 1.0)
    assert!((particles[0].velocity[0] - 7.65).abs() < 1e-4);
    assert!((particles[0].velocity[1] + 7.65).abs() < 1e-4);
}

#[test]
fn test_rotation_advances_by_rate_times_elapsed() {
    let kind = ModifierKind::Rotation {
        rotation_rate: 2.0,
    };
    let mut particles = particles(1);
    particles[0].rotation = 1.0;

    kind.update(0.25, &mut particles);

    assert!((particles[0].rotation - 1.5).abs() < 1e-6);
}

#[test]
fn test_opacity_fast_fade_tracks_age_only() {
    let kind = ModifierKind::OpacityFastFade;
    let mut particles = particles(1);
    particles[0].age = 0.25;

    kind.update(123.0, &mut particles);

    assert!((particles[0].opacity - 0.75).abs() < 1e-6);
}

#[test]
fn test_age_modifier_drives_interpolators_by_age() {
    let kind = ModifierKind::Age {
        interpolators: vec![Interpolator::Opacity {
            start: 1.0,
            end: 0.0,
        }],
    };
    let mut particles = particles(1);
    particles[0].age = 0.5;

    kind.update(1.0, &mut particles);

    assert!((particles[0].opacity - 0.5).abs() < 1e-6);
}

#[test]
fn test_velocity_modifier_saturates_at_the_threshold() {
    let kind = ModifierKind::Velocity {
        velocity_threshold: 10.0,
        interpolators: vec![Interpolator::Scale {
            start: 0.0,
            end: 1.0,
        }],
    };

    let mut slow = particles(1);
    slow[0].velocity = [5.0, 0.0];
    kind.update(1.0, &mut slow);
    assert!((slow[0].scale - 0.5).abs() < 1e-6);

    let mut fast = particles(1);
    fast[0].velocity = [20.0, 0.0];
    kind.update(1.0, &mut fast);
    assert!((fast[0].scale - 1.0).abs() < 1e-6);
}

#[test]
fn test_velocity_color_blends_toward_the_velocity_color() {
    let stationary = Vec3::new(0.0, 1.0, 0.5);
    let velocity = Vec3::new(240.0, 1.0, 0.5);
    let kind = ModifierKind::VelocityColor {
        stationary_color: stationary,
        velocity_color: velocity,
        velocity_threshold: 10.0,
    };

    let mut fast = particles(1);
    fast[0].velocity = [20.0, 0.0];
    kind.update(1.0, &mut fast);
    assert_eq!(fast[0].color, [240.0, 1.0, 0.5]);

    let mut slow = particles(1);
    slow[0].velocity = [5.0, 0.0];
    kind.update(1.0, &mut slow);
    assert!((slow[0].color[0] - 120.0).abs() < 1e-3);
}

#[test]
fn test_vortex_clamps_attraction_to_max_speed() {
    let kind = ModifierKind::Vortex {
        position: Vec2::new(1.0, 0.0),
        mass: 10.0,
        max_speed: 5.0,
    };
    // So close that the raw inverse-square pull would be enormous.
    let mut particles = particles(1);
    particles[0].mass = 1.0;
    particles[0].position = [0.0, 0.0];

    kind.update(1.0, &mut particles);

    let speed = Vec2::from_array(particles[0].velocity).length();
    assert!((speed - 5.0).abs() < 1e-4);
    assert!(particles[0].velocity[0] > 0.0, "pulled toward the vortex");
}

#[test]
fn test_rectangle_container_reflects_the_overshoot() {
    let kind = ModifierKind::RectangleContainer {
        width: 10.0,
        height: 10.0,
        restitution_coefficient: 0.5,
    };
    let mut particles = particles(1);
    particles[0].trigger_pos = [0.0, 0.0];
    particles[0].position = [6.0, 0.0];
    particles[0].velocity = [2.0, 0.0];

    kind.update(1.0, &mut particles);

    // Mirrored one unit back inside, not clamped onto the edge.
    assert!((particles[0].position[0] - 4.0).abs() < 1e-6);
    assert!((particles[0].velocity[0] + 1.0).abs() < 1e-6);
}

#[test]
fn test_rectangle_container_is_relative_to_the_trigger_origin() {
    let kind = ModifierKind::RectangleContainer {
        width: 10.0,
        height: 10.0,
        restitution_coefficient: 1.0,
    };
    let mut particles = particles(1);
    particles[0].trigger_pos = [100.0, 0.0];
    particles[0].position = [106.0, 0.0];
    particles[0].velocity = [2.0, 0.0];

    kind.update(1.0, &mut particles);

    assert!((particles[0].position[0] - 104.0).abs() < 1e-4);
}

#[test]
fn test_rectangle_loop_container_wraps_instead_of_reflecting() {
    let kind = ModifierKind::RectangleLoopContainer {
        width: 10.0,
        height: 10.0,
    };
    let mut particles = particles(1);
    particles[0].position = [6.0, -7.0];
    particles[0].velocity = [2.0, -2.0];

    kind.update(1.0, &mut particles);

    assert!((particles[0].position[0] + 4.0).abs() < 1e-6);
    assert!((particles[0].position[1] - 3.0).abs() < 1e-6);
    // Velocity is untouched by wrapping.
    assert_eq!(particles[0].velocity, [2.0, -2.0]);
}

#[test]
fn test_circle_container_reflects_particles_back_inside() {
    let kind = ModifierKind::CircleContainer {
        radius: 5.0,
        inside: true,
        restitution_coefficient: 1.0,
    };
    let mut particles = particles(1);
    particles[0].position = [6.0, 0.0];
    particles[0].velocity = [1.0, 0.0];

    kind.update(1.0, &mut particles);

    assert!((particles[0].position[0] - 5.0).abs() < 1e-4);
    assert!((particles[0].velocity[0] + 1.0).abs() < 1e-4);
}

#[test]
fn test_circle_container_leaves_contained_particles_alone() {
    let kind = ModifierKind::CircleContainer {
        radius: 5.0,
        inside: true,
        restitution_coefficient: 1.0,
    };
    let mut particles = particles(1);
    particles[0].position = [1.0, 2.0];
    particles[0].velocity = [3.0, 4.0];

    kind.update(1.0, &mut particles);

    assert_eq!(particles[0].position, [1.0, 2.0]);
    assert_eq!(particles[0].velocity, [3.0, 4.0]);
}

#[test]
fn test_modifier_name_defaults_to_its_kind() {
    let modifier = Modifier::new(ModifierKind::OpacityFastFade);
    assert_eq!(modifier.name, "OpacityFastFade");
}
