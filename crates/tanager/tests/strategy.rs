use glam::Vec2;
use tanager::{ExecutionStrategy, Interpolator, Modifier, ModifierKind, Particle};

fn field_disjoint_pipeline() -> Vec<Modifier> {
    // Rotation writes rotation, gravity writes velocity, fade writes opacity:
    // no overlapping fields, so Parallel must agree with Serial.
    vec![
        Modifier::new(ModifierKind::Rotation { rotation_rate: 1.0 }),
        Modifier::new(ModifierKind::LinearGravity {
            direction: Vec2::new(0.0, -1.0),
            strength: 9.8,
        }),
        Modifier::new(ModifierKind::OpacityFastFade),
    ]
}

fn seeded_particles(count: usize) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let mut particle = Particle::default();
            particle.age = (i as f32) / (count as f32);
            particle.mass = 1.0;
            particle.velocity = [i as f32, -(i as f32)];
            particle
        })
        .collect()
}

#[test]
fn test_serial_runs_modifiers_in_list_order() {
    // An additive rotation before an age-driven overwrite is erased by it;
    // in the opposite order the increment survives.
    let increment = Modifier::new(ModifierKind::Rotation { rotation_rate: 60.0 });
    let overwrite = Modifier::new(ModifierKind::Age {
        interpolators: vec![Interpolator::Rotation {
            start: 5.0,
            end: 5.0,
        }],
    });
    let dt = 1.0 / 60.0;

    let mut erased = vec![Particle::default()];
    ExecutionStrategy::Serial.execute(&mut [increment.clone(), overwrite.clone()], dt, &mut erased);
    assert!((erased[0].rotation - 5.0).abs() < 1e-6);

    let mut survived = vec![Particle::default()];
    ExecutionStrategy::Serial.execute(&mut [overwrite, increment], dt, &mut survived);
    assert!((survived[0].rotation - 6.0).abs() < 1e-6);
}

#[test]
fn test_parallel_agrees_with_serial_for_field_disjoint_modifiers() {
    let dt = 1.0 / 60.0;

    let mut serial_particles = seeded_particles(500);
    let mut serial_modifiers = field_disjoint_pipeline();
    for _ in 0..10 {
        ExecutionStrategy::Serial.execute(&mut serial_modifiers, dt, &mut serial_particles);
    }

    let mut parallel_particles = seeded_particles(500);
    let mut parallel_modifiers = field_disjoint_pipeline();
    for _ in 0..10 {
        ExecutionStrategy::Parallel.execute(&mut parallel_modifiers, dt, &mut parallel_particles);
    }

    assert_eq!(serial_particles, parallel_particles);
}

#[test]
fn test_parallel_keeps_per_modifier_throttling() {
    // A 30 Hz modifier at 60 fps still needs two frames per cycle when the
    // modifier list is fanned out.
    let mut modifiers = vec![
        Modifier::new(ModifierKind::Rotation { rotation_rate: 1.0 }).with_frequency(30.0),
        Modifier::new(ModifierKind::OpacityFastFade),
    ];
    let mut particles = vec![Particle::default(); 10];
    let dt = 1.0 / 60.0;
    let cycle_time = 1.0 / 30.0;

    ExecutionStrategy::Parallel.execute(&mut modifiers, dt, &mut particles);
    let visited = particles
        .iter()
        .filter(|p| (p.rotation - cycle_time).abs() < 1e-6)
        .count();
    assert_eq!(visited, 5);

    ExecutionStrategy::Parallel.execute(&mut modifiers, dt, &mut particles);
    for particle in &particles {
        assert!((particle.rotation - cycle_time).abs() < 1e-6);
    }
}

#[test]
fn test_empty_modifier_list_is_a_no_op() {
    let mut particles = seeded_particles(10);
    let snapshot = particles.clone();

    ExecutionStrategy::Serial.execute(&mut [], 1.0 / 60.0, &mut particles);
    ExecutionStrategy::Parallel.execute(&mut [], 1.0 / 60.0, &mut particles);

    assert_eq!(particles, snapshot);
}
