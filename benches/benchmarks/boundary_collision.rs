use criterion::{black_box, criterion_group, BatchSize, Criterion};

use sphkit2d::sph::*;
use sphkit2d::units::*;

fn bench_boundary_collision(c: &mut Criterion) {
    let segment = BoundarySegment::new(Point::new(-1.0, 1.0), Point::new(1.0, 1.0));
    let restitution = Restitution::default();

    c.bench_function("segment_collision (hit)", |b| {
        b.iter(|| {
            let mut position = black_box(Point::new(0.0, 2.0));
            let mut velocity = black_box(Vector::new(0.0, 5.0));
            segment_collision(Point::new(0.0, 0.0), &mut position, &mut velocity, &segment, 0.1, &restitution)
        })
    });
    c.bench_function("segment_collision (miss)", |b| {
        b.iter(|| {
            let mut position = black_box(Point::new(2.0, 2.0));
            let mut velocity = black_box(Vector::new(0.0, 5.0));
            segment_collision(Point::new(2.0, 0.0), &mut position, &mut velocity, &segment, 0.1, &restitution)
        })
    });

    // Every fluid particle moved below the floor of a closed box.
    let mut particles = ParticleSystem::new(0.01, 2.0, Dimension::Two).unwrap();
    particles.add_cube(Point::new(0.1, 0.02), Vector::new(0.8, 0.5), Vector::new(0.0, -1.0), 1000.0, Material::Fluid);
    particles.add_boundary_line(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
    particles.add_boundary_line(Point::new(1.0, 0.0), Point::new(1.0, 1.0));
    particles.add_boundary_line(Point::new(1.0, 1.0), Point::new(0.0, 1.0));
    particles.add_boundary_line(Point::new(0.0, 1.0), Point::new(0.0, 0.0));
    particles.initialize_particle_system().unwrap();
    for position in particles.positions.iter_mut() {
        position.y -= 0.05;
    }
    let moved_positions = particles.positions.clone();
    let velocities = particles.velocities.clone();

    c.bench_function(
        &format!("enforce_boundary, {} particles, 4 segments", particles.particle_num()),
        |b| {
            b.iter_batched(
                || (moved_positions.clone(), velocities.clone()),
                |(positions, velocities)| {
                    particles.positions = positions;
                    particles.velocities = velocities;
                    enforce_boundary(&mut particles, &restitution)
                },
                BatchSize::LargeInput,
            )
        },
    );
}

criterion_group!(boundary_collision, bench_boundary_collision);
