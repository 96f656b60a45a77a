use criterion::{criterion_group, Criterion};

use cgmath::prelude::*;
use sphkit2d::sph::*;
use sphkit2d::units::*;

fn bench_simulation_step(c: &mut Criterion) {
    let mut particles = ParticleSystem::new(0.01, 2.0, Dimension::Two).unwrap();
    // This would probably explode in a real simulation, but we don't care here.
    particles.add_cube_jittered(Point::new(0.0, 0.0), Vector::new(1.0, 0.5), Vector::zero(), 1000.0, Material::Fluid, 0.5, 1234);
    particles.add_cube(Point::new(-0.1, -0.04), Vector::new(1.2, 0.04), Vector::zero(), 1000.0, Material::Boundary);
    particles.add_boundary_line(Point::new(-0.1, 0.0), Point::new(1.1, 0.0));

    let config = SimulationConfig {
        dt: 1.0e-4,
        ..Default::default()
    };
    let mut simulation = Simulation::with_wcsph_solver(config, particles).unwrap();

    c.bench_function(
        &format!(
            "Simulation.step - WCSPH with {} fluid particles and {} boundary particles",
            simulation.particles().num_fluid_particles(),
            simulation.particles().particle_num() - simulation.particles().num_fluid_particles()
        ),
        |b| b.iter(|| simulation.step()),
    );
}

criterion_group!(simulation_step, bench_simulation_step);
