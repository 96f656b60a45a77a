use cgmath::prelude::*;
use more_asserts::*;

use sphkit2d::sph::*;
use sphkit2d::units::*;

const BOX_SIZE: Real = 1.0;

fn dam_break(dt: Real) -> Simulation {
    let mut particles = ParticleSystem::new(0.02, 2.0, Dimension::Two).unwrap();
    particles.add_cube(Point::new(0.1, 0.1), Vector::new(0.4, 0.4), Vector::zero(), 1000.0, Material::Fluid);
    particles.add_boundary_line(Point::new(0.0, 0.0), Point::new(BOX_SIZE, 0.0));
    particles.add_boundary_line(Point::new(BOX_SIZE, 0.0), Point::new(BOX_SIZE, BOX_SIZE));
    particles.add_boundary_line(Point::new(BOX_SIZE, BOX_SIZE), Point::new(0.0, BOX_SIZE));
    particles.add_boundary_line(Point::new(0.0, BOX_SIZE), Point::new(0.0, 0.0));

    let config = SimulationConfig {
        dt,
        ..Default::default()
    };
    Simulation::with_wcsph_solver(config, particles).unwrap()
}

#[test]
fn dam_break_stays_finite_and_inside_box() {
    let mut simulation = dam_break(2.0e-3);
    assert_eq!(simulation.particles().num_fluid_particles(), 10 * 10);

    for _ in 0..200 {
        simulation.step().unwrap();
    }

    let particles = simulation.particles();
    for (position, velocity) in particles.positions.iter().zip(particles.velocities.iter()) {
        assert!(position.x.is_finite() && position.y.is_finite());
        assert_ge!(position.x, 0.0);
        assert_le!(position.x, BOX_SIZE);
        assert_ge!(position.y, 0.0);
        assert_le!(position.y, BOX_SIZE);
        assert_lt!(velocity.magnitude(), 5.0);
    }
    for density in particles.densities.iter() {
        assert!(density.is_finite());
        assert_gt!(*density, 0.0);
    }
    assert_lt!((simulation.passed_time() - 0.4).abs(), 1.0e-3);
}

#[test]
fn fluid_falls_under_gravity() {
    let mut simulation = dam_break(2.0e-3);
    let mean_height = |simulation: &Simulation| {
        let positions = &simulation.particles().positions;
        positions.iter().map(|p| p.y).sum::<Real>() / positions.len() as Real
    };
    let start_height = mean_height(&simulation);
    for _ in 0..50 {
        simulation.step().unwrap();
    }
    assert_lt!(mean_height(&simulation), start_height);
}
