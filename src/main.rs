use cgmath::prelude::*;
use microprofile::scope;
use std::error::Error;
use std::time::{Duration, Instant};

use sphkit2d::sph::*;
use sphkit2d::units::*;

const PARTICLE_RADIUS: Real = 0.05;
const SMOOTHING_FACTOR: Real = 2.0;
const DOMAIN_SIZE: Real = 10.0;
const TICKS_PER_FRAME: usize = 5;
const DEFAULT_NUM_FRAMES: usize = 200;

fn setup_scene() -> Result<ParticleSystem, ConfigError> {
    let mut particles = ParticleSystem::new(PARTICLE_RADIUS, SMOOTHING_FACTOR, Dimension::Two)?;

    particles.add_cube(Point::new(5.0, 1.0), Vector::new(4.0, 3.0), Vector::zero(), 1000.0, Material::Fluid);
    particles.add_cube(Point::new(1.0, 1.0), Vector::new(4.0, 3.0), Vector::zero(), 1000.0, Material::Fluid);

    particles.add_boundary_line(Point::new(0.0, 0.0), Point::new(DOMAIN_SIZE, 0.0));
    particles.add_boundary_line(Point::new(DOMAIN_SIZE, 0.0), Point::new(DOMAIN_SIZE, DOMAIN_SIZE));
    particles.add_boundary_line(Point::new(DOMAIN_SIZE, DOMAIN_SIZE), Point::new(0.0, DOMAIN_SIZE));
    particles.add_boundary_line(Point::new(0.0, DOMAIN_SIZE), Point::new(0.0, 0.0));

    Ok(particles)
}

struct FrameStats {
    max_speed: Real,
    mean_density: Real,
}

fn frame_stats(particles: &ParticleSystem) -> FrameStats {
    let mut max_speed: Real = 0.0;
    let mut density_sum = 0.0;
    let mut num_fluid = 0;
    for ((velocity, density), material) in particles
        .velocities
        .iter()
        .zip(particles.densities.iter())
        .zip(particles.materials.iter())
    {
        if *material != Material::Fluid {
            continue;
        }
        max_speed = max_speed.max(velocity.magnitude());
        density_sum += density;
        num_fluid += 1;
    }
    FrameStats {
        max_speed,
        mean_density: if num_fluid > 0 { density_sum / num_fluid as Real } else { 0.0 },
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    microprofile::init!();
    microprofile::set_enable_all_groups!(true);

    let num_frames = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<usize>()?,
        None => DEFAULT_NUM_FRAMES,
    };

    let mut simulation = Simulation::with_wcsph_solver(SimulationConfig::default(), setup_scene()?)?;
    let mut total_processing_time = Duration::default();

    for frame in 0..num_frames {
        microprofile::scope!("main", "frame");
        let frame_start = Instant::now();

        let mut corrections = 0;
        for _ in 0..TICKS_PER_FRAME {
            corrections += simulation.step()?;
        }

        let processing_time = frame_start.elapsed();
        total_processing_time += processing_time;

        let stats = frame_stats(simulation.particles());
        log::info!(
            "frame {:4} | SimTime {:.2}s | max speed {:.3}m/s | mean density {:.1} | {:4} boundary corrections | {:.2}ms",
            frame,
            simulation.passed_time(),
            stats.max_speed,
            stats.mean_density,
            corrections,
            processing_time.as_secs_f64() * 1000.0
        );

        microprofile::flip!();
    }

    log::info!(
        "simulated {:.2}s in {:.2}s processing time",
        simulation.passed_time(),
        total_processing_time.as_secs_f64()
    );

    Ok(())
}
