use super::boundary::enforce_boundary;
use super::config::{Restitution, SimulationConfig};
use super::error::{ConfigError, StepError};
use super::forces::ForceModel;
use super::particlesystem::ParticleSystem;
use super::solver::{Solver, WCSPHSolver};
use super::timemanager::TimeManager;
use crate::units::*;
use microprofile::scope;

/// Drives the particle system through fixed size ticks.
///
/// Every tick runs, in this order:
/// 1. neighborhood update and snapshot of the starting positions
/// 2. solver substep
/// 3. boundary enforcement
pub struct Simulation {
    particles: ParticleSystem,
    forces: ForceModel,
    solver: Box<dyn Solver>,
    restitution: Restitution,
    time_manager: TimeManager,
}

impl Simulation {
    pub fn new(config: SimulationConfig, particles: ParticleSystem, solver: Box<dyn Solver>) -> Result<Simulation, ConfigError> {
        particles.validate()?;
        let forces = ForceModel::new(&config, &particles)?;
        let time_manager = TimeManager::new(config.dt)?;

        log::info!(
            "simulation with {} particles ({} fluid), {} boundary segments, dimension {}, support radius {}, dt {}",
            particles.particle_num(),
            particles.num_fluid_particles(),
            particles.boundary_segments.len(),
            particles.dimension().value(),
            particles.support_radius(),
            config.dt
        );

        Ok(Simulation {
            particles,
            forces,
            solver,
            restitution: config.restitution,
            time_manager,
        })
    }

    /// Same as `new` with a `WCSPHSolver` using its default compressibility.
    pub fn with_wcsph_solver(config: SimulationConfig, particles: ParticleSystem) -> Result<Simulation, ConfigError> {
        let forces = ForceModel::new(&config, &particles)?;
        let solver = WCSPHSolver::new(&forces);
        Simulation::new(config, particles, Box::new(solver))
    }

    /// Advances the simulation by one tick of `dt`.
    ///
    /// Returns the number of boundary corrections applied during the tick.
    /// On error the tick is aborted and the simulated time does not advance. Particle state may be partially updated.
    pub fn step(&mut self) -> Result<usize, StepError> {
        microprofile::scope!("Simulation", "step");

        let result = self.run_tick();
        match result {
            Ok(corrections) => {
                self.time_manager.update_time();
                log::trace!(
                    "tick done at t={}s, {} boundary corrections",
                    self.time_manager.passed_time(),
                    corrections
                );
            }
            Err(ref err) => log::error!("tick at t={}s failed: {}", self.time_manager.passed_time(), err),
        }
        result
    }

    fn run_tick(&mut self) -> Result<usize, StepError> {
        self.particles.initialize_particle_system()?;
        self.solver.substep(&self.forces, &mut self.particles, self.time_manager.timestep())?;
        Ok(enforce_boundary(&mut self.particles, &self.restitution))
    }

    /// Resets simulated time and drops solver caches. Particles are left as they are.
    pub fn restart(&mut self) {
        log::debug!("restarting simulation at t={}s", self.time_manager.passed_time());
        self.time_manager.restart();
        self.solver.clear_cached_data();
    }

    pub fn dt(&self) -> Real {
        self.time_manager.timestep()
    }

    // takes effect with the next tick
    pub fn set_dt(&mut self, dt: Real) -> Result<(), ConfigError> {
        self.time_manager.set_timestep(dt)?;
        log::debug!("timestep set to {}s", dt);
        Ok(())
    }

    pub fn passed_time(&self) -> Real {
        self.time_manager.passed_time()
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    // Adding or removing particles here invalidates the solver caches, call `restart` afterwards.
    pub fn particles_mut(&mut self) -> &mut ParticleSystem {
        &mut self.particles
    }

    pub fn forces(&self) -> &ForceModel {
        &self.forces
    }

    pub fn restitution(&self) -> &Restitution {
        &self.restitution
    }
}
