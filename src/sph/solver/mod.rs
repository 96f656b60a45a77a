pub use wcsph::WCSPHSolver;

mod wcsph;

// ------------------------------------------------------

use super::error::StepError;
use super::forces::ForceModel;
use super::particlesystem::ParticleSystem;
use crate::units::Real;

/// Concrete SPH scheme, driven once per tick by the `Simulation`.
///
/// When `substep` is called, the neighborhood datastructure is up to date and `previous_positions` holds the positions at the start of the tick.
/// A substep updates density, pressure, velocity and position of every fluid particle, including gravity.
/// Boundary segments are handled afterwards by the simulation, not by the solver.
pub trait Solver: Send {
    // drops data carried over from previous steps, e.g. after the particles were reset.
    fn clear_cached_data(&mut self);

    // performs a single simulation substep.
    fn substep(&mut self, forces: &ForceModel, particles: &mut ParticleSystem, dt: Real) -> Result<(), StepError>;
}
