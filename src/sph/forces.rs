use super::config::SimulationConfig;
use super::dimension::Dimension;
use super::error::ConfigError;
use super::particlesystem::ParticleSystem;
use super::smoothing_kernel::{CubicSpline, Kernel};
use crate::units::*;
use cgmath::prelude::*;

/// Pairwise SPH accellerations shared by all solvers.
///
/// All force functions expect the separation vector `r` = x_i - x_j and return the accelleration of particle i
/// caused by neighbor j. Summing over neighbors (and adding gravity) is up to the solver.
#[derive(Copy, Clone, Debug)]
pub struct ForceModel {
    kernel: CubicSpline,
    gravity: Vector,
    reference_density: Real, // ρ0
    particle_volume: Real,   // m_V
    particle_mass: Real,     // m_V * ρ0

    viscosity_factor: Real,  // 2(d+2)μ
    viscosity_epsilon: Real, // 0.01h², keeps the viscosity term finite for r -> 0
}

impl ForceModel {
    pub fn new(config: &SimulationConfig, particles: &ParticleSystem) -> Result<ForceModel, ConfigError> {
        config.validate()?;
        let dimension = particles.dimension();
        let support_radius = particles.support_radius();
        let kernel = CubicSpline::new(support_radius, dimension)?;
        Ok(ForceModel {
            kernel,
            gravity: config.gravity,
            reference_density: config.reference_density,
            particle_volume: particles.particle_volume(),
            particle_mass: particles.particle_volume() * config.reference_density,
            viscosity_factor: 2.0 * (dimension.value() + 2) as Real * config.viscosity,
            viscosity_epsilon: 0.01 * support_radius * support_radius,
        })
    }

    pub fn kernel(&self) -> &CubicSpline {
        &self.kernel
    }

    pub fn gravity(&self) -> Vector {
        self.gravity
    }

    pub fn reference_density(&self) -> Real {
        self.reference_density
    }

    pub fn particle_volume(&self) -> Real {
        self.particle_volume
    }

    pub fn particle_mass(&self) -> Real {
        self.particle_mass
    }

    pub fn support_radius(&self) -> Real {
        self.kernel.support_radius()
    }

    pub fn dimension(&self) -> Dimension {
        self.kernel.dimension()
    }

    /// Laminar viscosity as in "Modeling Low Reynolds Number Incompressible Flows Using SPH", Morris et al. 1997
    /// - `velocity_diff`:  v_i - v_j
    /// - `rho_j`:          Density of the neighbor
    #[inline]
    pub fn viscosity_acceleration(&self, velocity_diff: Vector, rho_j: Real, r: Vector) -> Vector {
        let v_xy = velocity_diff.dot(r);
        self.viscosity_factor * (self.particle_mass / rho_j) * v_xy / (r.magnitude2() + self.viscosity_epsilon) * self.kernel.gradient(r)
    }

    /// Symmetric pressure gradient. Pairwise contributions cancel exactly, so momentum is conserved.
    #[inline]
    pub fn pressure_acceleration(&self, pressure_i: Real, rho_i: Real, pressure_j: Real, rho_j: Real, r: Vector) -> Vector {
        -self.reference_density
            * self.particle_volume
            * (pressure_i / (rho_i * rho_i) + pressure_j / (rho_j * rho_j))
            * self.kernel.gradient(r)
    }

    #[inline]
    pub fn viscosity_force(&self, particles: &ParticleSystem, i: usize, j: usize, r: Vector) -> Vector {
        self.viscosity_acceleration(particles.velocities[i] - particles.velocities[j], particles.densities[j], r)
    }

    #[inline]
    pub fn pressure_force(&self, particles: &ParticleSystem, i: usize, j: usize, r: Vector) -> Vector {
        self.pressure_acceleration(
            particles.pressures[i],
            particles.densities[i],
            particles.pressures[j],
            particles.densities[j],
            r,
        )
    }
}
