use super::super::error::StepError;
use super::super::forces::ForceModel;
use super::super::particlesystem::{Material, ParticleSystem};
use super::super::smoothing_kernel::Kernel;
use super::Solver;
use crate::units::*;
use microprofile::scope;
use cgmath::prelude::*;
use rayon::prelude::*;

// Solver based on Becker & Teschner 2007 WCSPH07
// No surface tension implemented
// https://cg.informatik.uni-freiburg.de/publications/2007_SCA_SPH.pdf
pub struct WCSPHSolver {
    stiffness: Real, // denoted as B. B = density0 * speed_of_sound * speed_of_sound / γ.

    // Each phase writes into these and swaps them with the particle arrays once all particles are done.
    // That way no particle ever sees a half updated density or pressure of its neighbors.
    densities: Vec<Real>,
    pressures: Vec<Real>,
    accellerations: Vec<Vector>,
}

// γ is hardcoded to 7 as propsed in the paper
const TAIT_EQUATION_GAMMA: i32 = 7;

impl WCSPHSolver {
    pub fn new(forces: &ForceModel) -> WCSPHSolver {
        let mut solver = WCSPHSolver {
            stiffness: 0.0, // set in set_compressibility below
            densities: Vec::new(),
            pressures: Vec::new(),
            accellerations: Vec::new(),
        };
        // set a good default for compressibility
        solver.set_compressibility(forces.reference_density(), 0.01, 1.0);
        solver
    }

    // target_density_variation:    density variation, denoted as η in the paper. defaults to 1%==0.01
    // expected_max_flow_speed:     expected speed of the fluid in m/s. possible estimate is sqrt(2 * gravity * falling_height)
    pub fn set_compressibility(&mut self, reference_density: Real, target_density_variation: Real, expected_max_flow_speed: Real) {
        // real speed of sound of the fluid is usually higher, but this makes our timesteps way too small
        let speed_of_sound = expected_max_flow_speed / target_density_variation.sqrt();
        self.stiffness = reference_density * speed_of_sound * speed_of_sound / TAIT_EQUATION_GAMMA as Real;
    }

    pub fn stiffness(&self) -> Real {
        self.stiffness
    }

    // Equation of State (EOS)
    fn pressure(stiffness: Real, reference_density: Real, local_density: Real) -> Real {
        // Tait equation as in Becker & Teschner 2007 WCSPH07
        // The max on pressure ratio is due to pressure clamping to work around particle deficiency problem. Good explanation here:
        // https://github.com/InteractiveComputerGraphics/SPlisHSPlasH/issues/36#issuecomment-495883932
        stiffness * ((local_density / reference_density).max(1.0).powi(TAIT_EQUATION_GAMMA) - 1.0)
    }

    fn compute_densities(&mut self, forces: &ForceModel, particles: &ParticleSystem) {
        microprofile::scope!("WCSPHSolver", "compute_densities");
        let mass = forces.particle_mass();
        let kernel = forces.kernel();
        let self_contribution = kernel.evaluate(0.0) * mass;

        // Density contributions are symmetric, but that is hard to use in a parallel loop.
        self.densities
            .par_iter_mut()
            .zip((&particles.densities, &particles.materials).into_par_iter())
            .enumerate()
            .for_each(|(i, (density, (&previous_density, &material)))| {
                if material != Material::Fluid {
                    *density = previous_density;
                    return;
                }
                *density = self_contribution;
                particles.foreach_neighbor(
                    i,
                    #[inline(always)]
                    |_, r| {
                        *density += kernel.evaluate(r.magnitude()) * mass;
                    },
                );
            });
    }

    fn compute_pressures(&mut self, forces: &ForceModel, particles: &ParticleSystem) {
        microprofile::scope!("WCSPHSolver", "compute_pressures");
        let stiffness = self.stiffness;
        let reference_density = forces.reference_density();
        self.pressures
            .par_iter_mut()
            .zip((&particles.densities, &particles.pressures, &particles.materials).into_par_iter())
            .for_each(|(pressure, (&density, &previous_pressure, &material))| {
                *pressure = match material {
                    Material::Fluid => Self::pressure(stiffness, reference_density, density),
                    Material::Boundary => previous_pressure,
                };
            });
    }

    fn compute_accellerations(&mut self, forces: &ForceModel, particles: &ParticleSystem) {
        microprofile::scope!("WCSPHSolver", "compute_accellerations");
        let gravity = forces.gravity();

        self.accellerations
            .par_iter_mut()
            .zip(particles.materials.par_iter())
            .enumerate()
            .for_each(|(i, (accelleration, &material))| {
                if material != Material::Fluid {
                    *accelleration = Vector::zero();
                    return;
                }
                *accelleration = gravity;

                let pi = particles.pressures[i];
                let rhoi = particles.densities[i];

                particles.foreach_neighbor(
                    i,
                    #[inline(always)]
                    |j, r| match particles.materials[j] {
                        Material::Fluid => {
                            *accelleration += forces.pressure_force(particles, i, j, r);
                            *accelleration += forces.viscosity_force(particles, i, j, r);
                        }
                        // Pressure mirroring: the boundary particle is assumed to have the same pressure and density as the fluid particle.
                        Material::Boundary => {
                            *accelleration += forces.pressure_acceleration(pi, rhoi, pi, rhoi, r);
                        }
                    },
                );
            });
    }

    // Symplectic Euler
    fn integrate(&self, particles: &mut ParticleSystem, dt: Real) -> Result<(), StepError> {
        microprofile::scope!("WCSPHSolver", "integrate");

        // This got actually slower for a parallel for loop when used with 2500 particles (too few? or is rayon doing something silly?)
        for (i, (((pos, v), a), material)) in particles
            .positions
            .iter_mut()
            .zip(particles.velocities.iter_mut())
            .zip(self.accellerations.iter())
            .zip(particles.materials.iter())
            .enumerate()
        {
            if *material != Material::Fluid {
                continue;
            }
            *v += dt * *a;
            *pos += dt * *v;

            if !(v.x.is_finite() && v.y.is_finite() && pos.x.is_finite() && pos.y.is_finite()) {
                return Err(StepError::NonFiniteState { particle: i });
            }
        }
        Ok(())
    }
}

impl Solver for WCSPHSolver {
    fn clear_cached_data(&mut self) {
        self.densities.clear();
        self.pressures.clear();
        self.accellerations.clear();
    }

    fn substep(&mut self, forces: &ForceModel, particles: &mut ParticleSystem, dt: Real) -> Result<(), StepError> {
        microprofile::scope!("WCSPHSolver", "substep");
        let num_particles = particles.particle_num();
        self.densities.resize(num_particles, 0.0);
        self.pressures.resize(num_particles, 0.0);
        self.accellerations.resize(num_particles, Vector::zero());

        self.compute_densities(forces, particles);
        std::mem::swap(&mut self.densities, &mut particles.densities);

        self.compute_pressures(forces, particles);
        std::mem::swap(&mut self.pressures, &mut particles.pressures);

        self.compute_accellerations(forces, particles);
        self.integrate(particles, dt)
    }
}
