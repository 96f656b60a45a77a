use crate::units::*;
use microprofile::scope;
use cgmath::prelude::*;
use rand::prelude::*;

use super::boundary::BoundarySegment;
use super::dimension::Dimension;
use super::error::ConfigError;
use super::neighborhood_search::NeighborhoodSearch;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Material {
    Boundary,
    Fluid,
}

/// Particle store. One entry per particle in each array, indexed by a dense particle index.
///
/// The arrays are public so solvers can update them in place. All of them need to have the same length,
/// see `validate`. Particles are never created or destroyed while a simulation runs.
pub struct ParticleSystem {
    pub positions: Vec<Point>,
    pub previous_positions: Vec<Point>, // positions at the start of the current tick
    pub velocities: Vec<Vector>,
    pub densities: Vec<Real>, // Local densities ρ
    pub pressures: Vec<Real>,
    pub materials: Vec<Material>,

    pub boundary_segments: Vec<BoundarySegment>,

    particle_radius: Real,
    support_radius: Real,  // typically expressed as 'h'
    particle_volume: Real, // m_V
    dimension: Dimension,

    neighborhood: NeighborhoodSearch,
}

impl ParticleSystem {
    /// - `particle_radius`:    Half the spacing of particles in a resting fluid.
    /// - `smoothing_factor`:   Support radius in multiples of the particle diameter.
    pub fn new(particle_radius: Real, smoothing_factor: Real, dimension: Dimension) -> Result<ParticleSystem, ConfigError> {
        if !(particle_radius > 0.0 && particle_radius.is_finite()) {
            return Err(ConfigError::NonPositiveParticleRadius(particle_radius));
        }
        let particle_diameter = 2.0 * particle_radius;
        let support_radius = particle_diameter * smoothing_factor;
        if !(support_radius > 0.0 && support_radius.is_finite()) {
            return Err(ConfigError::NonPositiveSupportRadius(support_radius));
        }

        Ok(ParticleSystem {
            positions: Vec::new(),
            previous_positions: Vec::new(),
            velocities: Vec::new(),
            densities: Vec::new(),
            pressures: Vec::new(),
            materials: Vec::new(),

            boundary_segments: Vec::new(),

            particle_radius,
            support_radius,
            particle_volume: 0.8 * dimension.volume_scale(particle_diameter),
            dimension,

            neighborhood: NeighborhoodSearch::new(support_radius),
        })
    }

    pub fn particle_num(&self) -> usize {
        self.positions.len()
    }

    pub fn num_fluid_particles(&self) -> usize {
        self.materials.iter().filter(|&&m| m == Material::Fluid).count()
    }

    pub fn particle_radius(&self) -> Real {
        self.particle_radius
    }

    pub fn particle_diameter(&self) -> Real {
        2.0 * self.particle_radius
    }

    pub fn support_radius(&self) -> Real {
        self.support_radius
    }

    pub fn particle_volume(&self) -> Real {
        self.particle_volume
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn add_particle(&mut self, position: Point, velocity: Vector, density: Real, pressure: Real, material: Material) {
        self.positions.push(position);
        self.previous_positions.push(position);
        self.velocities.push(velocity);
        self.densities.push(density);
        self.pressures.push(pressure);
        self.materials.push(material);
    }

    /// Fills an axis aligned box with particles on a regular lattice with particle diameter spacing.
    pub fn add_cube(&mut self, lower_corner: Point, cube_size: Vector, velocity: Vector, density: Real, material: Material) {
        self.add_lattice(lower_corner, cube_size, velocity, density, material, Vector::zero);
    }

    /// Like `add_cube`, but every particle is offset by a random amount.
    /// - `jitter_amount`: Amount of jitter. 0 for perfect lattice. >1 and particles are no longer in a strict lattice.
    pub fn add_cube_jittered(
        &mut self,
        lower_corner: Point,
        cube_size: Vector,
        velocity: Vector,
        density: Real,
        material: Material,
        jitter_amount: Real,
        seed: u64,
    ) {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
        let jitter_factor = self.particle_diameter() * jitter_amount;
        self.add_lattice(lower_corner, cube_size, velocity, density, material, || {
            (rng.gen::<Vector>() - Vector::new(0.5, 0.5)) * jitter_factor
        });
    }

    fn add_lattice(
        &mut self,
        lower_corner: Point,
        cube_size: Vector,
        velocity: Vector,
        density: Real,
        material: Material,
        mut jitter: impl FnMut() -> Vector,
    ) {
        let step = self.particle_diameter();
        let num_particles_x = std::cmp::max(1, (cube_size.x / step).round() as usize);
        let num_particles_y = std::cmp::max(1, (cube_size.y / step).round() as usize);
        let num_particles = num_particles_x * num_particles_y;

        self.positions.reserve(num_particles);
        self.previous_positions.reserve(num_particles);
        self.velocities.reserve(num_particles);
        self.densities.reserve(num_particles);
        self.pressures.reserve(num_particles);
        self.materials.reserve(num_particles);

        for y in 0..num_particles_y {
            for x in 0..num_particles_x {
                let position = lower_corner + Vector::new(step * (x as Real), step * (y as Real)) + jitter();
                self.add_particle(position, velocity, density, 0.0, material);
            }
        }
    }

    pub fn add_boundary_line(&mut self, start: Point, end: Point) {
        self.boundary_segments.push(BoundarySegment::new(start, end));
    }

    /// Checks that all per-particle arrays have the same length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = self.positions.len();
        let lengths = [
            ("previous_positions", self.previous_positions.len()),
            ("velocities", self.velocities.len()),
            ("densities", self.densities.len()),
            ("pressures", self.pressures.len()),
            ("materials", self.materials.len()),
        ];
        for (field, actual) in lengths {
            if actual != expected {
                return Err(ConfigError::MismatchedFieldLength { field, expected, actual });
            }
        }
        Ok(())
    }

    /// Prepares a simulation tick: remembers the current positions as the tick's starting positions
    /// and rebuilds the neighborhood datastructure. Must be called before any neighbor query.
    pub fn initialize_particle_system(&mut self) -> Result<(), ConfigError> {
        microprofile::scope!("ParticleSystem", "initialize_particle_system");
        self.validate()?;
        self.previous_positions.copy_from_slice(&self.positions);
        self.neighborhood.update(&self.positions);
        Ok(())
    }

    /// Calls `f(j, r)` for every particle j != i within the support radius, where `r` = x_i - x_j.
    #[inline(always)]
    pub fn foreach_neighbor(&self, i: usize, mut f: impl FnMut(usize, Vector)) {
        debug_assert_eq!(
            self.neighborhood.num_particles(),
            self.positions.len(),
            "initialize_particle_system needs to be called before neighbor queries"
        );
        let xi = self.positions[i];
        let support_radius_sq = self.support_radius * self.support_radius;
        self.neighborhood.foreach_potential_neighbor(
            xi,
            #[inline(always)]
            |j| {
                let j = j as usize;
                if j == i {
                    return;
                }
                let r = xi - self.positions[j];
                if r.magnitude2() <= support_radius_sq {
                    f(j, r);
                }
            },
        );
    }
}
