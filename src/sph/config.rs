use super::error::ConfigError;
use crate::units::*;

/// Damping applied when a particle bounces off a boundary segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Restitution {
    pub normal: Real,     // μ_n, fraction of normal velocity kept (and reversed)
    pub tangential: Real, // μ_t, friction along the wall
}

impl Default for Restitution {
    fn default() -> Self {
        Restitution {
            normal: 0.98,
            tangential: 0.02,
        }
    }
}

/// Process-wide constants of a simulation, fixed when the simulation is constructed.
/// Only the timestep may be changed later, see `Simulation::set_dt`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub gravity: Vector,         // global gravity accelleration in m/s²
    pub viscosity: Real,         // μ, laminar viscosity coefficient
    pub reference_density: Real, // ρ0, rest density of the fluid
    pub dt: Real,                // timestep in seconds
    pub restitution: Restitution,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            gravity: Vector::new(0.0, -1.8),
            viscosity: 0.08,
            reference_density: 1000.0,
            dt: 1.0e-2,
            restitution: Default::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.reference_density > 0.0 && self.reference_density.is_finite()) {
            return Err(ConfigError::NonPositiveReferenceDensity(self.reference_density));
        }
        if !(self.gravity.x.is_finite() && self.gravity.y.is_finite()) {
            return Err(ConfigError::NonFiniteGravity {
                x: self.gravity.x,
                y: self.gravity.y,
            });
        }
        if !(self.viscosity >= 0.0 && self.viscosity.is_finite()) {
            return Err(ConfigError::NegativeViscosity(self.viscosity));
        }
        validate_timestep(self.dt)?;
        let in_unit_range = |value: Real| (0.0..=1.0).contains(&value);
        if !in_unit_range(self.restitution.normal) || !in_unit_range(self.restitution.tangential) {
            return Err(ConfigError::InvalidRestitution {
                normal: self.restitution.normal,
                tangential: self.restitution.tangential,
            });
        }
        Ok(())
    }
}

pub(super) fn validate_timestep(dt: Real) -> Result<(), ConfigError> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveTimestep(dt))
    }
}
