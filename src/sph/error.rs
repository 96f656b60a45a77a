use crate::units::Real;
use std::fmt;

/// Invalid simulation setup. Reported once at construction, never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveParticleRadius(Real),
    NonPositiveSupportRadius(Real),
    UnsupportedDimension(u32),
    MismatchedFieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    NonPositiveReferenceDensity(Real),
    NonFiniteGravity {
        x: Real,
        y: Real,
    },
    NegativeViscosity(Real),
    NonPositiveTimestep(Real),
    InvalidRestitution {
        normal: Real,
        tangential: Real,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveParticleRadius(radius) => write!(f, "particle radius must be positive, got {}", radius),
            ConfigError::NonPositiveSupportRadius(h) => write!(f, "support radius must be positive, got {}", h),
            ConfigError::UnsupportedDimension(dim) => write!(f, "dimension must be 1, 2 or 3, got {}", dim),
            ConfigError::MismatchedFieldLength { field, expected, actual } => {
                write!(f, "particle field `{}` has {} entries, expected {}", field, actual, expected)
            }
            ConfigError::NonPositiveReferenceDensity(rho) => write!(f, "reference density must be positive, got {}", rho),
            ConfigError::NonFiniteGravity { x, y } => write!(f, "gravity must be finite, got ({}, {})", x, y),
            ConfigError::NegativeViscosity(mu) => write!(f, "viscosity must not be negative, got {}", mu),
            ConfigError::NonPositiveTimestep(dt) => write!(f, "timestep must be positive, got {}", dt),
            ConfigError::InvalidRestitution { normal, tangential } => write!(
                f,
                "restitution constants must lie in [0, 1], got normal {} and tangential {}",
                normal, tangential
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Fatal fault during a simulation tick. The tick is not retried.
#[derive(Debug, Clone, PartialEq)]
pub enum StepError {
    InvalidParticleSystem(ConfigError),
    NonFiniteState { particle: usize },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::InvalidParticleSystem(err) => write!(f, "particle system is inconsistent: {}", err),
            StepError::NonFiniteState { particle } => write!(f, "particle {} reached a non-finite state", particle),
        }
    }
}

impl std::error::Error for StepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StepError::InvalidParticleSystem(err) => Some(err),
            StepError::NonFiniteState { .. } => None,
        }
    }
}

impl From<ConfigError> for StepError {
    fn from(err: ConfigError) -> Self {
        StepError::InvalidParticleSystem(err)
    }
}
