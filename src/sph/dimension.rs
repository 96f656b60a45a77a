use super::error::ConfigError;
use crate::units::Real;
use std::convert::TryFrom;

/// Spatial dimension of the simulation, selects kernel normalization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dimension {
    One,
    Two,
    Three,
}

impl Dimension {
    pub fn value(self) -> u32 {
        match self {
            Dimension::One => 1,
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }

    /// Normalization constant of the cubic spline kernel for h = 1.
    pub fn cubic_spline_constant(self) -> Real {
        match self {
            Dimension::One => 4.0 / 3.0,
            Dimension::Two => 40.0 / (7.0 * std::f64::consts::PI as Real),
            Dimension::Three => 8.0 / std::f64::consts::PI as Real,
        }
    }

    /// h^d
    pub fn volume_scale(self, length: Real) -> Real {
        length.powi(self.value() as i32)
    }
}

impl TryFrom<u32> for Dimension {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Dimension::One),
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            _ => Err(ConfigError::UnsupportedDimension(value)),
        }
    }
}
