use super::kernel::Kernel;
use crate::sph::dimension::Dimension;
use crate::sph::error::ConfigError;
use crate::units::Real;
use cgmath::{InnerSpace, Zero};

/// Cubic Spline smoothing kernel.
///
/// Classic cubic spline cernel from "J. Monaghan, Smoothed Particle Hydrodynamics, “Annual Review of Astronomy and Astrophysics”, 30 (1992), pp. 543-574."
/// Written in the variant where the support radius h (not h/2) is the distance at which the kernel vanishes.
/// Normalization factors from https://pysph.readthedocs.io/en/latest/reference/kernels.html#monaghan1992
#[derive(Copy, Clone, Debug)]
pub struct CubicSpline {
    h: Real,
    h_inv: Real,
    dimension: Dimension,
    normalizer: Real,
    normalizer_grad: Real,
}

impl CubicSpline {
    pub fn new(support_radius: Real, dimension: Dimension) -> Result<CubicSpline, ConfigError> {
        if !(support_radius > 0.0 && support_radius.is_finite()) {
            return Err(ConfigError::NonPositiveSupportRadius(support_radius));
        }
        let normalizer = dimension.cubic_spline_constant() / dimension.volume_scale(support_radius);
        Ok(CubicSpline {
            h: support_radius,
            h_inv: 1.0 / support_radius,
            dimension,
            normalizer,
            normalizer_grad: 6.0 * normalizer,
        })
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }
}

impl Kernel for CubicSpline {
    #[inline]
    fn support_radius(&self) -> Real {
        self.h
    }

    #[inline]
    fn evaluate(&self, r_norm: Real) -> Real {
        let q = r_norm * self.h_inv;
        if q <= 0.5 {
            let q2 = q * q;
            self.normalizer * (6.0 * q2 * q - 6.0 * q2 + 1.0)
        } else if q <= 1.0 {
            self.normalizer * (1.0 - q).powi(3) * 2.0
        } else {
            0.0
        }
    }

    #[inline]
    fn gradient<V: InnerSpace<Scalar = Real>>(&self, r: V) -> V {
        let r_norm = r.magnitude();
        let q = r_norm * self.h_inv;
        if r_norm <= Self::DEGENERATE_DISTANCE || q > 1.0 {
            return V::zero();
        }
        let grad_q = r * (self.h_inv / r_norm);
        if q <= 0.5 {
            grad_q * (self.normalizer_grad * q * (3.0 * q - 2.0))
        } else {
            let factor = 1.0 - q;
            grad_q * (-self.normalizer_grad * factor * factor)
        }
    }
}
