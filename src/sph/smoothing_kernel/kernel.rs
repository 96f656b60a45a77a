use crate::units::Real;
use cgmath::InnerSpace;

/// SPH smoothing kernel
///
/// Only radially symmetric kernels with compact support are supported.
/// For |r| > support radius both the kernel and its gradient are exactly zero.
pub trait Kernel {
    /// Separations at or below this length are treated as a particle paired with itself.
    const DEGENERATE_DISTANCE: Real = 1.0e-5;

    /// Radius beyond which the kernel vanishes, typically expressed as 'h'.
    fn support_radius(&self) -> Real;

    /// Evaluates the kernel function for a given distance.
    /// `r_norm`:   Length of ri_to_rj
    fn evaluate(&self, r_norm: Real) -> Real;

    /// Evaluates the gradient of the kernel, i.e. the first derivative along the separation vector.
    /// Works for 1, 2 and 3 dimensional vectors.
    /// `r`:        Separation vector, ri - rj. Not normalized!
    fn gradient<V: InnerSpace<Scalar = Real>>(&self, r: V) -> V;
}
