/// Smoothing Kernels.
pub use self::cubic::CubicSpline;
pub use self::kernel::Kernel;

mod cubic;
mod kernel;
