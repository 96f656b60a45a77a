pub use self::boundary::*;
pub use self::config::*;
pub use self::dimension::Dimension;
pub use self::error::*;
pub use self::forces::ForceModel;
pub use self::particlesystem::*;
pub use self::simulation::Simulation;
pub use self::solver::*;
pub use self::timemanager::TimeManager;

pub mod boundary;
pub mod config;
pub mod dimension;
pub mod error;
pub mod forces;
mod morton;
pub mod neighborhood_search;
pub mod particlesystem;
pub mod simulation;
pub mod smoothing_kernel;
pub mod solver;
pub mod timemanager;
