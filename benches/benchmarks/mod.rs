pub mod boundary_collision;
pub mod neighborhood_search;
pub mod simulation_step;
pub mod smoothing_kernel;
