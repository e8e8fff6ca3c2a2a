pub mod world;

// Re-export the data crate so callers only need one dependency
pub mod simulation {
    pub use sandgrid_simulation::*;
}
