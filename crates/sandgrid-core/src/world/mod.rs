//! World management - grid, particle pools, stepping and snapshots

mod error;
mod grid;
mod particle_grid;
mod pool;
pub mod rng_trait;
pub mod snapshot;
pub mod stats;
mod stepper;
#[allow(clippy::module_inception)]
mod world;
pub mod world_config;

pub use error::{GridError, InvariantViolation};
pub use grid::{Cell, Grid};
pub use particle_grid::ParticleGrid;
pub use pool::{Pool, Pools};
pub use rng_trait::WorldRng;
pub use snapshot::{DrawQuad, Snapshot, SnapshotBuilder};
pub use stats::{NoopStats, SimStats, TickCounters};
pub use stepper::ParticleStepper;
pub use world::World;
pub use world_config::{PhysicsParams, WorldConfig};
