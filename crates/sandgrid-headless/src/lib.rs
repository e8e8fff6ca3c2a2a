//! # Sandgrid Headless
//!
//! Runs a falling-sand world without a window: built-in or RON scenarios
//! paint, erase, pause and clear the world while the frame loop ticks it,
//! logs periodic stats and can save the final frame as PNG.

pub mod app;
pub mod config;
pub mod render;
pub mod scenario;
pub mod tools;

pub use app::{App, RunSummary};
pub use config::AppConfig;

/// Common imports for internal use
pub mod prelude {
    pub use sandgrid_core::simulation::MaterialKind;
    pub use sandgrid_core::world::{Snapshot, World, WorldConfig};
}
