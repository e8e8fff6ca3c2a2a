//! Driver configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `sandgrid.ron` in the working directory, or the file passed with `--config`
//! 3. Environment variables prefixed with `SANDGRID_`
//!
//! Example environment variable: `SANDGRID_WORLD__SEED=7`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use sandgrid_core::simulation::MaterialKind;
use sandgrid_core::world::WorldConfig;
use serde::{Deserialize, Serialize};

use crate::tools::Brush;

/// Main driver configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub brush: BrushConfig,
}

/// Frame loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Frames to run before exiting
    pub frames: u64,
    /// Seconds of simulated time per tick
    pub dt: f32,
    /// Simulated seconds between stats reports
    pub stats_interval_secs: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            dt: 1.0 / 60.0,
            stats_interval_secs: 1.0,
        }
    }
}

/// Brush shape per tool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub sand: Brush,
    pub water: Brush,
    pub wall: Brush,
    pub erase: Brush,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            sand: Brush::new(25, 4),
            water: Brush::new(25, 4),
            wall: Brush::new(10, 4),
            erase: Brush::new(50, 1),
        }
    }
}

impl BrushConfig {
    /// Brush used when painting `kind` (the eraser brush for empty space)
    pub fn for_material(&self, kind: MaterialKind) -> Brush {
        match kind {
            MaterialKind::Empty => self.erase,
            MaterialKind::Sand => self.sand,
            MaterialKind::Water => self.water,
            MaterialKind::Wall => self.wall,
        }
    }
}

impl AppConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `path` if given (must exist), otherwise `sandgrid.ron` (optional)
    /// 3. Environment variables prefixed with `SANDGRID_` (highest priority)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Ron).required(true),
            None => File::with_name("sandgrid")
                .format(FileFormat::Ron)
                .required(false),
        };

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("world.canvas_width", 1000_i64)?
            .set_default("world.canvas_height", 1000_i64)?
            .set_default("world.scale", 4_i64)?
            .set_default("world.seed", 42_i64)?
            .set_default("run.frames", 600_i64)?
            .set_default("run.dt", 1.0 / 60.0)?
            .set_default("run.stats_interval_secs", 1.0)?
            // Layer 2: Config file
            .add_source(file)
            // Layer 3: Environment variables (SANDGRID_RUN__FRAMES, etc.)
            .add_source(
                Environment::with_prefix("SANDGRID")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
