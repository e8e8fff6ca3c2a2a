//! Construction-time configuration for a simulation world

use serde::{Deserialize, Serialize};

use super::GridError;

/// Tunable constants of the movement rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Downward acceleration in cells/sec^2
    pub gravity: f32,
    /// Upper bound on cells fallen per tick
    pub terminal_velocity: f32,
    /// Largest sideways hop a resting water particle may attempt
    pub max_lateral_spread: u32,
    /// Resting sand tries down-left when a uniform draw exceeds this, down-right otherwise
    pub diagonal_bias: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: 98.1,
            terminal_velocity: 20.0,
            max_lateral_spread: 10,
            diagonal_bias: 0.5,
        }
    }
}

/// Canvas size, cell scale, seed and physics for a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Pixels per cell side
    pub scale: u32,
    /// Seed for the world's random generator
    pub seed: u64,
    pub physics: PhysicsParams,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1000,
            canvas_height: 1000,
            scale: 4,
            seed: 42,
            physics: PhysicsParams::default(),
        }
    }
}

impl WorldConfig {
    /// Config for a grid of exactly `width x height` cells at scale 1
    pub fn with_cells(width: u32, height: u32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            scale: 1,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Grid size in cells: canvas divided by scale
    pub fn grid_dimensions(&self) -> Result<(usize, usize), GridError> {
        let invalid = GridError::InvalidDimensions {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            scale: self.scale,
        };
        if self.scale == 0 {
            return Err(invalid);
        }
        let width = (self.canvas_width / self.scale) as usize;
        let height = (self.canvas_height / self.scale) as usize;
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        Ok((width, height))
    }
}
