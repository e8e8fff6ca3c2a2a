//! Scenario action types

use sandgrid_core::simulation::MaterialKind;
use serde::{Deserialize, Serialize};

/// One scripted action. Coordinates are canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScenarioAction {
    /// Paint with the configured brush for `material`
    Paint { material: MaterialKind, x: i32, y: i32 },

    /// Draw a one-pixel line of `material`
    Line {
        material: MaterialKind,
        from: (i32, i32),
        to: (i32, i32),
    },

    /// Erase with the configured eraser brush
    Erase { x: i32, y: i32 },

    /// Remove every particle
    Clear,

    /// Stop ticking; snapshots continue
    Pause,

    /// Resume ticking
    Resume,

    /// End the run after this frame's actions
    Stop,

    /// Log a message
    Log { message: String },
}

/// An action scheduled for a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioStep {
    pub frame: u64,
    pub action: ScenarioAction,
}

impl ScenarioStep {
    pub fn new(frame: u64, action: ScenarioAction) -> Self {
        Self { frame, action }
    }
}
