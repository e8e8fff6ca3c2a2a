//! Eraser tool

use super::{Brush, Tool};
use sandgrid_core::world::World;

/// Eraser tool that deletes whatever the brush covers
pub struct EraseTool;

impl Tool for EraseTool {
    fn name(&self) -> &str {
        "Eraser"
    }

    fn apply(&self, world: &mut World, x: i32, y: i32, brush: Brush) -> usize {
        brush
            .points(x, y)
            .into_iter()
            .filter(|&(px, py)| world.delete_particle_at(px, py).is_some())
            .count()
    }
}
