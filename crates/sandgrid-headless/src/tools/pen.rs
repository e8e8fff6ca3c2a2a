//! Pen tool for drawing materials

use super::{Brush, Tool};
use sandgrid_core::simulation::MaterialKind;
use sandgrid_core::world::World;

/// Pen tool that draws a specific material
pub struct PenTool {
    material: MaterialKind,
}

impl PenTool {
    /// Create a new pen tool for the given material
    pub fn new(material: MaterialKind) -> Self {
        Self { material }
    }

    /// Set the material this pen draws
    pub fn set_material(&mut self, material: MaterialKind) {
        self.material = material;
    }

    /// Get the current material
    pub fn material(&self) -> MaterialKind {
        self.material
    }
}

impl Tool for PenTool {
    fn name(&self) -> &str {
        "Pen"
    }

    fn apply(&self, world: &mut World, x: i32, y: i32, brush: Brush) -> usize {
        brush
            .points(x, y)
            .into_iter()
            .filter(|&(px, py)| world.add_material(self.material, px, py))
            .count()
    }
}
