//! Brush tools for painting into a world

mod erase;
mod pen;

pub use erase::EraseTool;
pub use pen::PenTool;

use sandgrid_core::world::World;
use serde::{Deserialize, Serialize};

/// Square brush sampling every `stride` pixels
///
/// Covers `center - half_extent .. center + half_extent` (end exclusive) on
/// both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brush {
    pub half_extent: i32,
    pub stride: u32,
}

impl Brush {
    pub fn new(half_extent: i32, stride: u32) -> Self {
        Self {
            half_extent,
            stride,
        }
    }

    /// A brush touching only the centre pixel
    pub fn dot() -> Self {
        Self::new(0, 1)
    }

    /// Canvas pixels covered when centred on (cx, cy), row by row
    pub fn points(&self, cx: i32, cy: i32) -> Vec<(i32, i32)> {
        let step = self.stride.max(1) as usize;
        let half = self.half_extent.max(0);
        if half == 0 {
            return vec![(cx, cy)];
        }
        (cy - half..cy + half)
            .step_by(step)
            .flat_map(|y| (cx - half..cx + half).step_by(step).map(move |x| (x, y)))
            .collect()
    }
}

/// Trait for drawing tools
pub trait Tool {
    /// Tool display name
    fn name(&self) -> &str;

    /// Apply tool at canvas pixel (x, y). Returns how many cells changed.
    fn apply(&self, world: &mut World, x: i32, y: i32, brush: Brush) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush_points_half_open() {
        let points = Brush::new(4, 4).points(10, 20);
        assert_eq!(points, vec![(6, 16), (10, 16), (6, 20), (10, 20)]);
    }

    #[test]
    fn test_brush_point_count() {
        // 50 / 4 rounded up per axis
        assert_eq!(Brush::new(25, 4).points(0, 0).len(), 13 * 13);
        assert_eq!(Brush::new(50, 1).points(0, 0).len(), 100 * 100);
    }

    #[test]
    fn test_dot_brush_hits_center() {
        let points = Brush::dot().points(3, 4);
        assert_eq!(points, vec![(3, 4)]);
    }

    #[test]
    fn test_zero_stride_treated_as_one() {
        assert_eq!(Brush::new(2, 0).points(0, 0).len(), 16);
    }
}
