//! Error types for grid access and consistency checks

use glam::UVec2;
use thiserror::Error;

use crate::simulation::MaterialKind;

/// Failures when addressing or constructing the grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("canvas {canvas_width}x{canvas_height} at scale {scale} yields no cells")]
    InvalidDimensions {
        canvas_width: u32,
        canvas_height: u32,
        scale: u32,
    },
}

/// A broken link between the grid and the particle pools
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("cell {cell} references {kind} #{index} which is at {actual}")]
    PositionMismatch {
        cell: UVec2,
        kind: MaterialKind,
        index: usize,
        actual: UVec2,
    },

    #[error("cell {cell} references {kind} #{index} but the pool holds {len}")]
    DanglingReference {
        cell: UVec2,
        kind: MaterialKind,
        index: usize,
        len: usize,
    },

    #[error("{kind} #{index} at {position} is not referenced by its cell")]
    OrphanParticle {
        kind: MaterialKind,
        index: usize,
        position: UVec2,
    },
}
