//! Material kinds and particle records for Sandgrid
//!
//! This crate provides the foundational data types for the grid simulation:
//! - Material kinds and color palettes (MaterialKind, Palette)
//! - Particle records stored in the per-material pools (Particle, Sand, Water, Wall)
//! - The Element trait tying a record type to its material kind

mod materials;
mod particle;

pub use materials::{MaterialKind, Palette};
pub use particle::{Element, Particle, Sand, Wall, Water};
