//! Render-ready extraction of live particles
//!
//! Each pool is split into `workers` contiguous batches of `len / workers`
//! records that are mapped to quads in parallel; the leftover tail is mapped on
//! the calling thread after the batches join. Output order always matches pool
//! order, so frames stay visually stable regardless of worker scheduling.

use glam::Vec2;
use rayon::prelude::*;

use super::Pools;
use crate::simulation::{Element, MaterialKind, Particle};

/// One particle as an axis-aligned square in canvas pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DrawQuad {
    /// Top-left, top-right, bottom-right, bottom-left
    pub corners: [Vec2; 4],
    /// RGBA
    pub color: [u8; 4],
}

impl DrawQuad {
    /// Square of side `scale` centred on the particle's cell
    pub fn from_particle(particle: &Particle, scale: f32) -> Self {
        let center = particle.position.as_vec2() * scale;
        let half = scale / 2.0;
        Self {
            corners: [
                center + Vec2::new(-half, -half),
                center + Vec2::new(half, -half),
                center + Vec2::new(half, half),
                center + Vec2::new(-half, half),
            ],
            color: particle.color,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.corners[0]
    }

    pub fn max(&self) -> Vec2 {
        self.corners[2]
    }
}

/// Drawable records for one frame, grouped by material
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub sand: Vec<DrawQuad>,
    pub water: Vec<DrawQuad>,
    pub wall: Vec<DrawQuad>,
}

impl Snapshot {
    pub fn layer(&self, kind: MaterialKind) -> &[DrawQuad] {
        match kind {
            MaterialKind::Empty => &[],
            MaterialKind::Sand => &self.sand,
            MaterialKind::Water => &self.water,
            MaterialKind::Wall => &self.wall,
        }
    }

    /// Layers in material order (sand, water, wall)
    pub fn layers(&self) -> impl Iterator<Item = (MaterialKind, &[DrawQuad])> {
        MaterialKind::PARTICLES
            .into_iter()
            .map(move |kind| (kind, self.layer(kind)))
    }

    /// All quads in draw order
    pub fn quads(&self) -> impl Iterator<Item = &DrawQuad> {
        self.sand.iter().chain(&self.water).chain(&self.wall)
    }

    pub fn len(&self) -> usize {
        self.sand.len() + self.water.len() + self.wall.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds snapshots with a fixed fork-join over the rayon pool
#[derive(Clone, Debug)]
pub struct SnapshotBuilder {
    scale: f32,
    workers: usize,
}

impl SnapshotBuilder {
    /// Uses one batch per rayon worker thread
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale as f32,
            workers: rayon::current_num_threads().max(1),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn build(&self, pools: &Pools) -> Snapshot {
        Snapshot {
            sand: self.build_layer(pools.sand.as_slice()),
            water: self.build_layer(pools.water.as_slice()),
            wall: self.build_layer(pools.wall.as_slice()),
        }
    }

    /// Map one pool to quads, preserving pool order
    pub fn build_layer<T: Element>(&self, records: &[T]) -> Vec<DrawQuad> {
        let scale = self.scale;
        let mut quads = vec![DrawQuad::default(); records.len()];
        let batch = records.len() / self.workers;
        let split = batch * self.workers;

        if batch > 0 {
            // Disjoint output slices per batch, joined before returning
            quads[..split]
                .par_chunks_mut(batch)
                .zip(records[..split].par_chunks(batch))
                .for_each(|(out, src)| {
                    for (quad, record) in out.iter_mut().zip(src) {
                        *quad = DrawQuad::from_particle(record.particle(), scale);
                    }
                });
        }

        for (quad, record) in quads[split..].iter_mut().zip(&records[split..]) {
            *quad = DrawQuad::from_particle(record.particle(), scale);
        }
        quads
    }
}
