//! World - owns the cell table, particle pools and random generator

use glam::UVec2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use super::{
    Cell, Grid, GridError, InvariantViolation, NoopStats, ParticleGrid, ParticleStepper, Pools,
    SimStats, Snapshot, SnapshotBuilder, WorldConfig, WorldRng,
};
use crate::simulation::{MaterialKind, Particle};

/// A falling-sand simulation on a fixed grid
///
/// All coordinates taken by the add/delete methods are canvas pixels; they are
/// divided by the configured scale to find the cell.
pub struct World<R: WorldRng = Xoshiro256StarStar> {
    cells: ParticleGrid,
    config: WorldConfig,
    snapshot_builder: SnapshotBuilder,
    rng: R,
}

impl World<Xoshiro256StarStar> {
    /// Create an empty world whose generator is seeded from `config.seed`
    pub fn new(config: WorldConfig) -> Result<Self, GridError> {
        let rng = Xoshiro256StarStar::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: WorldRng> World<R> {
    /// Create an empty world driven by the given generator
    pub fn with_rng(config: WorldConfig, rng: R) -> Result<Self, GridError> {
        let (width, height) = config.grid_dimensions()?;
        log::info!(
            "Created {}x{} cell world (scale {}, seed {})",
            width,
            height,
            config.scale,
            config.seed
        );
        Ok(Self {
            cells: ParticleGrid::new(width, height),
            snapshot_builder: SnapshotBuilder::new(config.scale),
            config,
            rng,
        })
    }

    /// Replace the snapshot builder, e.g. to pin the worker count
    pub fn with_snapshot_builder(mut self, builder: SnapshotBuilder) -> Self {
        self.snapshot_builder = builder;
        self
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.cells.grid().width()
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.cells.grid().height()
    }

    pub fn scale(&self) -> u32 {
        self.config.scale
    }

    pub fn grid(&self) -> &Grid {
        self.cells.grid()
    }

    pub fn pools(&self) -> &Pools {
        self.cells.pools()
    }

    pub fn cells(&self) -> &ParticleGrid {
        &self.cells
    }

    /// Map a canvas pixel to its cell, None when outside the grid
    pub fn to_grid_coords(&self, x: i32, y: i32) -> Option<UVec2> {
        if x < 0 || y < 0 {
            return None;
        }
        let scale = self.config.scale as i32;
        let (cx, cy) = (x / scale, y / scale);
        self.grid()
            .in_bounds(cx, cy)
            .then(|| UVec2::new(cx as u32, cy as u32))
    }

    pub fn add_sand(&mut self, x: i32, y: i32) -> bool {
        self.add_material(MaterialKind::Sand, x, y)
    }

    pub fn add_water(&mut self, x: i32, y: i32) -> bool {
        self.add_material(MaterialKind::Water, x, y)
    }

    /// Walls replace sand or water; adding a wall onto a wall does nothing
    pub fn add_wall(&mut self, x: i32, y: i32) -> bool {
        self.add_material(MaterialKind::Wall, x, y)
    }

    /// Place a particle of `kind` at canvas pixel (x, y). Returns true if one was inserted.
    pub fn add_material(&mut self, kind: MaterialKind, x: i32, y: i32) -> bool {
        let Some(palette) = kind.palette() else {
            return false;
        };
        let Some(pos) = self.to_grid_coords(x, y) else {
            log::trace!("Ignored {} at ({}, {}): outside the grid", kind, x, y);
            return false;
        };
        let rng = &mut self.rng;
        let inserted = self
            .cells
            .insert(kind, pos, || palette.sample(|lo, hi| rng.gen_channel(lo, hi)));
        if inserted.is_none() {
            log::trace!("Ignored {} at cell {}: occupied", kind, pos);
        }
        inserted.is_some()
    }

    /// Delete whatever occupies canvas pixel (x, y). Returns the removed material.
    pub fn delete_particle_at(&mut self, x: i32, y: i32) -> Option<MaterialKind> {
        let pos = self.to_grid_coords(x, y)?;
        self.cells.remove(pos)
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.tick_with_stats(dt, &mut NoopStats);
    }

    /// Advance the simulation by `dt` seconds, reporting events to `stats`
    pub fn tick_with_stats(&mut self, dt: f32, stats: &mut dyn SimStats) {
        ParticleStepper::tick(
            &mut self.cells,
            &self.config.physics,
            dt,
            stats,
            &mut self.rng,
        );
    }

    /// Remove every particle, keeping the grid dimensions
    pub fn remove_all(&mut self) {
        log::debug!(
            "Clearing world ({} particles)",
            self.cells.pools().total()
        );
        self.cells.remove_all();
    }

    /// Drawable quads for every live particle, grouped by material
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_builder.build(self.cells.pools())
    }

    /// Cell at grid coordinate (x, y)
    pub fn cell_at(&self, x: usize, y: usize) -> Result<Cell, GridError> {
        self.grid().cell_at(x, y)
    }

    /// Material and record at grid coordinate (x, y)
    pub fn particle_at(&self, x: i32, y: i32) -> Option<(MaterialKind, &Particle)> {
        self.cells.particle_at(x, y)
    }

    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.grid().is_empty(x, y)
    }

    pub fn is_sand(&self, x: i32, y: i32) -> bool {
        self.grid().is_sand(x, y)
    }

    pub fn is_water(&self, x: i32, y: i32) -> bool {
        self.grid().is_water(x, y)
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.grid().is_wall(x, y)
    }

    pub fn particle_count(&self, kind: MaterialKind) -> usize {
        self.cells.pools().len(kind)
    }

    pub fn total_particles(&self) -> usize {
        self.cells.pools().total()
    }

    pub fn verify_consistency(&self) -> Result<(), InvariantViolation> {
        self.cells.verify_consistency()
    }
}
