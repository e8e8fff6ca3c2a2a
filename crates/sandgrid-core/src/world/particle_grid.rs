//! Grid and pools bound together, plus the mutation primitives that keep them in sync
//!
//! Every cell that references `(kind, index)` must hold the coordinate of
//! `pools[kind][index].position`, and every pool is dense. All mutation goes
//! through [`ParticleGrid::swap_cells`], [`ParticleGrid::insert`],
//! [`ParticleGrid::remove`] and [`ParticleGrid::remove_all`].

use glam::UVec2;

use super::{Cell, Grid, InvariantViolation, Pools};
use crate::simulation::{Element, MaterialKind, Particle, Sand, Wall, Water};

/// Spatial fields exchanged by a cell swap
#[derive(Clone, Copy)]
struct Spatial {
    position: UVec2,
    prev_position: UVec2,
    color: Option<[u8; 4]>,
}

/// The cell table and the per-material pools it points into
#[derive(Clone, Debug)]
pub struct ParticleGrid {
    pub(crate) grid: Grid,
    pub(crate) pools: Pools,
}

impl ParticleGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: Grid::new(width, height),
            pools: Pools::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    /// Material and record stored at a grid coordinate
    pub fn particle_at(&self, x: i32, y: i32) -> Option<(MaterialKind, &Particle)> {
        let cell = self.grid.get(x, y)?;
        let kind = cell.material();
        self.pools
            .particle(kind, cell.index()?)
            .map(|particle| (kind, particle))
    }

    fn in_bounds(&self, pos: UVec2) -> bool {
        (pos.x as usize) < self.grid.width() && (pos.y as usize) < self.grid.height()
    }

    /// Empty cells carry no state: synthesize it from the coordinate
    fn spatial(&self, cell: Cell, pos: UVec2) -> Spatial {
        match cell
            .index()
            .and_then(|index| self.pools.particle(cell.material(), index))
        {
            Some(p) => Spatial {
                position: p.position,
                prev_position: p.prev_position,
                color: Some(p.color),
            },
            None => Spatial {
                position: pos,
                prev_position: pos,
                color: None,
            },
        }
    }

    fn receive(&mut self, cell: Cell, from: Spatial, same_material: bool) {
        let Some(index) = cell.index() else {
            return;
        };
        if let Some(p) = self.pools.particle_mut(cell.material(), index) {
            p.position = from.position;
            p.prev_position = from.prev_position;
            if same_material {
                if let Some(color) = from.color {
                    p.color = color;
                }
            }
        }
    }

    /// Exchange two cells and the spatial state of the particles they reference.
    ///
    /// Colors move along only when both sides hold the same material.
    /// Both coordinates must be inside the grid.
    pub fn swap_cells(&mut self, a: UVec2, b: UVec2) {
        if a == b {
            return;
        }
        let (cell_a, cell_b) = (self.grid.cell(a), self.grid.cell(b));
        let (spatial_a, spatial_b) = (self.spatial(cell_a, a), self.spatial(cell_b, b));
        let same_material = cell_a.material() == cell_b.material();

        self.receive(cell_a, spatial_b, same_material);
        self.receive(cell_b, spatial_a, same_material);
        self.grid.swap(a, b);
    }

    /// Place a new particle of `kind` at `pos`.
    ///
    /// Sand and water need an empty target. A wall evicts any non-wall occupant
    /// first. `color` is only called when the insertion happens. Returns the new
    /// pool index, or None when nothing was inserted.
    pub fn insert(
        &mut self,
        kind: MaterialKind,
        pos: UVec2,
        color: impl FnOnce() -> [u8; 4],
    ) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        match (kind, self.grid.cell(pos)) {
            (MaterialKind::Empty, _) => return None,
            (MaterialKind::Wall, Cell::Wall(_)) => return None,
            (MaterialKind::Wall, Cell::Empty) => {}
            (MaterialKind::Wall, _) => {
                self.remove(pos);
            }
            (_, Cell::Empty) => {}
            _ => return None,
        }

        let cell = match kind {
            MaterialKind::Empty => return None,
            MaterialKind::Sand => Cell::Sand(self.pools.sand.insert(Sand::spawn(pos, color()))),
            MaterialKind::Water => {
                Cell::Water(self.pools.water.insert(Water::spawn(pos, color())))
            }
            MaterialKind::Wall => Cell::Wall(self.pools.wall.insert(Wall::spawn(pos, color()))),
        };
        self.grid.set(pos, cell);
        cell.index()
    }

    /// Delete whatever occupies `pos` in O(1).
    ///
    /// The pool's tail particle is located through its own recorded position and
    /// swapped into the vacated cell, then the tail slot is dropped. Pool indices
    /// of the tail particle change; no other index is touched.
    pub fn remove(&mut self, pos: UVec2) -> Option<MaterialKind> {
        if !self.in_bounds(pos) {
            return None;
        }
        let cell = self.grid.cell(pos);
        let kind = cell.material();
        let index = cell.index()?;

        if let Some(p) = self.pools.particle_mut(kind, index) {
            p.settle();
        }
        if let Some(last) = self.pools.last(kind).map(|p| p.position) {
            self.swap_cells(pos, last);
        }
        self.pools.pop(kind);
        self.grid.set(pos, Cell::Empty);
        Some(kind)
    }

    /// Remove the particle stored at `index` in the pool of `kind`
    pub fn remove_particle(&mut self, kind: MaterialKind, index: usize) -> bool {
        match self.pools.particle(kind, index).map(|p| p.position) {
            Some(pos) => self.remove(pos).is_some(),
            None => false,
        }
    }

    /// Clear every pool and reset every cell, keeping the dimensions
    pub fn remove_all(&mut self) {
        self.pools.clear();
        self.grid.reset();
    }

    /// Check both directions of the grid/pool mapping
    pub fn verify_consistency(&self) -> Result<(), InvariantViolation> {
        for (cell_pos, cell) in self.grid.iter() {
            let Some(index) = cell.index() else {
                continue;
            };
            let kind = cell.material();
            match self.pools.particle(kind, index) {
                None => {
                    return Err(InvariantViolation::DanglingReference {
                        cell: cell_pos,
                        kind,
                        index,
                        len: self.pools.len(kind),
                    });
                }
                Some(p) if p.position != cell_pos => {
                    return Err(InvariantViolation::PositionMismatch {
                        cell: cell_pos,
                        kind,
                        index,
                        actual: p.position,
                    });
                }
                Some(_) => {}
            }
        }

        let mut orphan = None;
        for kind in MaterialKind::PARTICLES {
            self.pools.for_each(kind, |index, p| {
                if orphan.is_some() {
                    return;
                }
                let referenced = self.in_bounds(p.position)
                    && self.grid.cell(p.position) == Cell::reference(kind, index);
                if !referenced {
                    orphan = Some(InvariantViolation::OrphanParticle {
                        kind,
                        index,
                        position: p.position,
                    });
                }
            });
        }
        match orphan {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }
}
