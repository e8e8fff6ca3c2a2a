//! Per-material movement rules, run once per tick

use glam::{IVec2, UVec2};

use super::{Grid, ParticleGrid, PhysicsParams};
use crate::simulation::MaterialKind;
use crate::world::{SimStats, WorldRng};

/// Movement rules for each pooled material
pub struct ParticleStepper;

impl ParticleStepper {
    /// Advance every pool once, in the fixed order sand, water, wall
    pub fn tick<R: WorldRng>(
        cells: &mut ParticleGrid,
        physics: &PhysicsParams,
        dt: f32,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        Self::tick_sand(cells, physics, dt, stats, rng);
        Self::tick_water(cells, physics, dt, stats, rng);
        Self::tick_wall(cells);
    }

    /// Sand falls straight down while in freefall, otherwise tries one diagonal step
    pub fn tick_sand<R: WorldRng>(
        cells: &mut ParticleGrid,
        physics: &PhysicsParams,
        dt: f32,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        for index in 0..cells.pools.sand.len() {
            let Some((pos, freefall, steps)) =
                Self::apply_gravity(cells, MaterialKind::Sand, index, physics, dt)
            else {
                continue;
            };

            let target = if freefall {
                stats.record_freefall();
                // Water stops a falling grain like any other obstruction
                let fallen = Self::cast(&cells.grid, pos, IVec2::Y, steps);
                if let Some(p) = cells.pools.particle_mut(MaterialKind::Sand, index) {
                    p.velocity.y = fallen as f32;
                }
                Some(Self::offset(pos, IVec2::Y, fallen))
            } else {
                // Resting grain slides diagonally into air or water
                let dx = if rng.gen_f32() > physics.diagonal_bias {
                    -1
                } else {
                    1
                };
                let diagonal = pos.as_ivec2() + IVec2::new(dx, 1);
                let open = cells.grid.is_empty(diagonal.x, diagonal.y)
                    || cells.grid.is_water(diagonal.x, diagonal.y);
                open.then(|| diagonal.as_uvec2())
            };

            Self::finish(cells, MaterialKind::Sand, index, pos, target, stats);
        }
    }

    /// Water falls like sand while in freefall, otherwise hops sideways a random distance
    pub fn tick_water<R: WorldRng>(
        cells: &mut ParticleGrid,
        physics: &PhysicsParams,
        dt: f32,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        for index in 0..cells.pools.water.len() {
            let Some((pos, freefall, steps)) =
                Self::apply_gravity(cells, MaterialKind::Water, index, physics, dt)
            else {
                continue;
            };

            let target = if freefall {
                stats.record_freefall();
                let fallen = Self::cast(&cells.grid, pos, IVec2::Y, steps);
                if let Some(p) = cells.pools.particle_mut(MaterialKind::Water, index) {
                    p.velocity.y = fallen as f32;
                }
                Self::offset(pos, IVec2::Y, fallen)
            } else {
                let distance = rng.gen_up_to(physics.max_lateral_spread);
                let direction = if rng.gen_bool() { IVec2::NEG_X } else { IVec2::X };
                let moved = Self::cast(&cells.grid, pos, direction, distance);
                if let Some(p) = cells.pools.particle_mut(MaterialKind::Water, index) {
                    p.velocity.x = moved as f32;
                }
                Self::offset(pos, direction, moved)
            };

            Self::finish(cells, MaterialKind::Water, index, pos, Some(target), stats);
        }
    }

    /// Walls are static obstructions; nothing to update
    pub fn tick_wall(_cells: &mut ParticleGrid) {}

    /// Refresh the freefall flag and vertical velocity of one particle.
    ///
    /// Returns its position, whether it is in freefall, and how many cells it may fall.
    fn apply_gravity(
        cells: &mut ParticleGrid,
        kind: MaterialKind,
        index: usize,
        physics: &PhysicsParams,
        dt: f32,
    ) -> Option<(UVec2, bool, u32)> {
        let pos = cells.pools.particle(kind, index)?.position;
        let below = pos.as_ivec2() + IVec2::Y;
        let below_empty = cells.grid.is_empty(below.x, below.y);

        let p = cells.pools.particle_mut(kind, index)?;
        p.in_freefall = p.has_moved() || below_empty;
        if p.in_freefall {
            p.velocity.y = (p.velocity.y + physics.gravity * dt)
                .min(physics.terminal_velocity)
                .max(0.0)
                .round();
        } else {
            p.velocity.y = 0.0;
        }
        Some((pos, p.in_freefall, p.fall_steps()))
    }

    /// Count free cells from `from` along `dir`, at most `max_steps`.
    ///
    /// Stops one short of the first non-empty cell; the grid edge counts as solid.
    fn cast(grid: &Grid, from: UVec2, dir: IVec2, max_steps: u32) -> u32 {
        let origin = from.as_ivec2();
        for i in 1..=max_steps {
            let probe = origin + dir * i as i32;
            if !grid.is_empty(probe.x, probe.y) {
                return i - 1;
            }
        }
        max_steps
    }

    fn offset(pos: UVec2, dir: IVec2, steps: u32) -> UVec2 {
        (pos.as_ivec2() + dir * steps as i32).as_uvec2()
    }

    /// Apply the resolved move and remember where the particle ended up
    fn finish(
        cells: &mut ParticleGrid,
        kind: MaterialKind,
        index: usize,
        pos: UVec2,
        target: Option<UVec2>,
        stats: &mut dyn SimStats,
    ) {
        if let Some(target) = target.filter(|&t| t != pos) {
            cells.swap_cells(pos, target);
            stats.record_particle_moved();
        }
        if let Some(p) = cells.pools.particle_mut(kind, index) {
            p.prev_position = p.position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Cell, NoopStats, TickCounters};

    /// Test RNG that returns deterministic values
    struct TestRng {
        bool_value: bool,
        f32_value: f32,
        up_to_value: u32,
    }

    impl TestRng {
        fn new(bool_value: bool, f32_value: f32, up_to_value: u32) -> Self {
            Self {
                bool_value,
                f32_value,
                up_to_value,
            }
        }
    }

    impl WorldRng for TestRng {
        fn gen_bool(&mut self) -> bool {
            self.bool_value
        }

        fn gen_f32(&mut self) -> f32 {
            self.f32_value
        }

        fn gen_up_to(&mut self, max: u32) -> u32 {
            self.up_to_value.min(max)
        }
    }

    fn place(cells: &mut ParticleGrid, kind: MaterialKind, x: u32, y: u32) {
        cells.insert(kind, UVec2::new(x, y), || [128, 128, 128, 255]);
    }

    /// Fill the bottom row with wall
    fn floor(cells: &mut ParticleGrid) {
        let y = cells.grid().height() as u32 - 1;
        for x in 0..cells.grid().width() as u32 {
            place(cells, MaterialKind::Wall, x, y);
        }
    }

    fn sand_position(cells: &ParticleGrid) -> UVec2 {
        cells.pools().sand.get(0).unwrap().particle.position
    }

    #[test]
    fn test_sand_falls_when_air_below() {
        let mut cells = ParticleGrid::new(10, 10);
        place(&mut cells, MaterialKind::Sand, 5, 0);
        let physics = PhysicsParams::default();
        let mut rng = TestRng::new(true, 0.0, 0);

        // 98.1 * 0.05 = 4.9 rounds to 5 cells
        ParticleStepper::tick(&mut cells, &physics, 0.05, &mut NoopStats, &mut rng);

        assert!(cells.grid().is_empty(5, 0));
        assert_eq!(sand_position(&cells), UVec2::new(5, 5));
        assert!(cells.grid().is_sand(5, 5));
        cells.verify_consistency().unwrap();
    }

    #[test]
    fn test_fall_clamped_to_terminal_velocity() {
        let mut cells = ParticleGrid::new(4, 100);
        place(&mut cells, MaterialKind::Sand, 1, 0);
        let physics = PhysicsParams::default();
        let mut rng = TestRng::new(true, 0.0, 0);

        ParticleStepper::tick(&mut cells, &physics, 10.0, &mut NoopStats, &mut rng);

        let sand = cells.pools().sand.get(0).unwrap().particle;
        assert_eq!(sand.position, UVec2::new(1, 20));
        assert_eq!(sand.velocity.y, 20.0);
        assert_eq!(sand.prev_position, sand.position);
    }

    #[test]
    fn test_sand_lands_above_obstruction() {
        let mut cells = ParticleGrid::new(5, 10);
        place(&mut cells, MaterialKind::Sand, 2, 0);
        place(&mut cells, MaterialKind::Wall, 2, 4);
        let physics = PhysicsParams::default();
        let mut rng = TestRng::new(true, 0.0, 0);

        ParticleStepper::tick(&mut cells, &physics, 1.0, &mut NoopStats, &mut rng);

        assert_eq!(sand_position(&cells), UVec2::new(2, 3));
        assert_eq!(cells.pools().sand.get(0).unwrap().particle.velocity.y, 3.0);
    }

    #[test]
    fn test_falling_sand_stops_on_water() {
        let mut cells = ParticleGrid::new(5, 10);
        floor(&mut cells);
        place(&mut cells, MaterialKind::Water, 2, 8);
        place(&mut cells, MaterialKind::Sand, 2, 0);
        let physics = PhysicsParams::default();
        let mut rng = TestRng::new(true, 0.0, 0);

        ParticleStepper::tick_sand(&mut cells, &physics, 1.0, &mut NoopStats, &mut rng);

        assert_eq!(sand_position(&cells), UVec2::new(2, 7));
        assert!(cells.grid().is_water(2, 8));
    }

    #[test]
    fn test_resting_sand_slides_down_left_on_high_draw() {
        let mut cells = ParticleGrid::new(5, 5);
        place(&mut cells, MaterialKind::Wall, 2, 3);
        place(&mut cells, MaterialKind::Sand, 2, 2);
        let physics = PhysicsParams::default();
        let mut rng = TestRng::new(true, 0.9, 0);

        ParticleStepper::tick_sand(&mut cells, &physics, 0.016, &mut NoopStats, &mut rng);

        assert_eq!(sand_position(&cells), UVec2::new(1, 3));
        assert!(cells.grid().is_empty(2, 2));
    }

    #[test]
    fn test_resting_sand_slides_down_right_on_low_draw() {
        let mut cells = ParticleGrid::new(5, 5);
        place(&mut cells, MaterialKind::Wall, 2, 3);
        place(&mut cells, MaterialKind::Sand, 2, 2);
        let physics = PhysicsParams::default();
        // Exactly 0.5 is not greater than the bias, so the grain goes right
        let mut rng = TestRng::new(true, 0.5, 0);

        ParticleStepper::tick_sand(&mut cells, &physics, 0.016, &mut NoopStats, &mut rng);

        assert_eq!(sand_position(&cells), UVec2::new(3, 3));
    }

    #[test]
    fn test_resting_sand_swaps_with_diagonal_water() {
        let mut cells = ParticleGrid::new(5, 5);
        floor(&mut cells);
        place(&mut cells, MaterialKind::Wall, 2, 3);
        place(&mut cells, MaterialKind::Water, 3, 3);
        place(&mut cells, MaterialKind::Sand, 2, 2);
        let physics = PhysicsParams::default();
        let mut rng = TestRng::new(true, 0.1, 0);

        ParticleStepper::tick_sand(&mut cells, &physics, 0.016, &mut NoopStats, &mut rng);

        assert!(cells.grid().is_sand(3, 3));
        assert!(cells.grid().is_water(2, 2));
        let water = cells.pools().water.get(0).unwrap().particle;
        assert_eq!(water.position, UVec2::new(2, 2));
        cells.verify_consistency().unwrap();
    }

    #[test]
    fn test_resting_sand_blocked_diagonal_stays() {
        let mut cells = ParticleGrid::new(5, 5);
        floor(&mut cells);
        place(&mut cells, MaterialKind::Sand, 2, 3);
        let physics = PhysicsParams::default();
        let mut rng = TestRng::new(true, 0.9, 0);

        let mut stats = TickCounters::default();
        ParticleStepper::tick_sand(&mut cells, &physics, 0.016, &mut stats, &mut rng);

        assert_eq!(sand_position(&cells), UVec2::new(2, 3));
        assert_eq!(stats.particles_moved, 0);
        assert_eq!(stats.freefalling, 0);
    }

    #[test]
    fn test_sand_at_left_edge_does_not_leave_grid() {
        let mut cells = ParticleGrid::new(3, 3);
        floor(&mut cells);
        place(&mut cells, MaterialKind::Sand, 0, 1);
        let physics = PhysicsParams::default();
        let mut rng = TestRng::new(true, 0.9, 0);

        ParticleStepper::tick_sand(&mut cells, &physics, 0.016, &mut NoopStats, &mut rng);

        assert_eq!(sand_position(&cells), UVec2::new(0, 1));
    }

    #[test]
    fn test_water_spreads_left_until_blocked() {
        let mut cells = ParticleGrid::new(12, 3);
        floor(&mut cells);
        place(&mut cells, MaterialKind::Wall, 3, 1);
        place(&mut cells, MaterialKind::Water, 8, 1);
        let physics = PhysicsParams::default();
        // Wants 10 cells to the left but the wall at x = 3 stops it at x = 4
        let mut rng = TestRng::new(true, 0.0, 10);

        ParticleStepper::tick_water(&mut cells, &physics, 0.016, &mut NoopStats, &mut rng);

        let water = cells.pools().water.get(0).unwrap().particle;
        assert_eq!(water.position, UVec2::new(4, 1));
        assert_eq!(water.velocity.x, 4.0);
        assert!(cells.grid().is_empty(8, 1));
    }

    #[test]
    fn test_water_spreads_right_limited_by_draw() {
        let mut cells = ParticleGrid::new(20, 3);
        floor(&mut cells);
        place(&mut cells, MaterialKind::Water, 2, 1);
        let physics = PhysicsParams::default();
        let mut rng = TestRng::new(false, 0.0, 3);

        ParticleStepper::tick_water(&mut cells, &physics, 0.016, &mut NoopStats, &mut rng);

        assert_eq!(
            cells.pools().water.get(0).unwrap().particle.position,
            UVec2::new(5, 1)
        );
    }

    #[test]
    fn test_water_stops_at_grid_edge() {
        let mut cells = ParticleGrid::new(6, 2);
        floor(&mut cells);
        place(&mut cells, MaterialKind::Water, 4, 0);
        let physics = PhysicsParams::default();
        let mut rng = TestRng::new(false, 0.0, 10);

        ParticleStepper::tick_water(&mut cells, &physics, 0.016, &mut NoopStats, &mut rng);

        assert_eq!(
            cells.pools().water.get(0).unwrap().particle.position,
            UVec2::new(5, 0)
        );
    }

    #[test]
    fn test_water_falls_before_spreading() {
        let mut cells = ParticleGrid::new(5, 10);
        place(&mut cells, MaterialKind::Water, 2, 0);
        let physics = PhysicsParams::default();
        let mut rng = TestRng::new(true, 0.0, 10);

        ParticleStepper::tick_water(&mut cells, &physics, 0.03, &mut NoopStats, &mut rng);

        // 98.1 * 0.03 = 2.94 rounds to 3, no sideways hop while falling
        assert_eq!(
            cells.pools().water.get(0).unwrap().particle.position,
            UVec2::new(2, 3)
        );
    }

    #[test]
    fn test_landed_sand_comes_to_rest() {
        let mut cells = ParticleGrid::new(3, 4);
        floor(&mut cells);
        place(&mut cells, MaterialKind::Sand, 1, 0);
        let physics = PhysicsParams::default();
        let mut rng = TestRng::new(true, 0.0, 0);
        let mut stats = TickCounters::default();

        // Falls two cells onto the floor
        ParticleStepper::tick_sand(&mut cells, &physics, 1.0, &mut stats, &mut rng);
        let sand = cells.pools().sand.get(0).unwrap().particle;
        assert_eq!(sand.position, UVec2::new(1, 2));
        assert!(sand.in_freefall);
        assert_eq!(sand.velocity.y, 2.0);
        assert_eq!(stats.freefalling, 1);
        assert_eq!(stats.particles_moved, 1);

        // Floor below and both diagonals blocked: freefall cleared, velocity reset
        stats.reset();
        ParticleStepper::tick_sand(&mut cells, &physics, 1.0, &mut stats, &mut rng);
        let sand = cells.pools().sand.get(0).unwrap().particle;
        assert_eq!(sand.position, UVec2::new(1, 2));
        assert!(!sand.in_freefall);
        assert_eq!(sand.velocity.y, 0.0);
        assert_eq!(stats, TickCounters::default());
    }

    #[test]
    fn test_walls_never_move() {
        let mut cells = ParticleGrid::new(5, 5);
        place(&mut cells, MaterialKind::Wall, 2, 0);
        let physics = PhysicsParams::default();
        let mut rng = TestRng::new(true, 0.9, 10);

        for _ in 0..10 {
            ParticleStepper::tick(&mut cells, &physics, 1.0, &mut NoopStats, &mut rng);
        }

        assert!(cells.grid().is_wall(2, 0));
        assert_eq!(
            cells.pools().wall.get(0).unwrap().particle.position,
            UVec2::new(2, 0)
        );
    }

    #[test]
    fn test_cast_counts_free_cells() {
        let mut grid = Grid::new(6, 1);
        grid.set(UVec2::new(4, 0), Cell::Wall(0));
        assert_eq!(ParticleStepper::cast(&grid, UVec2::new(0, 0), IVec2::X, 10), 3);
        assert_eq!(ParticleStepper::cast(&grid, UVec2::new(0, 0), IVec2::X, 2), 2);
        assert_eq!(ParticleStepper::cast(&grid, UVec2::new(0, 0), IVec2::NEG_X, 5), 0);
        assert_eq!(ParticleStepper::cast(&grid, UVec2::new(5, 0), IVec2::X, 0), 0);
    }
}
