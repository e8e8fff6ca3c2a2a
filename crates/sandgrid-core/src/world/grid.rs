//! Grid - fixed-size cell table mapping coordinates to pool references

use glam::UVec2;

use super::GridError;
use crate::simulation::MaterialKind;

/// One grid slot: empty space or a typed index into a material pool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Sand(usize),
    Water(usize),
    Wall(usize),
}

impl Cell {
    /// Build a reference to `index` in the pool of `kind` (Empty ignores the index)
    pub fn reference(kind: MaterialKind, index: usize) -> Self {
        match kind {
            MaterialKind::Empty => Cell::Empty,
            MaterialKind::Sand => Cell::Sand(index),
            MaterialKind::Water => Cell::Water(index),
            MaterialKind::Wall => Cell::Wall(index),
        }
    }

    pub fn material(self) -> MaterialKind {
        match self {
            Cell::Empty => MaterialKind::Empty,
            Cell::Sand(_) => MaterialKind::Sand,
            Cell::Water(_) => MaterialKind::Water,
            Cell::Wall(_) => MaterialKind::Wall,
        }
    }

    /// Pool index, None for empty cells
    pub fn index(self) -> Option<usize> {
        match self {
            Cell::Empty => None,
            Cell::Sand(i) | Cell::Water(i) | Cell::Wall(i) => Some(i),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Dense row-major cell table. Dimensions never change after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Index = x + y * width
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Check a signed coordinate against `[0, width) x [0, height)`
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell at a caller-supplied coordinate, failing loudly when outside the grid
    pub fn cell_at(&self, x: usize, y: usize) -> Result<Cell, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.cells[x + y * self.width])
    }

    /// Cell at a signed coordinate, None outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if self.in_bounds(x, y) {
            Some(self.cells[x as usize + y as usize * self.width])
        } else {
            None
        }
    }

    /// Material at a signed coordinate, None outside the grid
    pub fn material_at(&self, x: i32, y: i32) -> Option<MaterialKind> {
        self.get(x, y).map(Cell::material)
    }

    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.material_at(x, y) == Some(MaterialKind::Empty)
    }

    pub fn is_sand(&self, x: i32, y: i32) -> bool {
        self.material_at(x, y) == Some(MaterialKind::Sand)
    }

    pub fn is_water(&self, x: i32, y: i32) -> bool {
        self.material_at(x, y) == Some(MaterialKind::Water)
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.material_at(x, y) == Some(MaterialKind::Wall)
    }

    /// Iterate all cells with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = (UVec2, Cell)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, &cell)| {
            (UVec2::new((i % width) as u32, (i / width) as u32), cell)
        })
    }

    // Internal accessors take coordinates already known to be in bounds

    fn offset(&self, pos: UVec2) -> usize {
        pos.x as usize + pos.y as usize * self.width
    }

    pub(crate) fn cell(&self, pos: UVec2) -> Cell {
        self.cells[self.offset(pos)]
    }

    pub(crate) fn set(&mut self, pos: UVec2, cell: Cell) {
        let i = self.offset(pos);
        self.cells[i] = cell;
    }

    pub(crate) fn swap(&mut self, a: UVec2, b: UVec2) {
        let (ia, ib) = (self.offset(a), self.offset(b));
        self.cells.swap(ia, ib);
    }

    /// Reset every cell to empty, keeping the allocation
    pub(crate) fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(8, 4);
        assert_eq!(grid.area(), 32);
        assert!(grid.iter().all(|(_, cell)| cell.is_empty()));
    }

    #[test]
    fn test_cell_at_out_of_bounds() {
        let grid = Grid::new(10, 10);
        assert_eq!(grid.cell_at(9, 9), Ok(Cell::Empty));
        assert_eq!(
            grid.cell_at(10, 0),
            Err(GridError::OutOfBounds {
                x: 10,
                y: 0,
                width: 10,
                height: 10
            })
        );
        assert!(grid.cell_at(0, 10).is_err());
    }

    #[test]
    fn test_predicates_false_outside_grid() {
        let grid = Grid::new(5, 5);
        for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 5), (i32::MIN, i32::MAX)] {
            assert!(!grid.is_empty(x, y));
            assert!(!grid.is_sand(x, y));
            assert!(!grid.is_water(x, y));
            assert!(!grid.is_wall(x, y));
        }
        assert!(grid.is_empty(4, 4));
    }

    #[test]
    fn test_row_major_layout() {
        let mut grid = Grid::new(4, 3);
        grid.set(UVec2::new(1, 2), Cell::Wall(0));
        assert_eq!(grid.cell_at(1, 2), Ok(Cell::Wall(0)));
        assert!(grid.is_wall(1, 2));
        let (pos, _) = grid.iter().nth(1 + 2 * 4).unwrap();
        assert_eq!(pos, UVec2::new(1, 2));
    }

    #[test]
    fn test_swap_and_reset() {
        let mut grid = Grid::new(3, 3);
        grid.set(UVec2::new(0, 0), Cell::Sand(7));
        grid.swap(UVec2::new(0, 0), UVec2::new(2, 2));
        assert!(grid.is_empty(0, 0));
        assert_eq!(grid.cell(UVec2::new(2, 2)), Cell::Sand(7));

        grid.reset();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert!(grid.iter().all(|(_, cell)| cell == Cell::Empty));
    }

    #[test]
    fn test_cell_reference_round_trip() {
        for kind in MaterialKind::PARTICLES {
            let cell = Cell::reference(kind, 3);
            assert_eq!(cell.material(), kind);
            assert_eq!(cell.index(), Some(3));
        }
        assert_eq!(Cell::reference(MaterialKind::Empty, 3), Cell::Empty);
        assert_eq!(Cell::Empty.index(), None);
    }
}
