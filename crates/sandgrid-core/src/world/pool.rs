//! Dense per-material particle storage

use crate::simulation::{Element, MaterialKind, Particle, Sand, Wall, Water};

/// Growable, densely packed store of one material's records.
///
/// Indices are handed out in insertion order and are always `0..len()`.
/// Only [`Pool::pop`] shrinks the pool; callers that remove from the middle
/// must first move the victim to the tail (see `ParticleGrid::remove`).
#[derive(Clone, Debug)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Element> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its index
    pub fn insert(&mut self, item: T) -> usize {
        let index = self.items.len();
        self.items.push(item);
        index
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Drop the tail record
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every record, keeping the allocation
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

/// One pool per pooled material
#[derive(Clone, Debug, Default)]
pub struct Pools {
    pub sand: Pool<Sand>,
    pub water: Pool<Water>,
    pub wall: Pool<Wall>,
}

impl Pools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live particles of `kind` (always 0 for empty space)
    pub fn len(&self, kind: MaterialKind) -> usize {
        match kind {
            MaterialKind::Empty => 0,
            MaterialKind::Sand => self.sand.len(),
            MaterialKind::Water => self.water.len(),
            MaterialKind::Wall => self.wall.len(),
        }
    }

    /// Live particles across all pools
    pub fn total(&self) -> usize {
        self.sand.len() + self.water.len() + self.wall.len()
    }

    pub fn particle(&self, kind: MaterialKind, index: usize) -> Option<&Particle> {
        match kind {
            MaterialKind::Empty => None,
            MaterialKind::Sand => self.sand.get(index).map(Element::particle),
            MaterialKind::Water => self.water.get(index).map(Element::particle),
            MaterialKind::Wall => self.wall.get(index).map(Element::particle),
        }
    }

    pub fn particle_mut(&mut self, kind: MaterialKind, index: usize) -> Option<&mut Particle> {
        match kind {
            MaterialKind::Empty => None,
            MaterialKind::Sand => self.sand.get_mut(index).map(Element::particle_mut),
            MaterialKind::Water => self.water.get_mut(index).map(Element::particle_mut),
            MaterialKind::Wall => self.wall.get_mut(index).map(Element::particle_mut),
        }
    }

    /// Tail record of the pool for `kind`
    pub fn last(&self, kind: MaterialKind) -> Option<&Particle> {
        match kind {
            MaterialKind::Empty => None,
            MaterialKind::Sand => self.sand.last().map(Element::particle),
            MaterialKind::Water => self.water.last().map(Element::particle),
            MaterialKind::Wall => self.wall.last().map(Element::particle),
        }
    }

    pub(crate) fn pop(&mut self, kind: MaterialKind) -> Option<Particle> {
        match kind {
            MaterialKind::Empty => None,
            MaterialKind::Sand => self.sand.pop().map(|e| e.particle),
            MaterialKind::Water => self.water.pop().map(|e| e.particle),
            MaterialKind::Wall => self.wall.pop().map(|e| e.particle),
        }
    }

    /// Visit every particle of one kind with its index
    pub fn for_each(&self, kind: MaterialKind, mut f: impl FnMut(usize, &Particle)) {
        match kind {
            MaterialKind::Empty => {}
            MaterialKind::Sand => self
                .sand
                .iter()
                .enumerate()
                .for_each(|(i, e)| f(i, e.particle())),
            MaterialKind::Water => self
                .water
                .iter()
                .enumerate()
                .for_each(|(i, e)| f(i, e.particle())),
            MaterialKind::Wall => self
                .wall
                .iter()
                .enumerate()
                .for_each(|(i, e)| f(i, e.particle())),
        }
    }

    pub fn clear(&mut self) {
        self.sand.clear();
        self.water.clear();
        self.wall.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::UVec2;

    #[test]
    fn test_insert_returns_dense_indices() {
        let mut pool = Pool::<Sand>::new();
        for i in 0..5 {
            assert_eq!(pool.insert(Sand::spawn(UVec2::new(i, 0), [0; 4])), i as usize);
        }
        assert_eq!(pool.len(), 5);
        assert_eq!(pool.last().unwrap().particle.position, UVec2::new(4, 0));
    }

    #[test]
    fn test_pop_shrinks_from_tail() {
        let mut pool = Pool::<Water>::new();
        pool.insert(Water::spawn(UVec2::new(0, 0), [0; 4]));
        pool.insert(Water::spawn(UVec2::new(1, 0), [0; 4]));
        let popped = pool.pop().unwrap();
        assert_eq!(popped.particle.position, UVec2::new(1, 0));
        assert_eq!(pool.len(), 1);
        assert!(pool.get(1).is_none());
    }

    #[test]
    fn test_pools_dispatch_by_kind() {
        let mut pools = Pools::new();
        pools.wall.insert(Wall::spawn(UVec2::new(2, 3), [80, 80, 80, 255]));
        pools.sand.insert(Sand::spawn(UVec2::new(0, 0), [0; 4]));

        assert_eq!(pools.len(MaterialKind::Wall), 1);
        assert_eq!(pools.len(MaterialKind::Water), 0);
        assert_eq!(pools.len(MaterialKind::Empty), 0);
        assert_eq!(pools.total(), 2);

        let wall = pools.particle(MaterialKind::Wall, 0).unwrap();
        assert_eq!(wall.position, UVec2::new(2, 3));
        assert!(pools.particle(MaterialKind::Empty, 0).is_none());

        pools.particle_mut(MaterialKind::Sand, 0).unwrap().in_freefall = true;
        assert!(pools.sand.get(0).unwrap().particle.in_freefall);
    }

    #[test]
    fn test_for_each_visits_in_index_order() {
        let mut pools = Pools::new();
        for x in 0..3 {
            pools.water.insert(Water::spawn(UVec2::new(x, 1), [0; 4]));
        }
        let mut seen = Vec::new();
        pools.for_each(MaterialKind::Water, |i, p| seen.push((i, p.position.x)));
        assert_eq!(seen, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_clear_empties_every_pool() {
        let mut pools = Pools::new();
        pools.sand.insert(Sand::spawn(UVec2::ZERO, [0; 4]));
        pools.water.insert(Water::spawn(UVec2::ONE, [0; 4]));
        pools.wall.insert(Wall::spawn(UVec2::new(2, 2), [0; 4]));
        pools.clear();
        assert_eq!(pools.total(), 0);
        assert!(pools.last(MaterialKind::Sand).is_none());
    }
}
