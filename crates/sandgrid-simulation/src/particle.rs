//! Particle records stored in the per-material pools

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::MaterialKind;

/// Per-particle state shared by every pooled material
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Current grid coordinate
    pub position: UVec2,
    /// Grid coordinate at the end of the previous tick
    pub prev_position: UVec2,
    /// Only `y` drives motion: whole cells to fall this tick, stored rounded
    pub velocity: Vec2,
    /// Moved last tick or has empty space below
    pub in_freefall: bool,
    /// RGBA (cosmetic only)
    pub color: [u8; 4],
}

impl Particle {
    pub fn new(position: UVec2, color: [u8; 4]) -> Self {
        Self {
            position,
            prev_position: position,
            velocity: Vec2::ZERO,
            in_freefall: false,
            color,
        }
    }

    /// Whether the particle changed cell since the previous tick
    pub fn has_moved(&self) -> bool {
        self.position != self.prev_position
    }

    /// Drop all kinetic state
    pub fn settle(&mut self) {
        self.velocity = Vec2::ZERO;
        self.in_freefall = false;
    }

    /// Candidate downward steps for this tick
    pub fn fall_steps(&self) -> u32 {
        self.velocity.y.max(0.0) as u32
    }
}

/// A record type stored in one material's pool
pub trait Element: Clone + Send + Sync {
    const KIND: MaterialKind;

    fn spawn(position: UVec2, color: [u8; 4]) -> Self;

    fn particle(&self) -> &Particle;

    fn particle_mut(&mut self) -> &mut Particle;
}

/// Sand grain
#[derive(Clone, Debug, PartialEq)]
pub struct Sand {
    pub particle: Particle,
    /// Reserved for inertia rules, not read by any rule yet
    pub inertia_resistance: f32,
}

impl Element for Sand {
    const KIND: MaterialKind = MaterialKind::Sand;

    fn spawn(position: UVec2, color: [u8; 4]) -> Self {
        Self {
            particle: Particle::new(position, color),
            inertia_resistance: 0.0,
        }
    }

    fn particle(&self) -> &Particle {
        &self.particle
    }

    fn particle_mut(&mut self) -> &mut Particle {
        &mut self.particle
    }
}

/// Water droplet
#[derive(Clone, Debug, PartialEq)]
pub struct Water {
    pub particle: Particle,
}

impl Element for Water {
    const KIND: MaterialKind = MaterialKind::Water;

    fn spawn(position: UVec2, color: [u8; 4]) -> Self {
        Self {
            particle: Particle::new(position, color),
        }
    }

    fn particle(&self) -> &Particle {
        &self.particle
    }

    fn particle_mut(&mut self) -> &mut Particle {
        &mut self.particle
    }
}

/// Static wall block
#[derive(Clone, Debug, PartialEq)]
pub struct Wall {
    pub particle: Particle,
}

impl Element for Wall {
    const KIND: MaterialKind = MaterialKind::Wall;

    fn spawn(position: UVec2, color: [u8; 4]) -> Self {
        Self {
            particle: Particle::new(position, color),
        }
    }

    fn particle(&self) -> &Particle {
        &self.particle
    }

    fn particle_mut(&mut self) -> &mut Particle {
        &mut self.particle
    }
}
