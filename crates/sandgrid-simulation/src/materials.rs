//! Material kinds and color palettes

use serde::{Deserialize, Serialize};
use std::fmt;

/// What occupies a grid cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Implicit empty space, never stored in a pool
    #[default]
    Empty,
    /// Falls, piles up, slides diagonally
    Sand,
    /// Falls, spreads sideways
    Water,
    /// Never moves, blocks everything else
    Wall,
}

impl MaterialKind {
    /// Pooled materials in stepping order
    pub const PARTICLES: [MaterialKind; 3] = [Self::Sand, Self::Water, Self::Wall];

    pub fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Sand => "sand",
            Self::Water => "water",
            Self::Wall => "wall",
        }
    }

    /// True for every kind backed by a particle pool
    pub fn is_particle(self) -> bool {
        !matches!(self, Self::Empty)
    }

    /// Color ranges new particles of this kind sample from (None for empty space)
    pub fn palette(self) -> Option<Palette> {
        match self {
            Self::Empty => None,
            Self::Sand => Some(Palette::Rgb {
                red: (255, 255),
                green: (242, 249),
                blue: (0, 144),
            }),
            Self::Water => Some(Palette::Rgb {
                red: (75, 109),
                green: (120, 169),
                blue: (255, 255),
            }),
            Self::Wall => Some(Palette::Gray { min: 74, max: 123 }),
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-channel color ranges (inclusive) a material samples particle colors from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Independent range per channel
    Rgb {
        red: (u8, u8),
        green: (u8, u8),
        blue: (u8, u8),
    },
    /// One sampled value shared by all three channels
    Gray { min: u8, max: u8 },
}

impl Palette {
    /// Build an opaque RGBA color. `pick(lo, hi)` must return a value in `lo..=hi`.
    pub fn sample(&self, mut pick: impl FnMut(u8, u8) -> u8) -> [u8; 4] {
        match *self {
            Palette::Rgb { red, green, blue } => [
                pick(red.0, red.1),
                pick(green.0, green.1),
                pick(blue.0, blue.1),
                255,
            ],
            Palette::Gray { min, max } => {
                let v = pick(min, max);
                [v, v, v, 255]
            }
        }
    }
}
