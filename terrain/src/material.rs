// src/material.rs

use serde::{Deserialize, Serialize};

/// Inward UV inset applied to every atlas tile edge so bilinear filtering
/// never samples the neighboring tile.
pub const UV_INSET: f32 = 0.004;

/// Which atlas tile a terrain quad is textured with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureTile {
    Sand,
    Grass,
    Rock,
    Snow,
}

impl TextureTile {
    pub const ALL: [TextureTile; 4] = [TextureTile::Sand, TextureTile::Grass, TextureTile::Rock, TextureTile::Snow];

    /// Nominal region of the 2x2 atlas, before inset.
    pub fn atlas_rect(self) -> AtlasRect {
        match self {
            TextureTile::Sand => AtlasRect::new(0.0, 0.0, 0.5, 0.5),
            TextureTile::Grass => AtlasRect::new(0.5, 0.0, 1.0, 0.5),
            TextureTile::Rock => AtlasRect::new(0.0, 0.5, 0.5, 1.0),
            TextureTile::Snow => AtlasRect::new(0.5, 0.5, 1.0, 1.0),
        }
    }

    pub fn uv_rect(self) -> AtlasRect {
        self.atlas_rect().inset(UV_INSET)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            TextureTile::Sand => "sand",
            TextureTile::Grass => "grass",
            TextureTile::Rock => "rock",
            TextureTile::Snow => "snow",
        }
    }
}

/// Axis-aligned rectangle in atlas UV space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtlasRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl AtlasRect {
    pub const fn new(u0: f32, v0: f32, u1: f32, v1: f32) -> Self {
        Self { u0, v0, u1, v1 }
    }

    pub fn inset(&self, amount: f32) -> Self {
        Self {
            u0: self.u0 + amount,
            v0: self.v0 + amount,
            u1: self.u1 - amount,
            v1: self.v1 - amount,
        }
    }

    /// Strict containment: points on the rectangle's edge are outside.
    pub fn strictly_contains(&self, uv: [f32; 2]) -> bool {
        uv[0] > self.u0 && uv[0] < self.u1 && uv[1] > self.v0 && uv[1] < self.v1
    }
}

/// Height cutoffs (in world units, after scaling) for the atlas tiles.
///
/// Compared in a fixed order: snow, rock, grass, then sand as the catch-all.
/// Each band includes its lower bound. `sand` is the nominal floor of the
/// sand band and is never consulted by classification.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextureThresholds {
    pub snow: f32,
    pub rock: f32,
    pub grass: f32,
    pub sand: f32,
}

impl TextureThresholds {
    pub fn classify(&self, avg_height: f32) -> TextureTile {
        if avg_height >= self.snow {
            TextureTile::Snow
        } else if avg_height >= self.rock {
            TextureTile::Rock
        } else if avg_height >= self.grass {
            TextureTile::Grass
        } else {
            TextureTile::Sand
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.snow >= self.rock && self.rock >= self.grass && self.grass >= self.sand
    }
}

impl Default for TextureThresholds {
    fn default() -> Self {
        Self {
            snow: 12.0,
            rock: 6.0,
            grass: -4.0,
            sand: -16.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(12.0, TextureTile::Snow)]
    #[test_case(11.99, TextureTile::Rock)]
    #[test_case(6.0, TextureTile::Rock)]
    #[test_case(-4.0, TextureTile::Grass)]
    #[test_case(-4.01, TextureTile::Sand)]
    #[test_case(-100.0, TextureTile::Sand)]
    fn classify_bands(height: f32, expected: TextureTile) {
        assert_eq!(TextureThresholds::default().classify(height), expected);
    }

    #[test]
    fn unordered_thresholds_keep_priority() {
        // snow below rock: snow still wins anything at or above its cutoff
        let t = TextureThresholds { snow: 1.0, rock: 5.0, grass: 0.0, sand: -1.0 };
        assert!(!t.is_ordered());
        assert_eq!(t.classify(6.0), TextureTile::Snow);
        assert_eq!(t.classify(0.5), TextureTile::Grass);
    }

    #[test]
    fn inset_rects_stay_inside_their_quadrant() {
        for tile in TextureTile::ALL {
            let nominal = tile.atlas_rect();
            let uv = tile.uv_rect();
            for corner in [[uv.u0, uv.v0], [uv.u0, uv.v1], [uv.u1, uv.v0], [uv.u1, uv.v1]] {
                assert!(nominal.strictly_contains(corner), "{:?} corner {:?}", tile, corner);
            }
        }
    }
}
