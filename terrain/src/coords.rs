// src/coords.rs

use serde::{Deserialize, Serialize};

/// Chunk indices on the XZ plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoords {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoords {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Neighbor sharing this chunk's `x = W` column.
    pub fn right(&self) -> Self {
        Self { x: self.x + 1, z: self.z }
    }

    /// Neighbor sharing this chunk's `z = D` row.
    pub fn forward(&self) -> Self {
        Self { x: self.x, z: self.z + 1 }
    }

    pub fn world_offset(&self, dims: ChunkDims) -> WorldOffset {
        WorldOffset {
            x: self.x * dims.width as i32,
            z: self.z * dims.depth as i32,
        }
    }

    /// All coordinates generated for `radius`: a square of `(2 * (radius - 1) + 1)^2`
    /// chunks centered on the origin, ordered z-major.
    pub fn square(radius: i32) -> Vec<ChunkCoords> {
        let half = radius - 1;
        if half < 0 {
            return Vec::new();
        }
        let mut coords = Vec::with_capacity(((2 * half + 1) * (2 * half + 1)) as usize);
        for z in -half..=half {
            for x in -half..=half {
                coords.push(ChunkCoords { x, z });
            }
        }
        coords
    }
}

impl std::fmt::Display for ChunkCoords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Cells per chunk along each axis. A chunk has one more node than cells per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChunkDims {
    pub width: usize,
    pub depth: usize,
}

impl ChunkDims {
    pub fn new(width: usize, depth: usize) -> Self {
        Self { width, depth }
    }

    pub fn nodes_x(&self) -> usize {
        self.width + 1
    }

    pub fn nodes_z(&self) -> usize {
        self.depth + 1
    }

    pub fn node_count(&self) -> usize {
        self.nodes_x() * self.nodes_z()
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.depth
    }
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self { width: CHUNK_SIZE, depth: CHUNK_SIZE }
    }
}

/// World-space sample offset of a chunk's `(0, 0)` node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldOffset {
    pub x: i32,
    pub z: i32,
}

impl WorldOffset {
    pub fn to_world_pos(&self, local_x: usize, local_z: usize) -> (f64, f64) {
        (
            (self.x as i64 + local_x as i64) as f64,
            (self.z as i64 + local_z as i64) as f64,
        )
    }
}

/// Planar extent `[min_x, max_x] x [min_z, max_z]` covered by a chunk, for
/// placing surface content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanarBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl PlanarBounds {
    pub fn of_chunk(offset: WorldOffset, dims: ChunkDims) -> Self {
        Self {
            min_x: offset.x,
            max_x: offset.x + dims.width as i32,
            min_z: offset.z,
            max_z: offset.z + dims.depth as i32,
        }
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x as f32 && x <= self.max_x as f32 && z >= self.min_z as f32 && z <= self.max_z as f32
    }
}

/// Default cells per edge of a chunk.
pub const CHUNK_SIZE: usize = 32;

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1, 1)]
    #[test_case(2, 9)]
    #[test_case(3, 25)]
    fn square_counts(radius: i32, expected: usize) {
        assert_eq!(ChunkCoords::square(radius).len(), expected);
    }

    #[test]
    fn square_is_centered() {
        let coords = ChunkCoords::square(2);
        assert!(coords.contains(&ChunkCoords::new(-1, -1)));
        assert!(coords.contains(&ChunkCoords::new(1, 1)));
        assert!(!coords.contains(&ChunkCoords::new(2, 0)));
    }

    #[test]
    fn offsets_and_bounds() {
        let dims = ChunkDims::new(4, 6);
        let offset = ChunkCoords::new(-2, 3).world_offset(dims);
        assert_eq!(offset, WorldOffset { x: -8, z: 18 });
        let bounds = PlanarBounds::of_chunk(offset, dims);
        assert_eq!((bounds.min_x, bounds.max_x), (-8, -4));
        assert_eq!((bounds.min_z, bounds.max_z), (18, 24));
        assert!(bounds.contains(-6.0, 20.0));
    }
}
