use nalgebra::{Point3, Vector3};

use crate::{
    generator::HeightLattice,
    material::{TextureThresholds, TextureTile},
};

/// Local-space bounding box of a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn from_points(points: &[[f32; 3]]) -> Self {
        let mut iter = points.iter().map(|p| Point3::new(p[0], p[1], p[2]));
        let Some(first) = iter.next() else {
            return Self { min: Point3::origin(), max: Point3::origin() };
        };
        iter.fold(Self { min: first, max: first }, |acc, p| Self {
            min: acc.min.inf(&p),
            max: acc.max.sup(&p),
        })
    }

    pub fn extents(&self) -> Vector3<f32> {
        self.max - self.min
    }
}

/// Renderable surface of one chunk.
///
/// Every quad owns its four vertices, so adjacent quads never share one and
/// can carry different atlas tiles. Shading is faceted as a result.
#[derive(Clone, Debug, PartialEq)]
pub struct TessellatedMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    /// Atlas tile per quad, in emission order (`x` major, then `z`).
    pub tiles: Vec<TextureTile>,
    pub bounds: Aabb,
}

impl TessellatedMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Quads per tile, indexed by [`TextureTile::index`].
    pub fn tile_histogram(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for tile in &self.tiles {
            counts[tile.index()] += 1;
        }
        counts
    }
}

/// Turns a finished height lattice into faceted, atlas-textured geometry.
#[derive(Clone, Copy, Debug)]
pub struct MeshTessellator {
    max_height: f32,
    thresholds: TextureThresholds,
}

impl MeshTessellator {
    pub fn new(max_height: f32, thresholds: TextureThresholds) -> Self {
        Self { max_height, thresholds }
    }

    /// Maps a normalized sample to a world height centered on zero.
    pub fn world_height(&self, sample: f32) -> f32 {
        sample * self.max_height - self.max_height / 2.0
    }

    pub fn tessellate(&self, lattice: &HeightLattice) -> TessellatedMesh {
        let dims = lattice.dims();
        self.tessellate_raw(lattice.as_slice(), dims.width, dims.depth)
    }

    /// Tessellates a raw `(width + 1) x (depth + 1)` lattice indexed
    /// `x * (depth + 1) + z`. Panics when the length does not match.
    pub fn tessellate_raw(&self, heights: &[f32], width: usize, depth: usize) -> TessellatedMesh {
        let nodes_z = depth + 1;
        assert!(
            heights.len() == (width + 1) * nodes_z,
            "height lattice holds {} samples, expected {}x{}",
            heights.len(),
            width + 1,
            nodes_z
        );

        let quads = width * depth;
        let mut positions: Vec<[f32; 3]> = Vec::with_capacity(quads * 4);
        let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(quads * 4);
        let mut indices: Vec<u32> = Vec::with_capacity(quads * 6);
        let mut tiles: Vec<TextureTile> = Vec::with_capacity(quads);

        let height_at = |x: usize, z: usize| self.world_height(heights[x * nodes_z + z]);

        for x in 0..width {
            for z in 0..depth {
                let y00 = height_at(x, z);
                let y10 = height_at(x + 1, z);
                let y01 = height_at(x, z + 1);
                let y11 = height_at(x + 1, z + 1);

                let (fx, fz) = (x as f32, z as f32);
                let base = positions.len() as u32;
                positions.push([fx, y00, fz]);
                positions.push([fx, y01, fz + 1.0]);
                positions.push([fx + 1.0, y10, fz]);
                positions.push([fx + 1.0, y11, fz + 1.0]);

                let avg = (y00 + y10 + y01 + y11) / 4.0;
                let tile = self.thresholds.classify(avg);
                let rect = tile.uv_rect();
                uvs.push([rect.u0, rect.v0]);
                uvs.push([rect.u0, rect.v1]);
                uvs.push([rect.u1, rect.v0]);
                uvs.push([rect.u1, rect.v1]);
                tiles.push(tile);

                let (v00, v01, v10, v11) = (base, base + 1, base + 2, base + 3);
                indices.extend([v00, v01, v10, v10, v01, v11]);
            }
        }

        let normals = compute_normals(&positions, &indices);
        let bounds = Aabb::from_points(&positions);

        TessellatedMesh {
            positions,
            normals,
            uvs,
            indices,
            tiles,
            bounds,
        }
    }
}

/// Area-weighted vertex normals from the final buffers.
fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc: Vec<Vector3<f32>> = vec![Vector3::zeros(); positions.len()];
    let point = |i: u32| {
        let p = positions[i as usize];
        Vector3::new(p[0], p[1], p[2])
    };

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (point(tri[0]), point(tri[1]), point(tri[2]));
        let face = (b - a).cross(&(c - a));
        for &i in tri {
            acc[i as usize] += face;
        }
    }

    acc.into_iter()
        .map(|n| {
            let n = n.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::y);
            [n.x, n.y, n.z]
        })
        .collect()
}
