mod erosion;
mod heightmap;
mod mesh;
mod seam;

pub use erosion::{DropletErosion, ErosionSimulator};
pub use heightmap::{chunk_erosion_seed, HeightLattice, HeightmapBuilder};
pub use mesh::{Aabb, MeshTessellator, TessellatedMesh};
pub use seam::{average_edges, stitch_pair, SeamAxis, SeamStitcher, StitchReport};

#[cfg(test)]
mod tests;
