// src/prelude.rs
//! A convenient prelude re-exporting common terrain types.

pub use crate::chunk::{ChunkConsumer, ChunkOrchestrator, ChunkRecord, ChunkTable, FinishedChunk};
pub use crate::config::{DropletParams, ErosionConfig, NoiseConfig, TerrainConfig};
pub use crate::coords::{ChunkCoords, ChunkDims, PlanarBounds, WorldOffset, CHUNK_SIZE};
pub use crate::error::{ConfigError, ErosionError, NoiseError, TerrainError};
pub use crate::generator::{
    DropletErosion, ErosionSimulator, HeightLattice, HeightmapBuilder, MeshTessellator, SeamStitcher,
    TessellatedMesh,
};
pub use crate::material::{TextureThresholds, TextureTile};
pub use crate::noise_field::{FractalPerlin, NoiseField};
