// src/lib.rs

//! Chunked, erodible heightfield terrain.
//!
//! A batch of chunks goes through three phases: every chunk's height lattice
//! is sampled from noise and eroded, then shared edges between neighbors are
//! stitched across the whole batch, then each chunk is tessellated into
//! faceted, atlas-textured geometry. See [`chunk::ChunkOrchestrator`].

pub mod chunk;
pub mod config;
pub mod coords;
pub mod error;
pub mod generator;
pub mod material;
pub mod noise_field;
pub mod prelude;

pub use chunk::{ChunkOrchestrator, FinishedChunk};
pub use config::TerrainConfig;
pub use coords::ChunkCoords;
pub use error::TerrainError;
