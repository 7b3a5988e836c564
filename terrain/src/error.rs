// src/error.rs

use thiserror::Error;

use crate::coords::ChunkCoords;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("chunk {axis} must be at least 1 cell, got {value}")]
    ChunkDimension { axis: &'static str, value: usize },
    #[error("generation radius must be at least 1, got {0}")]
    Radius(i32),
    #[error("noise octave count must be at least 1")]
    ZeroOctaves,
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum NoiseError {
    #[error("cannot sample an empty {width}x{height} lattice")]
    EmptyLattice { width: usize, height: usize },
    #[error("noise octave count must be at least 1")]
    ZeroOctaves,
    #[error("noise field returned {actual} samples, expected {expected}")]
    LatticeSize { expected: usize, actual: usize },
    #[error("noise sample at node {index} is not finite")]
    NonFinite { index: usize },
}

#[derive(Debug, Error)]
pub enum ErosionError {
    #[error("height lattice holds {actual} samples, expected {width}x{height}")]
    LatticeSize { width: usize, height: usize, actual: usize },
    #[error("erosion produced a non-finite height at node {index}")]
    NonFinite { index: usize },
}

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("noise sampling failed for chunk {coord}: {source}")]
    Noise {
        coord: ChunkCoords,
        #[source]
        source: NoiseError,
    },
    #[error("erosion failed for chunk {coord}: {source}")]
    Erosion {
        coord: ChunkCoords,
        #[source]
        source: ErosionError,
    },
    #[error("chunk consumer rejected {coord}: {reason}")]
    Consumer { coord: ChunkCoords, reason: String },
}
