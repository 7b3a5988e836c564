use log::debug;

use crate::{
    config::{ErosionConfig, NoiseConfig},
    coords::{ChunkCoords, ChunkDims, WorldOffset},
    error::{NoiseError, TerrainError},
    generator::erosion::ErosionSimulator,
    noise_field::NoiseField,
};

/// Spatial-hash multipliers for per-chunk erosion seeds.
const SEED_HASH_X: i32 = 73856093;
const SEED_HASH_Z: i32 = 19349663;

/// Row-major `(W + 1) x (D + 1)` height samples of one chunk, indexed
/// `x * (D + 1) + z`. Never resized after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightLattice {
    data: Vec<f32>,
    dims: ChunkDims,
}

impl HeightLattice {
    pub fn new(data: Vec<f32>, dims: ChunkDims) -> Self {
        assert!(
            data.len() == dims.node_count(),
            "height lattice holds {} samples, expected {}x{}",
            data.len(),
            dims.nodes_x(),
            dims.nodes_z()
        );
        Self { data, dims }
    }

    pub fn flat(dims: ChunkDims, value: f32) -> Self {
        Self { data: vec![value; dims.node_count()], dims }
    }

    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    pub fn index(&self, x: usize, z: usize) -> usize {
        debug_assert!(x <= self.dims.width && z <= self.dims.depth);
        x * self.dims.nodes_z() + z
    }

    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.data[self.index(x, z)]
    }

    pub fn set(&mut self, x: usize, z: usize, value: f32) {
        let i = self.index(x, z);
        self.data[i] = value;
    }

    /// Node values along `x = column`, ordered by `z`.
    pub fn column(&self, column: usize) -> Vec<f32> {
        (0..self.dims.nodes_z()).map(|z| self.get(column, z)).collect()
    }

    /// Node values along `z = row`, ordered by `x`.
    pub fn row(&self, row: usize) -> Vec<f32> {
        (0..self.dims.nodes_x()).map(|x| self.get(x, row)).collect()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// Deterministic erosion seed for a chunk, independent of generation order.
pub fn chunk_erosion_seed(base_seed: i32, offset: WorldOffset) -> i32 {
    let hash = offset.x.wrapping_mul(SEED_HASH_X) ^ offset.z.wrapping_mul(SEED_HASH_Z);
    base_seed.wrapping_add(hash)
}

/// Samples noise for a chunk and runs the erosion pass over it.
pub struct HeightmapBuilder<'a> {
    noise: &'a dyn NoiseField,
    erosion: Option<&'a dyn ErosionSimulator>,
    seed: i32,
    dims: ChunkDims,
    noise_config: NoiseConfig,
    erosion_config: ErosionConfig,
}

impl<'a> HeightmapBuilder<'a> {
    pub fn new(noise: &'a dyn NoiseField, seed: i32, dims: ChunkDims, noise_config: NoiseConfig) -> Self {
        Self {
            noise,
            erosion: None,
            seed,
            dims,
            noise_config,
            erosion_config: ErosionConfig::default(),
        }
    }

    pub fn with_erosion(mut self, erosion: &'a dyn ErosionSimulator, config: ErosionConfig) -> Self {
        self.erosion = Some(erosion);
        self.erosion_config = config;
        self
    }

    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    /// Noise-only lattice for `coord`, before any erosion.
    pub fn sample(&self, coord: ChunkCoords) -> Result<HeightLattice, TerrainError> {
        let offset = coord.world_offset(self.dims);
        let (ox, oz) = offset.to_world_pos(0, 0);
        let values = self
            .noise
            .sample(self.dims.nodes_x(), self.dims.nodes_z(), self.seed, [ox, oz], &self.noise_config)
            .map_err(|source| TerrainError::Noise { coord, source })?;
        if values.len() != self.dims.node_count() {
            return Err(TerrainError::Noise {
                coord,
                source: NoiseError::LatticeSize {
                    expected: self.dims.node_count(),
                    actual: values.len(),
                },
            });
        }
        Ok(HeightLattice::new(values, self.dims))
    }

    /// Full lattice for `coord`: noise, then erosion when enabled.
    pub fn build(&self, coord: ChunkCoords) -> Result<HeightLattice, TerrainError> {
        let mut lattice = self.sample(coord)?;

        let Some(erosion) = self.erosion.filter(|_| self.erosion_config.enabled()) else {
            return Ok(lattice);
        };

        let seed = chunk_erosion_seed(self.seed, coord.world_offset(self.dims));
        debug!(
            "eroding chunk {} with {} droplets (seed {})",
            coord, self.erosion_config.iterations, seed
        );

        erosion
            .erode(
                lattice.as_mut_slice(),
                self.dims.nodes_x(),
                self.dims.nodes_z(),
                self.erosion_config.iterations,
                seed,
                self.erosion_config.deposit_on_boundary,
            )
            .map_err(|source| TerrainError::Erosion { coord, source })?;
        Ok(lattice)
    }
}
