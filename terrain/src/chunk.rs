// src/chunk.rs

use std::collections::BTreeMap;
use std::time::Instant;

use log::{debug, info};

use crate::{
    config::TerrainConfig,
    coords::{ChunkCoords, PlanarBounds, WorldOffset},
    error::TerrainError,
    generator::{
        DropletErosion, ErosionSimulator, HeightLattice, HeightmapBuilder, MeshTessellator, SeamStitcher,
        StitchReport, TessellatedMesh,
    },
    noise_field::{FractalPerlin, NoiseField},
};

/// A chunk's height lattice while the batch is in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkRecord {
    pub coord: ChunkCoords,
    pub offset: WorldOffset,
    pub lattice: HeightLattice,
}

/// Every chunk of a batch, keyed by coordinate.
pub type ChunkTable = BTreeMap<ChunkCoords, ChunkRecord>;

/// What a surface/placement consumer receives for each chunk.
#[derive(Clone, Debug)]
pub struct FinishedChunk {
    pub coord: ChunkCoords,
    pub offset: WorldOffset,
    /// Planar area `[offset.x, offset.x + W] x [offset.z, offset.z + D]` for
    /// placing surface content.
    pub bounds: PlanarBounds,
    /// Stitched lattice the mesh was built from.
    pub lattice: HeightLattice,
    /// Geometry in chunk-local space; translate by `offset` to place it.
    pub mesh: TessellatedMesh,
}

/// Receives finished chunks, one at a time, after the batch is stitched.
pub trait ChunkConsumer {
    fn consume(&mut self, chunk: FinishedChunk) -> Result<(), TerrainError>;
}

impl ChunkConsumer for Vec<FinishedChunk> {
    fn consume(&mut self, chunk: FinishedChunk) -> Result<(), TerrainError> {
        self.push(chunk);
        Ok(())
    }
}

/// Runs a batch of chunks through build, stitch and tessellate.
///
/// The phases are strict barriers: no chunk is stitched until every chunk has
/// been built and eroded, and no chunk is meshed until every seam is stitched.
/// Any failure aborts the whole batch.
pub struct ChunkOrchestrator {
    config: TerrainConfig,
    noise: Box<dyn NoiseField>,
    erosion: Option<Box<dyn ErosionSimulator>>,
}

impl ChunkOrchestrator {
    /// Validates `config` and wires up the default Perlin and droplet collaborators.
    pub fn new(config: TerrainConfig) -> Result<Self, TerrainError> {
        config.validate()?;
        let erosion = DropletErosion::new(config.erosion.droplet);
        Ok(Self {
            config,
            noise: Box::new(FractalPerlin::new()),
            erosion: Some(Box::new(erosion)),
        })
    }

    pub fn with_noise(mut self, noise: impl NoiseField + 'static) -> Self {
        self.noise = Box::new(noise);
        self
    }

    pub fn with_erosion(mut self, erosion: impl ErosionSimulator + 'static) -> Self {
        self.erosion = Some(Box::new(erosion));
        self
    }

    pub fn without_erosion(mut self) -> Self {
        self.erosion = None;
        self
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn coords(&self) -> Vec<ChunkCoords> {
        ChunkCoords::square(self.config.radius)
    }

    fn heightmap_builder(&self) -> HeightmapBuilder<'_> {
        let builder = HeightmapBuilder::new(
            self.noise.as_ref(),
            self.config.seed,
            self.config.chunk,
            self.config.noise,
        );
        match &self.erosion {
            Some(erosion) => builder.with_erosion(erosion.as_ref(), self.config.erosion),
            None => builder,
        }
    }

    /// Phase 1: sample and erode every chunk of the batch.
    pub fn build_table(&self) -> Result<ChunkTable, TerrainError> {
        let builder = self.heightmap_builder();
        let mut table = ChunkTable::new();
        for coord in self.coords() {
            let lattice = builder.build(coord)?;
            debug!("built chunk {}", coord);
            table.insert(
                coord,
                ChunkRecord {
                    coord,
                    offset: coord.world_offset(self.config.chunk),
                    lattice,
                },
            );
        }
        Ok(table)
    }

    /// Phase 3: mesh every stitched chunk and hand it to `consumer`.
    pub fn tessellate_into(&self, table: ChunkTable, consumer: &mut impl ChunkConsumer) -> Result<(), TerrainError> {
        let tessellator = MeshTessellator::new(self.config.max_height, self.config.thresholds);
        for (coord, record) in table {
            let mesh = tessellator.tessellate(&record.lattice);
            debug!(
                "meshed chunk {}: {} vertices, {} triangles",
                coord,
                mesh.vertex_count(),
                mesh.triangle_count()
            );
            consumer.consume(FinishedChunk {
                coord,
                offset: record.offset,
                bounds: PlanarBounds::of_chunk(record.offset, self.config.chunk),
                lattice: record.lattice,
                mesh,
            })?;
        }
        Ok(())
    }

    /// Runs the whole batch, streaming finished chunks into `consumer`.
    pub fn generate_into(&self, consumer: &mut impl ChunkConsumer) -> Result<StitchReport, TerrainError> {
        let started = Instant::now();
        let erosion = if self.erosion.is_some() && self.config.erosion.enabled() {
            format!("{} droplets per chunk", self.config.erosion.iterations)
        } else {
            "no erosion".to_string()
        };
        info!(
            "generating radius {} ({} chunks of {}x{} cells, {})",
            self.config.radius,
            self.coords().len(),
            self.config.chunk.width,
            self.config.chunk.depth,
            erosion
        );

        let mut table = self.build_table()?;
        info!("built {} chunks in {:?}", table.len(), started.elapsed());

        let report = SeamStitcher::new().stitch(&mut table);
        info!("stitched {} seams", report.total());

        self.tessellate_into(table, consumer)?;
        info!("terrain batch finished in {:?}", started.elapsed());
        Ok(report)
    }

    pub fn generate(&self) -> Result<Vec<FinishedChunk>, TerrainError> {
        let mut chunks = Vec::with_capacity(self.coords().len());
        self.generate_into(&mut chunks)?;
        Ok(chunks)
    }
}
