use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use log::info;
use terrain::coords::ChunkDims;
use terrain::material::TextureTile;
use terrain::{ChunkOrchestrator, TerrainConfig};

mod preview;

use preview::TerrainVisualizer;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a stitched, eroded terrain batch and render a preview")]
struct Args {
    /// TOML config file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// World seed
    #[arg(short, long)]
    seed: Option<i32>,

    /// Chunk grid radius; radius r yields (2r-1)^2 chunks
    #[arg(short, long)]
    radius: Option<i32>,

    /// Cells per chunk along both axes
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Vertical span of the mesh
    #[arg(long)]
    max_height: Option<f32>,

    /// Droplets simulated per chunk
    #[arg(short, long)]
    erosion_iterations: Option<u32>,

    /// Preview image path
    #[arg(short, long, default_value = "target/terrain.png")]
    output: PathBuf,

    /// Draw quad outlines over the preview
    #[arg(short, long)]
    wireframe: bool,

    /// Pixels per lattice node in the preview
    #[arg(long, default_value_t = 4)]
    scale: u32,
}

impl Args {
    fn apply(&self, config: &mut TerrainConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(size) = self.chunk_size {
            config.chunk = ChunkDims::new(size, size);
        }
        if let Some(max_height) = self.max_height {
            config.max_height = max_height;
        }
        if let Some(iterations) = self.erosion_iterations {
            config.erosion.iterations = iterations;
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TerrainConfig::load(path)?,
        None => TerrainConfig::default(),
    };
    args.apply(&mut config);

    let orchestrator = ChunkOrchestrator::new(config)?;
    let start = Instant::now();
    let chunks = orchestrator.generate()?;
    info!("Generated {} chunks in {:?}", chunks.len(), start.elapsed());

    for chunk in &chunks {
        let histogram = chunk.mesh.tile_histogram();
        let tiles: Vec<String> = TextureTile::ALL
            .iter()
            .map(|tile| format!("{}={}", tile.name(), histogram[tile.index()]))
            .collect();
        info!(
            "Chunk {}: {} vertices, {} triangles, tiles [{}]",
            chunk.coord,
            chunk.mesh.vertex_count(),
            chunk.mesh.triangle_count(),
            tiles.join(", ")
        );
    }

    let visualizer = TerrainVisualizer::new()?;
    visualizer.save(&chunks, args.wireframe, args.scale.max(1), &args.output)?;
    info!("Saved preview to {}", args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_layer_over_config() {
        let args = Args::parse_from(["terrain-gen", "--seed", "7", "--chunk-size", "8", "-e", "25"]);
        let mut config = TerrainConfig::default();
        args.apply(&mut config);

        assert_eq!(config.seed, 7);
        assert_eq!(config.chunk, ChunkDims::new(8, 8));
        assert_eq!(config.erosion.iterations, 25);
        assert_eq!(config.radius, TerrainConfig::default().radius);
        assert!(!args.wireframe);
    }
}
