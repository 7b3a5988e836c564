use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Result};
use colorgrad::Gradient;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use terrain::FinishedChunk;

/// World-space node extent covered by a batch.
struct Extent {
    min_x: i32,
    min_z: i32,
    width: u32,
    depth: u32,
}

impl Extent {
    fn of(chunks: &[FinishedChunk]) -> Option<Self> {
        let min_x = chunks.iter().map(|c| c.bounds.min_x).min()?;
        let max_x = chunks.iter().map(|c| c.bounds.max_x).max()?;
        let min_z = chunks.iter().map(|c| c.bounds.min_z).min()?;
        let max_z = chunks.iter().map(|c| c.bounds.max_z).max()?;
        Some(Self {
            min_x,
            min_z,
            width: (max_x - min_x + 1) as u32,
            depth: (max_z - min_z + 1) as u32,
        })
    }
}

pub struct TerrainVisualizer {
    gradient: Gradient,
}

impl TerrainVisualizer {
    pub fn new() -> Result<Self> {
        let gradient = colorgrad::CustomGradient::new()
            .colors(&[
                colorgrad::Color::new(0.0, 0.0, 0.5, 1.0),   // Deep water
                colorgrad::Color::new(0.0, 0.0, 1.0, 1.0),   // Shallow water
                colorgrad::Color::new(0.9, 0.9, 0.2, 1.0),   // Beach
                colorgrad::Color::new(0.0, 0.6, 0.0, 1.0),   // Grass
                colorgrad::Color::new(0.5, 0.3, 0.0, 1.0),   // Mountain
                colorgrad::Color::new(1.0, 1.0, 1.0, 1.0),   // Snow
            ])
            .domain(&[0.0, 0.3, 0.35, 0.4, 0.8, 1.0])
            .build()
            .map_err(|e| anyhow!("invalid preview gradient: {:?}", e))?;

        Ok(Self { gradient })
    }

    fn color(&self, sample: f32) -> Rgb<u8> {
        let c = self.gradient.at(sample.clamp(0.0, 1.0) as f64);
        Rgb([(c.r * 255.0) as u8, (c.g * 255.0) as u8, (c.b * 255.0) as u8])
    }

    /// Top-down image of the stitched lattices, `scale` pixels per node.
    pub fn render_heightmap(&self, chunks: &[FinishedChunk], scale: u32) -> Result<RgbImage> {
        let extent = Extent::of(chunks).ok_or_else(|| anyhow!("no chunks to render"))?;
        let mut img = RgbImage::new(extent.width * scale, extent.depth * scale);

        // shared seam nodes are written by both chunks; stitching made them equal
        for chunk in chunks {
            let dims = chunk.lattice.dims();
            for x in 0..=dims.width {
                for z in 0..=dims.depth {
                    let px = (chunk.offset.x - extent.min_x) as u32 + x as u32;
                    let pz = (chunk.offset.z - extent.min_z) as u32 + z as u32;
                    let color = self.color(chunk.lattice.get(x, z));
                    for dy in 0..scale {
                        for dx in 0..scale {
                            img.put_pixel(px * scale + dx, pz * scale + dy, color);
                        }
                    }
                }
            }
        }
        Ok(img)
    }

    /// Heightmap with every quad outline drawn on top.
    pub fn render_wireframe(&self, chunks: &[FinishedChunk], scale: u32) -> Result<RgbImage> {
        let extent = Extent::of(chunks).ok_or_else(|| anyhow!("no chunks to render"))?;
        let mut img = self.render_heightmap(chunks, scale)?;
        let (w, h) = img.dimensions();
        let half = scale as f32 * 0.5;

        for chunk in chunks {
            let positions = &chunk.mesh.positions;
            let p = |i: usize| {
                let v = positions[i];
                let wx = (chunk.offset.x - extent.min_x) as f32 + v[0];
                let wz = (chunk.offset.z - extent.min_z) as f32 + v[2];
                (
                    (wx * scale as f32 + half).clamp(0.0, w as f32 - 1.0),
                    (wz * scale as f32 + half).clamp(0.0, h as f32 - 1.0),
                )
            };
            // Count edge usage; quad diagonals are used twice, outlines once
            let mut edge_counts: HashMap<(usize, usize), usize> = HashMap::new();
            for tri in chunk.mesh.indices.chunks(3) {
                let vids = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
                for e in &[(vids[0], vids[1]), (vids[1], vids[2]), (vids[2], vids[0])] {
                    let key = if e.0 < e.1 { *e } else { (e.1, e.0) };
                    *edge_counts.entry(key).or_insert(0) += 1;
                }
            }
            for (&(a, b), &count) in edge_counts.iter() {
                if count == 1 {
                    draw_line_segment_mut(&mut img, p(a), p(b), Rgb([255, 0, 0]));
                }
            }
        }
        Ok(img)
    }

    pub fn save(&self, chunks: &[FinishedChunk], wireframe: bool, scale: u32, output: &Path) -> Result<()> {
        let img = if wireframe {
            self.render_wireframe(chunks, scale)?
        } else {
            self.render_heightmap(chunks, scale)?
        };
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        img.save(output)?;
        Ok(())
    }
}
