// src/config.rs

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::coords::ChunkDims;
use crate::error::ConfigError;
use crate::material::TextureThresholds;

/// Everything one generation run needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerrainConfig {
    pub seed: i32,
    pub chunk: ChunkDims,
    pub max_height: f32,
    pub radius: i32,
    pub noise: NoiseConfig,
    pub erosion: ErosionConfig,
    pub thresholds: TextureThresholds,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            chunk: ChunkDims::default(),
            max_height: 40.0,
            radius: 2,
            noise: NoiseConfig::default(),
            erosion: ErosionConfig::default(),
            thresholds: TextureThresholds::default(),
        }
    }
}

impl TerrainConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: TerrainConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        info!("loaded terrain config from {}", path.display());
        Ok(config)
    }

    /// Rejects configurations that would fail part-way through a batch.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk.width == 0 {
            return Err(ConfigError::ChunkDimension { axis: "width", value: self.chunk.width });
        }
        if self.chunk.depth == 0 {
            return Err(ConfigError::ChunkDimension { axis: "depth", value: self.chunk.depth });
        }
        if self.radius < 1 {
            return Err(ConfigError::Radius(self.radius));
        }
        positive("max_height", self.max_height as f64)?;
        self.noise.validate()?;
        if !self.thresholds.is_ordered() {
            warn!(
                "texture thresholds are not ordered (snow={}, rock={}, grass={}, sand={}); snow, rock, grass still take priority in that order",
                self.thresholds.snow, self.thresholds.rock, self.thresholds.grass, self.thresholds.sand
            );
        }
        Ok(())
    }
}

/// Fractal noise parameters, shared by every chunk of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseConfig {
    pub frequency: f64,
    pub amplitude: f64,
    pub octaves: usize,
    pub lacunarity: f64,
    pub gain: f64,
    pub scale: f64,
    pub normalize_bias: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            amplitude: 1.0,
            octaves: 4,
            lacunarity: 2.0,
            gain: 0.5,
            scale: 64.0,
            normalize_bias: 1.0,
        }
    }
}

impl NoiseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.octaves == 0 {
            return Err(ConfigError::ZeroOctaves);
        }
        positive("noise.frequency", self.frequency)?;
        positive("noise.scale", self.scale)?;
        positive("noise.normalize_bias", self.normalize_bias)?;
        finite("noise.amplitude", self.amplitude)?;
        finite("noise.lacunarity", self.lacunarity)?;
        finite("noise.gain", self.gain)?;
        Ok(())
    }
}

/// Erosion pass settings. `iterations == 0` disables erosion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ErosionConfig {
    pub iterations: u32,
    pub deposit_on_boundary: bool,
    pub droplet: DropletParams,
}

impl Default for ErosionConfig {
    fn default() -> Self {
        Self {
            iterations: 0,
            deposit_on_boundary: true,
            droplet: DropletParams::default(),
        }
    }
}

impl ErosionConfig {
    pub fn enabled(&self) -> bool {
        self.iterations > 0
    }
}

/// Tuning for the droplet simulator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DropletParams {
    pub inertia: f32,
    pub capacity_factor: f32,
    pub min_capacity: f32,
    pub erode_speed: f32,
    pub deposit_speed: f32,
    pub evaporate_speed: f32,
    pub gravity: f32,
    pub max_lifetime: u32,
    pub brush_radius: usize,
    pub initial_water: f32,
    pub initial_speed: f32,
}

impl Default for DropletParams {
    fn default() -> Self {
        Self {
            inertia: 0.05,
            capacity_factor: 4.0,
            min_capacity: 0.01,
            erode_speed: 0.3,
            deposit_speed: 0.3,
            evaporate_speed: 0.01,
            gravity: 4.0,
            max_lifetime: 30,
            brush_radius: 2,
            initial_water: 1.0,
            initial_speed: 1.0,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TerrainConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_partial_toml() {
        let config = TerrainConfig::from_toml_str(
            r#"
            seed = 7
            radius = 3
            max_height = 25.0

            [chunk]
            width = 16
            depth = 8

            [noise]
            octaves = 6

            [erosion]
            iterations = 500

            [thresholds]
            snow = 9.0
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.chunk, ChunkDims::new(16, 8));
        assert_eq!(config.noise.octaves, 6);
        assert_eq!(config.noise.lacunarity, 2.0);
        assert_eq!(config.erosion.iterations, 500);
        assert_eq!(config.thresholds.snow, 9.0);
        assert_eq!(config.thresholds.rock, TextureThresholds::default().rock);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(TerrainConfig::from_toml_str("colour = 3"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_zero_width() {
        let mut config = TerrainConfig::default();
        config.chunk.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ChunkDimension { axis: "width", .. })));
    }

    #[test]
    fn rejects_zero_octaves() {
        let mut config = TerrainConfig::default();
        config.noise.octaves = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroOctaves)));
    }

    #[test]
    fn rejects_non_positive_radius() {
        for radius in [0, -3] {
            let config = TerrainConfig { radius, ..TerrainConfig::default() };
            assert!(matches!(config.validate(), Err(ConfigError::Radius(r)) if r == radius));
        }
    }

    #[test]
    fn rejects_non_positive_max_height() {
        let config = TerrainConfig { max_height: 0.0, ..TerrainConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive { name: "max_height", .. })));
    }
}
