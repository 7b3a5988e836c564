// src/noise_field.rs

use noise::{NoiseFn, Perlin};

use crate::config::NoiseConfig;
use crate::error::NoiseError;

/// Samples a continuous noise field over a regular lattice.
///
/// The returned lattice has `width * height` normalized values, indexed
/// `x * height + z`, where node `(x, z)` sits at world position
/// `(offset[0] + x, offset[1] + z)`. Implementations must be deterministic
/// for fixed inputs: two chunks sampling the same world position get the
/// same value.
pub trait NoiseField {
    fn sample(
        &self,
        width: usize,
        height: usize,
        seed: i32,
        offset: [f64; 2],
        params: &NoiseConfig,
    ) -> Result<Vec<f32>, NoiseError>;
}

/// Fractal Brownian motion over Perlin noise.
#[derive(Clone, Copy, Debug, Default)]
pub struct FractalPerlin;

impl FractalPerlin {
    pub fn new() -> Self {
        Self
    }

    fn sample_height(noise: &Perlin, x: f64, z: f64, params: &NoiseConfig) -> f64 {
        let mut amplitude = 1.0;
        let mut frequency = params.frequency;
        let mut noise_height = 0.0;
        let mut max_value = 0.0;

        for _ in 0..params.octaves {
            let sample_x = x * frequency / params.scale;
            let sample_z = z * frequency / params.scale;

            noise_height += noise.get([sample_x, sample_z]) * amplitude;

            max_value += amplitude;
            amplitude *= params.gain;
            frequency *= params.lacunarity;
        }

        if max_value == 0.0 {
            return 0.5;
        }
        let n = params.amplitude * noise_height / max_value;
        ((n + params.normalize_bias) / (2.0 * params.normalize_bias)).clamp(0.0, 1.0)
    }
}

impl NoiseField for FractalPerlin {
    fn sample(
        &self,
        width: usize,
        height: usize,
        seed: i32,
        offset: [f64; 2],
        params: &NoiseConfig,
    ) -> Result<Vec<f32>, NoiseError> {
        if width == 0 || height == 0 {
            return Err(NoiseError::EmptyLattice { width, height });
        }
        if params.octaves == 0 {
            return Err(NoiseError::ZeroOctaves);
        }

        let noise = Perlin::new(seed as u32);
        let mut values = Vec::with_capacity(width * height);
        for x in 0..width {
            for z in 0..height {
                let value = Self::sample_height(&noise, offset[0] + x as f64, offset[1] + z as f64, params);
                if !value.is_finite() {
                    return Err(NoiseError::NonFinite { index: values.len() });
                }
                values.push(value as f32);
            }
        }
        Ok(values)
    }
}
