//! Droplet-based hydraulic erosion over a chunk's height lattice.
//!
//! Each droplet starts at a random position, rolls down the local gradient,
//! picks up sediment where it speeds up on steep ground and drops it where it
//! slows down or runs uphill. Everything a run needs arrives through the call,
//! so one simulator can erode many chunks, in any order, from any thread.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::DropletParams;
use crate::error::ErosionError;

/// Mutates a height lattice in place.
///
/// `heights` is indexed `x * lattice_height + z` with `x < lattice_width`.
/// The same inputs and seed must always produce the same output.
pub trait ErosionSimulator {
    fn erode(
        &self,
        heights: &mut [f32],
        lattice_width: usize,
        lattice_height: usize,
        iterations: u32,
        seed: i32,
        deposit_on_boundary: bool,
    ) -> Result<(), ErosionError>;
}

#[derive(Clone, Debug, Default)]
pub struct DropletErosion {
    params: DropletParams,
}

struct Droplet {
    x: f32,
    z: f32,
    dir_x: f32,
    dir_z: f32,
    speed: f32,
    water: f32,
    sediment: f32,
}

/// Node offsets and weights of the erosion footprint, weights summing to 1.
struct Brush {
    taps: Vec<(isize, isize, f32)>,
}

impl Brush {
    fn new(radius: usize) -> Self {
        let r = radius.max(1) as isize;
        let mut taps = Vec::new();
        let mut total = 0.0;
        for dx in -r..=r {
            for dz in -r..=r {
                let dist = ((dx * dx + dz * dz) as f32).sqrt();
                let weight = r as f32 - dist;
                if weight > 0.0 {
                    taps.push((dx, dz, weight));
                    total += weight;
                }
            }
        }
        for tap in &mut taps {
            tap.2 /= total;
        }
        Self { taps }
    }
}

struct Lattice<'a> {
    heights: &'a mut [f32],
    width: usize,
    height: usize,
    protect_boundary: bool,
}

impl Lattice<'_> {
    fn index(&self, x: usize, z: usize) -> usize {
        x * self.height + z
    }

    fn writable(&self, x: usize, z: usize) -> bool {
        !self.protect_boundary || (x > 0 && z > 0 && x + 1 < self.width && z + 1 < self.height)
    }

    /// Bilinear height and gradient at a position inside the lattice.
    fn height_and_gradient(&self, x: f32, z: f32) -> (f32, f32, f32) {
        let cx = (x.floor() as usize).min(self.width - 2);
        let cz = (z.floor() as usize).min(self.height - 2);
        let u = x - cx as f32;
        let v = z - cz as f32;

        let h00 = self.heights[self.index(cx, cz)];
        let h10 = self.heights[self.index(cx + 1, cz)];
        let h01 = self.heights[self.index(cx, cz + 1)];
        let h11 = self.heights[self.index(cx + 1, cz + 1)];

        let grad_x = (h10 - h00) * (1.0 - v) + (h11 - h01) * v;
        let grad_z = (h01 - h00) * (1.0 - u) + (h11 - h10) * u;
        let h = h00 * (1.0 - u) * (1.0 - v) + h10 * u * (1.0 - v) + h01 * (1.0 - u) * v + h11 * u * v;
        (h, grad_x, grad_z)
    }

    /// Spreads `amount` over the four corners of the cell containing `(x, z)`.
    fn deposit(&mut self, x: f32, z: f32, amount: f32) {
        let cx = (x.floor() as usize).min(self.width - 2);
        let cz = (z.floor() as usize).min(self.height - 2);
        let u = x - cx as f32;
        let v = z - cz as f32;
        for (nx, nz, w) in [
            (cx, cz, (1.0 - u) * (1.0 - v)),
            (cx + 1, cz, u * (1.0 - v)),
            (cx, cz + 1, (1.0 - u) * v),
            (cx + 1, cz + 1, u * v),
        ] {
            if self.writable(nx, nz) {
                let i = self.index(nx, nz);
                self.heights[i] += amount * w;
            }
        }
    }

    /// Removes up to `amount` around node `(x, z)`; returns what was taken.
    fn erode(&mut self, brush: &Brush, x: usize, z: usize, amount: f32) -> f32 {
        let mut removed = 0.0;
        for &(dx, dz, w) in &brush.taps {
            let nx = x as isize + dx;
            let nz = z as isize + dz;
            if nx < 0 || nz < 0 || nx >= self.width as isize || nz >= self.height as isize {
                continue;
            }
            let (nx, nz) = (nx as usize, nz as usize);
            if !self.writable(nx, nz) {
                continue;
            }
            let i = self.index(nx, nz);
            let take = (amount * w).min(self.heights[i].max(0.0));
            self.heights[i] -= take;
            removed += take;
        }
        removed
    }
}

impl DropletErosion {
    pub fn new(params: DropletParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DropletParams {
        &self.params
    }

    fn run_droplet(&self, map: &mut Lattice<'_>, brush: &Brush, rng: &mut ChaCha8Rng, deposit_on_boundary: bool) {
        let p = &self.params;
        let max_x = (map.width - 1) as f32;
        let max_z = (map.height - 1) as f32;

        let mut drop = Droplet {
            x: rng.gen_range(0.0..max_x),
            z: rng.gen_range(0.0..max_z),
            dir_x: 0.0,
            dir_z: 0.0,
            speed: p.initial_speed,
            water: p.initial_water,
            sediment: 0.0,
        };

        for _ in 0..p.max_lifetime {
            let node_x = drop.x.floor() as usize;
            let node_z = drop.z.floor() as usize;
            let (old_height, grad_x, grad_z) = map.height_and_gradient(drop.x, drop.z);

            drop.dir_x = drop.dir_x * p.inertia - grad_x * (1.0 - p.inertia);
            drop.dir_z = drop.dir_z * p.inertia - grad_z * (1.0 - p.inertia);
            let len = (drop.dir_x * drop.dir_x + drop.dir_z * drop.dir_z).sqrt();
            if len > 1e-6 {
                drop.dir_x /= len;
                drop.dir_z /= len;
            } else {
                let angle = rng.gen_range(0.0..std::f32::consts::TAU);
                drop.dir_x = angle.cos();
                drop.dir_z = angle.sin();
            }

            let (prev_x, prev_z) = (drop.x, drop.z);
            drop.x += drop.dir_x;
            drop.z += drop.dir_z;

            if drop.x < 0.0 || drop.z < 0.0 || drop.x >= max_x || drop.z >= max_z {
                if deposit_on_boundary && drop.sediment > 0.0 {
                    map.deposit(prev_x, prev_z, drop.sediment);
                }
                break;
            }

            let (new_height, _, _) = map.height_and_gradient(drop.x, drop.z);
            let delta = new_height - old_height;

            let capacity = (-delta * drop.speed * drop.water * p.capacity_factor).max(p.min_capacity);

            if drop.sediment > capacity || delta > 0.0 {
                let amount = if delta > 0.0 {
                    delta.min(drop.sediment)
                } else {
                    (drop.sediment - capacity) * p.deposit_speed
                };
                drop.sediment -= amount;
                map.deposit(prev_x, prev_z, amount);
            } else {
                let amount = ((capacity - drop.sediment) * p.erode_speed).min(-delta);
                drop.sediment += map.erode(brush, node_x, node_z, amount);
            }

            drop.speed = (drop.speed * drop.speed + delta * p.gravity).max(0.0).sqrt();
            drop.water *= 1.0 - p.evaporate_speed;
        }
    }
}

impl ErosionSimulator for DropletErosion {
    fn erode(
        &self,
        heights: &mut [f32],
        lattice_width: usize,
        lattice_height: usize,
        iterations: u32,
        seed: i32,
        deposit_on_boundary: bool,
    ) -> Result<(), ErosionError> {
        if heights.len() != lattice_width * lattice_height {
            return Err(ErosionError::LatticeSize {
                width: lattice_width,
                height: lattice_height,
                actual: heights.len(),
            });
        }
        // a single row or column has no cells to roll across
        if lattice_width < 2 || lattice_height < 2 || iterations == 0 {
            return Ok(());
        }

        let brush = Brush::new(self.params.brush_radius);
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u32 as u64);
        let mut map = Lattice {
            heights,
            width: lattice_width,
            height: lattice_height,
            protect_boundary: !deposit_on_boundary,
        };

        for _ in 0..iterations {
            self.run_droplet(&mut map, &brush, &mut rng, deposit_on_boundary);
        }

        match map.heights.iter().position(|h| !h.is_finite()) {
            Some(index) => Err(ErosionError::NonFinite { index }),
            None => Ok(()),
        }
    }
}
