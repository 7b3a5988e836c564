use log::debug;

use crate::{
    chunk::ChunkTable,
    coords::ChunkCoords,
    generator::HeightLattice,
};

/// Direction of a seam, named by the axis the neighbor lies along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeamAxis {
    /// Shared column: this chunk's `x = W` against the neighbor's `x = 0`.
    X,
    /// Shared row: this chunk's `z = D` against the neighbor's `z = 0`.
    Z,
}

impl SeamAxis {
    fn neighbor(self, coord: ChunkCoords) -> ChunkCoords {
        match self {
            SeamAxis::X => coord.right(),
            SeamAxis::Z => coord.forward(),
        }
    }

    fn near_edge(self, lattice: &HeightLattice) -> Vec<f32> {
        match self {
            SeamAxis::X => lattice.column(0),
            SeamAxis::Z => lattice.row(0),
        }
    }

    fn far_edge(self, lattice: &HeightLattice) -> Vec<f32> {
        let dims = lattice.dims();
        match self {
            SeamAxis::X => lattice.column(dims.width),
            SeamAxis::Z => lattice.row(dims.depth),
        }
    }

    fn write_near_edge(self, lattice: &mut HeightLattice, values: &[f32]) {
        for (i, &v) in values.iter().enumerate() {
            match self {
                SeamAxis::X => lattice.set(0, i, v),
                SeamAxis::Z => lattice.set(i, 0, v),
            }
        }
    }

    fn write_far_edge(self, lattice: &mut HeightLattice, values: &[f32]) {
        let dims = lattice.dims();
        for (i, &v) in values.iter().enumerate() {
            match self {
                SeamAxis::X => lattice.set(dims.width, i, v),
                SeamAxis::Z => lattice.set(i, dims.depth, v),
            }
        }
    }
}

/// How many seams each pass averaged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StitchReport {
    pub x_seams: usize,
    pub z_seams: usize,
}

impl StitchReport {
    pub fn total(&self) -> usize {
        self.x_seams + self.z_seams
    }
}

/// Node-wise mean of two edges.
pub fn average_edges(a: &[f32], b: &[f32]) -> Vec<f32> {
    assert_eq!(a.len(), b.len(), "seam edges differ in length");
    a.iter().zip(b).map(|(a, b)| (a + b) / 2.0).collect()
}

/// Averages `left`'s far edge with `right`'s near edge along `axis`, writing the
/// mean into both.
pub fn stitch_pair(axis: SeamAxis, left: &mut HeightLattice, right: &mut HeightLattice) {
    let averaged = average_edges(&axis.far_edge(left), &axis.near_edge(right));
    axis.write_far_edge(left, &averaged);
    axis.write_near_edge(right, &averaged);
}

/// Reconciles shared edges between axis-adjacent chunks of a batch.
///
/// Every +X seam is averaged first, then every +Z seam. Seams within one pass
/// share no nodes and each seam is owned by its lower chunk, so every shared
/// edge is averaged exactly once and the visiting order inside a pass has no
/// effect on the result. Corner nodes take part in one seam of each pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeamStitcher;

impl SeamStitcher {
    pub fn new() -> Self {
        Self
    }

    pub fn stitch(&self, table: &mut ChunkTable) -> StitchReport {
        let report = StitchReport {
            x_seams: self.stitch_pass(table, SeamAxis::X),
            z_seams: self.stitch_pass(table, SeamAxis::Z),
        };
        debug!(
            "stitched {} seams across {} chunks ({} along x, {} along z)",
            report.total(),
            table.len(),
            report.x_seams,
            report.z_seams
        );
        report
    }

    fn stitch_pass(&self, table: &mut ChunkTable, axis: SeamAxis) -> usize {
        let coords: Vec<ChunkCoords> = table.keys().copied().collect();
        let mut seams = 0;

        for coord in coords {
            let neighbor = axis.neighbor(coord);
            // no neighbor: edge of the requested radius, left as is
            let Some(near) = table.get(&neighbor).map(|r| axis.near_edge(&r.lattice)) else {
                continue;
            };
            let Some(record) = table.get_mut(&coord) else {
                continue;
            };
            let averaged = average_edges(&axis.far_edge(&record.lattice), &near);
            axis.write_far_edge(&mut record.lattice, &averaged);
            if let Some(record) = table.get_mut(&neighbor) {
                axis.write_near_edge(&mut record.lattice, &averaged);
            }
            seams += 1;
        }
        seams
    }
}
