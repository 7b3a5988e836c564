use crate::{
    chunk::{ChunkRecord, ChunkTable},
    coords::{ChunkCoords, ChunkDims},
    generator::{average_edges, stitch_pair, HeightLattice, SeamAxis, SeamStitcher, StitchReport},
};

fn record(coord: ChunkCoords, dims: ChunkDims, f: impl Fn(usize, usize) -> f32) -> ChunkRecord {
    let mut lattice = HeightLattice::flat(dims, 0.0);
    for x in 0..=dims.width {
        for z in 0..=dims.depth {
            lattice.set(x, z, f(x, z));
        }
    }
    ChunkRecord { coord, offset: coord.world_offset(dims), lattice }
}

fn table_of(records: Vec<ChunkRecord>) -> ChunkTable {
    records.into_iter().map(|r| (r.coord, r)).collect()
}

/// Distinct, chunk-dependent values so every seam starts out mismatched.
fn grid_table(radius: i32, dims: ChunkDims) -> ChunkTable {
    table_of(
        ChunkCoords::square(radius)
            .into_iter()
            .map(|c| {
                record(c, dims, move |x, z| {
                    ((c.x * 31 + c.z * 17) as f32 * 0.37 + x as f32 * 0.11 - z as f32 * 0.07).sin()
                })
            })
            .collect(),
    )
}

#[test]
fn test_average_edges() {
    assert_eq!(average_edges(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), vec![2.0, 2.0, 2.0]);
}

#[test]
fn test_x_seam_average() {
    let dims = ChunkDims::new(2, 2);
    let left = ChunkCoords::new(0, 0);
    let right = ChunkCoords::new(1, 0);
    let mut table = table_of(vec![
        record(left, dims, |x, z| if x == 2 { (z + 1) as f32 } else { 9.0 }),
        record(right, dims, |x, z| if x == 0 { (3 - z) as f32 } else { -9.0 }),
    ]);

    let report = SeamStitcher::new().stitch(&mut table);

    assert_eq!(report, StitchReport { x_seams: 1, z_seams: 0 });
    assert_eq!(table[&left].lattice.column(2), vec![2.0, 2.0, 2.0]);
    assert_eq!(table[&right].lattice.column(0), vec![2.0, 2.0, 2.0]);
    // interior untouched
    assert_eq!(table[&left].lattice.column(1), vec![9.0, 9.0, 9.0]);
    assert_eq!(table[&right].lattice.column(1), vec![-9.0, -9.0, -9.0]);
}

#[test]
fn test_z_seam_average() {
    let dims = ChunkDims::new(2, 2);
    let near = ChunkCoords::new(0, -1);
    let far = ChunkCoords::new(0, 0);
    let mut table = table_of(vec![
        record(near, dims, |x, z| if z == 2 { (x + 1) as f32 } else { 0.5 }),
        record(far, dims, |x, z| if z == 0 { (3 - x) as f32 } else { 0.25 }),
    ]);

    let report = SeamStitcher::new().stitch(&mut table);

    assert_eq!(report, StitchReport { x_seams: 0, z_seams: 1 });
    assert_eq!(table[&near].lattice.row(2), vec![2.0, 2.0, 2.0]);
    assert_eq!(table[&far].lattice.row(0), vec![2.0, 2.0, 2.0]);
}

#[test]
fn test_each_seam_averaged_once() {
    // a single row of chunks: every seam node is averaged from exactly two inputs
    let dims = ChunkDims::new(4, 3);
    let coords: Vec<ChunkCoords> = (-2..=2).map(|x| ChunkCoords::new(x, 0)).collect();
    let before = table_of(
        coords
            .iter()
            .map(|&c| record(c, dims, move |x, z| (c.x * 10) as f32 + x as f32 * 1.5 + z as f32 * 0.25))
            .collect(),
    );
    let mut after = before.clone();

    let report = SeamStitcher::new().stitch(&mut after);
    assert_eq!(report.x_seams, 4);

    for pair in coords.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let expected = average_edges(&before[&a].lattice.column(4), &before[&b].lattice.column(0));
        assert_eq!(after[&a].lattice.column(4), expected);
        assert_eq!(after[&b].lattice.column(0), expected);
    }
}

#[test]
fn test_seams_continuous_on_grid() {
    let dims = ChunkDims::new(5, 4);
    let mut table = grid_table(3, dims);

    let report = SeamStitcher::new().stitch(&mut table);
    assert_eq!(report, StitchReport { x_seams: 20, z_seams: 20 });

    for (&coord, rec) in &table {
        if let Some(right) = table.get(&coord.right()) {
            assert_eq!(rec.lattice.column(dims.width), right.lattice.column(0), "x seam at {}", coord);
        }
        if let Some(fwd) = table.get(&coord.forward()) {
            assert_eq!(rec.lattice.row(dims.depth), fwd.lattice.row(0), "z seam at {}", coord);
        }
    }
}

#[test]
fn test_corner_where_four_chunks_meet() {
    let dims = ChunkDims::new(2, 2);
    let c00 = ChunkCoords::new(0, 0);
    let c10 = ChunkCoords::new(1, 0);
    let c01 = ChunkCoords::new(0, 1);
    let c11 = ChunkCoords::new(1, 1);
    let mut table = table_of(vec![
        record(c00, dims, |_, _| 1.0),
        record(c10, dims, |_, _| 2.0),
        record(c01, dims, |_, _| 3.0),
        record(c11, dims, |_, _| 4.0),
    ]);

    SeamStitcher::new().stitch(&mut table);

    // x pass pairs the corner copies up, z pass then averages the pairs
    assert_eq!(table[&c00].lattice.get(2, 2), 2.5);
    assert_eq!(table[&c10].lattice.get(0, 2), 2.5);
    assert_eq!(table[&c01].lattice.get(2, 0), 2.5);
    assert_eq!(table[&c11].lattice.get(0, 0), 2.5);
    // a non-corner seam node only sees its own two chunks
    assert_eq!(table[&c00].lattice.get(2, 1), 1.5);
    assert_eq!(table[&c00].lattice.get(1, 2), 2.0);
}

#[test]
fn test_visiting_order_does_not_matter() {
    let dims = ChunkDims::new(3, 3);
    let mut forward = grid_table(3, dims);
    let mut reversed = forward.clone();

    SeamStitcher::new().stitch(&mut forward);

    let mut coords: Vec<ChunkCoords> = reversed.keys().copied().collect();
    coords.reverse();
    for axis in [SeamAxis::X, SeamAxis::Z] {
        for &coord in &coords {
            let neighbor = match axis {
                SeamAxis::X => coord.right(),
                SeamAxis::Z => coord.forward(),
            };
            let Some(mut other) = reversed.remove(&neighbor) else { continue };
            if let Some(rec) = reversed.get_mut(&coord) {
                stitch_pair(axis, &mut rec.lattice, &mut other.lattice);
            }
            reversed.insert(neighbor, other);
        }
    }

    assert_eq!(forward, reversed);
}

#[test]
fn test_missing_neighbors_leave_edges_alone() {
    let dims = ChunkDims::new(3, 2);
    let original = table_of(vec![record(ChunkCoords::new(0, 0), dims, |x, z| (x * 3 + z) as f32)]);
    let mut table = original.clone();

    let report = SeamStitcher::new().stitch(&mut table);

    assert_eq!(report.total(), 0);
    assert_eq!(table, original);
}

#[test]
fn test_diagonal_only_neighbors_are_not_stitched() {
    let dims = ChunkDims::new(2, 2);
    let original = table_of(vec![
        record(ChunkCoords::new(0, 0), dims, |_, _| 1.0),
        record(ChunkCoords::new(1, 1), dims, |_, _| 5.0),
    ]);
    let mut table = original.clone();

    SeamStitcher::new().stitch(&mut table);

    assert_eq!(table, original);
}
