// Randomised edit sequences on a lattice.  Candidate segments are the unit
// lattice edges plus one diagonal per cell, so no two candidates cross and
// every sequence of insertions and deletions is valid.

mod common;

use common::{assert_euler, c, counts};
use decomp::{Decomposition, PointId, OUTER_POLYGON};
use rand::{rngs::StdRng, Rng, SeedableRng};

const N: usize = 5;

fn lattice(d: &mut Decomposition) -> Vec<PointId> {
    (0..N * N).map(|i| d.add_point(c((i % N) as f64, (i / N) as f64))).collect()
}

fn candidates() -> Vec<(usize, usize)> {
    let at = |x: usize, y: usize| y * N + x;
    let mut edges = Vec::new();
    for y in 0..N {
        for x in 0..N {
            if x + 1 < N { edges.push((at(x, y), at(x + 1, y))); }
            if y + 1 < N { edges.push((at(x, y), at(x, y + 1))); }
            if x + 1 < N && y + 1 < N { edges.push((at(x, y), at(x + 1, y + 1))); }
        }
    }
    edges
}

/// Every cell's two triangles must be located inside a polygon that really
/// contains the probe.
fn assert_locate(d: &Decomposition) {
    for y in 0..N - 1 {
        for x in 0..N - 1 {
            for probe in [c(x as f64 + 0.25, y as f64 + 0.75), c(x as f64 + 0.75, y as f64 + 0.25)] {
                let polygon = d.locate(probe);
                assert!(d.polygon_contains_point(polygon, probe), "{probe:?} not in {polygon}");
            }
        }
    }
}

fn run(seed: u64, steps: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut d = Decomposition::new();
    let points = lattice(&mut d);
    let edges = candidates();

    for step in 0..steps {
        let (i, j) = edges[rng.random_range(0..edges.len())];
        let (a, b) = if rng.random_bool(0.5) { (points[i], points[j]) } else { (points[j], points[i]) };

        match d.find_segment(a, b) {
            Some(seg) if rng.random_bool(0.2) => {
                // Subdivide and fuse back; the lattice point set is unchanged.
                let before = (d.num_polygons(), d.num_wires());
                let mid = d.split_segment(seg, 0.5).unwrap();
                d.check_consistency().unwrap_or_else(|e| panic!("step {step} split: {e}"));
                d.join_segments(mid).unwrap();
                assert_eq!((d.num_polygons(), d.num_wires()), before);
            }
            Some(seg) => d.delete_segment(seg).unwrap(),
            None if rng.random_bool(0.25) => {
                // Insert and take back at once: every count must return.
                let before = counts(&d);
                let seg = d.new_segment(a, b).unwrap();
                d.check_consistency().unwrap_or_else(|e| panic!("step {step} insert: {e}"));
                d.delete_segment(seg).unwrap();
                assert_eq!(counts(&d), before, "step {step} (seed {seed})");
            }
            None => {
                d.new_segment(a, b).unwrap();
            }
        }

        d.check_consistency().unwrap_or_else(|e| panic!("step {step} (seed {seed}): {e}"));
        assert_euler(&d);
        if step % 10 == 0 {
            assert_locate(&d);
        }
    }

    for (id, _) in d.polygons() {
        if id != OUTER_POLYGON {
            assert!(d.depth(id) >= 1);
        }
    }

    // Tear everything down again.
    let segments: Vec<_> = d.segments().map(|(id, _)| id).collect();
    for seg in segments {
        d.delete_segment(seg).unwrap();
        d.check_consistency().unwrap();
    }
    assert_eq!(d.num_polygons(), 1);
    assert_eq!(d.num_wires(), 1);
    assert_eq!(d.polygon(OUTER_POLYGON).free_points().len(), N * N);
}

#[test]
fn random_edits_keep_invariants() {
    for seed in 0..8 {
        run(seed, 300);
    }
}

#[test]
fn dense_fill_then_clear() {
    let mut d = Decomposition::new();
    let points = lattice(&mut d);
    for (i, j) in candidates() {
        d.new_segment(points[i], points[j]).unwrap();
    }
    d.check_consistency().unwrap();
    assert_euler(&d);
    // Two triangles per cell plus the outer polygon.
    assert_eq!(d.num_polygons(), 2 * (N - 1) * (N - 1) + 1);
    assert_locate(&d);

    for &p in &points {
        d.delete_point(p).unwrap();
        d.check_consistency().unwrap();
    }
    assert_eq!(d.num_points(), 0);
    assert_eq!(d.num_polygons(), 1);
}
