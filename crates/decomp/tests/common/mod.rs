#![allow(dead_code)]

use std::collections::BTreeSet;

use decomp::{Decomposition, PointId, SegmentId};
use geo::Coord;

pub fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

/// Add the corners of an axis-aligned square and connect them
/// counter-clockwise.  Returns corners and sides, both starting at the
/// lower-left corner.
pub fn square(d: &mut Decomposition, x0: f64, y0: f64, size: f64) -> ([PointId; 4], [SegmentId; 4]) {
    polygon(d, &[c(x0, y0), c(x0 + size, y0), c(x0 + size, y0 + size), c(x0, y0 + size)])
}

pub fn polygon<const N: usize>(d: &mut Decomposition, corners: &[Coord<f64>; N]) -> ([PointId; N], [SegmentId; N]) {
    let points = corners.map(|xy| d.add_point(xy));
    let segments = std::array::from_fn(|i| d.new_segment(points[i], points[(i + 1) % N]).unwrap());
    d.check_consistency().unwrap();
    (points, segments)
}

/// `(points, segments, wires, polygons)`.
pub fn counts(d: &Decomposition) -> (usize, usize, usize, usize) {
    (d.num_points(), d.num_segments(), d.num_wires(), d.num_polygons())
}

/// `V - E + F == 1 + C` with `C` counting connected components including
/// isolated points, and one wire per bounded polygon plus one per component
/// with edges plus the root.
pub fn assert_euler(d: &Decomposition) {
    let ids: Vec<PointId> = d.points().map(|(id, _)| id).collect();
    let index = |p: PointId| ids.iter().position(|&q| q == p).unwrap();

    let mut parent: Vec<usize> = (0..ids.len()).collect();
    fn find(parent: &mut Vec<usize>, mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }
    for (_, seg) in d.segments() {
        let (a, b) = (find(&mut parent, index(seg.tail())), find(&mut parent, index(seg.head())));
        parent[a] = b;
    }
    let roots: Vec<usize> = (0..ids.len()).map(|i| find(&mut parent, i)).collect();
    let components = roots.iter().collect::<BTreeSet<_>>().len();
    let with_edges = (0..ids.len())
        .filter(|&i| d.degree(ids[i]) > 0)
        .map(|i| roots[i])
        .collect::<BTreeSet<_>>()
        .len();

    let (v, e, f) = (d.num_points() as i64, d.num_segments() as i64, d.num_polygons() as i64);
    assert_eq!(v - e + f, 1 + components as i64, "Euler characteristic");
    assert_eq!(d.num_wires(), d.num_polygons() + with_edges, "wire count");
}
