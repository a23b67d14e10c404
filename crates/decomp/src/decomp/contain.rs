use std::collections::BTreeSet;

use geo::Coord;

use crate::ids::{PointId, PolygonId, SegmentId, Side, WireId, OUTER_POLYGON};
use crate::segment::crosses_x_ray;

use super::Decomposition;

/// Offset of the probe point used by [`Decomposition::wire_contains_wire`],
/// relative to the length of the probed segment.
pub const CONTAINS_EPS: f64 = 1e-10;

impl Decomposition {
    // -----------------------------------------------------------------------
    // Containment
    // -----------------------------------------------------------------------

    /// Even-odd test of `xy` against the closed walk of `wire`.  The root
    /// wire contains everything.
    pub fn wire_contains_point(&self, wire: WireId, xy: Coord<f64>) -> bool {
        if self.wires[wire].is_root() {
            return true;
        }
        let crossings = self.wire_half_edges(wire)
            .filter(|&he| {
                let (a, b) = self.coords(he);
                crosses_x_ray(a, b, xy)
            })
            .count();
        crossings % 2 == 1
    }

    /// Does `wire` contain `other`?  Decided on a point just to the left of
    /// the midpoint of `other`'s representative half-edge, i.e. inside the
    /// region `other` bounds.
    pub fn wire_contains_wire(&self, wire: WireId, other: WireId) -> bool {
        if self.wires[wire].is_root() { return true; }
        let Some(he) = self.wires[other].half_edge else { return false };

        let (a, b) = self.coords(he);
        let tangent = b - a;
        let normal = Coord { x: -tangent.y, y: tangent.x };
        let probe = a + tangent * 0.5 + normal * CONTAINS_EPS;
        self.wire_contains_point(wire, probe)
    }

    /// Inside the outer wire and inside none of the holes.
    pub fn polygon_contains_point(&self, polygon: PolygonId, xy: Coord<f64>) -> bool {
        self.wire_contains_point(self.polygons[polygon].outer_wire, xy)
            && !self.holes(polygon).any(|hole| self.wire_contains_point(hole, xy))
    }

    /// Smallest polygon containing `xy`, found by descending the wire forest
    /// from the outer polygon.
    pub fn locate(&self, xy: Coord<f64>) -> PolygonId {
        let mut polygon = OUTER_POLYGON;
        'descend: loop {
            for hole in self.holes(polygon) {
                if !self.wire_contains_point(hole, xy) {
                    continue;
                }
                for &face in &self.wires[hole].children {
                    if self.wire_contains_point(face, xy) {
                        polygon = self.wires[face].polygon;
                        continue 'descend;
                    }
                }
            }
            return polygon;
        }
    }

    // -----------------------------------------------------------------------
    // Polygon queries
    // -----------------------------------------------------------------------

    /// Holes of `polygon`: the wires directly below its outer wire.
    pub fn holes(&self, polygon: PolygonId) -> impl Iterator<Item = WireId> + '_ {
        let outer = self.polygons[polygon].outer_wire;
        self.wires[outer].children.iter().copied()
            .filter(move |&w| self.wires[w].polygon == polygon)
    }

    /// Number of polygons enclosing `polygon`.  The outer polygon has depth
    /// 0, a polygon drawn in empty space depth 1.
    pub fn depth(&self, polygon: PolygonId) -> usize {
        let mut depth = 0;
        let mut current = polygon;
        while current != OUTER_POLYGON {
            let outer = self.polygons[current].outer_wire;
            let Some(parent) = self.wires[outer].parent else { break };
            current = self.wires[parent].polygon;
            depth += 1;
        }
        depth
    }

    /// Points along the outer wire, in walk order (counter-clockwise for a
    /// simple boundary).  Empty for the outer polygon.
    pub fn vertices(&self, polygon: PolygonId) -> Vec<PointId> {
        let outer = self.polygons[polygon].outer_wire;
        self.wire_half_edges(outer).map(|he| self.dest(he)).collect()
    }

    /// Segments along the outer wire, in walk order.
    pub fn boundary_segments(&self, polygon: PolygonId) -> Vec<SegmentId> {
        let outer = self.polygons[polygon].outer_wire;
        self.wire_half_edges(outer).map(|he| he.segment).collect()
    }

    /// `polygon` followed by every polygon nested inside it, at any depth.
    pub fn child_polygons(&self, polygon: PolygonId) -> Vec<PolygonId> {
        let mut found = vec![polygon];
        let mut stack: Vec<WireId> = self.wires[self.polygons[polygon].outer_wire].children.iter().copied().collect();
        while let Some(wire) = stack.pop() {
            let owner = self.wires[wire].polygon;
            if self.polygons[owner].outer_wire == wire {
                found.push(owner);
            }
            stack.extend(self.wires[wire].children.iter().copied());
        }
        found
    }

    /// Wires across the segments of `wire`, excluding `wire` itself.
    pub fn wire_neighbors(&self, wire: WireId) -> BTreeSet<WireId> {
        self.wire_half_edges(wire)
            .map(|he| self.wire_of(he.twin()))
            .filter(|&w| w != wire)
            .collect()
    }

    /// Polygons on the right and left side of `segment`.
    pub fn segment_polygons(&self, segment: SegmentId) -> [PolygonId; 2] {
        let seg = &self.segments[segment];
        Side::BOTH.map(|side| self.wires[seg.wire(side)].polygon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

    fn square(d: &mut Decomposition, x0: f64, y0: f64, size: f64) -> Vec<PointId> {
        let corners = [c(x0, y0), c(x0 + size, y0), c(x0 + size, y0 + size), c(x0, y0 + size)];
        let ids: Vec<_> = corners.into_iter().map(|xy| d.add_point(xy)).collect();
        for i in 0..4 {
            d.new_segment(ids[i], ids[(i + 1) % 4]).unwrap();
        }
        ids
    }

    #[test]
    fn unit_square_containment() {
        let mut d = Decomposition::new();
        square(&mut d, 0.0, 0.0, 1.0);
        assert_eq!(d.num_polygons(), 2);

        let inner = d.locate(c(0.5, 0.5));
        assert_ne!(inner, OUTER_POLYGON);
        assert_eq!(d.locate(c(2.0, 0.5)), OUTER_POLYGON);
        assert!(d.polygon_contains_point(inner, c(0.25, 0.75)));
        assert!(!d.polygon_contains_point(inner, c(1.5, 0.5)));
        assert!(d.polygon_contains_point(OUTER_POLYGON, c(1.5, 0.5)));
        assert!(!d.polygon_contains_point(OUTER_POLYGON, c(0.5, 0.5)));

        assert_eq!(d.depth(OUTER_POLYGON), 0);
        assert_eq!(d.depth(inner), 1);
        assert_eq!(d.vertices(inner).len(), 4);
        assert_eq!(d.holes(OUTER_POLYGON).count(), 1);
        assert_eq!(d.child_polygons(OUTER_POLYGON).len(), 2);
    }

    #[test]
    fn outer_wire_walks_counter_clockwise() {
        let mut d = Decomposition::new();
        let ids = square(&mut d, 0.0, 0.0, 1.0);
        let inner = d.locate(c(0.5, 0.5));
        let verts = d.vertices(inner);
        // Shoelace area is positive for counter-clockwise order.
        let area: f64 = (0..verts.len())
            .map(|i| {
                let p = d.point(verts[i]).xy;
                let q = d.point(verts[(i + 1) % verts.len()]).xy;
                p.x * q.y - q.x * p.y
            })
            .sum();
        assert!(area > 0.0);
        assert!(ids.iter().all(|p| verts.contains(p)));
    }

    #[test]
    fn neighbors_across_the_square() {
        let mut d = Decomposition::new();
        square(&mut d, 0.0, 0.0, 1.0);
        let inner = d.locate(c(0.5, 0.5));
        let outer = d.polygon(inner).outer_wire();
        let hole = d.holes(OUTER_POLYGON).next().unwrap();
        assert_eq!(d.wire_neighbors(outer), BTreeSet::from([hole]));
        assert!(d.wire_contains_wire(hole, outer));
        assert!(!d.wire_contains_wire(outer, hole));

        let seg = d.boundary_segments(inner)[0];
        let sides = d.segment_polygons(seg);
        assert!(sides.contains(&inner) && sides.contains(&OUTER_POLYGON));
    }
}
