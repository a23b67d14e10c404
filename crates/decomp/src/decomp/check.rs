use ahash::AHashSet;

use crate::error::ConsistencyError;
use crate::ids::{HalfEdge, PointId, Side, OUTER_POLYGON, ROOT_WIRE};
use crate::point::PointLink;

use super::Decomposition;

impl Decomposition {
    /// Verify every structural invariant.  Walks are bounded by the number of
    /// half-edges, so a corrupted structure yields an error rather than a
    /// hang.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        self.check_polygons()?;
        let walked = self.check_wires()?;
        self.check_segments(&walked)?;
        self.check_points()?;
        self.check_lookup()
    }

    fn check_polygons(&self) -> Result<(), ConsistencyError> {
        use ConsistencyError::Polygon as Bad;

        match self.polygons.get(OUTER_POLYGON) {
            Some(outer) if outer.outer_wire == ROOT_WIRE => {}
            _ => return Err(Bad(OUTER_POLYGON, "outer polygon must own the root wire")),
        }
        for (id, polygon) in self.polygons.iter() {
            let Some(wire) = self.wires.get(polygon.outer_wire) else {
                return Err(Bad(id, "outer wire does not exist"));
            };
            if wire.polygon != id {
                return Err(Bad(id, "outer wire belongs to another polygon"));
            }
            if id != OUTER_POLYGON && wire.half_edge.is_none() {
                return Err(Bad(id, "bounded polygon has an empty outer wire"));
            }
            for &point in &polygon.free_points {
                match self.points.get(point).map(|p| p.link) {
                    Some(PointLink::Free { polygon: owner }) if owner == id => {}
                    _ => return Err(Bad(id, "listed free point is not free in this polygon")),
                }
            }
        }
        Ok(())
    }

    /// Returns every half-edge reached by some wire walk.
    fn check_wires(&self) -> Result<AHashSet<HalfEdge>, ConsistencyError> {
        use ConsistencyError::Wire as Bad;
        let limit = 2 * self.segments.len();
        let mut walked = AHashSet::with_capacity(limit);

        for (id, wire) in self.wires.iter() {
            let Some(polygon) = self.polygons.get(wire.polygon) else {
                return Err(Bad(id, "polygon does not exist"));
            };
            for &child in &wire.children {
                match self.wires.get(child) {
                    Some(c) if c.parent == Some(id) => {}
                    _ => return Err(Bad(id, "child does not point back")),
                }
            }

            if id == ROOT_WIRE {
                if wire.parent.is_some() || wire.half_edge.is_some() {
                    return Err(Bad(id, "root wire must have neither parent nor half-edges"));
                }
                continue;
            }

            let Some(parent) = wire.parent else {
                return Err(Bad(id, "non-root wire without parent"));
            };
            match self.wires.get(parent) {
                Some(p) if p.children.contains(&id) => {}
                _ => return Err(Bad(id, "parent does not list this wire")),
            }
            if polygon.outer_wire != id && parent != polygon.outer_wire {
                return Err(Bad(id, "neither outer wire nor hole of its polygon"));
            }

            let Some(start) = wire.half_edge else {
                return Err(Bad(id, "wire without half-edges"));
            };
            let mut he = start;
            let mut steps = 0;
            loop {
                let Some(seg) = self.segments.get(he.segment) else {
                    return Err(Bad(id, "walk reaches a missing segment"));
                };
                if seg.wire(he.side) != id {
                    return Err(Bad(id, "walk crosses into another wire"));
                }
                walked.insert(he);
                he = seg.next(he.side);
                steps += 1;
                if he == start { break; }
                if steps > limit {
                    return Err(Bad(id, "walk does not close"));
                }
            }
        }
        Ok(walked)
    }

    fn check_segments(&self, walked: &AHashSet<HalfEdge>) -> Result<(), ConsistencyError> {
        use ConsistencyError::Segment as Bad;

        for (id, seg) in self.segments.iter() {
            if seg.tail() == seg.head() {
                return Err(Bad(id, "both ends are the same point"));
            }
            if self.pt_to_seg.get(&(seg.tail(), seg.head())) != Some(&id) {
                return Err(Bad(id, "missing from the endpoint lookup"));
            }
            for side in Side::BOTH {
                let arriving = HalfEdge::new(id, side);
                let end = seg.end(side);
                match self.points.get(end) {
                    Some(p) if !p.is_free() => {}
                    _ => return Err(Bad(id, "endpoint missing or free")),
                }
                if !self.wires.contains(seg.wire(side)) {
                    return Err(Bad(id, "side lies on a missing wire"));
                }
                if !walked.contains(&arriving) {
                    return Err(Bad(id, "side is not on the walk of its wire"));
                }
                let next = seg.next(side);
                let Some(next_seg) = self.segments.get(next.segment) else {
                    return Err(Bad(id, "next half-edge on a missing segment"));
                };
                if next_seg.start(next.side) != end {
                    return Err(Bad(id, "next half-edge does not leave the arrival point"));
                }
                if next_seg.wire(next.side) != seg.wire(side) {
                    return Err(Bad(id, "next half-edge lies on another wire"));
                }
                match self.bounded_star(end) {
                    Some(star) if star.contains(&arriving) => {}
                    _ => return Err(Bad(id, "not reachable from its endpoint's fan")),
                }
            }
        }
        Ok(())
    }

    fn check_points(&self) -> Result<(), ConsistencyError> {
        use ConsistencyError::Point as Bad;

        for (id, point) in self.points.iter() {
            match point.link {
                PointLink::Free { polygon } => match self.polygons.get(polygon) {
                    Some(p) if p.free_points.contains(&id) => {}
                    _ => return Err(Bad(id, "free point not listed by its polygon")),
                },
                PointLink::Bound { half_edge } => {
                    match self.segments.get(half_edge.segment) {
                        Some(seg) if seg.end(half_edge.side) == id => {}
                        _ => return Err(Bad(id, "representative does not arrive here")),
                    }
                    let Some(star) = self.bounded_star(id) else {
                        return Err(Bad(id, "fan does not close"));
                    };
                    let mut seen = AHashSet::new();
                    for he in &star {
                        if self.segments[he.segment].end(he.side) != id {
                            return Err(Bad(id, "fan leaves the point"));
                        }
                        if !seen.insert(he.segment) {
                            return Err(Bad(id, "segment appears twice in the fan"));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn check_lookup(&self) -> Result<(), ConsistencyError> {
        for (&(a, b), &seg) in &self.pt_to_seg {
            match self.segments.get(seg) {
                Some(s) if s.ends() == [a, b] => {}
                _ => return Err(ConsistencyError::Lookup(a, b, "entry does not match a segment")),
            }
        }
        Ok(())
    }

    /// Fan of `point` gathered without trusting the links: `None` when a link
    /// is dangling or the fan does not close within the number of segments.
    fn bounded_star(&self, point: PointId) -> Option<Vec<HalfEdge>> {
        let start = self.points.get(point)?.half_edge()?;
        let mut star = Vec::new();
        let mut he = start;
        loop {
            star.push(he);
            if star.len() > self.segments.len() {
                return None;
            }
            he = self.segments.get(he.segment)?.next(he.side).twin();
            self.segments.get(he.segment)?;
            if he == start {
                return Some(star);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::Coord;

    use super::*;
    use crate::ids::SegmentId;

    #[test]
    fn detects_broken_next_link() {
        let mut d = Decomposition::new();
        let a = d.add_point(Coord { x: 0.0, y: 0.0 });
        let b = d.add_point(Coord { x: 1.0, y: 0.0 });
        let c = d.add_point(Coord { x: 1.0, y: 1.0 });
        let s0 = d.new_segment(a, b).unwrap();
        d.new_segment(b, c).unwrap();
        assert!(d.check_consistency().is_ok());

        // Make the left side of s0 turn around at b, which has another segment.
        d.set_next(HalfEdge::new(s0, Side::Left), HalfEdge::new(s0, Side::Right));
        assert!(d.check_consistency().is_err());
    }

    #[test]
    fn detects_wire_made_of_two_cycles() {
        let mut d = Decomposition::new();
        let a = d.add_point(Coord { x: 0.0, y: 0.0 });
        let b = d.add_point(Coord { x: 1.0, y: 0.0 });
        let c = d.add_point(Coord { x: 0.0, y: 2.0 });
        let e = d.add_point(Coord { x: 1.0, y: 2.0 });
        let s0 = d.new_segment(a, b).unwrap();
        let s1 = d.new_segment(c, e).unwrap();
        assert!(d.check_consistency().is_ok());

        // Fold the second one-segment wire into the first: both cycles now
        // carry the same label, but a walk only ever sees one of them.
        let kept = d.segment(s0).wire(Side::Left);
        let dropped = d.segment(s1).wire(Side::Left);
        d.remove_wire(dropped);
        for side in Side::BOTH {
            d.set_wire(HalfEdge::new(s1, side), kept);
        }
        assert_eq!(d.num_wires(), 2);
        assert!(matches!(d.check_consistency(), Err(ConsistencyError::Segment(s, _)) if s == s1));
    }

    #[test]
    fn detects_stale_lookup() {
        let mut d = Decomposition::new();
        let a = d.add_point(Coord { x: 0.0, y: 0.0 });
        let b = d.add_point(Coord { x: 1.0, y: 0.0 });
        d.new_segment(a, b).unwrap();
        d.pt_to_seg.insert((b, a), SegmentId(7));
        assert!(matches!(d.check_consistency(), Err(ConsistencyError::Lookup(..))));
    }
}
