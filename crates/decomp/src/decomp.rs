mod check;
pub mod contain;
mod ops;
mod surgery;

use std::f64::consts::TAU;

use ahash::AHashMap;
use geo::Coord;

use crate::arena::Arena;
use crate::change::PolygonChange;
use crate::ids::{HalfEdge, PointId, PolygonId, SegmentId, Side, WireId, OUTER_POLYGON, ROOT_WIRE};
use crate::point::{Point, PointLink};
use crate::polygon::Polygon;
use crate::segment::Segment;
use crate::wire::Wire;

/// Where a new segment end would be spliced into a point's half-edge fan.
///
/// `prev` arrives at the point along the edge immediately counter-clockwise
/// of the inserted direction, `next` leaves along the edge immediately
/// clockwise of it, and `wire` is the wire occupying the wedge between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insertion {
    pub prev: HalfEdge,
    pub next: HalfEdge,
    pub wire: WireId,
}

// ---------------------------------------------------------------------------
// Decomposition
// ---------------------------------------------------------------------------

/// A decomposition of the plane into nested polygons by a planar
/// straight-line graph.
///
/// Every entity lives in its own [`Arena`] and all relations are stored as
/// ids.  The outer polygon ([`OUTER_POLYGON`]) and the root wire
/// ([`ROOT_WIRE`]) are created by [`Decomposition::new`] and never removed.
#[derive(Clone, Debug)]
pub struct Decomposition {
    pub(crate) points:   Arena<PointId, Point>,
    pub(crate) segments: Arena<SegmentId, Segment>,
    pub(crate) wires:    Arena<WireId, Wire>,
    pub(crate) polygons: Arena<PolygonId, Polygon>,

    /// `(tail, head)` → segment.
    pub(crate) pt_to_seg: AHashMap<(PointId, PointId), SegmentId>,

    pub(crate) last_change: PolygonChange,
}

impl Default for Decomposition {
    fn default() -> Self { Self::new() }
}

impl Decomposition {
    /// An empty plane: only the outer polygon and its root wire.
    pub fn new() -> Self {
        let mut wires = Arena::new();
        let root = wires.insert(Wire::new(OUTER_POLYGON, None));
        let mut polygons = Arena::new();
        let outer = polygons.insert(Polygon::new(root));
        debug_assert_eq!(root, ROOT_WIRE);
        debug_assert_eq!(outer, OUTER_POLYGON);

        Self {
            points: Arena::new(),
            segments: Arena::new(),
            wires,
            polygons,
            pt_to_seg: AHashMap::new(),
            last_change: PolygonChange::None,
        }
    }

    // -----------------------------------------------------------------------
    // Counts
    // -----------------------------------------------------------------------

    pub fn num_points(&self)   -> usize { self.points.len() }
    pub fn num_segments(&self) -> usize { self.segments.len() }
    /// Number of wires including the root.
    pub fn num_wires(&self)    -> usize { self.wires.len() }
    /// Number of polygons including the outer polygon.
    pub fn num_polygons(&self) -> usize { self.polygons.len() }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn point(&self, id: PointId)       -> &Point   { &self.points[id] }
    pub fn segment(&self, id: SegmentId)   -> &Segment { &self.segments[id] }
    pub fn wire(&self, id: WireId)         -> &Wire    { &self.wires[id] }
    pub fn polygon(&self, id: PolygonId)   -> &Polygon { &self.polygons[id] }

    pub fn has_point(&self, id: PointId)     -> bool { self.points.contains(id) }
    pub fn has_segment(&self, id: SegmentId) -> bool { self.segments.contains(id) }
    pub fn has_wire(&self, id: WireId)       -> bool { self.wires.contains(id) }
    pub fn has_polygon(&self, id: PolygonId) -> bool { self.polygons.contains(id) }

    pub fn points(&self)   -> impl Iterator<Item = (PointId, &Point)> + '_     { self.points.iter() }
    pub fn segments(&self) -> impl Iterator<Item = (SegmentId, &Segment)> + '_ { self.segments.iter() }
    pub fn wires(&self)    -> impl Iterator<Item = (WireId, &Wire)> + '_       { self.wires.iter() }
    pub fn polygons(&self) -> impl Iterator<Item = (PolygonId, &Polygon)> + '_ { self.polygons.iter() }

    /// Always [`OUTER_POLYGON`].
    #[inline] pub fn outer_polygon(&self) -> PolygonId { OUTER_POLYGON }

    /// What the most recent mutating call changed.
    #[inline] pub fn last_change(&self) -> &PolygonChange { &self.last_change }

    /// Segment connecting `a` and `b` in either orientation.
    pub fn find_segment(&self, a: PointId, b: PointId) -> Option<SegmentId> {
        self.pt_to_seg.get(&(a, b)).or_else(|| self.pt_to_seg.get(&(b, a))).copied()
    }

    /// First point with exactly these coordinates.  Linear scan; callers
    /// that need fast lookup keep their own index.
    pub fn find_point(&self, xy: Coord<f64>) -> Option<PointId> {
        self.points.iter().find(|(_, p)| p.xy == xy).map(|(id, _)| id)
    }

    // -----------------------------------------------------------------------
    // Half-edge navigation
    // -----------------------------------------------------------------------

    #[inline] pub fn next(&self, he: HalfEdge) -> HalfEdge { self.segments[he.segment].next(he.side) }
    #[inline] pub fn wire_of(&self, he: HalfEdge) -> WireId { self.segments[he.segment].wire(he.side) }
    /// Point the half-edge leaves from.
    #[inline] pub fn origin(&self, he: HalfEdge) -> PointId { self.segments[he.segment].start(he.side) }
    /// Point the half-edge arrives at.
    #[inline] pub fn dest(&self, he: HalfEdge) -> PointId { self.segments[he.segment].end(he.side) }

    /// Coordinates of the origin and destination of `he`.
    pub fn coords(&self, he: HalfEdge) -> (Coord<f64>, Coord<f64>) {
        (self.points[self.origin(he)].xy, self.points[self.dest(he)].xy)
    }

    /// The half-edge whose `next` is `he`.  O(degree of `he`'s origin).
    pub fn prev(&self, he: HalfEdge) -> HalfEdge {
        self.star_from(he.twin())
            .find(|&h| self.next(h) == he)
            .unwrap_or_else(|| unreachable!("{he} has no predecessor"))
    }

    /// Half-edges of a wire walk starting at `start`.
    pub fn walk(&self, start: HalfEdge) -> WireWalk<'_> {
        WireWalk { decomp: self, stop: start, current: Some(start) }
    }

    /// Half-edges from `start` up to, but excluding, `stop`.
    pub fn walk_until(&self, start: HalfEdge, stop: HalfEdge) -> WireWalk<'_> {
        let current = (start != stop).then_some(start);
        WireWalk { decomp: self, stop, current }
    }

    /// Half-edges of `wire`'s walk; empty for the root.
    pub fn wire_half_edges(&self, wire: WireId) -> WireWalk<'_> {
        match self.wires[wire].half_edge {
            Some(start) => self.walk(start),
            None => WireWalk { decomp: self, stop: HalfEdge::new(SegmentId(0), Side::Left), current: None },
        }
    }

    /// Half-edges arriving at `point`, clockwise.  Empty for free points.
    pub fn star(&self, point: PointId) -> Star<'_> {
        Star { decomp: self, start: self.points[point].half_edge(), current: self.points[point].half_edge() }
    }

    /// Half-edges arriving at the destination of `start`, clockwise from it.
    pub fn star_from(&self, start: HalfEdge) -> Star<'_> {
        Star { decomp: self, start: Some(start), current: Some(start) }
    }

    /// Segments incident to `point`, clockwise.
    pub fn point_segments(&self, point: PointId) -> impl Iterator<Item = SegmentId> + '_ {
        self.star(point).map(|he| he.segment)
    }

    pub fn degree(&self, point: PointId) -> usize { self.star(point).count() }

    // -----------------------------------------------------------------------
    // Insertion slot
    // -----------------------------------------------------------------------

    /// Locate the wedge of `point`'s half-edge fan that `direction` points
    /// into.  `None` when `point` is free.
    ///
    /// Arriving half-edges are visited clockwise, so the angle of their
    /// outgoing direction relative to `direction` (wrapped into `[0, 2π)`)
    /// decreases until the fan passes `direction`; the first increase marks
    /// the slot.
    pub fn insert_vector(&self, point: PointId, direction: Coord<f64>) -> Option<Insertion> {
        let start = self.points[point].half_edge()?;
        Some(self.insertion_from(point, start, direction))
    }

    /// [`Self::insert_vector`] for a bound point whose fan contains `start`.
    pub(crate) fn insertion_from(&self, point: PointId, start: HalfEdge, direction: Coord<f64>) -> Insertion {
        let base = direction.y.atan2(direction.x);
        let here = self.points[point].xy;

        let mut last: Option<(f64, HalfEdge)> = None;
        for he in self.star_from(start).chain(std::iter::once(start)) {
            let out = self.points[self.origin(he)].xy - here;
            let mut da = out.y.atan2(out.x) - base;
            if da < 0.0 { da += TAU; }

            if let Some((last_da, prev)) = last {
                if da >= last_da {
                    let insertion = Insertion { prev, next: he.twin(), wire: self.wire_of(prev) };
                    log::trace!("insert at {point}: prev {} next {} in {}", insertion.prev, insertion.next, insertion.wire);
                    return insertion;
                }
            }
            last = Some((da, he));
        }
        unreachable!("half-edge fan of {point} does not close")
    }

    // -----------------------------------------------------------------------
    // Low-level link surgery shared by the atomic operations
    // -----------------------------------------------------------------------

    #[inline]
    pub(crate) fn set_next(&mut self, he: HalfEdge, next: HalfEdge) {
        self.segments[he.segment].next[he.side.index()] = next;
    }

    #[inline]
    pub(crate) fn set_wire(&mut self, he: HalfEdge, wire: WireId) {
        self.segments[he.segment].wire[he.side.index()] = wire;
    }

    /// Make `point` bound, with `he` as representative if it was free.
    pub(crate) fn bind_point(&mut self, point: PointId, he: HalfEdge) {
        if let PointLink::Free { polygon } = self.points[point].link {
            self.polygons[polygon].free_points.remove(&point);
            self.points[point].link = PointLink::Bound { half_edge: he };
        }
    }

    /// Make `point` a free point of `polygon`.
    pub(crate) fn set_free(&mut self, point: PointId, polygon: PolygonId) {
        if let PointLink::Free { polygon: old } = self.points[point].link {
            self.polygons[old].free_points.remove(&point);
        }
        self.points[point].link = PointLink::Free { polygon };
        self.polygons[polygon].free_points.insert(point);
    }

    /// Move `wire` below `parent` in the wire forest.
    pub(crate) fn set_parent(&mut self, wire: WireId, parent: WireId) {
        if let Some(old) = self.wires[wire].parent {
            self.wires[old].children.remove(&wire);
        }
        self.wires[wire].parent = Some(parent);
        self.wires[parent].children.insert(wire);
    }

    /// Register a new segment `tail → head` whose sides both lie on `wire`
    /// and turn around at their ends.  Endpoints are linked by the
    /// `connect_*` helpers.
    pub(crate) fn make_segment(&mut self, tail: PointId, head: PointId, wire: WireId) -> SegmentId {
        debug_assert_ne!(tail, head);
        let id = self.segments.insert_with(|id| Segment::isolated(id, tail, head, wire));
        self.pt_to_seg.insert((tail, head), id);
        id
    }

    /// Splice the end of `seg` on `side` into a bound point's fan.
    pub(crate) fn connect_end(&mut self, seg: SegmentId, side: Side, slot: Insertion) {
        let arriving = HalfEdge::new(seg, side);
        let point = self.dest(arriving);
        self.bind_point(point, arriving);
        self.set_next(arriving, slot.next);
        self.set_next(slot.prev, arriving.twin());
        self.set_wire(arriving, slot.wire);
    }

    /// Attach the end of `seg` on `side` to a free point: the side turns
    /// around there.
    pub(crate) fn connect_free_end(&mut self, seg: SegmentId, side: Side, wire: WireId) {
        let arriving = HalfEdge::new(seg, side);
        let point = self.dest(arriving);
        self.bind_point(point, arriving);
        self.set_next(arriving, arriving.twin());
        self.set_wire(arriving, wire);
    }

    /// Cut the end of `seg` on `side` out of its point's fan, leaving the side
    /// turning around there.  A point whose only segment is `seg` is left
    /// untouched; [`Self::destroy_segment`] frees it.
    pub(crate) fn unlink_end(&mut self, seg: SegmentId, side: Side) {
        let arriving = HalfEdge::new(seg, side);
        let leaving = arriving.twin();
        let after = self.next(arriving);
        if after == leaving {
            return;
        }
        let before = self.prev(leaving);
        self.set_next(before, after);
        self.set_next(arriving, leaving);

        let point = self.dest(arriving);
        if self.points[point].half_edge().is_some_and(|h| h.segment == seg) {
            self.points[point].link = PointLink::Bound { half_edge: after.twin() };
        }
    }

    /// Drop a fully unlinked segment.  Endpoints still represented by it
    /// become free points of `polygon`.
    pub(crate) fn destroy_segment(&mut self, seg: SegmentId, polygon: PolygonId) {
        for side in Side::BOTH {
            let arriving = HalfEdge::new(seg, side);
            let point = self.dest(arriving);
            if self.points[point].half_edge().is_some_and(|h| h.segment == seg) {
                debug_assert_eq!(self.next(arriving), arriving.twin(), "{point} still has other segments");
                self.set_free(point, polygon);
            }
        }
        let segment = self.segments.remove(seg).unwrap_or_else(|| unreachable!("{seg} destroyed twice"));
        self.pt_to_seg.remove(&(segment.tail(), segment.head()));
    }

    /// Create a wire of `polygon` below `parent`.
    pub(crate) fn add_wire(&mut self, polygon: PolygonId, parent: WireId, half_edge: HalfEdge) -> WireId {
        let wire = self.wires.insert(Wire::new(polygon, Some(half_edge)));
        self.set_parent(wire, parent);
        wire
    }

    /// Detach and drop a wire that no half-edge and no child references.
    pub(crate) fn remove_wire(&mut self, wire: WireId) {
        debug_assert_ne!(wire, ROOT_WIRE);
        debug_assert!(self.wires[wire].children.is_empty(), "{wire} still has children");
        if let Some(parent) = self.wires[wire].parent {
            self.wires[parent].children.remove(&wire);
        }
        self.wires.remove(wire);
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Iterator over the half-edges of a wire walk.
pub struct WireWalk<'a> {
    decomp:  &'a Decomposition,
    stop:    HalfEdge,
    current: Option<HalfEdge>,
}

impl<'a> Iterator for WireWalk<'a> {
    type Item = HalfEdge;

    fn next(&mut self) -> Option<HalfEdge> {
        let he = self.current?;
        let next = self.decomp.next(he);
        self.current = (next != self.stop).then_some(next);
        Some(he)
    }
}

/// Iterator over the half-edges arriving at one point, clockwise, using
/// `twin(next)` links.
pub struct Star<'a> {
    decomp:  &'a Decomposition,
    start:   Option<HalfEdge>,
    current: Option<HalfEdge>,
}

impl<'a> Iterator for Star<'a> {
    type Item = HalfEdge;

    fn next(&mut self) -> Option<HalfEdge> {
        let he = self.current?;
        let next = self.decomp.next(he).twin();
        self.current = (Some(next) != self.start).then_some(next);
        Some(he)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

    #[test]
    fn empty_decomposition() {
        let d = Decomposition::new();
        assert_eq!(d.num_points(), 0);
        assert_eq!(d.num_segments(), 0);
        assert_eq!(d.num_wires(), 1);
        assert_eq!(d.num_polygons(), 1);
        assert!(d.wire(ROOT_WIRE).is_root());
        assert_eq!(d.polygon(OUTER_POLYGON).outer_wire(), ROOT_WIRE);
        assert_eq!(d.wire_half_edges(ROOT_WIRE).count(), 0);
        assert_eq!(d.last_change(), &PolygonChange::None);
        assert!(d.check_consistency().is_ok());
    }

    /// Star with arms to the east, north and west.
    fn fan() -> (Decomposition, PointId, [SegmentId; 3]) {
        let mut d = Decomposition::new();
        let o = d.add_free_point(c(0.0, 0.0), OUTER_POLYGON).unwrap();
        let e = d.add_free_point(c(1.0, 0.0), OUTER_POLYGON).unwrap();
        let n = d.add_free_point(c(0.0, 1.0), OUTER_POLYGON).unwrap();
        let w = d.add_free_point(c(-1.0, 0.0), OUTER_POLYGON).unwrap();
        let se = d.new_segment(o, e).unwrap();
        let sn = d.new_segment(o, n).unwrap();
        let sw = d.new_segment(w, o).unwrap();
        (d, o, [se, sn, sw])
    }

    #[test]
    fn star_is_clockwise() {
        let (d, o, [se, sn, sw]) = fan();
        let order: Vec<_> = d.point_segments(o).collect();
        assert_eq!(order.len(), 3);
        // Rotate so that the east arm comes first: clockwise is east, west, north.
        let pos = order.iter().position(|&s| s == se).unwrap();
        let rotated: Vec<_> = order[pos..].iter().chain(&order[..pos]).copied().collect();
        assert_eq!(rotated, vec![se, sw, sn]);
        assert_eq!(d.degree(o), 3);
    }

    #[test]
    fn insert_vector_finds_wedge() {
        let (d, o, [se, sn, _]) = fan();
        // Direction north-east falls between the east arm (clockwise side)
        // and the north arm (counter-clockwise side).
        let slot = d.insert_vector(o, c(1.0, 1.0)).unwrap();
        assert_eq!(slot.prev.segment, sn);
        assert_eq!(slot.next.segment, se);
        assert_eq!(d.origin(slot.next), o);
        assert_eq!(d.dest(slot.prev), o);
    }

    #[test]
    fn insert_vector_single_edge() {
        let (d, o, [se, ..]) = fan();
        let e = d.segment(se).head();
        let slot = d.insert_vector(e, c(0.0, 1.0)).unwrap();
        assert_eq!(slot.prev.segment, se);
        assert_eq!(slot.next, slot.prev.twin());
        assert_ne!(e, o);
    }

    #[test]
    fn insert_vector_free_point() {
        let mut d = Decomposition::new();
        let p = d.add_free_point(c(0.0, 0.0), OUTER_POLYGON).unwrap();
        assert!(d.insert_vector(p, c(1.0, 0.0)).is_none());
    }

    #[test]
    fn prev_inverts_next() {
        let (d, _, segs) = fan();
        for seg in segs {
            for side in Side::BOTH {
                let he = HalfEdge::new(seg, side);
                assert_eq!(d.next(d.prev(he)), he);
            }
        }
    }
}
