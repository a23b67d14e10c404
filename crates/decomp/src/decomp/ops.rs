use geo::Coord;

use crate::change::PolygonChange;
use crate::error::TopologyError;
use crate::ids::{HalfEdge, PointId, PolygonId, SegmentId, Side};
use crate::point::{Point, PointLink};
use crate::segment::{parametric, Segment};

use super::Decomposition;

impl Decomposition {
    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    fn require_point(&self, point: PointId) -> Result<&Point, TopologyError> {
        self.points.get(point).ok_or(TopologyError::UnknownPoint(point))
    }

    fn require_segment(&self, segment: SegmentId) -> Result<&Segment, TopologyError> {
        self.segments.get(segment).ok_or(TopologyError::UnknownSegment(segment))
    }

    /// The free end of a new segment must lie in the polygon of the wedge it
    /// leaves `bound` through.
    fn require_same_region(&self, free: PointId, free_polygon: PolygonId, bound: PointId, bound_polygon: PolygonId)
        -> Result<(), TopologyError>
    {
        if free_polygon == bound_polygon { return Ok(()); }
        Err(TopologyError::RegionMismatch { a: free, a_polygon: free_polygon, b: bound, b_polygon: bound_polygon })
    }

    // -----------------------------------------------------------------------
    // Free points
    // -----------------------------------------------------------------------

    /// Add a point owned by `polygon`.  The caller is responsible for `xy`
    /// actually lying inside `polygon`.
    pub fn add_free_point(&mut self, xy: Coord<f64>, polygon: PolygonId) -> Result<PointId, TopologyError> {
        if !self.polygons.contains(polygon) {
            return Err(TopologyError::UnknownPolygon(polygon));
        }
        let point = self.points.insert(Point::free(xy, polygon));
        self.polygons[polygon].free_points.insert(point);
        self.last_change = PolygonChange::None;
        Ok(point)
    }

    /// Add a free point in whichever polygon contains `xy`.
    pub fn add_point(&mut self, xy: Coord<f64>) -> PointId {
        let polygon = self.locate(xy);
        let point = self.points.insert(Point::free(xy, polygon));
        self.polygons[polygon].free_points.insert(point);
        self.last_change = PolygonChange::None;
        point
    }

    pub fn remove_free_point(&mut self, point: PointId) -> Result<(), TopologyError> {
        self.last_change = PolygonChange::None;
        match self.require_point(point)?.link {
            PointLink::Free { polygon } => {
                self.polygons[polygon].free_points.remove(&point);
                self.points.remove(point);
                Ok(())
            }
            PointLink::Bound { .. } => Err(TopologyError::PointNotFree(point)),
        }
    }

    // -----------------------------------------------------------------------
    // Segments
    // -----------------------------------------------------------------------

    /// Connect two existing points by a segment `a → b` and return it.
    ///
    /// An existing segment between `a` and `b` (either orientation) is
    /// returned as is.  Otherwise the insertion is classified from the two
    /// endpoints' half-edge fans and one atomic surgery is applied:
    ///
    /// 1. both points free: new one-segment wire,
    /// 2. one point free: dendrite attached to the other point's wedge,
    /// 3. wedges on different wires: the wires are joined,
    /// 4. wedges on the same wire: the wire, and its polygon, are split.
    ///
    /// The segment must not cross any existing segment.
    pub fn new_segment(&mut self, a: PointId, b: PointId) -> Result<SegmentId, TopologyError> {
        self.last_change = PolygonChange::None;
        let link_a = self.require_point(a)?.link;
        let link_b = self.require_point(b)?.link;
        if a == b {
            return Err(TopologyError::DegenerateSegment(a));
        }
        if let Some(existing) = self.find_segment(a, b) {
            return Ok(existing);
        }

        let direction = self.points[b].xy - self.points[a].xy;
        match (link_a, link_b) {
            (PointLink::Free { polygon: pa }, PointLink::Free { polygon: pb }) => {
                if pa != pb {
                    return Err(TopologyError::RegionMismatch { a, a_polygon: pa, b, b_polygon: pb });
                }
                Ok(self.add_wire_segment(pa, a, b))
            }
            (PointLink::Free { polygon }, PointLink::Bound { half_edge }) => {
                let b_slot = self.insertion_from(b, half_edge, -direction);
                self.require_same_region(a, polygon, b, self.wires[b_slot.wire].polygon)?;
                Ok(self.add_dendrite(a, b, Side::Left, b_slot))
            }
            (PointLink::Bound { half_edge }, PointLink::Free { polygon }) => {
                let a_slot = self.insertion_from(a, half_edge, direction);
                self.require_same_region(b, polygon, a, self.wires[a_slot.wire].polygon)?;
                Ok(self.add_dendrite(a, b, Side::Right, a_slot))
            }
            (PointLink::Bound { half_edge: ha }, PointLink::Bound { half_edge: hb }) => {
                let a_slot = self.insertion_from(a, ha, direction);
                let b_slot = self.insertion_from(b, hb, -direction);
                if a_slot.wire == b_slot.wire {
                    return Ok(self.split_polygon(a, b, a_slot, b_slot));
                }
                let (pa, pb) = (self.wires[a_slot.wire].polygon, self.wires[b_slot.wire].polygon);
                if pa != pb {
                    return Err(TopologyError::RegionMismatch { a, a_polygon: pa, b, b_polygon: pb });
                }
                Ok(self.join_wires(a, b, a_slot, b_slot))
            }
        }
    }

    /// Remove `segment`, classified by its own `next` links:
    ///
    /// 1. both sides turn around: an isolated one-segment wire is dropped,
    /// 2. one side turns around: a dendrite tip is removed,
    /// 3. same wire on both sides: the wire splits in two,
    /// 4. different wires: the two polygons are joined.
    ///
    /// Endpoints left without segments become free points.
    pub fn delete_segment(&mut self, segment: SegmentId) -> Result<(), TopologyError> {
        self.last_change = PolygonChange::None;
        let seg = self.require_segment(segment)?;
        let left_turns  = seg.next(Side::Left)  == HalfEdge::new(segment, Side::Right);
        let right_turns = seg.next(Side::Right) == HalfEdge::new(segment, Side::Left);
        let dendrite = seg.is_dendrite();

        match (left_turns, right_turns) {
            (true, true)   => self.remove_wire_segment(segment),
            (true, false)  => self.remove_dendrite(segment, Side::Left),
            (false, true)  => self.remove_dendrite(segment, Side::Right),
            (false, false) if dendrite => self.split_wire(segment),
            (false, false) => self.join_polygons(segment),
        }
        Ok(())
    }

    /// Delete every segment at `point`, then the point itself.
    pub fn delete_point(&mut self, point: PointId) -> Result<(), TopologyError> {
        self.last_change = PolygonChange::None;
        self.require_point(point)?;
        let segments: Vec<_> = self.point_segments(point).collect();
        for segment in segments {
            self.delete_segment(segment)?;
        }
        let change = std::mem::take(&mut self.last_change);
        self.remove_free_point(point)?;
        self.last_change = change;
        Ok(())
    }

    /// Split `segment` at parameter `t ∈ (0, 1)` by a new bound point.
    ///
    /// The original segment keeps its tail and now ends at the new point; a
    /// new segment continues from the new point to the old head.  Wires and
    /// polygons are unaffected.
    pub fn split_segment(&mut self, segment: SegmentId, t: f64) -> Result<PointId, TopologyError> {
        self.last_change = PolygonChange::None;
        let seg = self.require_segment(segment)?;
        if !(t > 0.0 && t < 1.0) {
            return Err(TopologyError::SplitOutOfRange(t));
        }
        let (tail, head) = (seg.tail(), seg.head());
        let wires = seg.wire;
        let xy = parametric(self.points[tail].xy, self.points[head].xy, t);

        let old_left  = HalfEdge::new(segment, Side::Left);
        let old_right = HalfEdge::new(segment, Side::Right);
        let after_head  = self.next(old_left);
        let head_single = after_head == old_right;
        let before_head = self.prev(old_right);

        let mid = self.points.insert(Point { xy, link: PointLink::Bound { half_edge: old_left } });
        let new = self.segments.insert_with(|id| Segment {
            ends: [mid, head],
            wire: wires,
            next: [old_right, if head_single { HalfEdge::new(id, Side::Right) } else { after_head }],
        });
        let new_left  = HalfEdge::new(new, Side::Left);
        let new_right = HalfEdge::new(new, Side::Right);

        self.segments[segment].ends[1] = mid;
        self.set_next(old_left, new_left);
        if !head_single {
            self.set_next(before_head, new_right);
        }
        if self.points[head].half_edge() == Some(old_left) {
            self.points[head].link = PointLink::Bound { half_edge: new_left };
        }

        self.pt_to_seg.remove(&(tail, head));
        self.pt_to_seg.insert((tail, mid), segment);
        self.pt_to_seg.insert((mid, head), new);

        self.last_change = self.shape_change(&[wires[0], wires[1]]);
        log::debug!("split {segment} at t={t}: {mid} and {new}");
        Ok(mid)
    }

    /// Remove a bound point of degree 2, fusing its two segments into one.
    /// The surviving segment is returned.
    pub fn join_segments(&mut self, point: PointId) -> Result<SegmentId, TopologyError> {
        self.last_change = PolygonChange::None;
        let arriving = match self.require_point(point)?.link {
            PointLink::Bound { half_edge } => half_edge,
            PointLink::Free { .. } => return Err(TopologyError::NotDegreeTwo { point, degree: 0 }),
        };
        let degree = self.degree(point);
        if degree != 2 {
            return Err(TopologyError::NotDegreeTwo { point, degree });
        }

        // `arriving` runs along the kept segment into `point`; `onward`
        // continues along the removed one to the far point.
        let kept = arriving.segment;
        let onward = self.next(arriving);
        let removed = onward.segment;
        let back = onward.twin();
        let near = self.origin(arriving);
        let far = self.dest(onward);
        if let Some(existing) = self.find_segment(near, far) {
            return Err(TopologyError::SegmentExists { a: near, b: far, segment: existing });
        }

        let after_far  = self.next(onward);
        let far_single = after_far == back;
        let before_far = self.prev(back);
        debug_assert_eq!(self.wire_of(arriving), self.wire_of(onward));

        self.set_next(arriving, if far_single { arriving.twin() } else { after_far });
        if !far_single {
            self.set_next(before_far, arriving.twin());
        }
        for (gone, replacement) in [(onward, arriving), (back, arriving.twin())] {
            let wire = self.wire_of(gone);
            if self.wires[wire].half_edge == Some(gone) {
                self.wires[wire].half_edge = Some(replacement);
            }
        }
        if self.points[far].half_edge().is_some_and(|h| h.segment == removed) {
            self.points[far].link = PointLink::Bound { half_edge: arriving };
        }

        let kept_key = (self.segments[kept].tail(), self.segments[kept].head());
        self.pt_to_seg.remove(&kept_key);
        self.segments[kept].ends[arriving.side.index()] = far;
        let new_key = (self.segments[kept].tail(), self.segments[kept].head());
        self.pt_to_seg.insert(new_key, kept);
        if let Some(gone) = self.segments.remove(removed) {
            self.pt_to_seg.remove(&(gone.tail(), gone.head()));
        }
        self.points.remove(point);

        let wires = self.segments[kept].wire;
        self.last_change = self.shape_change(&[wires[0], wires[1]]);
        log::debug!("joined {kept} and {removed} at {point}");
        Ok(kept)
    }

    /// `Shape` change naming the polygons of `wires`, without repeats.
    pub(crate) fn shape_change(&self, wires: &[crate::ids::WireId]) -> PolygonChange {
        let mut polygons: Vec<PolygonId> = wires.iter().map(|&w| self.wires[w].polygon).collect();
        polygons.sort();
        polygons.dedup();
        PolygonChange::Shape(polygons)
    }
}
