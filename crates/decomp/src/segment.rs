use geo::Coord;

use crate::ids::{HalfEdge, PointId, SegmentId, Side, WireId};

/// An edge between two points, stored as a pair of half-edges.
///
/// All per-side arrays are indexed by [`Side::index`]; `ends[side.index()]`
/// is the point the half-edge `(self, side)` arrives at, so `ends[0]` is the
/// tail and `ends[1]` the head.
#[derive(Clone, Debug)]
pub struct Segment {
    pub(crate) ends: [PointId; 2],
    /// Wire to the left of each half-edge.
    pub(crate) wire: [WireId; 2],
    /// Successor of each half-edge along its wire; it leaves the point the
    /// half-edge arrives at.
    pub(crate) next: [HalfEdge; 2],
}

impl Segment {
    /// A segment linked only to itself: each side turns around at the end it
    /// arrives at, and both sides lie on `wire`.
    pub(crate) fn isolated(id: SegmentId, tail: PointId, head: PointId, wire: WireId) -> Self {
        Self {
            ends: [tail, head],
            wire: [wire, wire],
            next: [HalfEdge::new(id, Side::Left), HalfEdge::new(id, Side::Right)],
        }
    }

    #[inline] pub fn tail(&self) -> PointId { self.ends[0] }
    #[inline] pub fn head(&self) -> PointId { self.ends[1] }
    #[inline] pub fn ends(&self) -> [PointId; 2] { self.ends }

    /// Point the half-edge on `side` arrives at.
    #[inline] pub fn end(&self, side: Side) -> PointId { self.ends[side.index()] }

    /// Point the half-edge on `side` leaves from.
    #[inline] pub fn start(&self, side: Side) -> PointId { self.ends[side.opposite().index()] }

    #[inline] pub fn wire(&self, side: Side) -> WireId { self.wire[side.index()] }
    #[inline] pub fn next(&self, side: Side) -> HalfEdge { self.next[side.index()] }

    /// Both sides lie on the same wire.
    #[inline]
    pub fn is_dendrite(&self) -> bool { self.wire[0] == self.wire[1] }

    /// The side arriving at `point`, if `point` is an endpoint.
    pub fn side_at(&self, point: PointId) -> Option<Side> {
        Side::BOTH.into_iter().find(|&side| self.end(side) == point)
    }
}

// ---------------------------------------------------------------------------
// Geometry helpers on raw coordinates
// ---------------------------------------------------------------------------

/// Point at parameter `t` on `a → b`.
#[inline]
pub(crate) fn parametric(a: Coord<f64>, b: Coord<f64>, t: f64) -> Coord<f64> {
    a + (b - a) * t
}

/// Does segment `a → b` cross the rightward horizontal half-line starting at
/// `xy`?
///
/// The vertical span is half-open (`min_y <= y < max_y`), so a ray through a
/// shared vertex is counted exactly once and horizontal segments never count.
pub(crate) fn crosses_x_ray(a: Coord<f64>, b: Coord<f64>, xy: Coord<f64>) -> bool {
    let (min_y, max_y) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
    if !(min_y <= xy.y && xy.y < max_y) {
        return false;
    }
    let (min_x, max_x) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
    if min_x > xy.x { return true; }
    if max_x < xy.x { return false; }

    let right_of = (xy.y - a.y) * (b.x - a.x) > (xy.x - a.x) * (b.y - a.y);
    if b.y < a.y { !right_of } else { right_of }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

    #[test]
    fn vertical_segment_to_the_right_crosses() {
        assert!(crosses_x_ray(c(1.0, 0.0), c(1.0, 1.0), c(0.5, 0.5)));
        assert!(crosses_x_ray(c(1.0, 1.0), c(1.0, 0.0), c(0.5, 0.5)));
        assert!(!crosses_x_ray(c(0.0, 0.0), c(0.0, 1.0), c(0.5, 0.5)));
    }

    #[test]
    fn span_is_half_open() {
        // Ray through the lower end counts, through the upper end does not.
        assert!(crosses_x_ray(c(1.0, 0.0), c(1.0, 1.0), c(0.0, 0.0)));
        assert!(!crosses_x_ray(c(1.0, 0.0), c(1.0, 1.0), c(0.0, 1.0)));
    }

    #[test]
    fn horizontal_never_crosses() {
        assert!(!crosses_x_ray(c(0.0, 0.0), c(2.0, 0.0), c(-1.0, 0.0)));
    }

    #[test]
    fn slanted_segment_uses_side_test() {
        // Segment from (0,0) to (2,2): at height 1 it passes x = 1.
        assert!(crosses_x_ray(c(0.0, 0.0), c(2.0, 2.0), c(0.5, 1.0)));
        assert!(!crosses_x_ray(c(0.0, 0.0), c(2.0, 2.0), c(1.5, 1.0)));
        assert!(crosses_x_ray(c(2.0, 2.0), c(0.0, 0.0), c(0.5, 1.0)));
        assert!(!crosses_x_ray(c(2.0, 2.0), c(0.0, 0.0), c(1.5, 1.0)));
        // Falling slope.
        assert!(crosses_x_ray(c(0.0, 2.0), c(2.0, 0.0), c(0.5, 1.0)));
        assert!(!crosses_x_ray(c(0.0, 2.0), c(2.0, 0.0), c(1.5, 1.0)));
    }

    #[test]
    fn parametric_midpoint() {
        assert_eq!(parametric(c(0.0, 0.0), c(2.0, 4.0), 0.5), c(1.0, 2.0));
    }

    #[test]
    fn isolated_segment_turns_around() {
        let id = SegmentId(4);
        let seg = Segment::isolated(id, PointId(0), PointId(1), WireId(2));
        assert_eq!(seg.next(Side::Left), HalfEdge::new(id, Side::Right));
        assert_eq!(seg.next(Side::Right), HalfEdge::new(id, Side::Left));
        assert!(seg.is_dendrite());
        assert_eq!(seg.side_at(PointId(1)), Some(Side::Left));
        assert_eq!(seg.start(Side::Left), PointId(0));
    }
}
