//! The eight atomic edits behind [`Decomposition::new_segment`] and
//! [`Decomposition::delete_segment`].  Each one leaves the structure
//! consistent and records its [`PolygonChange`].

use crate::change::PolygonChange;
use crate::ids::{HalfEdge, PointId, PolygonId, SegmentId, Side};
use crate::polygon::Polygon;
use crate::wire::Wire;

use super::{Decomposition, Insertion};

impl Decomposition {
    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Both endpoints free in `polygon`: the segment forms a wire of its own,
    /// a new hole of `polygon`.
    pub(super) fn add_wire_segment(&mut self, polygon: PolygonId, a: PointId, b: PointId) -> SegmentId {
        let parent = self.polygons[polygon].outer_wire;
        let wire = self.wires.insert(Wire::new(polygon, None));
        let seg = self.make_segment(a, b, wire);
        self.wires[wire].half_edge = Some(HalfEdge::new(seg, Side::Right));
        self.set_parent(wire, parent);
        self.connect_free_end(seg, Side::Right, wire);
        self.connect_free_end(seg, Side::Left, wire);

        self.last_change = PolygonChange::Shape(vec![polygon]);
        log::debug!("{seg}: new wire {wire} in {polygon}");
        seg
    }

    /// One endpoint free: hang the segment off the bound endpoint's wedge.
    /// `root_side` is the side arriving at the bound endpoint.
    pub(super) fn add_dendrite(&mut self, tail: PointId, head: PointId, root_side: Side, slot: Insertion) -> SegmentId {
        let seg = self.make_segment(tail, head, slot.wire);
        self.connect_end(seg, root_side, slot);
        self.connect_free_end(seg, root_side.opposite(), slot.wire);

        let polygon = self.wires[slot.wire].polygon;
        self.last_change = PolygonChange::Shape(vec![polygon]);
        log::debug!("{seg}: dendrite on {}", slot.wire);
        seg
    }

    /// Endpoints on two different wires of one polygon: the wires merge.
    ///
    /// The polygon's outer wire always survives.  When both are holes, the
    /// wire at `b` survives and adopts the faces of the other.
    pub(super) fn join_wires(&mut self, a: PointId, b: PointId, a_slot: Insertion, b_slot: Insertion) -> SegmentId {
        let polygon = self.wires[a_slot.wire].polygon;
        let outer = self.polygons[polygon].outer_wire;

        let seg = self.make_segment(a, b, a_slot.wire);
        self.connect_end(seg, Side::Right, a_slot);
        self.connect_end(seg, Side::Left, b_slot);

        let (keep_side, adopter) = if outer == a_slot.wire {
            (Side::Right, self.wires[a_slot.wire].parent)
        } else if outer == b_slot.wire {
            (Side::Left, self.wires[b_slot.wire].parent)
        } else {
            (Side::Left, Some(b_slot.wire))
        };
        let keep_he = HalfEdge::new(seg, keep_side);
        let keep = self.wire_of(keep_he);
        let removed = self.wire_of(keep_he.twin());

        let relabel: Vec<_> = self.walk_until(keep_he.twin(), keep_he).collect();
        for he in relabel {
            debug_assert_eq!(self.wire_of(he), removed);
            self.set_wire(he, keep);
        }

        let adopter = adopter.unwrap_or_else(|| unreachable!("{keep} carries half-edges but is the root"));
        let orphans: Vec<_> = self.wires[removed].children.iter().copied().collect();
        for child in orphans {
            self.set_parent(child, adopter);
        }
        self.remove_wire(removed);

        self.last_change = PolygonChange::Shape(vec![polygon]);
        log::debug!("{seg}: joined {removed} into {keep}");
        seg
    }

    /// Endpoints on the same wire: the walk is cut in two and a new polygon
    /// appears on the left of the segment.
    ///
    /// Cutting a polygon's outer wire splits the polygon; cutting a hole
    /// closes off a new polygon inside that hole.
    pub(super) fn split_polygon(&mut self, a: PointId, b: PointId, a_slot: Insertion, b_slot: Insertion) -> SegmentId {
        let wire = a_slot.wire;
        let polygon = self.wires[wire].polygon;
        let parent = self.wires[wire].parent.unwrap_or_else(|| unreachable!("root wire has no wedges"));

        let seg = self.make_segment(a, b, wire);
        let right = HalfEdge::new(seg, Side::Right);
        let left  = HalfEdge::new(seg, Side::Left);
        self.connect_end(seg, Side::Right, a_slot);

        let new_wire = self.wires.insert(Wire::new(polygon, Some(left)));
        let new_polygon = self.polygons.insert(Polygon::new(new_wire));
        self.wires[new_wire].polygon = new_polygon;
        self.connect_end(seg, Side::Left, Insertion { wire: new_wire, ..b_slot });

        let relabel: Vec<_> = self.walk(left).collect();
        for he in relabel {
            self.set_wire(he, new_wire);
        }
        self.wires[wire].half_edge = Some(right);

        if self.polygons[polygon].outer_wire == wire {
            self.set_parent(new_wire, parent);
            self.last_change = PolygonChange::Split { orig: polygon, new: new_polygon };
        } else {
            // One of the two walks is the new polygon's boundary, the other
            // keeps surrounding the component as a hole of `polygon`.
            let (inner, outer) = if self.wire_contains_wire(wire, new_wire) {
                (new_wire, wire)
            } else {
                (wire, new_wire)
            };
            let faces: Vec<_> = self.wires[wire].children.iter().copied().collect();
            for face in faces {
                self.set_parent(face, outer);
            }
            self.wires[outer].polygon = polygon;
            self.wires[inner].polygon = new_polygon;
            self.polygons[new_polygon].outer_wire = inner;
            self.set_parent(outer, parent);
            self.set_parent(inner, outer);
            self.last_change = PolygonChange::Add { parent: polygon, new: new_polygon };
        }

        self.claim_from(polygon, new_polygon);
        log::debug!("{seg}: {polygon} split off {new_polygon}");
        seg
    }

    /// Hand free points and holes of `from` that lie inside the outer wire of
    /// `to` over to `to`.
    fn claim_from(&mut self, from: PolygonId, to: PolygonId) {
        let boundary = self.polygons[to].outer_wire;

        let points: Vec<_> = self.polygons[from].free_points.iter().copied()
            .filter(|&p| self.wire_contains_point(boundary, self.points[p].xy))
            .collect();
        for point in points {
            self.set_free(point, to);
        }

        let from_outer = self.polygons[from].outer_wire;
        let holes: Vec<_> = self.wires[from_outer].children.iter().copied()
            .filter(|&h| h != boundary && self.wires[h].polygon == from)
            .filter(|&h| self.wire_contains_wire(boundary, h))
            .collect();
        for hole in holes {
            self.set_parent(hole, boundary);
            self.wires[hole].polygon = to;
        }
    }

    // -----------------------------------------------------------------------
    // Deletion
    // -----------------------------------------------------------------------

    /// The segment is a wire on its own: drop both.
    pub(super) fn remove_wire_segment(&mut self, seg: SegmentId) {
        let wire = self.segments[seg].wire(Side::Left);
        let polygon = self.wires[wire].polygon;
        self.remove_wire(wire);
        self.destroy_segment(seg, polygon);

        self.last_change = PolygonChange::Shape(vec![polygon]);
        log::debug!("{seg}: removed wire {wire}");
    }

    /// The side `tip_side` turns around at a point of degree one.
    pub(super) fn remove_dendrite(&mut self, seg: SegmentId, tip_side: Side) {
        let root_side = tip_side.opposite();
        let wire = self.segments[seg].wire(root_side);
        let polygon = self.wires[wire].polygon;

        if self.wires[wire].half_edge.is_some_and(|h| h.segment == seg) {
            self.wires[wire].half_edge = Some(self.next(HalfEdge::new(seg, root_side)));
        }
        self.unlink_end(seg, root_side);
        self.destroy_segment(seg, polygon);

        self.last_change = PolygonChange::Shape(vec![polygon]);
        log::debug!("{seg}: removed dendrite from {wire}");
    }

    /// Both sides on one wire, neither end of degree one: the wire falls
    /// apart into two walks.
    pub(super) fn split_wire(&mut self, seg: SegmentId) {
        let wire = self.segments[seg].wire(Side::Left);
        let polygon = self.wires[wire].polygon;
        let parent = self.wires[wire].parent.unwrap_or_else(|| unreachable!("root wire has no segments"));

        let right = HalfEdge::new(seg, Side::Right);
        let head_part = self.next(HalfEdge::new(seg, Side::Left));
        let tail_part = self.next(right);

        let split_off = self.add_wire(polygon, parent, head_part);
        let relabel: Vec<_> = self.walk_until(head_part, right).collect();
        for he in relabel {
            self.set_wire(he, split_off);
        }
        self.wires[wire].half_edge = Some(tail_part);

        self.unlink_end(seg, Side::Left);
        self.unlink_end(seg, Side::Right);
        self.destroy_segment(seg, polygon);

        if self.polygons[polygon].outer_wire == wire {
            // The polygon's boundary was pinched: one walk stays the outer
            // wire, the other becomes a hole.
            let (outer, inner) = if self.wire_contains_wire(wire, split_off) {
                (wire, split_off)
            } else {
                (split_off, wire)
            };
            self.polygons[polygon].outer_wire = outer;
            self.set_parent(outer, parent);
            if outer == split_off {
                let holes: Vec<_> = self.wires[wire].children.iter().copied().collect();
                for hole in holes {
                    self.set_parent(hole, split_off);
                }
            }
            self.set_parent(inner, outer);

            let siblings: Vec<_> = self.wires[parent].children.iter().copied()
                .filter(|&w| w != outer)
                .filter(|&w| self.wire_contains_wire(inner, w))
                .collect();
            for sibling in siblings {
                self.set_parent(sibling, inner);
            }
        } else {
            // A hole came apart into two separate components.
            let faces: Vec<_> = self.wires[wire].children.iter().copied()
                .filter(|&w| self.wire_contains_wire(split_off, w))
                .collect();
            for face in faces {
                self.set_parent(face, split_off);
            }
        }

        self.last_change = PolygonChange::Shape(vec![polygon]);
        log::debug!("{seg}: {wire} split off {split_off}");
    }

    /// The two sides bound different polygons: they merge into one.
    ///
    /// Sibling polygons under the same wire give a `Join`; a polygon bounded
    /// by a hole of the other gives a `Remove` of the inner one.
    pub(super) fn join_polygons(&mut self, seg: SegmentId) {
        let left  = self.segments[seg].wire(Side::Left);
        let right = self.segments[seg].wire(Side::Right);
        let (left_parent, right_parent) = (self.wires[left].parent, self.wires[right].parent);

        let (keep, removed_wire, structural) = if left_parent == right_parent {
            (right, left, true)
        } else if left_parent == Some(right) {
            (right, left, false)
        } else {
            debug_assert_eq!(right_parent, Some(left));
            (left, right, false)
        };
        let kept = self.wires[keep].polygon;
        let removed = self.wires[removed_wire].polygon;
        debug_assert_eq!(self.polygons[removed].outer_wire, removed_wire);

        let kept_outer = self.polygons[kept].outer_wire;
        let holes: Vec<_> = self.wires[removed_wire].children.iter().copied().collect();
        for hole in holes {
            self.set_parent(hole, kept_outer);
            self.wires[hole].polygon = kept;
        }
        let points: Vec<_> = self.polygons[removed].free_points.iter().copied().collect();
        for point in points {
            self.set_free(point, kept);
        }

        let relabel: Vec<_> = self.wire_half_edges(removed_wire).collect();
        for he in relabel {
            self.set_wire(he, keep);
        }
        if self.wires[keep].half_edge.is_some_and(|h| h.segment == seg) {
            self.wires[keep].half_edge = Some(self.next(HalfEdge::new(seg, Side::Left)));
        }

        self.unlink_end(seg, Side::Left);
        self.unlink_end(seg, Side::Right);
        self.destroy_segment(seg, kept);
        self.remove_wire(removed_wire);
        self.polygons.remove(removed);

        self.last_change = if structural {
            PolygonChange::Join { kept, removed }
        } else {
            PolygonChange::Remove { kept, removed }
        };
        log::debug!("{seg}: {removed} merged into {kept}");
    }
}
