use std::collections::BTreeSet;

use crate::ids::{HalfEdge, PolygonId, WireId};

/// A closed walk of half-edges: the outer boundary of a polygon or one of its
/// holes.
///
/// Wires form a forest mirroring geometric containment.  The root wire
/// (outer boundary of the unbounded polygon) has no parent and no
/// half-edges.  A hole's parent is the outer wire of its polygon; the outer
/// wire of a bounded polygon has as parent the wire that surrounds the
/// connected component it belongs to (a hole of the enclosing polygon, or the
/// root).
#[derive(Clone, Debug)]
pub struct Wire {
    pub(crate) parent:    Option<WireId>,
    pub(crate) children:  BTreeSet<WireId>,
    pub(crate) polygon:   PolygonId,
    /// Any half-edge of the walk.  `None` only for the root.
    pub(crate) half_edge: Option<HalfEdge>,
}

impl Wire {
    pub(crate) fn new(polygon: PolygonId, half_edge: Option<HalfEdge>) -> Self {
        Self { parent: None, children: BTreeSet::new(), polygon, half_edge }
    }

    #[inline] pub fn parent(&self) -> Option<WireId> { self.parent }
    #[inline] pub fn children(&self) -> &BTreeSet<WireId> { &self.children }
    #[inline] pub fn polygon(&self) -> PolygonId { self.polygon }
    #[inline] pub fn half_edge(&self) -> Option<HalfEdge> { self.half_edge }

    /// The root wire is the only one without a parent.
    #[inline] pub fn is_root(&self) -> bool { self.parent.is_none() }
}
