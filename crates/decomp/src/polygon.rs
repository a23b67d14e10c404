use std::collections::BTreeSet;

use crate::ids::{PointId, WireId};

/// A region of the plane: one outer wire, the holes hanging below it in the
/// wire forest, and the free points lying inside.
#[derive(Clone, Debug)]
pub struct Polygon {
    pub(crate) outer_wire:  WireId,
    pub(crate) free_points: BTreeSet<PointId>,
}

impl Polygon {
    pub(crate) fn new(outer_wire: WireId) -> Self {
        Self { outer_wire, free_points: BTreeSet::new() }
    }

    #[inline] pub fn outer_wire(&self) -> WireId { self.outer_wire }
    #[inline] pub fn free_points(&self) -> &BTreeSet<PointId> { &self.free_points }
}
