use geo::Coord;

use crate::ids::{HalfEdge, PolygonId};

/// How a point takes part in the decomposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointLink {
    /// Not an endpoint of any segment; owned by `polygon`'s free-point set.
    Free { polygon: PolygonId },
    /// Endpoint of at least one segment.  `half_edge` is any half-edge
    /// arriving at the point.
    Bound { half_edge: HalfEdge },
}

/// A node of the planar graph.
#[derive(Clone, Debug)]
pub struct Point {
    pub xy: Coord<f64>,
    pub(crate) link: PointLink,
}

impl Point {
    pub(crate) fn free(xy: Coord<f64>, polygon: PolygonId) -> Self {
        Self { xy, link: PointLink::Free { polygon } }
    }

    #[inline] pub fn link(&self) -> PointLink { self.link }

    #[inline]
    pub fn is_free(&self) -> bool { matches!(self.link, PointLink::Free { .. }) }

    /// Owning polygon of a free point.
    #[inline]
    pub fn polygon(&self) -> Option<PolygonId> {
        match self.link {
            PointLink::Free { polygon } => Some(polygon),
            PointLink::Bound { .. } => None,
        }
    }

    /// Representative arriving half-edge of a bound point.
    #[inline]
    pub fn half_edge(&self) -> Option<HalfEdge> {
        match self.link {
            PointLink::Bound { half_edge } => Some(half_edge),
            PointLink::Free { .. } => None,
        }
    }
}
