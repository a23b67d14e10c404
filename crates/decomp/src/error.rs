use thiserror::Error;

use crate::ids::{PointId, PolygonId, SegmentId, WireId};

/// Caller mistakes reported by the mutating operations of a
/// [`Decomposition`](crate::Decomposition).  The structure is left untouched
/// whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    #[error("segment endpoints coincide: {0}")]
    DegenerateSegment(PointId),

    #[error("unknown point {0}")]
    UnknownPoint(PointId),

    #[error("unknown segment {0}")]
    UnknownSegment(SegmentId),

    #[error("unknown polygon {0}")]
    UnknownPolygon(PolygonId),

    /// The two ends of a new segment lie in different polygons, i.e. the
    /// segment would cross a boundary.
    #[error("{a} lies in {a_polygon} but {b} lies in {b_polygon}")]
    RegionMismatch { a: PointId, a_polygon: PolygonId, b: PointId, b_polygon: PolygonId },

    #[error("{0} is bound to a segment")]
    PointNotFree(PointId),

    #[error("split parameter {0} is outside (0, 1)")]
    SplitOutOfRange(f64),

    #[error("{point} has degree {degree}, expected 2")]
    NotDegreeTwo { point: PointId, degree: usize },

    #[error("{a} and {b} are already connected by {segment}")]
    SegmentExists { a: PointId, b: PointId, segment: SegmentId },
}

/// First invariant found violated by
/// [`Decomposition::check_consistency`](crate::Decomposition::check_consistency).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("{0}: {1}")]
    Point(PointId, &'static str),

    #[error("{0}: {1}")]
    Segment(SegmentId, &'static str),

    #[error("{0}: {1}")]
    Wire(WireId, &'static str),

    #[error("{0}: {1}")]
    Polygon(PolygonId, &'static str),

    #[error("point pair ({0}, {1}): {2}")]
    Lookup(PointId, PointId, &'static str),
}

/// Errors raised while rebuilding a decomposition from exported data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    #[error("segment {segment} references point index {point} (only {num_points} points)")]
    PointIndex { segment: usize, point: usize, num_points: usize },

    #[error("free point index {0} out of range")]
    FreePointIndex(usize),

    #[error("segment {index}: {source}")]
    Segment { index: usize, source: TopologyError },

    #[error("expected {expected} {what}, rebuilt {found}")]
    Mismatch { what: &'static str, expected: usize, found: usize },
}
