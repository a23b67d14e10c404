//! Strongly-typed handles into the decomposition tables, plus the half-edge
//! addressing shared by every module.
//!
//! # Half-edges
//!
//! Every segment has two **sides**.  A side together with its segment forms a
//! directed half-edge:
//!
//! * `Side::Left`  runs tail → head,
//! * `Side::Right` runs head → tail.
//!
//! The wire recorded for a side lies to the *left* of its half-edge, so
//! bounded faces are walked counter-clockwise.  A half-edge *arrives* at the
//! endpoint named by its side: `Left` at the head, `Right` at the tail.

use std::fmt;

// ---------------------------------------------------------------------------
// Index types
// ---------------------------------------------------------------------------

macro_rules! idx {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl crate::arena::ArenaId for $name {
            #[inline] fn from_index(index: usize) -> Self { Self(index) }
            #[inline] fn index(self) -> usize { self.0 }
        }
    };
}

idx!(PointId);
idx!(SegmentId);
idx!(WireId);
idx!(PolygonId);

/// The outer (unbounded) polygon, present for the whole lifetime of a
/// decomposition.
pub const OUTER_POLYGON: PolygonId = PolygonId(0);

/// The root of the wire forest; outer wire of [`OUTER_POLYGON`].
pub const ROOT_WIRE: WireId = WireId(0);

// ---------------------------------------------------------------------------
// Sides and half-edges
// ---------------------------------------------------------------------------

/// One of the two sides of a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Half-edge head → tail; arrives at the tail.
    Right = 0,
    /// Half-edge tail → head; arrives at the head.
    Left = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Right, Side::Left];

    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Right => Side::Left,
            Side::Left  => Side::Right,
        }
    }

    /// Slot in the per-side arrays of a segment.  Also the slot of the
    /// endpoint this side arrives at (`0` tail, `1` head).
    #[inline]
    pub fn index(self) -> usize { self as usize }
}

/// A directed half-edge: one side of one segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdge {
    pub segment: SegmentId,
    pub side:    Side,
}

impl HalfEdge {
    #[inline]
    pub fn new(segment: SegmentId, side: Side) -> Self { Self { segment, side } }

    /// The same segment traversed the other way.
    #[inline]
    pub fn twin(self) -> Self { Self { segment: self.segment, side: self.side.opposite() } }
}

impl fmt::Display for HalfEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.segment, self.side)
    }
}
