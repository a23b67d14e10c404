pub mod arena;
pub mod change;
pub mod decomp;
pub mod error;
pub mod ids;
pub mod io;
pub mod point;
pub mod polygon;
pub mod segment;
pub mod wire;

pub use change::PolygonChange;
pub use decomp::{contain::CONTAINS_EPS, Decomposition, Insertion, Star, WireWalk};
pub use error::{ConsistencyError, ImportError, TopologyError};
pub use ids::{HalfEdge, PointId, PolygonId, SegmentId, Side, WireId, OUTER_POLYGON, ROOT_WIRE};
pub use io::{DecompositionData, PolygonData};
pub use point::{Point, PointLink};
pub use polygon::Polygon;
pub use segment::Segment;
pub use wire::Wire;
