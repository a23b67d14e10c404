#![doc = "polydecomp public API: the decomposition engine plus JSON documents and edit scripts"]
pub mod io;
mod script;

#[doc(inline)]
pub use decomp::{
    ConsistencyError, Decomposition, DecompositionData, HalfEdge, ImportError, PointId, PolygonChange,
    PolygonData, PolygonId, SegmentId, Side, TopologyError, WireId, OUTER_POLYGON,
};

#[doc(inline)]
pub use io::{read_document, write_document};

#[doc(inline)]
pub use script::{apply_edits, read_script, Edit};
