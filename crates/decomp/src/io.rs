//! Plain-data snapshot of a decomposition.
//!
//! Ids are replaced by dense indices into the `points` and `segments` lists,
//! so a snapshot is independent of the arena slots it came from.  Segments
//! keep their orientation (`[tail, head]`).

use ahash::AHashMap;
use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::change::PolygonChange;
use crate::decomp::Decomposition;
use crate::error::ImportError;
use crate::ids::{PointId, SegmentId, WireId, OUTER_POLYGON};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DecompositionData {
    pub points:   Vec<[f64; 2]>,
    pub segments: Vec<[usize; 2]>,
    /// Outer polygon first.  Optional on import; when present, the rebuilt
    /// polygon and wire counts are checked against it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub polygons: Vec<PolygonData>,
}

/// One polygon as indices into [`DecompositionData::segments`] and
/// [`DecompositionData::points`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonData {
    /// Segments along the outer wire in walk order; empty for the outer
    /// polygon.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outer: Vec<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub free_points: Vec<usize>,
}

impl Decomposition {
    /// Snapshot points, segments and polygons in id order.
    pub fn export(&self) -> DecompositionData {
        let point_index: AHashMap<PointId, usize> =
            self.points.ids().enumerate().map(|(i, id)| (id, i)).collect();
        let segment_index: AHashMap<SegmentId, usize> =
            self.segments.ids().enumerate().map(|(i, id)| (id, i)).collect();

        let wire_segments = |wire: WireId| -> Vec<usize> {
            self.wire_half_edges(wire).map(|he| segment_index[&he.segment]).collect()
        };

        let points = self.points.iter().map(|(_, p)| [p.xy.x, p.xy.y]).collect();
        let segments = self.segments.iter()
            .map(|(_, s)| [point_index[&s.tail()], point_index[&s.head()]])
            .collect();
        let polygons = self.polygons.iter()
            .map(|(id, polygon)| PolygonData {
                outer: wire_segments(polygon.outer_wire),
                holes: self.holes(id).map(&wire_segments).collect(),
                free_points: polygon.free_points.iter().map(|p| point_index[p]).collect(),
            })
            .collect();

        DecompositionData { points, segments, polygons }
    }

    /// Rebuild a decomposition by inserting every point, then every segment
    /// in order.  Segments must not cross.
    pub fn import(data: &DecompositionData) -> Result<Self, ImportError> {
        let num_points = data.points.len();
        for (segment, ends) in data.segments.iter().enumerate() {
            if let Some(&point) = ends.iter().find(|&&p| p >= num_points) {
                return Err(ImportError::PointIndex { segment, point, num_points });
            }
        }
        for polygon in &data.polygons {
            if let Some(&point) = polygon.free_points.iter().find(|&&p| p >= num_points) {
                return Err(ImportError::FreePointIndex(point));
            }
        }

        let mut decomp = Self::new();
        let ids: Vec<PointId> = data.points.iter()
            .map(|&[x, y]| decomp.add_free_point(Coord { x, y }, OUTER_POLYGON))
            .collect::<Result<_, _>>()
            .unwrap_or_else(|_| unreachable!("outer polygon always exists"));
        for (index, &[a, b]) in data.segments.iter().enumerate() {
            decomp.new_segment(ids[a], ids[b])
                .map_err(|source| ImportError::Segment { index, source })?;
        }

        if !data.polygons.is_empty() {
            let expect = |what, expected: usize, found: usize| {
                if expected == found { Ok(()) } else { Err(ImportError::Mismatch { what, expected, found }) }
            };
            expect("segments", data.segments.len(), decomp.num_segments())?;
            expect("polygons", data.polygons.len(), decomp.num_polygons())?;
            let wires = 1 + data.polygons.iter()
                .map(|p| usize::from(!p.outer.is_empty()) + p.holes.len())
                .sum::<usize>();
            expect("wires", wires, decomp.num_wires())?;
        }

        decomp.last_change = PolygonChange::None;
        log::debug!(
            "imported {} points, {} segments, {} polygons",
            decomp.num_points(), decomp.num_segments(), decomp.num_polygons(),
        );
        Ok(decomp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DecompositionData {
        DecompositionData {
            points: vec![[0.0, 0.0], [4.0, 0.0], [0.0, 4.0], [1.0, 1.0]],
            segments: vec![[0, 1], [1, 2], [2, 0]],
            polygons: Vec::new(),
        }
    }

    #[test]
    fn import_places_free_points() {
        let decomp = Decomposition::import(&triangle()).unwrap();
        assert_eq!(decomp.num_polygons(), 2);
        let inner = decomp.locate(Coord { x: 1.0, y: 1.0 });
        assert_ne!(inner, OUTER_POLYGON);
        assert_eq!(decomp.polygon(inner).free_points().len(), 1);
        assert_eq!(decomp.last_change(), &PolygonChange::None);
    }

    #[test]
    fn export_lists_polygons() {
        let data = Decomposition::import(&triangle()).unwrap().export();
        assert_eq!(data.points.len(), 4);
        assert_eq!(data.segments, vec![[0, 1], [1, 2], [2, 0]]);
        assert_eq!(data.polygons.len(), 2);
        assert!(data.polygons[0].outer.is_empty());
        assert_eq!(data.polygons[0].holes.len(), 1);
        assert_eq!(data.polygons[1].outer.len(), 3);
        assert_eq!(data.polygons[1].free_points, vec![3]);
    }

    #[test]
    fn bad_point_index() {
        let mut data = triangle();
        data.segments.push([0, 9]);
        assert_eq!(
            Decomposition::import(&data).unwrap_err(),
            ImportError::PointIndex { segment: 3, point: 9, num_points: 4 },
        );
    }

    #[test]
    fn count_mismatch() {
        let mut data = Decomposition::import(&triangle()).unwrap().export();
        data.polygons.push(PolygonData::default());
        assert!(matches!(
            Decomposition::import(&data),
            Err(ImportError::Mismatch { what: "polygons", .. }),
        ));
    }
}
