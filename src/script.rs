use std::path::Path;

use anyhow::{anyhow, Context, Result};
use decomp::{Decomposition, PointId, PolygonChange};
use geo::Coord;
use serde::{Deserialize, Serialize};

/// One edit of a script.  Points are addressed by their exact coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    AddPoint { xy: [f64; 2] },
    RemovePoint { xy: [f64; 2] },
    /// Missing endpoints are added first.
    AddSegment { a: [f64; 2], b: [f64; 2] },
    DeleteSegment { a: [f64; 2], b: [f64; 2] },
    SplitSegment { a: [f64; 2], b: [f64; 2], t: f64 },
    JoinSegments { xy: [f64; 2] },
    DeletePoint { xy: [f64; 2] },
}

fn coord([x, y]: [f64; 2]) -> Coord<f64> { Coord { x, y } }

fn existing(decomp: &Decomposition, xy: [f64; 2]) -> Result<PointId> {
    decomp.find_point(coord(xy)).ok_or_else(|| anyhow!("no point at {xy:?}"))
}

fn existing_or_new(decomp: &mut Decomposition, xy: [f64; 2]) -> PointId {
    match decomp.find_point(coord(xy)) {
        Some(point) => point,
        None => decomp.add_point(coord(xy)),
    }
}

impl Edit {
    /// Apply to `decomp` and return what changed.
    pub fn apply(&self, decomp: &mut Decomposition) -> Result<PolygonChange> {
        match *self {
            Edit::AddPoint { xy } => {
                decomp.add_point(coord(xy));
            }
            Edit::RemovePoint { xy } => {
                let point = existing(decomp, xy)?;
                decomp.remove_free_point(point)?;
            }
            Edit::AddSegment { a, b } => {
                let a = existing_or_new(decomp, a);
                let b = existing_or_new(decomp, b);
                decomp.new_segment(a, b)?;
            }
            Edit::DeleteSegment { a, b } => {
                let (pa, pb) = (existing(decomp, a)?, existing(decomp, b)?);
                let segment = decomp.find_segment(pa, pb)
                    .ok_or_else(|| anyhow!("no segment between {a:?} and {b:?}"))?;
                decomp.delete_segment(segment)?;
            }
            Edit::SplitSegment { a, b, t } => {
                let (pa, pb) = (existing(decomp, a)?, existing(decomp, b)?);
                let segment = decomp.find_segment(pa, pb)
                    .ok_or_else(|| anyhow!("no segment between {a:?} and {b:?}"))?;
                // `t` is measured from `a`, whatever the stored orientation.
                let t = if decomp.segment(segment).tail() == pa { t } else { 1.0 - t };
                decomp.split_segment(segment, t)?;
            }
            Edit::JoinSegments { xy } => {
                let point = existing(decomp, xy)?;
                decomp.join_segments(point)?;
            }
            Edit::DeletePoint { xy } => {
                let point = existing(decomp, xy)?;
                decomp.delete_point(point)?;
            }
        }
        Ok(decomp.last_change().clone())
    }
}

/// Apply `edits` in order, checking consistency after each one.  Returns the
/// change reported by every edit.
pub fn apply_edits(decomp: &mut Decomposition, edits: &[Edit]) -> Result<Vec<PolygonChange>> {
    let mut changes = Vec::with_capacity(edits.len());
    for (i, edit) in edits.iter().enumerate() {
        let change = edit.apply(decomp).with_context(|| format!("edit {i}: {edit:?}"))?;
        decomp.check_consistency()
            .with_context(|| format!("edit {i} left the decomposition inconsistent"))?;
        log::debug!("edit {i}: {change:?}");
        changes.push(change);
    }
    Ok(changes)
}

pub fn read_script(path: &Path) -> Result<Vec<Edit>> {
    crate::io::read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_edits() {
        let json = r#"[
            {"op": "add_point", "xy": [0.5, 0.5]},
            {"op": "add_segment", "a": [0, 0], "b": [1, 0]},
            {"op": "split_segment", "a": [1, 0], "b": [0, 0], "t": 0.25}
        ]"#;
        let edits: Vec<Edit> = serde_json::from_str(json).unwrap();
        assert_eq!(edits[0], Edit::AddPoint { xy: [0.5, 0.5] });
        assert_eq!(edits[2], Edit::SplitSegment { a: [1.0, 0.0], b: [0.0, 0.0], t: 0.25 });
    }

    #[test]
    fn triangle_script() {
        let edits = vec![
            Edit::AddSegment { a: [0.0, 0.0], b: [4.0, 0.0] },
            Edit::AddSegment { a: [4.0, 0.0], b: [0.0, 4.0] },
            Edit::AddSegment { a: [0.0, 4.0], b: [0.0, 0.0] },
            Edit::SplitSegment { a: [4.0, 0.0], b: [0.0, 0.0], t: 0.25 },
        ];
        let mut d = Decomposition::new();
        let changes = apply_edits(&mut d, &edits).unwrap();
        assert!(changes[2].is_structural());
        assert_eq!(d.num_polygons(), 2);
        assert!(d.find_point(Coord { x: 3.0, y: 0.0 }).is_some());
    }

    #[test]
    fn missing_point_is_an_error() {
        let mut d = Decomposition::new();
        let err = apply_edits(&mut d, &[Edit::JoinSegments { xy: [1.0, 1.0] }]).unwrap_err();
        assert!(format!("{err:#}").contains("no point at"));
    }
}
