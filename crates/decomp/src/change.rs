use crate::ids::PolygonId;

/// What the most recent mutating call did to the polygons, for incremental
/// redraw by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum PolygonChange {
    /// Nothing topological happened (e.g. the segment already existed).
    #[default]
    None,
    /// The boundary of these polygons changed; the polygon set did not.
    Shape(Vec<PolygonId>),
    /// `new` appeared inside a hole of `parent`.
    Add { parent: PolygonId, new: PolygonId },
    /// `removed`, which was nested inside `kept`, was absorbed by it.
    Remove { kept: PolygonId, removed: PolygonId },
    /// `orig` was cut in two; `new` is the second half.
    Split { orig: PolygonId, new: PolygonId },
    /// Sibling `removed` was merged into `kept`.
    Join { kept: PolygonId, removed: PolygonId },
}

impl PolygonChange {
    /// Every polygon id the change mentions.  Removed ids are included; they
    /// are no longer valid in the decomposition.
    pub fn polygons(&self) -> Vec<PolygonId> {
        match self {
            PolygonChange::None => Vec::new(),
            PolygonChange::Shape(polygons) => polygons.clone(),
            PolygonChange::Add { parent, new } => vec![*parent, *new],
            PolygonChange::Remove { kept, removed } => vec![*kept, *removed],
            PolygonChange::Split { orig, new } => vec![*orig, *new],
            PolygonChange::Join { kept, removed } => vec![*kept, *removed],
        }
    }

    /// True when polygons were created or destroyed.
    pub fn is_structural(&self) -> bool {
        !matches!(self, PolygonChange::None | PolygonChange::Shape(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_none() {
        assert_eq!(PolygonChange::default(), PolygonChange::None);
        assert!(PolygonChange::None.polygons().is_empty());
    }

    #[test]
    fn structural_kinds() {
        let (a, b) = (PolygonId(1), PolygonId(2));
        assert!(!PolygonChange::Shape(vec![a]).is_structural());
        assert!(PolygonChange::Split { orig: a, new: b }.is_structural());
        assert_eq!(PolygonChange::Remove { kept: a, removed: b }.polygons(), vec![a, b]);
    }
}
