use serde::{Deserialize, Serialize};
use sprig_core::geom::{Point, Size, point, size};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// One placed node. `x`/`y` is the left edge of the bar at its vertical center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    /// Pre-order index.
    pub index: usize,
    pub parent: Option<usize>,
    pub depth: i32,
    pub sibling_index: usize,
    pub branch_index: usize,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Height of the band reserved for this node and all its descendants.
    pub subtree_height: f64,
}

impl LayoutNode {
    pub fn position(&self) -> Point {
        point(self.x, self.y)
    }

    pub fn footprint(&self) -> Size {
        size(self.width, self.height)
    }

    /// The vertical interval `[bottom, top]` of this node's band.
    pub fn band(&self) -> (f64, f64) {
        let half = self.subtree_height / 2.0;
        (self.y - half, self.y + half)
    }
}

/// Parent -> child connection between bar anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    pub from: usize,
    pub to: usize,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl LayoutEdge {
    pub fn start(&self) -> Point {
        point(self.start_x, self.start_y)
    }

    pub fn end(&self) -> Point {
        point(self.end_x, self.end_y)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub node_count: usize,
    pub max_depth: i32,
    /// Depth -> number of nodes at that depth.
    pub nodes_per_level: BTreeMap<i32, usize>,
    /// Horizontal extent from the root's left edge to the far end of the deepest bar chain.
    pub total_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindmapLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub bounds: Option<Bounds>,
    pub stats: TreeStats,
}

impl MindmapLayout {
    pub fn root(&self) -> Option<&LayoutNode> {
        self.nodes.first()
    }

    pub fn children_of(&self, index: usize) -> impl Iterator<Item = &LayoutNode> + '_ {
        self.nodes
            .iter()
            .filter(move |n| n.parent == Some(index))
    }
}

pub(crate) fn compute_bounds(nodes: &[LayoutNode]) -> Option<Bounds> {
    // Edges run between bar anchors, so the bars already enclose every curve.
    Bounds::from_points(nodes.iter().flat_map(|n| {
        [
            (n.x, n.y - n.height / 2.0),
            (n.x + n.width, n.y + n.height / 2.0),
        ]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_points() {
        let b = Bounds::from_points([(1.0, 2.0), (-3.0, 5.0), (4.0, -1.0)]).unwrap();
        assert_eq!(
            b,
            Bounds {
                min_x: -3.0,
                min_y: -1.0,
                max_x: 4.0,
                max_y: 5.0
            }
        );
        assert_eq!(b.width(), 7.0);
        assert_eq!(b.height(), 6.0);
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn union_grows_to_both() {
        let a = Bounds::from_points([(0.0, 0.0), (1.0, 1.0)]).unwrap();
        let b = Bounds::from_points([(2.0, -1.0), (3.0, 0.5)]).unwrap();
        let u = a.union(b);
        assert_eq!((u.min_x, u.min_y, u.max_x, u.max_y), (0.0, -1.0, 3.0, 1.0));
    }
}
