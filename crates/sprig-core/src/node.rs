use crate::geom::{Point, Size};
use std::fmt;

/// Node fill / stroke color (8-bit sRGB).
pub type Color = palette::Srgb<u8>;

/// Depth of the root node. The first ring of children is depth `0`.
pub const ROOT_DEPTH: i32 = -1;

/// Where layout put a node and how much room its own label takes.
///
/// Both halves are committed together, so a node is either fully placed or not placed at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePlacement {
    /// Left edge of the bar, vertically centered.
    pub position: Point,
    pub footprint: Size,
}

impl NodePlacement {
    /// Anchor for outgoing connections: the middle of the right edge.
    pub fn right_anchor(&self) -> Point {
        crate::geom::point(self.position.x + self.footprint.width, self.position.y)
    }

    /// Anchor for the incoming connection: the middle of the left edge.
    pub fn left_anchor(&self) -> Point {
        self.position
    }
}

/// A mind map node. Children are kept in display order (top to bottom).
///
/// `Clone`, `PartialEq`, `Debug` and `Drop` walk the tree with an explicit stack, so arbitrarily
/// deep trees do not exhaust the call stack.
pub struct Node {
    pub text: String,
    pub children: Vec<Node>,
    placement: Option<NodePlacement>,
    color: Option<Color>,
}

/// Position of a node within the tree, as seen during a pre-order walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub depth: i32,
    /// Index among the node's siblings (`0` for the root).
    pub sibling_index: usize,
    /// Sibling index of the depth-0 ancestor (the node itself at depth 0, `0` for the root).
    pub branch_index: usize,
}

impl Visit {
    pub const ROOT: Visit = Visit {
        depth: ROOT_DEPTH,
        sibling_index: 0,
        branch_index: 0,
    };

    pub fn child(self, sibling_index: usize) -> Visit {
        Visit {
            depth: self.depth + 1,
            sibling_index,
            branch_index: if self.depth == ROOT_DEPTH {
                sibling_index
            } else {
                self.branch_index
            },
        }
    }

    pub fn is_root(self) -> bool {
        self.depth == ROOT_DEPTH
    }
}

impl Node {
    pub fn new(text: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            text: text.into(),
            children,
            placement: None,
            color: None,
        }
    }

    pub fn leaf(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn placement(&self) -> Option<&NodePlacement> {
        self.placement.as_ref()
    }

    pub fn position(&self) -> Option<Point> {
        self.placement.map(|p| p.position)
    }

    pub fn footprint(&self) -> Option<Size> {
        self.placement.map(|p| p.footprint)
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn place(&mut self, placement: NodePlacement) {
        self.placement = Some(placement);
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    /// Drops placements and colors of the whole subtree.
    pub fn clear_layout(&mut self) {
        self.walk_mut(|node, _| {
            node.placement = None;
            node.color = None;
        });
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Deepest depth in the tree, with `self` at [`ROOT_DEPTH`].
    pub fn max_depth(&self) -> i32 {
        self.iter()
            .map(|(_, visit)| visit.depth)
            .max()
            .unwrap_or(ROOT_DEPTH)
    }

    /// Pre-order traversal (parent before children, children in display order).
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: vec![(self, Visit::ROOT)],
        }
    }

    /// Pre-order traversal with mutable access. Visits nodes in the same order as [`Node::iter`].
    pub fn walk_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Node, Visit),
    {
        let mut stack: Vec<(&mut Node, Visit)> = vec![(self, Visit::ROOT)];
        while let Some((node, visit)) = stack.pop() {
            f(&mut *node, visit);
            for (i, child) in node.children.iter_mut().enumerate().rev() {
                stack.push((child, visit.child(i)));
            }
        }
    }
}

impl Node {
    fn detached(&self, children: Vec<Node>) -> Node {
        Node {
            text: self.text.clone(),
            children,
            placement: self.placement,
            color: self.color,
        }
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        let below: Vec<&Node> = self.iter().skip(1).map(|(node, _)| node).collect();
        // Reverse pre-order finishes every subtree before its parent. Finished subtrees sit on
        // `built` with the first child on top.
        let mut built: Vec<Node> = Vec::with_capacity(below.len());
        for node in below.into_iter().rev() {
            let start = built.len() - node.children.len();
            let children = built.drain(start..).rev().collect();
            built.push(node.detached(children));
        }
        built.reverse();
        self.detached(built)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.iter();
        let mut b = other.iter();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some((x, _)), Some((y, _))) => {
                    if x.text != y.text
                        || x.children.len() != y.children.len()
                        || x.placement != y.placement
                        || x.color != y.color
                    {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

impl fmt::Debug for Node {
    // Flat pre-order listing with depths.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Entry<'a>(&'a Node, Visit);

        impl fmt::Debug for Entry<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct("Node")
                    .field("depth", &self.1.depth)
                    .field("text", &self.0.text)
                    .field("placement", &self.0.placement)
                    .field("color", &self.0.color)
                    .finish()
            }
        }

        f.debug_list()
            .entries(self.iter().map(|(node, visit)| Entry(node, visit)))
            .finish()
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl<S: Into<String>> From<(S, Vec<Node>)> for Node {
    fn from((text, children): (S, Vec<Node>)) -> Self {
        Node::new(text, children)
    }
}

pub struct Iter<'a> {
    stack: Vec<(&'a Node, Visit)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Node, Visit);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, visit) = self.stack.pop()?;
        for (i, child) in node.children.iter().enumerate().rev() {
            self.stack.push((child, visit.child(i)));
        }
        Some((node, visit))
    }
}
