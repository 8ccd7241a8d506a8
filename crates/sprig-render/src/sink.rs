//! Drawing a laid-out, colored tree onto an arbitrary backend.

use crate::connector::{CubicBezier, connector};
use crate::text::FontTier;
use crate::{Error, Result};
use sprig_core::geom::{Point, Size, point};
use sprig_core::{Color, LayoutConfig, Node, NodePlacement};

/// Labels of non-root nodes sit this many bar heights above the bar center.
const LABEL_RAISE: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct NodeItem<'a> {
    /// Pre-order index.
    pub index: usize,
    pub text: &'a str,
    pub depth: i32,
    pub tier: FontTier,
    pub position: Point,
    pub footprint: Size,
    /// Height of the drawn bar (thinner than the footprint for non-root nodes).
    pub bar_height: f64,
    /// Left end of the label baseline, vertically centered.
    pub label_anchor: Point,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeItem {
    pub from: usize,
    pub to: usize,
    pub curve: CubicBezier,
    /// Sampled curve, start and end included.
    pub points: Vec<Point>,
    /// Color of the child node.
    pub color: Color,
}

pub trait RenderSink {
    fn draw_edge(&mut self, edge: &EdgeItem);
    fn draw_node(&mut self, node: &NodeItem<'_>);
}

/// Feeds every edge, then every node, to `sink`, both in pre-order.
///
/// Fails with [`Error::NotLaidOut`] if any node has no placement or color yet; nothing is
/// drawn in that case.
pub fn render_tree(
    root: &Node,
    config: &LayoutConfig,
    samples: usize,
    sink: &mut dyn RenderSink,
) -> Result<()> {
    let mut nodes: Vec<NodeItem<'_>> = Vec::new();
    let mut edges: Vec<EdgeItem> = Vec::new();
    // Placement of the latest node per level, i.e. the parent of the next deeper node.
    let mut open: Vec<(usize, NodePlacement)> = Vec::new();

    for (index, (node, visit)) in root.iter().enumerate() {
        let not_laid_out = |missing| Error::NotLaidOut {
            index,
            text: node.text.clone(),
            missing,
        };
        let placement = node
            .placement()
            .copied()
            .ok_or_else(|| not_laid_out("placement"))?;
        let color = node.color().ok_or_else(|| not_laid_out("color"))?;
        let level = (visit.depth - sprig_core::ROOT_DEPTH) as usize;
        open.truncate(level);
        if let Some(&(from, parent)) = open.last() {
            let curve = connector(parent.right_anchor(), placement.left_anchor());
            edges.push(EdgeItem {
                from,
                to: index,
                curve,
                points: curve.sample(samples),
                color,
            });
        }
        open.push((index, placement));

        let tier = FontTier::from_depth(visit.depth);
        let (bar_height, raise) = match tier {
            FontTier::Root => (config.root_bar_height(), 0.0),
            FontTier::Branch => (
                config.branch_bar_height(),
                config.text_bar_height * LABEL_RAISE,
            ),
        };
        nodes.push(NodeItem {
            index,
            text: &node.text,
            depth: visit.depth,
            tier,
            position: placement.position,
            footprint: placement.footprint,
            bar_height,
            label_anchor: point(
                placement.position.x + config.text_padding,
                placement.position.y + raise,
            ),
            color,
        });
    }

    tracing::trace!(nodes = nodes.len(), edges = edges.len(), "rendering tree");
    for edge in &edges {
        sink.draw_edge(edge);
    }
    for node in &nodes {
        sink.draw_node(node);
    }
    Ok(())
}
