//! Left-to-right tree layout.
//!
//! Every child band is stacked top to bottom and the whole stack is centered on its parent's
//! vertical position. A band is as tall as the child's own bar or its whole subtree, whichever
//! is larger, so sibling subtrees never overlap.
//!
//! The tree is flattened once into a pre-order arena. Children always come after their parent
//! there, which lets subtree heights be computed by one reverse sweep and positions by one
//! forward sweep, without recursion.

use crate::model::{LayoutEdge, LayoutNode, MindmapLayout, TreeStats, compute_bounds};
use crate::text::{FontTier, MetricsProvider};
use crate::{Error, Result};
use sprig_core::geom::{Size, size};
use sprig_core::{LayoutConfig, Node, NodePlacement, Visit};
use std::collections::BTreeMap;

struct Slot<'t> {
    text: &'t str,
    visit: Visit,
    parent: Option<usize>,
    children: Vec<usize>,
    footprint: Size,
    own_height: f64,
    subtree_height: f64,
    x: f64,
    y: f64,
}

pub struct MindmapLayoutEngine<'a> {
    config: &'a LayoutConfig,
    metrics: Option<&'a dyn MetricsProvider>,
}

impl<'a> MindmapLayoutEngine<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: &'a dyn MetricsProvider) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn set_metrics(&mut self, metrics: &'a dyn MetricsProvider) {
        self.metrics = Some(metrics);
    }

    pub fn is_ready(&self) -> bool {
        self.metrics.is_some()
    }

    /// Lays out the tree and writes each node's placement back into it.
    ///
    /// On error the tree is left untouched.
    pub fn calculate_layout(&self, root: &mut Node) -> Result<MindmapLayout> {
        let layout = self.layout(root)?;
        let mut placed = layout.nodes.iter();
        root.walk_mut(|node, _| {
            if let Some(n) = placed.next() {
                node.place(NodePlacement {
                    position: n.position(),
                    footprint: n.footprint(),
                });
            }
        });
        Ok(layout)
    }

    /// Computes the layout without touching the tree.
    pub fn layout(&self, root: &Node) -> Result<MindmapLayout> {
        let metrics = self.metrics.ok_or(Error::LayoutNotReady)?;
        let mut slots = self.measure(root, metrics)?;
        self.subtree_heights(&mut slots);
        self.place(&mut slots);
        let layout = self.collect(&slots);
        tracing::debug!(
            nodes = layout.stats.node_count,
            max_depth = layout.stats.max_depth,
            total_width = layout.stats.total_width,
            "computed mind map layout"
        );
        Ok(layout)
    }

    fn measure<'t>(&self, root: &'t Node, metrics: &dyn MetricsProvider) -> Result<Vec<Slot<'t>>> {
        let cfg = self.config;
        let mut slots: Vec<Slot<'t>> = Vec::new();
        // Most recent arena index per depth; in pre-order that is the parent of the next
        // node one level deeper.
        let mut last_at_depth: Vec<usize> = Vec::new();

        for (node, visit) in root.iter() {
            let level = (visit.depth - sprig_core::ROOT_DEPTH) as usize;
            let parent = level
                .checked_sub(1)
                .and_then(|up| last_at_depth.get(up).copied());

            let tier = FontTier::from_depth(visit.depth);
            let text = metrics.measure(&node.text, tier);
            if !(text.width.is_finite() && text.height.is_finite())
                || text.width < 0.0
                || text.height < 0.0
            {
                return Err(Error::InvalidMetrics {
                    text: node.text.clone(),
                    width: text.width,
                    height: text.height,
                });
            }
            let bar = match tier {
                FontTier::Root => cfg.root_bar_height(),
                FontTier::Branch => cfg.branch_bar_height(),
            };
            let footprint = size(text.width + 2.0 * cfg.text_padding, text.height.max(bar));

            let index = slots.len();
            if let Some(p) = parent {
                slots[p].children.push(index);
            }
            last_at_depth.truncate(level);
            last_at_depth.push(index);

            slots.push(Slot {
                text: &node.text,
                visit,
                parent,
                children: Vec::new(),
                footprint,
                own_height: footprint.height.max(cfg.min_node_height),
                subtree_height: 0.0,
                x: 0.0,
                y: 0.0,
            });
        }
        Ok(slots)
    }

    /// Height of the stacked child bands, including the gaps between them.
    fn children_height(&self, slots: &[Slot<'_>], children: &[usize]) -> f64 {
        if children.is_empty() {
            return 0.0;
        }
        let bands: f64 = children.iter().map(|&c| slots[c].subtree_height).sum();
        bands + (children.len() - 1) as f64 * self.config.min_spacing
    }

    fn subtree_heights(&self, slots: &mut [Slot<'_>]) {
        for i in (0..slots.len()).rev() {
            let stacked = self.children_height(slots, &slots[i].children);
            slots[i].subtree_height = slots[i].own_height.max(stacked);
        }
    }

    fn place(&self, slots: &mut [Slot<'_>]) {
        let cfg = self.config;
        let Some(root) = slots.first_mut() else {
            return;
        };
        root.x = cfg.origin.0;
        root.y = cfg.origin.1;

        for i in 0..slots.len() {
            if slots[i].children.is_empty() {
                continue;
            }
            let children = std::mem::take(&mut slots[i].children);
            let child_x = slots[i].x + slots[i].footprint.width + cfg.horizontal_gap;
            let mut current_y = slots[i].y + self.children_height(slots, &children) / 2.0;
            for &c in &children {
                let h = slots[c].subtree_height;
                slots[c].x = child_x;
                slots[c].y = current_y - h / 2.0;
                current_y -= h + cfg.min_spacing;
            }
            slots[i].children = children;
        }
    }

    fn collect(&self, slots: &[Slot<'_>]) -> MindmapLayout {
        let nodes: Vec<LayoutNode> = slots
            .iter()
            .enumerate()
            .map(|(index, s)| LayoutNode {
                index,
                parent: s.parent,
                depth: s.visit.depth,
                sibling_index: s.visit.sibling_index,
                branch_index: s.visit.branch_index,
                text: s.text.to_string(),
                x: s.x,
                y: s.y,
                width: s.footprint.width,
                height: s.footprint.height,
                subtree_height: s.subtree_height,
            })
            .collect();

        let edges: Vec<LayoutEdge> = slots
            .iter()
            .enumerate()
            .filter_map(|(to, s)| {
                let from = s.parent?;
                let p = &slots[from];
                Some(LayoutEdge {
                    from,
                    to,
                    start_x: p.x + p.footprint.width,
                    start_y: p.y,
                    end_x: s.x,
                    end_y: s.y,
                })
            })
            .collect();

        let stats = self.stats(slots);
        MindmapLayout {
            bounds: compute_bounds(&nodes),
            nodes,
            edges,
            stats,
        }
    }

    fn stats(&self, slots: &[Slot<'_>]) -> TreeStats {
        let mut nodes_per_level: BTreeMap<i32, usize> = BTreeMap::new();
        for s in slots {
            *nodes_per_level.entry(s.visit.depth).or_default() += 1;
        }

        let mut widths = vec![0.0_f64; slots.len()];
        for i in (0..slots.len()).rev() {
            let own = slots[i].footprint.width;
            widths[i] = slots[i]
                .children
                .iter()
                .map(|&c| widths[c])
                .reduce(f64::max)
                .map_or(own, |widest| own + self.config.horizontal_gap + widest);
        }

        TreeStats {
            node_count: slots.len(),
            max_depth: slots
                .iter()
                .map(|s| s.visit.depth)
                .max()
                .unwrap_or(sprig_core::ROOT_DEPTH),
            nodes_per_level,
            total_width: widths.first().copied().unwrap_or(0.0),
        }
    }
}

/// Lays out `root` and writes placements back into it.
pub fn layout_tree(
    root: &mut Node,
    config: &LayoutConfig,
    metrics: &dyn MetricsProvider,
) -> Result<MindmapLayout> {
    MindmapLayoutEngine::new(config)
        .with_metrics(metrics)
        .calculate_layout(root)
}
