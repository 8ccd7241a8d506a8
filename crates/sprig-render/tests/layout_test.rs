use sprig_core::geom::{Size, size};
use sprig_core::{FigureConfig, FontConfig, LayoutConfig, Node};
use sprig_render::text::DeterministicTextMeasurer;
use sprig_render::{FontTier, MindmapLayout, MindmapLayoutEngine, Surface, layout_tree};
use std::sync::Arc;

const EPS: f64 = 1e-9;

fn surface() -> Surface {
    Surface::new(
        &FigureConfig::default(),
        &FontConfig::default(),
        Arc::new(DeterministicTextMeasurer::default()),
    )
}

fn fixed(_: &str, _: FontTier) -> Size {
    size(1.0, 0.2)
}

fn project_planning() -> Node {
    Node::new(
        "Project Planning",
        vec![
            Node::new(
                "Research",
                vec![
                    Node::leaf("Market Analysis"),
                    Node::leaf("User Surveys"),
                    Node::leaf("Competitor Review"),
                ],
            ),
            Node::new(
                "Design",
                vec![
                    Node::new("UI", vec![Node::leaf("Wireframes"), Node::leaf("Mockups")]),
                    Node::leaf("Architecture"),
                ],
            ),
            Node::new("Development", vec![Node::leaf("Frontend"), Node::leaf("Backend")]),
            Node::leaf("Launch"),
        ],
    )
}

fn sibling_groups(layout: &MindmapLayout) -> Vec<Vec<usize>> {
    layout
        .nodes
        .iter()
        .map(|p| layout.children_of(p.index).map(|c| c.index).collect())
        .collect()
}

#[test]
fn sibling_bands_never_overlap() {
    let mut root = project_planning();
    let layout = layout_tree(&mut root, &LayoutConfig::default(), &surface()).unwrap();

    for group in sibling_groups(&layout) {
        for (i, &a) in group.iter().enumerate() {
            for &b in &group[i + 1..] {
                let (na, nb) = (&layout.nodes[a], &layout.nodes[b]);
                let gap = (na.y - nb.y).abs();
                assert!(
                    gap + EPS >= (na.subtree_height + nb.subtree_height) / 2.0,
                    "{} and {} overlap",
                    na.text,
                    nb.text
                );
            }
        }
    }
}

#[test]
fn children_sit_one_gap_right_of_their_parent() {
    let cfg = LayoutConfig::default();
    let mut root = project_planning();
    let layout = layout_tree(&mut root, &cfg, &surface()).unwrap();

    for e in &layout.edges {
        let (p, c) = (&layout.nodes[e.from], &layout.nodes[e.to]);
        assert!(c.x > p.x);
        assert!((c.x - (p.x + p.width + cfg.horizontal_gap)).abs() < EPS);
    }
}

#[test]
fn children_are_centered_on_their_parent() {
    let mut root = project_planning();
    let layout = layout_tree(&mut root, &LayoutConfig::default(), &surface()).unwrap();

    for (parent, group) in sibling_groups(&layout).into_iter().enumerate() {
        let (Some(&first), Some(&last)) = (group.first(), group.last()) else {
            continue;
        };
        let top = layout.nodes[first].band().1;
        let bottom = layout.nodes[last].band().0;
        let mid = (top + bottom) / 2.0;
        assert!(
            (mid - layout.nodes[parent].y).abs() < EPS,
            "children of {} are off-center",
            layout.nodes[parent].text
        );
    }
}

#[test]
fn layout_is_deterministic() {
    let cfg = LayoutConfig::default();
    let s = surface();
    let mut a = project_planning();
    let mut b = project_planning();
    let la = layout_tree(&mut a, &cfg, &s).unwrap();
    let lb = layout_tree(&mut b, &cfg, &s).unwrap();
    assert_eq!(la, lb);
    assert_eq!(a, b);
}

#[test]
fn empty_leaf_still_gets_the_minimum_band() {
    let cfg = LayoutConfig::default();
    let zero = |_: &str, _: FontTier| size(0.0, 0.0);
    let mut root = Node::new("", vec![Node::leaf("")]);
    let layout = layout_tree(&mut root, &cfg, &zero).unwrap();
    for n in &layout.nodes {
        assert!(n.subtree_height >= cfg.min_node_height);
    }
}

#[test]
fn two_leaves_split_around_the_root() {
    let cfg = LayoutConfig::default();
    let mut root = Node::new("root", vec![Node::leaf("A"), Node::leaf("B")]);
    let layout = layout_tree(&mut root, &cfg, &fixed).unwrap();

    let (r, a, b) = (&layout.nodes[0], &layout.nodes[1], &layout.nodes[2]);
    assert_eq!((r.x, r.y), (0.0, 0.0));
    assert!(a.y > r.y && b.y < r.y);
    // Band edges are exactly `min_spacing` apart.
    assert!(((a.band().0 - b.band().1) - cfg.min_spacing).abs() < EPS);
    let expected_x = r.x + r.width + cfg.horizontal_gap;
    assert!((a.x - expected_x).abs() < EPS && (b.x - expected_x).abs() < EPS);
}

#[test]
fn straight_chain_stays_level() {
    let mut root = Node::new("root", vec![Node::new("child", vec![Node::leaf("grandchild")])]);
    let layout = layout_tree(&mut root, &LayoutConfig::default(), &surface()).unwrap();

    let xs: Vec<f64> = layout.nodes.iter().map(|n| n.x).collect();
    assert!(xs.windows(2).all(|w| w[1] > w[0]));
    assert!(layout.nodes.iter().all(|n| n.y == 0.0));
}

#[test]
fn six_equal_children_are_evenly_spaced_and_symmetric() {
    let cfg = LayoutConfig::default();
    let children = (0..6).map(|i| Node::leaf(format!("item {i}"))).collect();
    let mut root = Node::new("hub", children);
    let layout = layout_tree(&mut root, &cfg, &surface()).unwrap();

    let ys: Vec<f64> = layout.nodes[1..].iter().map(|n| n.y).collect();
    let step = ys[0] - ys[1];
    assert!(ys.windows(2).all(|w| ((w[0] - w[1]) - step).abs() < EPS));
    assert!((step - (cfg.min_node_height + cfg.min_spacing)).abs() < EPS);
    for i in 0..3 {
        assert!((ys[i] + ys[5 - i]).abs() < EPS);
    }
}

#[test]
fn placements_are_written_back_in_pre_order() {
    let mut root = project_planning();
    let layout = layout_tree(&mut root, &LayoutConfig::default(), &surface()).unwrap();
    for ((node, _), placed) in root.iter().zip(&layout.nodes) {
        assert_eq!(node.text, placed.text);
        assert_eq!(node.position(), Some(placed.position()));
        assert_eq!(node.footprint(), Some(placed.footprint()));
    }
}

#[test]
fn stats_describe_the_tree() {
    let root = project_planning();
    let layout = MindmapLayoutEngine::new(&LayoutConfig::default())
        .with_metrics(&surface())
        .layout(&root)
        .unwrap();
    let stats = &layout.stats;
    assert_eq!(stats.node_count, 14);
    assert_eq!(stats.max_depth, 2);
    assert_eq!(stats.nodes_per_level.get(&-1), Some(&1));
    assert_eq!(stats.nodes_per_level.get(&0), Some(&4));
    assert_eq!(stats.nodes_per_level.get(&1), Some(&7));
    assert_eq!(stats.nodes_per_level.get(&2), Some(&2));
    let bounds = layout.bounds.unwrap();
    assert!((bounds.width() - stats.total_width).abs() < EPS);
    // The untouched input has no placements.
    assert!(root.placement().is_none());
}

#[test]
fn layout_serializes_to_json() {
    let mut root = Node::new("root", vec![Node::leaf("A")]);
    let layout = layout_tree(&mut root, &LayoutConfig::default(), &fixed).unwrap();
    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["nodes"][1]["text"], "A");
    assert_eq!(json["nodes"][1]["siblingIndex"], 0);
    assert_eq!(json["stats"]["nodeCount"], 2);
}
