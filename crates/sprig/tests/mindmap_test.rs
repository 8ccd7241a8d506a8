use sprig::export::ExportOptions;
use sprig::render::SvgRenderOptions;
use sprig::{Error, MindMap, MindmapConfig, NodeInput, ThemeConfig, TreeGraph};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/mindmap")
        .join(name)
}

#[test]
fn svg_before_create_is_an_error() {
    let map = MindMap::default();
    assert!(matches!(
        map.svg(&SvgRenderOptions::default()),
        Err(Error::RenderBeforeCreate)
    ));
}

#[test]
fn create_from_file_lays_out_every_node() {
    let mut map = MindMap::default();
    let figure = map
        .create_from_file(fixture_path("project_planning.json"))
        .unwrap()
        .unwrap();
    assert_eq!(figure.layout.nodes.len(), 14);
    assert_eq!(figure.layout.edges.len(), 13);
    assert!(figure.root.iter().all(|(node, _)| node.position().is_some()));
    assert!(figure.root.iter().all(|(node, _)| node.color().is_some()));
}

#[test]
fn null_json_draws_nothing() {
    let mut map = MindMap::default();
    assert!(map.create_from_json("null").unwrap().is_none());
    assert!(map.figure().is_none());
}

#[test]
fn missing_file_reports_the_path() {
    let mut map = MindMap::default();
    let err = map.create_from_file(fixture_path("nope.json")).unwrap_err();
    match err {
        Error::Io { path, .. } => assert!(path.ends_with("nope.json")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn outline_graph_and_input_produce_the_same_layout() {
    let mut map = MindMap::default();
    let from_outline = map
        .create_from_outline("Root\n    A\n    B\n        C\n")
        .unwrap()
        .unwrap()
        .layout
        .clone();

    let mut graph = TreeGraph::new();
    graph
        .add_node("r", "Root")
        .add_node("a", "A")
        .add_node("b", "B")
        .add_node("c", "C")
        .add_edge("r", "a")
        .add_edge("r", "b")
        .add_edge("b", "c");
    let from_graph = map.create_from_graph(&graph).unwrap().layout.clone();

    let input: NodeInput =
        serde_json::from_value(serde_json::json!(["Root", [["A", []], ["B", [["C", []]]]]]))
            .unwrap();
    let from_input = map.create_from_input(input).unwrap().layout.clone();

    assert_eq!(from_outline, from_graph);
    assert_eq!(from_graph, from_input);
}

#[test]
fn empty_or_failed_create_drops_the_previous_figure() {
    let mut map = MindMap::default();
    map.create_from_json(r#"["Old", [["Leaf", []]]]"#).unwrap();
    assert!(map.create_from_json("null").unwrap().is_none());
    assert!(matches!(
        map.svg(&SvgRenderOptions::default()),
        Err(Error::RenderBeforeCreate)
    ));

    map.create_from_outline("Old\n    Leaf\n").unwrap();
    assert!(map.create_from_outline("\n  \n").unwrap().is_none());
    assert!(map.figure().is_none());

    map.create_from_json(r#"["Old", []]"#).unwrap();
    assert!(map.create_from_json(r#"["Broken", "oops"]"#).is_err());
    assert!(map.figure().is_none());

    map.create_from_json(r#"["Old", []]"#).unwrap();
    let mut cyclic = TreeGraph::new();
    cyclic.add_node("a", "A").add_node("b", "B");
    cyclic.add_edge("a", "b").add_edge("b", "a");
    assert!(map.create_from_graph(&cyclic).is_err());
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        map.save(dir.path().join("stale.svg"), &ExportOptions::default()),
        Err(Error::RenderBeforeCreate)
    ));
}

#[test]
fn deep_chain_is_created_and_dropped() {
    const LEN: usize = 100_000;
    let mut graph = TreeGraph::new();
    for i in 0..LEN {
        graph.add_node(format!("n{i}"), format!("step {i}"));
        if i > 0 {
            graph.add_edge(format!("n{}", i - 1), format!("n{i}"));
        }
    }

    let mut map = MindMap::default();
    let figure = map.create_from_graph(&graph).unwrap();
    assert_eq!(figure.layout.nodes.len(), LEN);
    assert_eq!(figure.layout.stats.max_depth, LEN as i32 - 2);
    let deepest = figure.layout.nodes.last().unwrap();
    assert!(deepest.y.abs() < 1e-9);

    let copy = map.clone();
    drop(map);
    assert!(copy.figure().is_some());
}

#[test]
fn set_config_discards_the_figure() {
    let mut map = MindMap::default();
    map.create_from_json(r#"["Root", [["Leaf", []]]]"#).unwrap();
    assert!(map.figure().is_some());

    let mut config = MindmapConfig::default();
    config.layout.text_bar_height = 0.8;
    map.set_config(config).unwrap();
    assert!(map.figure().is_none());

    let mut invalid = MindmapConfig::default();
    invalid.layout.text_bar_height = f64::NAN;
    assert!(matches!(map.set_config(invalid), Err(Error::Core(_))));
    assert_eq!(map.config().layout.text_bar_height, 0.8);
}

#[test]
fn theme_drives_the_root_color() {
    let config = MindmapConfig {
        theme: ThemeConfig {
            root_color: Some("#123456".to_string()),
            ..ThemeConfig::default()
        },
        ..MindmapConfig::default()
    };
    let mut map = MindMap::new(config).unwrap();
    map.create_from_json(r#"["Root", [["Leaf", []]]]"#).unwrap();
    let svg = map.svg(&SvgRenderOptions::default()).unwrap();
    assert!(svg.contains(r##"fill="#123456""##));
}

#[test]
fn save_writes_svg_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.svg");

    let mut map = MindMap::default();
    map.create_from_file(fixture_path("project_planning_pairs.json"))
        .unwrap();
    map.save(&path, &ExportOptions::default()).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("<svg "));
    assert!(written.contains("Project Planning"));
    assert_eq!(written.matches(r#"<path class="edge""#).count(), 13);
}

#[test]
fn save_rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let mut map = MindMap::default();
    map.create_from_json(r#"["Root", []]"#).unwrap();
    assert!(matches!(
        map.save(dir.path().join("plan.bmp"), &ExportOptions::default()),
        Err(Error::UnsupportedFormat { .. })
    ));
}

#[cfg(not(feature = "raster"))]
#[test]
fn raster_formats_need_the_feature() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.png");
    let mut map = MindMap::default();
    map.create_from_json(r#"["Root", []]"#).unwrap();
    let err = map.save(&path, &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { ref format } if format.contains("raster")));
    assert!(!path.exists());
}

#[cfg(feature = "raster")]
#[test]
fn raster_formats_write_their_signatures() {
    use sprig::export::ExportFormat;

    let dir = tempfile::tempdir().unwrap();
    let mut map = MindMap::default();
    map.create_from_file(fixture_path("project_planning.json"))
        .unwrap();

    let png = dir.path().join("plan.png");
    map.save(&png, &ExportOptions::default()).unwrap();
    assert!(std::fs::read(&png).unwrap().starts_with(b"\x89PNG\r\n\x1a\n"));

    let pdf = dir.path().join("plan.bin");
    let options = ExportOptions {
        format: Some(ExportFormat::Pdf),
        ..ExportOptions::default()
    };
    map.save(&pdf, &options).unwrap();
    assert!(std::fs::read(&pdf).unwrap().starts_with(b"%PDF-"));
}
