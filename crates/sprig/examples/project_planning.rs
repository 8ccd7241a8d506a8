//! Lays out the "Project Planning" tree and writes it as SVG.
//!
//! ```text
//! RUST_LOG=sprig=debug cargo run -p sprig --example project_planning -- out.svg
//! ```

use sprig::export::ExportOptions;
use sprig::{ColorSchemeKind, MindMap, MindmapConfig};
use tracing_subscriber::EnvFilter;

const PROJECT_PLANNING: &str = include_str!("../../../fixtures/mindmap/project_planning.json");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let out = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "project_planning.svg".to_string());

    let mut config = MindmapConfig::default();
    config.theme.scheme = ColorSchemeKind::Enhanced;
    config.theme.jitter_seed = Some(7);

    let mut map = MindMap::new(config)?;
    if let Some(figure) = map.create_from_json(PROJECT_PLANNING)? {
        println!(
            "{} nodes, max depth {}, total width {:.2}",
            figure.layout.stats.node_count,
            figure.layout.stats.max_depth,
            figure.layout.stats.total_width
        );
    }
    map.save(&out, &ExportOptions::default())?;
    println!("wrote {out}");
    Ok(())
}
