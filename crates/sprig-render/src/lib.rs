#![forbid(unsafe_code)]

//! Measurement, layout, coloring and drawing for `sprig` mind maps.
//!
//! The pipeline is: measure every label on a [`surface::Surface`], lay the tree out with
//! [`layout::MindmapLayoutEngine`], color it with a [`color::ColorScheme`], then feed it to a
//! [`sink::RenderSink`] such as [`svg::SvgSink`].

pub mod color;
pub mod connector;
pub mod layout;
pub mod model;
pub mod sink;
pub mod surface;
pub mod svg;
pub mod text;

use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use sprig_core::{MindmapConfig, Node};
use std::sync::Arc;

pub use color::{ColorScheme, Jitter, assign_colors};
pub use connector::{CubicBezier, DEFAULT_SAMPLES, connector};
pub use layout::{MindmapLayoutEngine, layout_tree};
pub use model::{Bounds, LayoutEdge, LayoutNode, MindmapLayout, TreeStats};
pub use sink::{EdgeItem, NodeItem, RenderSink, render_tree};
pub use surface::{Surface, Viewport};
pub use svg::{SvgRenderOptions, SvgSink};
pub use text::{FontTier, MetricsProvider, TextMetrics, TextStyle};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("layout requested before a metrics provider was attached")]
    LayoutNotReady,
    /// Drawing was requested for a tree that has not been laid out and colored.
    #[error("node {index} ({text:?}) has no {missing} yet; lay out and color the tree first")]
    NotLaidOut {
        index: usize,
        text: String,
        missing: &'static str,
    },
    #[error("text metrics for {text:?} are unusable: width {width}, height {height}")]
    InvalidMetrics {
        text: String,
        width: f64,
        height: f64,
    },
    #[error(transparent)]
    Core(#[from] sprig_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions").finish_non_exhaustive()
    }
}

/// Measures, lays out and colors `root` in place.
pub fn layout_and_color(
    root: &mut Node,
    config: &MindmapConfig,
    options: &LayoutOptions,
    colors: &ColorScheme,
) -> Result<MindmapLayout> {
    let surface = Surface::new(&config.figure, &config.fonts, options.text_measurer.clone());
    let layout = MindmapLayoutEngine::new(&config.layout)
        .with_metrics(&surface)
        .calculate_layout(root)?;
    assign_colors(root, colors, config.theme.indexing);
    Ok(layout)
}

/// Draws an already laid-out and colored tree as an SVG document.
pub fn render_svg(
    root: &Node,
    config: &MindmapConfig,
    options: &SvgRenderOptions,
) -> Result<String> {
    let mut sink = SvgSink::new(&config.figure, &config.fonts, &config.theme, options);
    render_tree(root, &config.layout, options.curve_samples, &mut sink)?;
    Ok(sink.finish())
}
