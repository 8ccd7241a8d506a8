#![forbid(unsafe_code)]

//! `sprig` turns a labelled tree into a left-to-right mind map.
//!
//! ```no_run
//! use sprig::{MindMap, export::ExportOptions};
//!
//! let mut map = MindMap::default();
//! map.create_from_json(r#"["Project", [["Research", []], ["Design", []]]]"#)?;
//! map.save("project.svg", &ExportOptions::default())?;
//! # Ok::<(), sprig::Error>(())
//! ```
//!
//! # Features
//!
//! - `raster`: PNG/JPG/PDF export via pure-Rust SVG rasterization/conversion

pub use sprig_core::*;

pub mod export;
mod mindmap;
#[cfg(feature = "raster")]
pub mod raster;

pub use mindmap::{Figure, MindMap};

/// Layout, coloring and SVG rendering building blocks.
pub mod render {
    pub use sprig_render::color::{
        ENHANCED_PALETTE, ENHANCED_ROOT, GRADIENT_PALETTE, GRADIENT_ROOT,
    };
    pub use sprig_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use sprig_render::{
        Bounds, ColorScheme, CubicBezier, EdgeItem, FontTier, Jitter, LayoutEdge, LayoutNode,
        LayoutOptions, MetricsProvider, MindmapLayout, MindmapLayoutEngine, NodeItem, RenderSink,
        Surface, SvgRenderOptions, SvgSink, TreeStats, Viewport, assign_colors, connector,
        layout_and_color, layout_tree, render_svg, render_tree,
    };
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] sprig_core::Error),
    #[error(transparent)]
    Render(#[from] sprig_render::Error),
    #[error("no mind map has been created yet")]
    RenderBeforeCreate,
    #[error("unsupported export format: {format}")]
    UnsupportedFormat { format: String },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "raster")]
    #[error(transparent)]
    Raster(#[from] raster::RasterError),
}

pub type Result<T> = std::result::Result<T, Error>;
