#![forbid(unsafe_code)]

//! Mind map tree model + input conversion (headless).
//!
//! A mind map is a strict tree: every node has exactly one parent and children are kept in
//! display order. Trees can be built directly, parsed from JSON (records or nested pairs),
//! converted from an edge list, or read from an indented outline.

pub mod config;
pub mod error;
pub mod geom;
pub mod graph;
pub mod input;
pub mod node;
pub mod outline;

pub use config::{
    ColorIndexing, ColorSchemeKind, FigureConfig, FontConfig, LayoutConfig, Margins,
    MindmapConfig, ThemeConfig, format_color, parse_color,
};
pub use error::{Error, Result};
pub use graph::TreeGraph;
pub use input::{NodeInput, parse_tree_json, tree_from_value};
pub use node::{Color, Node, NodePlacement, ROOT_DEPTH, Visit};
pub use outline::parse_outline;
