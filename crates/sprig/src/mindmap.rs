use crate::export::{ExportFormat, ExportOptions};
use crate::{Error, Result};
use sprig_core::{MindmapConfig, Node, NodeInput, TreeGraph};
use sprig_render::text::TextMeasurer;
use sprig_render::{ColorScheme, LayoutOptions, MindmapLayout, SvgRenderOptions};
use std::path::Path;
use std::sync::Arc;

/// A laid-out and colored tree, ready to be drawn.
#[derive(Debug, Clone)]
pub struct Figure {
    pub root: Node,
    pub layout: MindmapLayout,
}

/// Orchestrates input conversion, layout, coloring and export.
///
/// The configuration is fixed for a run. Changing it through [`MindMap::set_config`] discards
/// the current figure. Every `create_*` call also discards it before doing anything else, so an
/// empty or failed create leaves nothing to export.
#[derive(Debug, Clone, Default)]
pub struct MindMap {
    config: MindmapConfig,
    layout_options: LayoutOptions,
    colors: Option<ColorScheme>,
    figure: Option<Figure>,
}

impl MindMap {
    pub fn new(config: MindmapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.layout_options.text_measurer = measurer;
        self.figure = None;
        self
    }

    /// Overrides the scheme built from `config.theme`.
    pub fn with_color_scheme(mut self, colors: ColorScheme) -> Self {
        self.colors = Some(colors);
        self.figure = None;
        self
    }

    pub fn config(&self) -> &MindmapConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: MindmapConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.figure = None;
        Ok(())
    }

    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    /// Lays out and colors `root`.
    #[tracing::instrument(level = "debug", skip_all, fields(nodes = root.node_count()))]
    pub fn create(&mut self, mut root: Node) -> Result<&Figure> {
        self.figure = None;
        let colors = match &self.colors {
            Some(colors) => colors.clone(),
            None => ColorScheme::from_theme(&self.config.theme)?,
        };
        let layout =
            sprig_render::layout_and_color(&mut root, &self.config, &self.layout_options, &colors)?;
        tracing::debug!(
            max_depth = layout.stats.max_depth,
            total_width = layout.stats.total_width,
            "created mind map"
        );
        Ok(&*self.figure.insert(Figure { root, layout }))
    }

    pub fn create_from_input(&mut self, input: NodeInput) -> Result<&Figure> {
        self.create(Node::from(input))
    }

    pub fn create_from_graph(&mut self, graph: &TreeGraph) -> Result<&Figure> {
        self.figure = None;
        self.create(graph.to_tree()?)
    }

    /// JSON pairs or records. `null` is an empty tree: nothing is drawn and `Ok(None)` returned.
    pub fn create_from_json(&mut self, json: &str) -> Result<Option<&Figure>> {
        self.figure = None;
        match sprig_core::parse_tree_json(json)? {
            Some(root) => self.create(root).map(Some),
            None => Ok(None),
        }
    }

    pub fn create_from_file(&mut self, path: impl AsRef<Path>) -> Result<Option<&Figure>> {
        self.figure = None;
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.create_from_json(&text)
    }

    /// Indented outline, one label per line. Blank input is an empty tree.
    pub fn create_from_outline(&mut self, text: &str) -> Result<Option<&Figure>> {
        self.figure = None;
        match sprig_core::parse_outline(text)? {
            Some(root) => self.create(root).map(Some),
            None => Ok(None),
        }
    }

    pub fn svg(&self, options: &SvgRenderOptions) -> Result<String> {
        let figure = self.figure.as_ref().ok_or(Error::RenderBeforeCreate)?;
        Ok(sprig_render::render_svg(&figure.root, &self.config, options)?)
    }

    /// Writes the current figure to `path`.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>, options: &ExportOptions) -> Result<()> {
        let path = path.as_ref();
        let format = options.resolve_format(path)?;
        let svg = self.svg(&options.svg)?;
        let bytes = encode(svg, format, options)?;
        std::fs::write(path, &bytes).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(format = format.name(), bytes = bytes.len(), "saved mind map");
        Ok(())
    }
}

#[cfg(feature = "raster")]
fn encode(svg: String, format: ExportFormat, options: &ExportOptions) -> Result<Vec<u8>> {
    use crate::raster::{RasterOptions, svg_to_jpeg, svg_to_pdf, svg_to_png};

    let raster = RasterOptions {
        scale: options.scale,
        background: options.svg.background.clone(),
        jpeg_quality: options.jpeg_quality,
    };
    Ok(match format {
        ExportFormat::Svg => svg.into_bytes(),
        ExportFormat::Png => svg_to_png(&svg, &raster)?,
        ExportFormat::Jpeg => svg_to_jpeg(&svg, &raster)?,
        ExportFormat::Pdf => svg_to_pdf(&svg)?,
    })
}

#[cfg(not(feature = "raster"))]
fn encode(svg: String, format: ExportFormat, _options: &ExportOptions) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Svg => Ok(svg.into_bytes()),
        other => Err(Error::UnsupportedFormat {
            format: format!("{} (requires the `raster` feature)", other.name()),
        }),
    }
}
