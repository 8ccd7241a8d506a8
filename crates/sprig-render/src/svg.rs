//! SVG backend.
//!
//! Geometry arrives in layout units and is mapped through the figure [`Viewport`], so the
//! document has the figure's pixel size unless `tight` cropping is requested.

use crate::model::Bounds;
use crate::sink::{EdgeItem, NodeItem, RenderSink};
use crate::surface::Viewport;
use crate::text::FontTier;
use sprig_core::geom::{Point, point};
use sprig_core::{FigureConfig, FontConfig, ThemeConfig, format_color};
use std::fmt::Write as _;

/// Extra room around the root box, in layout units.
const ROOT_BOX_PAD: f64 = 0.1;
/// Corner radius of the root box, in layout units.
const ROOT_BOX_ROUNDING: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Crop the document to the drawn content instead of the full figure.
    pub tight: bool,
    /// Padding around cropped content, in pixels.
    pub padding: f64,
    /// Points per connection curve.
    pub curve_samples: usize,
    /// Value of the root `id` attribute.
    pub diagram_id: Option<String>,
    /// Background fill; `None` leaves the document transparent.
    pub background: Option<String>,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            tight: false,
            padding: 8.0,
            curve_samples: crate::connector::DEFAULT_SAMPLES,
            diagram_id: None,
            background: Some("#ffffff".to_string()),
        }
    }
}

/// Collects edges and nodes as SVG fragments; [`SvgSink::finish`] wraps them in a document.
pub struct SvgSink<'a> {
    viewport: Viewport,
    fonts: &'a FontConfig,
    theme: &'a ThemeConfig,
    options: &'a SvgRenderOptions,
    edges: String,
    nodes: String,
    content: Option<Bounds>,
    edge_count: usize,
    node_count: usize,
}

impl<'a> SvgSink<'a> {
    pub fn new(
        figure: &FigureConfig,
        fonts: &'a FontConfig,
        theme: &'a ThemeConfig,
        options: &'a SvgRenderOptions,
    ) -> Self {
        Self {
            viewport: Viewport::from_figure(figure),
            fonts,
            theme,
            options,
            edges: String::new(),
            nodes: String::new(),
            content: None,
            edge_count: 0,
            node_count: 0,
        }
    }

    fn grow(&mut self, points: impl IntoIterator<Item = (f64, f64)>) {
        if let Some(b) = Bounds::from_points(points) {
            self.content = Some(match self.content {
                Some(c) => c.union(b),
                None => b,
            });
        }
    }

    fn px(&self, p: Point) -> Point {
        self.viewport.to_px(p)
    }

    pub fn finish(self) -> String {
        let (vx, vy, vw, vh) = match (self.options.tight, self.content) {
            (true, Some(b)) => {
                let pad = self.options.padding.max(0.0);
                (
                    b.min_x - pad,
                    b.min_y - pad,
                    b.width() + 2.0 * pad,
                    b.height() + 2.0 * pad,
                )
            }
            _ => (0.0, 0.0, self.viewport.width_px, self.viewport.height_px),
        };

        let mut out = String::new();
        let id_attr = self
            .options
            .diagram_id
            .as_deref()
            .map(|id| format!(r#" id="{}""#, escape_xml(id)))
            .unwrap_or_default();
        let _ = write!(
            &mut out,
            r#"<svg xmlns="http://www.w3.org/2000/svg"{id_attr} width="{w}" height="{h}" viewBox="{x} {y} {w} {h}" role="graphics-document document" aria-roledescription="mindmap">"#,
            w = fmt(vw),
            h = fmt(vh),
            x = fmt(vx),
            y = fmt(vy),
        );
        if let Some(bg) = &self.options.background {
            let _ = write!(
                &mut out,
                r#"<rect class="background" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                fmt(vx),
                fmt(vy),
                fmt(vw),
                fmt(vh),
                escape_xml(bg)
            );
        }
        let _ = write!(
            &mut out,
            r#"<g class="edges">{}</g><g class="nodes">{}</g></svg>"#,
            self.edges, self.nodes
        );
        tracing::trace!(
            edges = self.edge_count,
            nodes = self.node_count,
            bytes = out.len(),
            "wrote svg"
        );
        out
    }
}

impl RenderSink for SvgSink<'_> {
    fn draw_edge(&mut self, edge: &EdgeItem) {
        let pts: Vec<Point> = edge.points.iter().map(|&p| self.px(p)).collect();
        let mut d = String::new();
        for (i, p) in pts.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(&mut d, "{cmd}{},{}", fmt_path(p.x), fmt_path(p.y));
        }
        let _ = write!(
            &mut self.edges,
            r#"<path class="edge" data-from="{}" data-to="{}" d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{}" stroke-linecap="round"/>"#,
            edge.from,
            edge.to,
            d,
            format_color(edge.color),
            fmt(self.viewport.points_to_px(self.theme.edge_width)),
            fmt(self.theme.edge_opacity),
        );
        self.edge_count += 1;
        self.grow(pts.iter().map(|p| (p.x, p.y)));
    }

    fn draw_node(&mut self, node: &NodeItem<'_>) {
        let is_root = node.tier == FontTier::Root;
        let pad = if is_root { ROOT_BOX_PAD } else { 0.0 };
        let half = node.bar_height / 2.0 + pad;
        // Top-left and bottom-right of the bar in layout units (y up).
        let tl = self.px(point(node.position.x - pad, node.position.y + half));
        let br = self.px(point(
            node.position.x + node.footprint.width + pad,
            node.position.y - half,
        ));
        let (w, h) = (br.x - tl.x, br.y - tl.y);

        let _ = write!(
            &mut self.nodes,
            r#"<g class="node depth-{}" data-index="{}">"#,
            node.depth + 1,
            node.index
        );
        let _ = write!(
            &mut self.nodes,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            fmt(tl.x),
            fmt(tl.y),
            fmt(w),
            fmt(h)
        );
        if is_root {
            let r = (ROOT_BOX_ROUNDING * self.viewport.px_per_unit_x()).min(h / 2.0);
            let _ = write!(&mut self.nodes, r#" rx="{0}" ry="{0}""#, fmt(r));
        }
        let _ = write!(
            &mut self.nodes,
            r#" fill="{}"/>"#,
            format_color(node.color)
        );

        let anchor = self.px(node.label_anchor);
        let text_color = if is_root {
            &self.theme.root_text_color
        } else {
            &self.theme.text_color
        };
        let font_px = self
            .viewport
            .points_to_px(node.tier.font_size_pt(self.fonts));
        let weight = node
            .tier
            .font_weight()
            .map(|w| format!(r#" font-weight="{w}""#))
            .unwrap_or_default();
        let _ = write!(
            &mut self.nodes,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}"{weight} fill="{}" dominant-baseline="central" text-anchor="start">{}</text></g>"#,
            fmt(anchor.x),
            fmt(anchor.y),
            escape_xml(&self.fonts.family),
            fmt(font_px),
            escape_xml(text_color),
            escape_xml(node.text),
        );
        self.node_count += 1;

        // The footprint includes the label, which may be taller than the bar.
        let label_top = self.px(point(
            node.position.x,
            node.label_anchor.y + node.footprint.height / 2.0,
        ));
        let label_bottom = self.px(point(
            node.position.x + node.footprint.width,
            node.label_anchor.y - node.footprint.height / 2.0,
        ));
        self.grow([
            (tl.x, tl.y),
            (br.x, br.y),
            (label_top.x, label_top.y),
            (label_bottom.x, label_bottom.y),
        ]);
    }
}

pub(crate) fn fmt(v: f64) -> String {
    // Round-trippable decimal, without `-0` or float noise around integers.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn fmt_path(v: f64) -> String {
    // Path data keeps three fractional digits.
    if !v.is_finite() || v.abs() < 0.0005 {
        return "0".to_string();
    }
    let mut s = format!("{:.3}", (v * 1000.0).round() / 1000.0);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_trims_noise_and_negative_zero() {
        assert_eq!(fmt(1.0000000001), "1");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(2.5), "2.5");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn fmt_path_keeps_three_digits() {
        assert_eq!(fmt_path(1.23456), "1.235");
        assert_eq!(fmt_path(10.0), "10");
        assert_eq!(fmt_path(-0.0001), "0");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"R&D <"x">"#), "R&amp;D &lt;&quot;x&quot;&gt;");
    }
}
