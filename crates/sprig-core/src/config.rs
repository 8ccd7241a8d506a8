//! Immutable configuration for one layout + render run.
//!
//! All lengths in [`LayoutConfig`] are layout units (the data coordinates of the figure's axes).
//! Changing any value invalidates an existing layout.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MindmapConfig {
    pub figure: FigureConfig,
    pub layout: LayoutConfig,
    pub fonts: FontConfig,
    pub theme: ThemeConfig,
}

impl MindmapConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.figure.validate()?;
        self.layout.validate()?;
        self.fonts.validate()?;
        self.theme.validate()
    }
}

/// The drawing surface: physical size, resolution and the visible data range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FigureConfig {
    /// Figure width in inches.
    pub width: f64,
    /// Figure height in inches.
    pub height: f64,
    pub dpi: f64,
    pub x_limits: (f64, f64),
    pub y_limits: (f64, f64),
    pub margins: Margins,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 15.0,
            height: 10.0,
            dpi: 100.0,
            x_limits: (-0.5, 11.5),
            y_limits: (-4.5, 4.5),
            margins: Margins::default(),
        }
    }
}

/// Axes placement as fractions of the figure (`0.0` = left/bottom edge, `1.0` = right/top).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 0.02,
            right: 0.98,
            bottom: 0.02,
            top: 0.98,
        }
    }
}

impl FigureConfig {
    pub fn width_px(&self) -> f64 {
        self.width * self.dpi
    }

    pub fn height_px(&self) -> f64 {
        self.height * self.dpi
    }

    fn validate(&self) -> Result<()> {
        positive("figure.width", self.width)?;
        positive("figure.height", self.height)?;
        positive("figure.dpi", self.dpi)?;
        increasing("figure.xLimits", self.x_limits)?;
        increasing("figure.yLimits", self.y_limits)?;
        let m = &self.margins;
        for (name, v) in [
            ("left", m.left),
            ("right", m.right),
            ("bottom", m.bottom),
            ("top", m.top),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::invalid_config(format!(
                    "figure.margins.{name} must be within [0, 1], got {v}"
                )));
            }
        }
        increasing("figure.margins (left, right)", (m.left, m.right))?;
        increasing("figure.margins (bottom, top)", (m.bottom, m.top))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Base bar height. The root bar is `1.8x` this, other bars `0.5x`.
    pub text_bar_height: f64,
    /// Horizontal padding on each side of a label.
    pub text_padding: f64,
    /// Gap between the bands of two adjacent siblings.
    pub min_spacing: f64,
    /// Floor for a node's own height, so empty or tiny labels still get a band.
    pub min_node_height: f64,
    /// Gap between a parent's right edge and its children's left edges.
    pub horizontal_gap: f64,
    /// Where the root's left edge is placed.
    pub origin: (f64, f64),
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            text_bar_height: 0.3,
            text_padding: 0.2,
            min_spacing: 0.4,
            min_node_height: 0.6,
            horizontal_gap: 1.5,
            origin: (0.0, 0.0),
        }
    }
}

impl LayoutConfig {
    pub fn root_bar_height(&self) -> f64 {
        self.text_bar_height * 1.8
    }

    pub fn branch_bar_height(&self) -> f64 {
        self.text_bar_height * 0.5
    }

    fn validate(&self) -> Result<()> {
        non_negative("layout.textBarHeight", self.text_bar_height)?;
        non_negative("layout.textPadding", self.text_padding)?;
        non_negative("layout.minSpacing", self.min_spacing)?;
        positive("layout.minNodeHeight", self.min_node_height)?;
        non_negative("layout.horizontalGap", self.horizontal_gap)?;
        finite("layout.origin.x", self.origin.0)?;
        finite("layout.origin.y", self.origin.1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontConfig {
    pub family: String,
    /// Root label size in points.
    pub root_size: f64,
    /// Size of every other label in points.
    pub node_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "DejaVu Sans, Arial, sans-serif".to_string(),
            root_size: 14.0,
            node_size: 12.0,
        }
    }
}

impl FontConfig {
    fn validate(&self) -> Result<()> {
        positive("fonts.rootSize", self.root_size)?;
        positive("fonts.nodeSize", self.node_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorSchemeKind {
    /// Depth-0 palette, deeper levels mixed toward white step by step.
    #[default]
    Gradient,
    /// Five-color palette with lightening plus saturation decay.
    Enhanced,
    /// Palette by index at every depth.
    Cyclic,
}

/// Which index is handed to the color scheme for nodes below depth 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorIndexing {
    /// The depth-0 ancestor's index: a branch shares one hue family.
    #[default]
    Branch,
    /// Each node's own index among its siblings.
    Sibling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    pub scheme: ColorSchemeKind,
    pub indexing: ColorIndexing,
    /// Root bar color; `None` means the scheme's built-in root color.
    pub root_color: Option<String>,
    /// Depth-0 colors; empty means the scheme's built-in palette.
    pub palette: Vec<String>,
    /// Seed for the enhanced scheme's lightness jitter. `None` disables jitter.
    pub jitter_seed: Option<u64>,
    pub root_text_color: String,
    pub text_color: String,
    /// Connection stroke width in points.
    pub edge_width: f64,
    pub edge_opacity: f64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            scheme: ColorSchemeKind::Gradient,
            indexing: ColorIndexing::Branch,
            root_color: None,
            palette: Vec::new(),
            jitter_seed: None,
            root_text_color: "#ffffff".to_string(),
            text_color: "#000000".to_string(),
            edge_width: 1.5,
            edge_opacity: 0.8,
        }
    }
}

impl ThemeConfig {
    fn validate(&self) -> Result<()> {
        non_negative("theme.edgeWidth", self.edge_width)?;
        if !(0.0..=1.0).contains(&self.edge_opacity) {
            return Err(Error::invalid_config(format!(
                "theme.edgeOpacity must be within [0, 1], got {}",
                self.edge_opacity
            )));
        }
        for color in [&self.root_text_color, &self.text_color]
            .into_iter()
            .chain(self.root_color.iter())
            .chain(self.palette.iter())
        {
            parse_color(color)?;
        }
        Ok(())
    }
}

/// Parses `#rgb` / `#rrggbb` (the `#` is optional).
pub fn parse_color(value: &str) -> Result<crate::Color> {
    value
        .trim()
        .parse::<crate::Color>()
        .map_err(|_| Error::InvalidColor {
            value: value.to_string(),
        })
}

/// Formats a color as lowercase `#rrggbb`.
pub fn format_color(color: crate::Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

fn finite(name: &str, v: f64) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid_config(format!(
            "{name} must be finite, got {v}"
        )))
    }
}

fn positive(name: &str, v: f64) -> Result<()> {
    finite(name, v)?;
    if v > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_config(format!(
            "{name} must be positive, got {v}"
        )))
    }
}

fn non_negative(name: &str, v: f64) -> Result<()> {
    finite(name, v)?;
    if v >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_config(format!(
            "{name} must not be negative, got {v}"
        )))
    }
}

fn increasing(name: &str, (lo, hi): (f64, f64)) -> Result<()> {
    finite(name, lo)?;
    finite(name, hi)?;
    if lo < hi {
        Ok(())
    } else {
        Err(Error::invalid_config(format!(
            "{name} must be increasing, got ({lo}, {hi})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        MindmapConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = MindmapConfig::from_json_str(
            r#"{"layout": {"minSpacing": 0.5}, "figure": {"dpi": 200}}"#,
        )
        .unwrap();
        assert_eq!(cfg.layout.min_spacing, 0.5);
        assert_eq!(cfg.layout.horizontal_gap, 1.5);
        assert_eq!(cfg.figure.dpi, 200.0);
        assert_eq!(cfg.figure.width, 15.0);
        assert_eq!(cfg.theme.scheme, ColorSchemeKind::Gradient);
    }

    #[test]
    fn scheme_names_are_camel_case() {
        let cfg = MindmapConfig::from_json_str(
            r#"{"theme": {"scheme": "enhanced", "indexing": "sibling", "jitterSeed": 7}}"#,
        )
        .unwrap();
        assert_eq!(cfg.theme.scheme, ColorSchemeKind::Enhanced);
        assert_eq!(cfg.theme.indexing, ColorIndexing::Sibling);
        assert_eq!(cfg.theme.jitter_seed, Some(7));
    }

    #[test]
    fn rejects_inverted_limits_and_bad_colors() {
        let mut cfg = MindmapConfig::default();
        cfg.figure.y_limits = (1.0, -1.0);
        assert!(matches!(
            cfg.validate(),
            Err(Error::InvalidConfig { .. })
        ));

        let mut cfg = MindmapConfig::default();
        cfg.theme.palette.push("not-a-color".to_string());
        assert!(matches!(cfg.validate(), Err(Error::InvalidColor { .. })));

        let mut cfg = MindmapConfig::default();
        cfg.layout.min_node_height = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn colors_round_trip_through_hex() {
        let c = parse_color("#8A4FFF").unwrap();
        assert_eq!((c.red, c.green, c.blue), (0x8a, 0x4f, 0xff));
        assert_eq!(format_color(c), "#8a4fff");
        assert_eq!(format_color(parse_color("fff").unwrap()), "#ffffff");
    }
}
