use serde::{Deserialize, Serialize};
use sprig_core::geom::Size;
use sprig_core::{FontConfig, ROOT_DEPTH};
use unicode_width::UnicodeWidthStr;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    /// Font size in pixels.
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Pixel-space text measurement.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    /// Label lines, split on `\n` and the `<br>` spellings. Never empty: `""` is one empty line.
    pub fn normalized_text_lines(text: &str) -> Vec<String> {
        ["<br/>", "<br />", "<br>"]
            .iter()
            .fold(text.to_string(), |acc, br| acc.replace(*br, "\n"))
            .split('\n')
            .map(str::to_string)
            .collect()
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        // Display columns, so wide (CJK) glyphs count double.
        let max_columns = lines
            .iter()
            .map(|line| UnicodeWidthStr::width(line.as_str()))
            .max()
            .unwrap_or(0);

        let width = max_columns as f64 * font_size * char_width_factor;
        let height = lines.len() as f64 * font_size * line_height_factor;
        TextMetrics {
            width,
            height,
            line_count: lines.len(),
        }
    }
}

/// Font size bucket. The root label is drawn larger (and bold); every other depth shares one size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontTier {
    Root,
    Branch,
}

impl FontTier {
    pub fn from_depth(depth: i32) -> Self {
        if depth == ROOT_DEPTH {
            FontTier::Root
        } else {
            FontTier::Branch
        }
    }

    /// Font size in points.
    pub fn font_size_pt(self, fonts: &FontConfig) -> f64 {
        match self {
            FontTier::Root => fonts.root_size,
            FontTier::Branch => fonts.node_size,
        }
    }

    pub fn font_weight(self) -> Option<&'static str> {
        match self {
            FontTier::Root => Some("bold"),
            FontTier::Branch => None,
        }
    }
}

/// Label measurement in layout units, as consumed by the layout engine.
pub trait MetricsProvider {
    fn measure(&self, text: &str, tier: FontTier) -> Size;
}

impl<F> MetricsProvider for F
where
    F: Fn(&str, FontTier) -> Size,
{
    fn measure(&self, text: &str, tier: FontTier) -> Size {
        self(text, tier)
    }
}
