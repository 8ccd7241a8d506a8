//! The drawing surface: maps layout units to pixels and measures labels in layout units.
//!
//! Layout units are the data coordinates of the figure's axes, so the same label measures
//! differently on a larger figure, at another dpi, or with wider axis limits.

use crate::text::{FontTier, MetricsProvider, TextMeasurer, TextStyle};
use sprig_core::geom::{Point, Size, point, size};
use sprig_core::{FigureConfig, FontConfig};
use std::sync::Arc;

const POINTS_PER_INCH: f64 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
    pub dpi: f64,
    /// Axes rectangle in pixels (y grows downward).
    pub axes_left: f64,
    pub axes_top: f64,
    pub axes_width: f64,
    pub axes_height: f64,
    pub x_limits: (f64, f64),
    pub y_limits: (f64, f64),
}

impl Viewport {
    pub fn from_figure(figure: &FigureConfig) -> Self {
        let width_px = figure.width_px();
        let height_px = figure.height_px();
        let m = &figure.margins;
        Self {
            width_px,
            height_px,
            dpi: figure.dpi,
            axes_left: m.left * width_px,
            axes_top: (1.0 - m.top) * height_px,
            axes_width: (m.right - m.left) * width_px,
            axes_height: (m.top - m.bottom) * height_px,
            x_limits: figure.x_limits,
            y_limits: figure.y_limits,
        }
    }

    pub fn px_per_unit_x(&self) -> f64 {
        self.axes_width / (self.x_limits.1 - self.x_limits.0)
    }

    pub fn px_per_unit_y(&self) -> f64 {
        self.axes_height / (self.y_limits.1 - self.y_limits.0)
    }

    /// Layout point -> pixel point. Flips the y axis.
    pub fn to_px(&self, p: Point) -> Point {
        point(
            self.axes_left + (p.x - self.x_limits.0) * self.px_per_unit_x(),
            self.axes_top + (self.y_limits.1 - p.y) * self.px_per_unit_y(),
        )
    }

    /// Layout size -> pixel size.
    pub fn size_to_px(&self, s: Size) -> Size {
        size(s.width * self.px_per_unit_x(), s.height * self.px_per_unit_y())
    }

    /// Pixel size -> layout size.
    pub fn size_to_units(&self, s: Size) -> Size {
        size(s.width / self.px_per_unit_x(), s.height / self.px_per_unit_y())
    }

    pub fn points_to_px(&self, pt: f64) -> f64 {
        pt * self.dpi / POINTS_PER_INCH
    }
}

/// A figure that can measure text: viewport + fonts + a pixel [`TextMeasurer`].
#[derive(Clone)]
pub struct Surface {
    viewport: Viewport,
    fonts: FontConfig,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("viewport", &self.viewport)
            .field("fonts", &self.fonts)
            .finish_non_exhaustive()
    }
}

impl Surface {
    pub fn new(
        figure: &FigureConfig,
        fonts: &FontConfig,
        measurer: Arc<dyn TextMeasurer + Send + Sync>,
    ) -> Self {
        Self {
            viewport: Viewport::from_figure(figure),
            fonts: fonts.clone(),
            measurer,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn fonts(&self) -> &FontConfig {
        &self.fonts
    }

    pub fn font_size_px(&self, tier: FontTier) -> f64 {
        self.viewport.points_to_px(tier.font_size_pt(&self.fonts))
    }

    pub fn text_style(&self, tier: FontTier) -> TextStyle {
        TextStyle {
            font_family: Some(self.fonts.family.clone()),
            font_size: self.font_size_px(tier),
            font_weight: tier.font_weight().map(str::to_string),
        }
    }
}

impl MetricsProvider for Surface {
    fn measure(&self, text: &str, tier: FontTier) -> Size {
        let metrics = self.measurer.measure(text, &self.text_style(tier));
        self.viewport
            .size_to_units(size(metrics.width, metrics.height))
    }
}
