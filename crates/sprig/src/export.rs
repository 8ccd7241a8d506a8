//! Output formats for [`crate::MindMap::save`].

use crate::{Error, Result};
use sprig_render::SvgRenderOptions;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "svg" => Some(ExportFormat::Svg),
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| Error::UnsupportedFormat {
            format: if ext.is_empty() {
                format!("{} has no file extension", path.display())
            } else {
                ext.to_string()
            },
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Explicit format; `None` infers it from the file extension.
    pub format: Option<ExportFormat>,
    pub svg: SvgRenderOptions,
    /// Raster scale factor relative to the SVG's pixel size.
    pub scale: f32,
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: None,
            svg: SvgRenderOptions::default(),
            scale: 1.0,
            jpeg_quality: 90,
        }
    }
}

impl ExportOptions {
    pub fn resolve_format(&self, path: &Path) -> Result<ExportFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => ExportFormat::from_path(path),
        }
    }
}
