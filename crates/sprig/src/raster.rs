//! PNG/JPG/PDF output from the rendered SVG.

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color for JPG rendering: {0}")]
    JpegBackground(String),
    #[error("failed to encode JPG")]
    JpegEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    /// Fill behind the drawing. JPG always needs one and falls back to white.
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

const FONT_FAMILY: &str = "DejaVu Sans";

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let bg = options.background.as_deref().unwrap_or("#ffffff");
    if background_color(bg).is_none() {
        return Err(RasterError::JpegBackground(bg.to_string()));
    }

    let pixmap = svg_to_pixmap(svg, options.scale, Some(bg))?;
    let (w, h) = (pixmap.width(), pixmap.height());

    // The background is opaque, so dropping alpha loses nothing.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    let mut enc =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = FONT_FAMILY.to_string();

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| RasterError::PdfConvert)
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = FONT_FAMILY.to_string();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // `usvg` maps the root viewBox (including a non-zero min corner) onto `size()`.
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;
    let mut pixmap =
        tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;

    if let Some(color) = background.and_then(background_color) {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    tracing::trace!(width_px, height_px, "rasterized svg");
    Ok(pixmap)
}

fn background_color(text: &str) -> Option<tiny_skia::Color> {
    match text.trim().to_ascii_lowercase().as_str() {
        "transparent" => Some(tiny_skia::Color::TRANSPARENT),
        "white" => Some(tiny_skia::Color::WHITE),
        "black" => Some(tiny_skia::Color::BLACK),
        hex => {
            let c = sprig_core::parse_color(hex).ok()?;
            Some(tiny_skia::Color::from_rgba8(c.red, c.green, c.blue, 255))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10" fill="black"/></svg>"#;

    #[test]
    fn png_has_signature_and_scaled_size() {
        let bytes = svg_to_png(
            SQUARE,
            &RasterOptions {
                scale: 2.0,
                ..RasterOptions::default()
            },
        )
        .unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        // IHDR width/height, big-endian.
        assert_eq!(&bytes[16..20], &20u32.to_be_bytes());
        assert_eq!(&bytes[20..24], &20u32.to_be_bytes());
    }

    #[test]
    fn jpeg_and_pdf_signatures() {
        let jpg = svg_to_jpeg(SQUARE, &RasterOptions::default()).unwrap();
        assert!(jpg.starts_with(&[0xFF, 0xD8]));
        let pdf = svg_to_pdf(SQUARE).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn jpeg_rejects_unparseable_background() {
        let opts = RasterOptions {
            background: Some("sparkly".to_string()),
            ..RasterOptions::default()
        };
        assert!(matches!(
            svg_to_jpeg(SQUARE, &opts),
            Err(RasterError::JpegBackground(_))
        ));
    }
}
