//! PNG export through resvg.

use std::str::FromStr;

use tiny_skia::Pixmap;

use trellis::{PngScale, RasterError, Rasterizer};

/// Renders markup with `usvg` + `tiny-skia` and encodes PNG bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResvgRasterizer;

impl ResvgRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(
        &self,
        markup: &str,
        width: u32,
        height: u32,
        background: Option<&str>,
        scale: PngScale,
    ) -> Result<Vec<u8>, RasterError> {
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_str(markup, &options)
            .map_err(|e| RasterError::Markup(e.to_string()))?;

        let factor = scale.factor();
        let pixmap_width = width * factor;
        let pixmap_height = height * factor;
        let mut pixmap = Pixmap::new(pixmap_width, pixmap_height)
            .ok_or(RasterError::InvalidDimensions { width, height })?;

        if let Some(color) = background {
            pixmap.fill(parse_color(color)?);
        }

        // Fit the document's own size onto the requested canvas.
        let size = tree.size();
        let scale_x = pixmap_width as f32 / size.width();
        let scale_y = pixmap_height as f32 / size.height();
        let transform = tiny_skia::Transform::from_scale(scale_x, scale_y);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        log::debug!("rendered {}x{} pixmap", pixmap_width, pixmap_height);
        pixmap.encode_png().map_err(|e| RasterError::Encode(e.to_string()))
    }
}

/// Any CSS color `svgtypes` understands, including `hsl(...)`.
fn parse_color(color: &str) -> Result<tiny_skia::Color, RasterError> {
    let parsed = svgtypes::Color::from_str(color)
        .map_err(|e| RasterError::Markup(format!("invalid background color \"{}\": {}", color, e)))?;
    Ok(tiny_skia::Color::from_rgba8(parsed.red, parsed.green, parsed.blue, parsed.alpha))
}
