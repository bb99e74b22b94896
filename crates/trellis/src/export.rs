//! Export helpers: markup wrappers, re-serialization, size estimates, and the
//! seam to a bitmap rasterizer.
//!
//! Rasterization itself lives outside this crate. Callers plug a
//! [`Rasterizer`] into [`export_png`]; its failures come back unchanged.

use std::fmt;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, RasterError};
use crate::scene::fmt_num;

/// PNG compression is assumed to keep about this share of raw RGBA bytes.
const PNG_COMPRESSION_RATIO: f64 = 0.35;

/// Output resolution multiplier for bitmap export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PngScale {
    #[default]
    X1,
    X2,
    X3,
}

impl PngScale {
    pub const ALL: [PngScale; 3] = [PngScale::X1, PngScale::X2, PngScale::X3];

    pub fn factor(&self) -> u32 {
        match self {
            PngScale::X1 => 1,
            PngScale::X2 => 2,
            PngScale::X3 => 3,
        }
    }

    pub fn from_factor(factor: u32) -> Option<PngScale> {
        match factor {
            1 => Some(PngScale::X1),
            2 => Some(PngScale::X2),
            3 => Some(PngScale::X3),
            _ => None,
        }
    }

    /// Default download name, e.g. `pattern-@2x.png`.
    pub fn default_filename(&self) -> String {
        format!("pattern-{self}.png")
    }
}

impl fmt::Display for PngScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}x", self.factor())
    }
}

impl TryFrom<u8> for PngScale {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PngScale::from_factor(u32::from(value)).ok_or_else(|| format!("invalid PNG scale {value}, expected 1, 2 or 3"))
    }
}

impl From<PngScale> for u8 {
    fn from(scale: PngScale) -> u8 {
        scale.factor() as u8
    }
}

/// Turns markup into encoded bitmap bytes.
///
/// `width`/`height` are the unscaled canvas size; implementations render at
/// `width * scale` by `height * scale`. A `background` color, when given,
/// is painted under the markup; otherwise the image stays transparent.
pub trait Rasterizer {
    fn rasterize(
        &self,
        markup: &str,
        width: u32,
        height: u32,
        background: Option<&str>,
        scale: PngScale,
    ) -> Result<Vec<u8>, RasterError>;
}

/// Validate dimensions, then delegate to `rasterizer`.
pub fn export_png<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    markup: &str,
    width: u32,
    height: u32,
    background: Option<&str>,
    scale: PngScale,
) -> Result<Vec<u8>, RasterError> {
    let factor = scale.factor();
    let fits = width
        .checked_mul(factor)
        .zip(height.checked_mul(factor))
        .is_some();
    if width == 0 || height == 0 || !fits {
        return Err(RasterError::InvalidDimensions { width, height });
    }

    log::debug!("rasterizing {width}x{height} at {scale}");
    rasterizer.rasterize(markup, width, height, background.filter(|c| !c.is_empty()), scale)
}

/// Nest rendered markup inside a fixed-size canvas document.
pub fn wrap_in_canvas(markup: &str, width: f64, height: f64) -> String {
    let (w, h) = (fmt_num(width), fmt_num(height));
    format!(
        "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">\n  {markup}\n</svg>"
    )
}

/// Wrap rendered markup as a reusable `<pattern>` tile plus a rect that
/// fills the canvas with it.
pub fn wrap_as_pattern_tile(markup: &str, pattern_id: &str, width: f64, height: f64) -> String {
    let (w, h) = (fmt_num(width), fmt_num(height));
    format!(
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <pattern id="{pattern_id}" patternUnits="userSpaceOnUse" width="{w}" height="{h}">
      {markup}
    </pattern>
  </defs>
  <rect width="{w}" height="{h}" fill="url(#{pattern_id})"/>
</svg>"#
    )
}

/// Re-serialize markup with two-space indentation.
pub fn prettify_svg(markup: &str) -> Result<String, ExportError> {
    reserialize(markup, Some(2))
}

/// Re-serialize markup with no whitespace between tags.
pub fn minify_svg(markup: &str) -> Result<String, ExportError> {
    reserialize(markup, None)
}

fn reserialize(markup: &str, indent: Option<usize>) -> Result<String, ExportError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut writer = match indent {
        Some(size) => Writer::new_with_indent(Vec::new(), b' ', size),
        None => Writer::new(Vec::new()),
    };

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(event) => writer
                .write_event(event)
                .map_err(|e| ExportError::Markup(e.to_string()))?,
            Err(e) => {
                return Err(ExportError::Markup(format!(
                    "position {}: {e}",
                    reader.error_position()
                )));
            }
        }
        buf.clear();
    }

    String::from_utf8(writer.into_inner()).map_err(|e| ExportError::Markup(e.to_string()))
}

/// Byte sizes shown before an export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub width: u32,
    pub height: u32,
    pub svg_size: usize,
    pub png_size_1x: u64,
    pub png_size_2x: u64,
    pub png_size_3x: u64,
}

impl ExportInfo {
    pub fn new(markup: &str, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            svg_size: markup.len(),
            png_size_1x: estimate_png_size(width, height, PngScale::X1),
            png_size_2x: estimate_png_size(width, height, PngScale::X2),
            png_size_3x: estimate_png_size(width, height, PngScale::X3),
        }
    }

    pub fn png_size(&self, scale: PngScale) -> u64 {
        match scale {
            PngScale::X1 => self.png_size_1x,
            PngScale::X2 => self.png_size_2x,
            PngScale::X3 => self.png_size_3x,
        }
    }
}

/// Rough PNG size: raw RGBA bytes times a typical compression ratio.
pub fn estimate_png_size(width: u32, height: u32, scale: PngScale) -> u64 {
    let factor = u64::from(scale.factor());
    let raw = u64::from(width) * factor * u64::from(height) * factor * 4;
    (raw as f64 * PNG_COMPRESSION_RATIO).round() as u64
}

/// Human-readable size with two decimals, e.g. `1.50 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.2} {}", UNITS[unit])
}

/// `W × H px`.
pub fn format_dimensions(width: u32, height: u32) -> String {
    format!("{width} × {height} px")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Recording {
        calls: Cell<usize>,
        result: Result<Vec<u8>, RasterError>,
    }

    impl Rasterizer for Recording {
        fn rasterize(
            &self,
            _markup: &str,
            _width: u32,
            _height: u32,
            _background: Option<&str>,
            _scale: PngScale,
        ) -> Result<Vec<u8>, RasterError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    #[test]
    fn export_rejects_zero_dimensions_without_calling_rasterizer() {
        let r = Recording { calls: Cell::new(0), result: Ok(vec![1]) };
        let err = export_png(&r, "<svg/>", 0, 100, None, PngScale::X1).unwrap_err();
        assert_eq!(err, RasterError::InvalidDimensions { width: 0, height: 100 });
        assert_eq!(r.calls.get(), 0);
    }

    #[test]
    fn export_propagates_rasterizer_failure() {
        let r = Recording {
            calls: Cell::new(0),
            result: Err(RasterError::Markup("bad".into())),
        };
        let err = export_png(&r, "<svg", 10, 10, None, PngScale::X2).unwrap_err();
        assert_eq!(err, RasterError::Markup("bad".into()));
        assert_eq!(r.calls.get(), 1);
    }

    #[test]
    fn scale_names() {
        assert_eq!(PngScale::X2.to_string(), "@2x");
        assert_eq!(PngScale::X1.default_filename(), "pattern-@1x.png");
        assert_eq!(PngScale::from_factor(4), None);
        let scale: PngScale = serde_json::from_str("3").unwrap();
        assert_eq!(scale, PngScale::X3);
    }

    #[test]
    fn size_estimates() {
        assert_eq!(estimate_png_size(800, 600, PngScale::X1), 672_000);
        assert_eq!(estimate_png_size(800, 600, PngScale::X2), 2_688_000);
        let info = ExportInfo::new("<svg></svg>", 800, 600);
        assert_eq!(info.svg_size, 11);
        assert_eq!(info.png_size(PngScale::X3), 6_048_000);
    }

    #[test]
    fn file_size_formatting() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512.00 B");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(672_000), "656.25 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.00 GB");
        assert_eq!(format_dimensions(800, 600), "800 × 600 px");
    }

    #[test]
    fn pattern_tile_references_its_id() {
        let wrapped = wrap_as_pattern_tile("<svg/>", "pattern-grid", 100.0, 50.0);
        assert!(wrapped.contains(r#"<pattern id="pattern-grid" patternUnits="userSpaceOnUse" width="100" height="50">"#));
        assert!(wrapped.contains(r#"fill="url(#pattern-grid)""#));
        let canvas = wrap_in_canvas("<svg/>", 100.0, 50.0);
        assert!(canvas.starts_with(r#"<svg width="100" height="50" viewBox="0 0 100 50""#));
    }

    #[test]
    fn minify_and_prettify() {
        let markup = "<svg a=\"1\">\n  <rect x=\"0\" />\n  <g>\n    <line />\n  </g>\n</svg>";
        let minified = minify_svg(markup).unwrap();
        assert!(!minified.contains('\n'));
        assert!(minified.starts_with("<svg a=\"1\"><rect x=\"0\""));
        assert!(minified.ends_with("</g></svg>"));

        let pretty = prettify_svg(&minified).unwrap();
        let lines: Vec<&str> = pretty.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("  <rect"));
        assert!(lines[3].starts_with("    <line"));
        assert_eq!(lines[5], "</svg>");
    }

    #[test]
    fn reserialize_rejects_broken_markup() {
        assert!(matches!(minify_svg("<svg><rect></svg>"), Err(ExportError::Markup(_))));
    }
}
