//! Scene to SVG markup.
//!
//! The renderer is a pure function of the scene and [`RenderOptions`]. It
//! performs no escaping: color strings and view boxes are written exactly
//! as supplied, so callers must pass markup-safe values.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::config::LineCap;
use crate::scene::{PatternElement, Scene, Shape, fmt_num};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Renderer-level overrides, independent of pattern geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Full-canvas fill painted under the pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Emitted as `fill-opacity` on the background when not 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_opacity: Option<f64>,
    /// Replaces the default `0 0 {width} {height}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_box: Option<String>,
}

impl RenderOptions {
    pub fn with_background(color: impl Into<String>) -> Self {
        Self {
            background_color: Some(color.into()),
            ..Default::default()
        }
    }
}

/// Render a scene to an SVG document.
///
/// One root `<svg>` element; an optional background `<rect>` as the first
/// child; then one tag per element in scene order. Unknown shapes are
/// skipped.
pub fn render_svg(scene: &Scene, options: &RenderOptions) -> String {
    let width = fmt_num(scene.dimensions.width);
    let height = fmt_num(scene.dimensions.height);
    let view_box = options
        .view_box
        .clone()
        .unwrap_or_else(|| format!("0 0 {width} {height}"));

    let mut lines = Vec::with_capacity(scene.elements.len() + 3);
    lines.push(format!(
        r#"<svg xmlns="{SVG_NS}" width="{width}" height="{height}" viewBox="{view_box}">"#
    ));

    if let Some(color) = options.background_color.as_deref().filter(|c| !c.is_empty()) {
        let mut rect = format!(
            r#"  <rect x="0" y="0" width="{width}" height="{height}" fill="{color}""#
        );
        if let Some(opacity) = options.background_opacity.filter(|&o| o != 1.0) {
            let _ = write!(rect, r#" fill-opacity="{}""#, fmt_num(opacity));
        }
        rect.push_str(" />");
        lines.push(rect);
    }

    lines.extend(scene.elements.iter().filter_map(render_element).map(|tag| format!("  {tag}")));
    lines.push("</svg>".to_string());
    lines.join("\n")
}

/// Render one element, or `None` for a shape kind this renderer does not know.
pub fn render_element(element: &PatternElement) -> Option<String> {
    let (tag, mut out) = match &element.shape {
        Shape::Rectangle { x, y, width, height } => (
            "rect",
            format!(
                r#"x="{}" y="{}" width="{}" height="{}""#,
                fmt_num(*x),
                fmt_num(*y),
                fmt_num(*width),
                fmt_num(*height)
            ),
        ),
        Shape::Circle { x, y, radius } => (
            "circle",
            format!(r#"cx="{}" cy="{}" r="{}""#, fmt_num(*x), fmt_num(*y), fmt_num(*radius)),
        ),
        Shape::Line { x, y, x2, y2 } => (
            "line",
            format!(
                r#"x1="{}" y1="{}" x2="{}" y2="{}""#,
                fmt_num(*x),
                fmt_num(*y),
                fmt_num(*x2),
                fmt_num(*y2)
            ),
        ),
        Shape::Path { d } => ("path", format!(r#"d="{d}""#)),
        Shape::Unknown => {
            log::trace!("skipping element with {} shape", element.shape.kind());
            return None;
        }
    };

    push_style_attributes(&mut out, element);
    Some(format!("<{tag} {out} />"))
}

fn push_style_attributes(out: &mut String, element: &PatternElement) {
    // Writing into a String cannot fail.
    let _ = match &element.fill {
        Some(fill) => write!(out, r#" fill="{fill}""#),
        None => write!(out, r#" fill="none""#),
    };
    if let Some(stroke) = &element.stroke {
        let _ = write!(out, r#" stroke="{stroke}""#);
    }
    if let Some(width) = element.stroke_width {
        let _ = write!(out, r#" stroke-width="{}""#, fmt_num(width));
    }

    let data = &element.data;
    if let Some(opacity) = data.stroke_opacity.filter(|&o| o != 1.0) {
        let _ = write!(out, r#" stroke-opacity="{}""#, fmt_num(opacity));
    }
    if let Some(cap) = data.line_cap.filter(|&c| c != LineCap::Butt) {
        let _ = write!(out, r#" stroke-linecap="{cap}""#);
    }
    // An explicit empty array still emits the attribute; only `None` omits it.
    if let Some(dashes) = &data.stroke_dasharray {
        let joined: Vec<String> = dashes.iter().map(|v| fmt_num(*v)).collect();
        let _ = write!(out, r#" stroke-dasharray="{}""#, joined.join(","));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Dimensions, StrokeData};

    fn scene(elements: Vec<PatternElement>) -> Scene {
        Scene::new(elements, Dimensions::new(800.0, 600.0))
    }

    #[test]
    fn empty_scene_has_a_single_root() {
        let svg = render_svg(&scene(vec![]), &RenderOptions::default());
        assert_eq!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"600\" viewBox=\"0 0 800 600\">\n</svg>"
        );
        assert_eq!(svg.matches("<svg").count(), 1);
        assert_eq!(svg.matches("</svg>").count(), 1);
    }

    #[test]
    fn view_box_override() {
        let options = RenderOptions {
            view_box: Some("0 0 100 100".into()),
            ..Default::default()
        };
        let svg = render_svg(&scene(vec![]), &options);
        assert!(svg.contains(r#"viewBox="0 0 100 100""#));
        assert!(svg.contains(r#"width="800""#));
    }

    #[test]
    fn background_comes_first() {
        let element = PatternElement::new(Shape::Circle { x: 10.0, y: 10.0, radius: 3.0 })
            .with_stroke("#000000", 1.0);
        let svg = render_svg(&scene(vec![element]), &RenderOptions::with_background("#f5f5f0"));
        let bg = svg.find(r##"fill="#f5f5f0""##).unwrap();
        let circle = svg.find("<circle").unwrap();
        assert!(bg < circle);
        assert!(svg.contains(r##"<rect x="0" y="0" width="800" height="600" fill="#f5f5f0" />"##));
    }

    #[test]
    fn empty_background_is_ignored() {
        let svg = render_svg(&scene(vec![]), &RenderOptions::with_background(""));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn background_opacity_emits_fill_opacity() {
        let options = RenderOptions {
            background_color: Some("#ffffff".into()),
            background_opacity: Some(0.5),
            ..Default::default()
        };
        let svg = render_svg(&scene(vec![]), &options);
        assert!(svg.contains(r#"fill-opacity="0.5""#));
    }

    #[test]
    fn attribute_rules() {
        let element = PatternElement::new(Shape::Line { x: 0.0, y: 0.0, x2: 10.0, y2: 10.0 })
            .with_stroke("#333", 1.5)
            .with_data(StrokeData {
                stroke_opacity: Some(1.0),
                line_cap: Some(LineCap::Butt),
                stroke_dasharray: None,
            });
        assert_eq!(
            render_element(&element).unwrap(),
            r##"<line x1="0" y1="0" x2="10" y2="10" fill="none" stroke="#333" stroke-width="1.5" />"##
        );

        let element = PatternElement::new(Shape::Circle { x: 5.0, y: 5.0, radius: 2.0 })
            .with_fill("red")
            .with_data(StrokeData {
                stroke_opacity: Some(0.8),
                line_cap: Some(LineCap::Round),
                stroke_dasharray: Some(vec![5.0, 2.5]),
            });
        assert_eq!(
            render_element(&element).unwrap(),
            r#"<circle cx="5" cy="5" r="2" fill="red" stroke-opacity="0.8" stroke-linecap="round" stroke-dasharray="5,2.5" />"#
        );
    }

    #[test]
    fn explicit_empty_dasharray_is_emitted() {
        let element = PatternElement::new(Shape::Path { d: "M 0 0 L 1 1".into() }).with_data(
            StrokeData {
                stroke_dasharray: Some(vec![]),
                ..Default::default()
            },
        );
        let tag = render_element(&element).unwrap();
        assert!(tag.contains(r#"stroke-dasharray="""#), "{tag}");
    }

    #[test]
    fn unknown_shapes_are_skipped() {
        let known = PatternElement::new(Shape::Rectangle { x: 0.0, y: 0.0, width: 1.0, height: 1.0 });
        let svg = render_svg(
            &scene(vec![PatternElement::new(Shape::Unknown), known]),
            &RenderOptions::default(),
        );
        assert_eq!(svg.lines().count(), 3);
        assert!(svg.contains("<rect x=\"0\""));
    }
}
