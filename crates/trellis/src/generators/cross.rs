//! Cross pattern - graph paper with a dot at every intersection.

use super::PatternGenerator;
use super::util::PatternContext;
use crate::config::{GeneratorDefaults, LineCap, PatternGeneratorConfig, ResolvedGeometry, ResolvedStyle};
use crate::scene::{PatternElement, Scene, Shape};

pub const CROSS_DEFAULTS: GeneratorDefaults = GeneratorDefaults {
    geometry: ResolvedGeometry {
        cell_size: 20.0,
        gap: 0.0,
        width: 800.0,
        height: 600.0,
    },
    style: ResolvedStyle {
        stroke_color: "#000000",
        stroke_width: 1.0,
        stroke_opacity: 1.0,
        line_cap: LineCap::Butt,
        stroke_dasharray: None,
        background_color: None,
        background_opacity: 1.0,
    },
};

pub const CROSS: PatternGenerator = PatternGenerator::new("cross", CROSS_DEFAULTS, generate_cross);

/// Generate graph paper with intersection dots.
///
/// Paint order: vertical lines, horizontal lines, then one circle of radius
/// `max(stroke_width * 1.5, 1)` per intersection (row-major) so the dots
/// sit on top.
pub fn generate_cross(config: &PatternGeneratorConfig) -> Scene {
    let ctx = PatternContext::new(config, &CROSS_DEFAULTS);
    if ctx.is_degenerate() {
        return ctx.finish(Vec::new());
    }

    let step = ctx.step();
    let (w, h) = (ctx.width(), ctx.height());
    let radius = (ctx.style.stroke_width * 1.5).max(1.0);

    let xs: Vec<f64> = (0..=(w / step).ceil() as usize)
        .map(|col| col as f64 * step)
        .filter(|&x| x <= w)
        .collect();
    let ys: Vec<f64> = (0..=(h / step).ceil() as usize)
        .map(|row| row as f64 * step)
        .filter(|&y| y <= h)
        .collect();

    let mut elements: Vec<PatternElement> =
        Vec::with_capacity(xs.len() + ys.len() + xs.len() * ys.len());

    for &x in &xs {
        elements.push(ctx.stroked(Shape::Line { x, y: 0.0, x2: x, y2: h }));
    }
    for &y in &ys {
        elements.push(ctx.stroked(Shape::Line { x: 0.0, y, x2: w, y2: y }));
    }
    for &y in &ys {
        for &x in &xs {
            elements.push(ctx.stroked(Shape::Circle { x, y, radius }));
        }
    }

    ctx.finish(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeometryConfig, StyleConfig};

    fn config(cell: f64, w: f64, h: f64, stroke_width: Option<f64>) -> PatternGeneratorConfig {
        PatternGeneratorConfig::new(
            GeometryConfig {
                cell_size: Some(cell),
                gap: Some(0.0),
                width: Some(w),
                height: Some(h),
            },
            StyleConfig { stroke_width, ..Default::default() },
        )
    }

    #[test]
    fn lines_then_intersection_dots() {
        let scene = generate_cross(&config(20.0, 60.0, 40.0, None));
        // 4 vertical + 3 horizontal + 4 * 3 dots.
        assert_eq!(scene.len(), 4 + 3 + 12);
        assert_eq!(scene.elements[0].shape, Shape::Line { x: 0.0, y: 0.0, x2: 0.0, y2: 40.0 });
        assert_eq!(scene.elements[4].shape, Shape::Line { x: 0.0, y: 0.0, x2: 60.0, y2: 0.0 });
        assert_eq!(scene.elements[7].shape, Shape::Circle { x: 0.0, y: 0.0, radius: 1.5 });
        assert_eq!(scene.elements[8].shape, Shape::Circle { x: 20.0, y: 0.0, radius: 1.5 });
    }

    #[test]
    fn lines_past_the_edge_are_skipped() {
        let scene = generate_cross(&config(30.0, 100.0, 30.0, None));
        let verticals = scene
            .elements
            .iter()
            .filter(|e| matches!(e.shape, Shape::Line { x, x2, .. } if x == x2))
            .count();
        // x = 0, 30, 60, 90; 120 is past the edge.
        assert_eq!(verticals, 4);
    }

    #[test]
    fn dot_radius_has_a_floor() {
        let scene = generate_cross(&config(20.0, 40.0, 40.0, Some(0.5)));
        let radius = scene.elements.iter().find_map(|e| match e.shape {
            Shape::Circle { radius, .. } => Some(radius),
            _ => None,
        });
        assert_eq!(radius, Some(1.0));

        let scene = generate_cross(&config(20.0, 40.0, 40.0, Some(4.0)));
        let radius = scene.elements.iter().find_map(|e| match e.shape {
            Shape::Circle { radius, .. } => Some(radius),
            _ => None,
        });
        assert_eq!(radius, Some(6.0));
    }
}
