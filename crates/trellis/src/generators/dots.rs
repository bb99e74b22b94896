//! Dots pattern - one circle per grid cell.

use super::PatternGenerator;
use super::util::{PatternContext, whole_steps};
use crate::config::{GeneratorDefaults, LineCap, PatternGeneratorConfig, ResolvedGeometry, ResolvedStyle};
use crate::scene::{Scene, Shape};

pub const DOTS_DEFAULTS: GeneratorDefaults = GeneratorDefaults {
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
        line_cap: LineCap::Round,
        stroke_dasharray: None,
        background_color: None,
        background_opacity: 1.0,
    },
};

pub const DOTS: PatternGenerator = PatternGenerator::new("dots", DOTS_DEFAULTS, generate_dots);

/// Generate a dot grid.
///
/// Same tiling as the grid pattern; each cell gets a circle of radius
/// `cell_size / 3` at its center.
pub fn generate_dots(config: &PatternGeneratorConfig) -> Scene {
    let ctx = PatternContext::new(config, &DOTS_DEFAULTS);
    if ctx.is_degenerate() {
        return ctx.finish(Vec::new());
    }

    let step = ctx.step();
    let cell = ctx.geometry.cell_size;
    let radius = cell / 3.0;
    let half = cell / 2.0;
    let cols = whole_steps(ctx.width(), step);
    let rows = whole_steps(ctx.height(), step);

    let mut elements = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            elements.push(ctx.stroked(Shape::Circle {
                x: col as f64 * step + half,
                y: row as f64 * step + half,
                radius,
            }));
        }
    }

    ctx.finish(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeometryConfig, StyleConfig};

    #[test]
    fn circles_sit_at_cell_centers() {
        let config = PatternGeneratorConfig::new(
            GeometryConfig {
                cell_size: Some(30.0),
                gap: Some(0.0),
                width: Some(90.0),
                height: Some(60.0),
            },
            StyleConfig::default(),
        );
        let scene = generate_dots(&config);
        assert_eq!(scene.len(), 6);
        assert_eq!(scene.elements[0].shape, Shape::Circle { x: 15.0, y: 15.0, radius: 10.0 });
        assert_eq!(scene.elements[4].shape, Shape::Circle { x: 45.0, y: 45.0, radius: 10.0 });
    }

    #[test]
    fn defaults_to_round_caps() {
        let scene = generate_dots(&PatternGeneratorConfig::default());
        assert_eq!(scene.elements[0].data.line_cap, Some(LineCap::Round));

        let config = PatternGeneratorConfig::new(
            GeometryConfig::default(),
            StyleConfig { line_cap: Some(LineCap::Butt), ..Default::default() },
        );
        let scene = generate_dots(&config);
        assert_eq!(scene.elements[0].data.line_cap, Some(LineCap::Butt));
    }

    #[test]
    fn gap_spreads_dots() {
        let config = PatternGeneratorConfig::new(
            GeometryConfig {
                cell_size: Some(10.0),
                gap: Some(10.0),
                width: Some(100.0),
                height: Some(20.0),
            },
            StyleConfig::default(),
        );
        let scene = generate_dots(&config);
        assert_eq!(scene.len(), 5);
        match (&scene.elements[0].shape, &scene.elements[1].shape) {
            (Shape::Circle { x: a, .. }, Shape::Circle { x: b, .. }) => assert_eq!(b - a, 20.0),
            other => panic!("expected circles, got {other:?}"),
        }
    }
}
