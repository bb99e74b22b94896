//! Grid pattern - axis-aligned square cells.

use super::PatternGenerator;
use super::util::{PatternContext, whole_steps};
use crate::config::{GeneratorDefaults, LineCap, PatternGeneratorConfig, ResolvedGeometry, ResolvedStyle};
use crate::scene::{Scene, Shape};

pub const GRID_DEFAULTS: GeneratorDefaults = GeneratorDefaults {
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

pub const GRID: PatternGenerator = PatternGenerator::new("grid", GRID_DEFAULTS, generate_grid);

/// Generate a grid of square cells.
///
/// One rectangle per full cell, row-major. Cells that would run past the
/// canvas edge are dropped rather than clipped.
pub fn generate_grid(config: &PatternGeneratorConfig) -> Scene {
    let ctx = PatternContext::new(config, &GRID_DEFAULTS);
    if ctx.is_degenerate() {
        return ctx.finish(Vec::new());
    }

    let step = ctx.step();
    let cell = ctx.geometry.cell_size;
    let cols = whole_steps(ctx.width(), step);
    let rows = whole_steps(ctx.height(), step);

    let mut elements = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            elements.push(ctx.stroked(Shape::Rectangle {
                x: col as f64 * step,
                y: row as f64 * step,
                width: cell,
                height: cell,
            }));
        }
    }

    ctx.finish(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeometryConfig, StyleConfig};

    fn geometry(cell: f64, gap: f64, w: f64, h: f64) -> PatternGeneratorConfig {
        PatternGeneratorConfig::new(
            GeometryConfig {
                cell_size: Some(cell),
                gap: Some(gap),
                width: Some(w),
                height: Some(h),
            },
            StyleConfig::default(),
        )
    }

    #[test]
    fn exact_tiling() {
        let scene = generate_grid(&geometry(20.0, 0.0, 100.0, 100.0));
        assert_eq!(scene.len(), 25);
        assert_eq!(
            scene.elements[0].shape,
            Shape::Rectangle { x: 0.0, y: 0.0, width: 20.0, height: 20.0 }
        );
        assert_eq!(
            scene.elements[1].shape,
            Shape::Rectangle { x: 20.0, y: 0.0, width: 20.0, height: 20.0 }
        );
    }

    #[test]
    fn gap_widens_the_step() {
        let scene = generate_grid(&geometry(10.0, 20.0, 100.0, 100.0));
        assert_eq!(scene.len(), 9);
        let xs: Vec<f64> = scene
            .elements
            .iter()
            .take(3)
            .map(|e| match e.shape {
                Shape::Rectangle { x, .. } => x,
                _ => panic!("grid should only emit rectangles"),
            })
            .collect();
        assert_eq!(xs, vec![0.0, 30.0, 60.0]);
    }

    #[test]
    fn partial_cells_are_dropped() {
        let scene = generate_grid(&geometry(30.0, 0.0, 100.0, 50.0));
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn oversized_cell_is_empty() {
        let scene = generate_grid(&geometry(1000.0, 0.0, 100.0, 100.0));
        assert!(scene.is_empty());
        assert_eq!(scene.metadata.element_count, 0);
        assert_eq!(scene.dimensions.width, 100.0);
    }

    #[test]
    fn defaults_apply_when_unset() {
        let scene = generate_grid(&PatternGeneratorConfig::default());
        assert_eq!(scene.dimensions.width, 800.0);
        assert_eq!(scene.dimensions.height, 600.0);
        assert_eq!(scene.len(), 40 * 30);
        let first = &scene.elements[0];
        assert_eq!(first.stroke.as_deref(), Some("#000000"));
        assert_eq!(first.data.line_cap, Some(LineCap::Butt));
    }

    #[test]
    fn input_is_not_mutated() {
        let config = geometry(15.0, 5.0, 200.0, 120.0);
        let snapshot = config.clone();
        let _ = generate_grid(&config);
        assert_eq!(config, snapshot);
    }
}
