//! Diagonal grid - two crossing families of 45 degree lines.

use super::PatternGenerator;
use super::util::{PatternContext, whole_steps};
use crate::config::{GeneratorDefaults, LineCap, PatternGeneratorConfig, ResolvedGeometry, ResolvedStyle};
use crate::scene::{Scene, Shape};

pub const DIAGONAL_GRID_DEFAULTS: GeneratorDefaults = GeneratorDefaults {
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

pub const DIAGONAL_GRID: PatternGenerator =
    PatternGenerator::new("diagonalGrid", DIAGONAL_GRID_DEFAULTS, generate_diagonal_grid);

/// Generate a diagonal grid.
///
/// Every line runs from the top edge to the bottom edge. Start offsets range
/// past `[0, width]` on either side so the corners are covered; those lines
/// overdraw outside the canvas.
pub fn generate_diagonal_grid(config: &PatternGeneratorConfig) -> Scene {
    let ctx = PatternContext::new(config, &DIAGONAL_GRID_DEFAULTS);
    if ctx.is_degenerate() {
        return ctx.finish(Vec::new());
    }

    let step = ctx.step();
    let (w, h) = (ctx.width(), ctx.height());
    // Both families need one line per step across width + height.
    let count = whole_steps(w + h, step) + 1;

    let mut elements = Vec::with_capacity(count * 2);

    // Down-right: offsets from -h up to w.
    for i in 0..count {
        let offset = -h + i as f64 * step;
        elements.push(ctx.stroked(Shape::Line {
            x: offset,
            y: 0.0,
            x2: offset + h,
            y2: h,
        }));
    }

    // Down-left: offsets from 0 up to w + h.
    for i in 0..count {
        let offset = i as f64 * step;
        elements.push(ctx.stroked(Shape::Line {
            x: offset,
            y: 0.0,
            x2: offset - h,
            y2: h,
        }));
    }

    ctx.finish(elements)
}
