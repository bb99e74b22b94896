//! Isometric pattern - triangular grid from three line families.

use std::f64::consts::PI;

use super::PatternGenerator;
use super::util::{PatternContext, whole_steps};
use crate::config::{GeneratorDefaults, LineCap, PatternGeneratorConfig, ResolvedGeometry, ResolvedStyle};
use crate::scene::{PatternElement, Scene, Shape};

pub const ISOMETRIC_DEFAULTS: GeneratorDefaults = GeneratorDefaults {
    geometry: ResolvedGeometry {
        cell_size: 30.0,
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

pub const ISOMETRIC: PatternGenerator =
    PatternGenerator::new("isometric", ISOMETRIC_DEFAULTS, generate_isometric);

/// Generate an isometric (triangular) grid.
///
/// Horizontal pitch is `step * cos(30°)`, vertical pitch `step * sin(30°)`.
/// Emits horizontal lines first, then the rising family, then the falling
/// family. Slanted lines start off-canvas so the tiling reaches every edge.
pub fn generate_isometric(config: &PatternGeneratorConfig) -> Scene {
    let ctx = PatternContext::new(config, &ISOMETRIC_DEFAULTS);
    if ctx.is_degenerate() {
        return ctx.finish(Vec::new());
    }

    let step = ctx.step();
    let (w, h) = (ctx.width(), ctx.height());
    let angle = PI / 6.0;
    let x_pitch = step * angle.cos();
    let y_pitch = step * angle.sin();
    // Horizontal run of a slanted line crossing the full canvas height.
    let run = h / angle.sin() * angle.cos();

    let mut elements: Vec<PatternElement> = Vec::new();

    // 0°
    for row in 0..=whole_steps(h + step, y_pitch) {
        let y = row as f64 * y_pitch;
        elements.push(ctx.stroked(Shape::Line { x: 0.0, y, x2: w, y2: y }));
    }

    // +30°, starting far enough left to cover the bottom-left corner.
    let first = -((h / y_pitch).ceil() as i64);
    let last = whole_steps(w + step, x_pitch) as i64;
    for col in first..=last {
        let x = col as f64 * x_pitch;
        elements.push(ctx.stroked(Shape::Line { x, y: 0.0, x2: x + run, y2: h }));
    }

    // −30°, running far enough right to cover the bottom-right corner.
    for col in 0..=whole_steps(w + run + step, x_pitch) {
        let x = col as f64 * x_pitch;
        elements.push(ctx.stroked(Shape::Line { x, y: 0.0, x2: x - run, y2: h }));
    }

    ctx.finish(elements)
}
