//! Zigzag pattern - one sharp polyline per row.

use super::PatternGenerator;
use super::util::{PathData, PatternContext};
use crate::config::{GeneratorDefaults, LineCap, PatternGeneratorConfig, ResolvedGeometry, ResolvedStyle};
use crate::scene::{Scene, Shape};

pub const ZIGZAG_DEFAULTS: GeneratorDefaults = GeneratorDefaults {
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

pub const ZIGZAG: PatternGenerator = PatternGenerator::new("zigzag", ZIGZAG_DEFAULTS, generate_zigzag);

/// Generate zigzag rows.
///
/// Each row starts at `(0, row * step)` and alternates between the row
/// baseline and `cell_size / 2` below it every `cell_size` horizontally.
/// The last vertex is pinned to the right edge.
pub fn generate_zigzag(config: &PatternGeneratorConfig) -> Scene {
    let ctx = PatternContext::new(config, &ZIGZAG_DEFAULTS);
    if ctx.is_degenerate() {
        return ctx.finish(Vec::new());
    }

    let step = ctx.step();
    let cell = ctx.geometry.cell_size;
    let (w, h) = (ctx.width(), ctx.height());
    let amplitude = cell / 2.0;
    let rows = (h / step).ceil() as usize;
    let segments = (w / cell).ceil() as usize;

    let mut elements = Vec::with_capacity(rows);
    for row in 0..rows {
        let base_y = row as f64 * step;
        let mut path = PathData::new();
        path.move_to(0.0, base_y);

        for i in 1..=segments {
            let x = (i as f64 * cell).min(w);
            let y = if i % 2 == 1 { base_y + amplitude } else { base_y };
            path.line_to(x, y);
        }

        elements.push(ctx.stroked(path.into_shape()));
    }

    ctx.finish(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeometryConfig, StyleConfig};

    fn config(cell: f64, gap: f64, w: f64, h: f64) -> PatternGeneratorConfig {
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

    fn path_of(scene: &Scene, index: usize) -> &str {
        match &scene.elements[index].shape {
            Shape::Path { d } => d,
            other => panic!("expected a path, got {other:?}"),
        }
    }

    #[test]
    fn one_path_per_row() {
        let scene = generate_zigzag(&config(20.0, 0.0, 100.0, 50.0));
        // ceil(50 / 20) = 3 rows.
        assert_eq!(scene.len(), 3);
        assert_eq!(path_of(&scene, 0), "M 0 0 L 20 10 L 40 0 L 60 10 L 80 0 L 100 10");
        assert!(path_of(&scene, 1).starts_with("M 0 20 L 20 30"));
    }

    #[test]
    fn last_vertex_is_pinned_to_the_right_edge() {
        let scene = generate_zigzag(&config(30.0, 0.0, 100.0, 30.0));
        assert_eq!(path_of(&scene, 0), "M 0 0 L 30 15 L 60 0 L 90 15 L 100 0");
    }

    #[test]
    fn gap_separates_rows_only() {
        let scene = generate_zigzag(&config(20.0, 20.0, 60.0, 100.0));
        assert_eq!(scene.len(), 3);
        assert!(path_of(&scene, 1).starts_with("M 0 40 L 20 50"));
    }

    #[test]
    fn defaults_to_round_caps() {
        let scene = generate_zigzag(&PatternGeneratorConfig::default());
        assert_eq!(scene.elements[0].data.line_cap, Some(LineCap::Round));
    }
}
