//! Waves pattern - sampled sine polylines, one per row.

use std::f64::consts::TAU;

use super::PatternGenerator;
use super::util::{PathData, PatternContext};
use crate::config::{GeneratorDefaults, LineCap, PatternGeneratorConfig, ResolvedGeometry, ResolvedStyle};
use crate::scene::{Scene, Shape};

pub const WAVES_DEFAULTS: GeneratorDefaults = GeneratorDefaults {
    geometry: ResolvedGeometry {
        cell_size: 40.0,
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

pub const WAVES: PatternGenerator = PatternGenerator::new("waves", WAVES_DEFAULTS, generate_waves);

/// Minimum number of segments per wave row.
const MIN_SAMPLES: usize = 20;

/// Horizontal distance per sample on wide canvases.
const SAMPLE_SPACING: f64 = 5.0;

/// Generate wave rows.
///
/// Each row follows `y = base_y + amplitude * sin(2π x / step)` with
/// `amplitude = cell_size / 3`, sampled at `max(width / 5, 20)` segments and
/// joined with straight line commands.
pub fn generate_waves(config: &PatternGeneratorConfig) -> Scene {
    let ctx = PatternContext::new(config, &WAVES_DEFAULTS);
    if ctx.is_degenerate() {
        return ctx.finish(Vec::new());
    }

    let step = ctx.step();
    let (w, h) = (ctx.width(), ctx.height());
    let amplitude = ctx.geometry.cell_size / 3.0;
    let frequency = TAU / step;
    let rows = (h / step).ceil() as usize;
    let samples = ((w / SAMPLE_SPACING).ceil() as usize).max(MIN_SAMPLES);

    let mut elements = Vec::with_capacity(rows);
    for row in 0..rows {
        let base_y = row as f64 * step;
        let mut path = PathData::new();

        for i in 0..=samples {
            let x = i as f64 / samples as f64 * w;
            let y = base_y + amplitude * (frequency * x).sin();
            if i == 0 {
                path.move_to(x, y);
            } else {
                path.line_to(x, y);
            }
        }

        elements.push(ctx.stroked(path.into_shape()));
    }

    ctx.finish(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeometryConfig, StyleConfig};

    fn config(cell: f64, w: f64, h: f64) -> PatternGeneratorConfig {
        PatternGeneratorConfig::new(
            GeometryConfig {
                cell_size: Some(cell),
                gap: Some(0.0),
                width: Some(w),
                height: Some(h),
            },
            StyleConfig::default(),
        )
    }

    fn vertices(d: &str) -> Vec<(f64, f64)> {
        let tokens: Vec<&str> = d.split_whitespace().collect();
        tokens
            .chunks(3)
            .map(|c| (c[1].parse().unwrap(), c[2].parse().unwrap()))
            .collect()
    }

    #[test]
    fn rows_and_sample_counts() {
        let scene = generate_waves(&config(40.0, 400.0, 100.0));
        // ceil(100 / 40) = 3 rows, max(400 / 5, 20) = 80 segments.
        assert_eq!(scene.len(), 3);
        let Shape::Path { d } = &scene.elements[0].shape else {
            panic!("expected a path");
        };
        assert_eq!(vertices(d).len(), 81);
        assert!(d.starts_with("M 0 0 L"));
    }

    #[test]
    fn small_canvases_still_get_twenty_segments() {
        let scene = generate_waves(&config(40.0, 50.0, 40.0));
        let Shape::Path { d } = &scene.elements[0].shape else {
            panic!("expected a path");
        };
        assert_eq!(vertices(d).len(), 21);
    }

    #[test]
    fn samples_stay_within_amplitude() {
        let scene = generate_waves(&config(30.0, 300.0, 90.0));
        for (row, element) in scene.elements.iter().enumerate() {
            let Shape::Path { d } = &element.shape else {
                panic!("expected a path");
            };
            let base = row as f64 * 30.0;
            let points = vertices(d);
            assert_eq!(points.first().map(|p| p.0), Some(0.0));
            assert_eq!(points.last().map(|p| p.0), Some(300.0));
            for (_, y) in points {
                assert!((y - base).abs() <= 10.0 + 1e-9, "row {row} sample {y}");
            }
        }
    }
}
