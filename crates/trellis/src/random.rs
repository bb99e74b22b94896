//! Seeded random pattern states.
//!
//! Both functions draw from a fresh [`Rng`] in a fixed order, so the same
//! seed always yields the same state.

use crate::config::{DashStyle, GeometryConfig, LineCap, PatternState, StyleConfig};
use crate::generators::PatternType;
use crate::rng::{Rng, Seed};

const WHITE: &str = "#ffffff";

/// Share of draws that leave the background alone (white for a fresh
/// state, the current color for a nudge).
const BACKGROUND_KEEP_CHANCE: f64 = 0.3;

/// A completely random pattern state.
///
/// Ranges: cell size 12 to 45, gap 0 to 10, stroke width 0.5 to 4.5,
/// stroke opacity 0.4 to 1. The background is a random color 70% of the
/// time and white otherwise. Width and height are left unset.
pub fn random_pattern_state(seed: impl Into<Seed>) -> PatternState {
    let mut rng = Rng::from_seed(seed);

    let pattern_type = rng
        .choose(PatternType::all())
        .copied()
        .unwrap_or(PatternType::Grid);
    let cell_size = rng.next_int(12, 45) as f64;
    let gap = rng.next_int(0, 10) as f64;
    let stroke_color = random_color(&mut rng);
    let background_color = random_background(&mut rng);
    let stroke_width = round_to_tenth(rng.next_range(0.5, 4.5));
    let stroke_opacity = round_to_tenth(rng.next_range(0.4, 1.0));
    let line_cap = random_line_cap(&mut rng);
    let dash = random_dash(&mut rng);

    PatternState {
        pattern_type,
        geometry: GeometryConfig {
            cell_size: Some(cell_size),
            gap: Some(gap),
            ..Default::default()
        },
        style: StyleConfig {
            stroke_color: Some(stroke_color),
            stroke_width: Some(stroke_width),
            stroke_opacity: Some(stroke_opacity),
            line_cap: Some(line_cap),
            stroke_dasharray: dash.dasharray(),
            background_color: Some(background_color),
            background_opacity: Some(1.0),
        },
    }
}

/// Nudge `current` instead of replacing it.
///
/// Keeps the pattern type and canvas size. Cell size moves by up to 5
/// (minimum 10), gap by up to 2 (minimum 0), stroke width by -1 to +1.5
/// (minimum 0.5) and opacity by -0.2 to +0.3 (clamped to 0.3 to 1).
/// The stroke color, line cap and dash style are drawn fresh; the
/// background gets a fresh color 70% of the time and is kept otherwise.
pub fn soft_random_pattern_state(current: &PatternState, seed: impl Into<Seed>) -> PatternState {
    let mut rng = Rng::from_seed(seed);
    let defaults = current.pattern_type.generator().defaults;
    let geometry = current.geometry.resolve(&defaults.geometry);
    let style = current.style.resolve(&defaults.style);

    let cell_size = (geometry.cell_size + rng.next_int(-5, 5) as f64).max(10.0);
    let gap = (geometry.gap + rng.next_int(-2, 2) as f64).max(0.0);
    let stroke_color = random_color(&mut rng);
    let background_color = if rng.next_f64() > BACKGROUND_KEEP_CHANCE {
        Some(random_color(&mut rng))
    } else {
        current.style.background_color.clone()
    };
    let stroke_width = round_to_tenth((style.stroke_width + rng.next_range(-1.0, 1.5)).max(0.5));
    let stroke_opacity =
        round_to_tenth((style.stroke_opacity + rng.next_range(-0.2, 0.3)).clamp(0.3, 1.0));
    let line_cap = random_line_cap(&mut rng);
    let dash = random_dash(&mut rng);

    PatternState {
        pattern_type: current.pattern_type,
        geometry: GeometryConfig {
            cell_size: Some(cell_size),
            gap: Some(gap),
            ..current.geometry.clone()
        },
        style: StyleConfig {
            stroke_color: Some(stroke_color),
            stroke_width: Some(stroke_width),
            stroke_opacity: Some(stroke_opacity),
            line_cap: Some(line_cap),
            stroke_dasharray: dash.dasharray(),
            background_color,
            background_opacity: current.style.background_opacity,
        },
    }
}

/// `hsl(h, s%, l%)` with hue 0 to 360, saturation 30 to 100, lightness 20 to 70.
fn random_color(rng: &mut Rng) -> String {
    let hue = rng.next_int(0, 360);
    let saturation = rng.next_int(30, 100);
    let lightness = rng.next_int(20, 70);
    format!("hsl({hue}, {saturation}%, {lightness}%)")
}

fn random_background(rng: &mut Rng) -> String {
    if rng.next_f64() > BACKGROUND_KEEP_CHANCE {
        random_color(rng)
    } else {
        WHITE.to_string()
    }
}

fn random_line_cap(rng: &mut Rng) -> LineCap {
    rng.choose(&LineCap::ALL).copied().unwrap_or_default()
}

fn random_dash(rng: &mut Rng) -> DashStyle {
    rng.choose(&DashStyle::ALL).copied().unwrap_or_default()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
