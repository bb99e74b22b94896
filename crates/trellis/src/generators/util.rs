//! Shared utilities for pattern generation.
//!
//! Every generator needs the same setup: resolve its config against its own
//! defaults, bail out on degenerate geometry, and stamp each element with the
//! resolved stroke. This module does that once.

use crate::config::{GeneratorDefaults, PatternGeneratorConfig, ResolvedGeometry, ResolvedStyle};
use crate::scene::{Dimensions, PatternElement, Scene, Shape, StrokeData, fmt_num};

/// Context for pattern generation with resolved values.
///
/// # Example
/// ```ignore
/// let ctx = PatternContext::new(config, &GRID_DEFAULTS);
/// if ctx.is_degenerate() {
///     return ctx.finish(Vec::new());
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PatternContext<'a> {
    pub geometry: ResolvedGeometry,
    pub style: ResolvedStyle<'a>,
}

impl<'a> PatternContext<'a> {
    /// Resolve `config` against one generator's defaults.
    pub fn new(config: &'a PatternGeneratorConfig, defaults: &GeneratorDefaults) -> Self {
        Self {
            geometry: config.geometry.resolve(&defaults.geometry),
            style: config.style.resolve(&defaults.style),
        }
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.geometry.step()
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.geometry.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.geometry.height
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.geometry.is_degenerate()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.geometry.width, self.geometry.height)
    }

    /// Stroke attributes that every element of this pattern carries.
    pub fn stroke_data(&self) -> StrokeData {
        StrokeData {
            stroke_opacity: Some(self.style.stroke_opacity),
            line_cap: Some(self.style.line_cap),
            stroke_dasharray: self.style.stroke_dasharray.map(<[f64]>::to_vec),
        }
    }

    /// An element with the resolved stroke applied and no fill.
    pub fn stroked(&self, shape: Shape) -> PatternElement {
        PatternElement::new(shape)
            .with_stroke(self.style.stroke_color, self.style.stroke_width)
            .with_data(self.stroke_data())
    }

    /// Wrap generated elements into a scene sized to the canvas.
    pub fn finish(&self, elements: Vec<PatternElement>) -> Scene {
        log::trace!("generated {} elements", elements.len());
        Scene::new(elements, self.dimensions())
    }
}

/// Incremental builder for SVG path-command text (`M x y L x y ...`).
#[derive(Debug, Clone, Default)]
pub struct PathData {
    d: String,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.command('M', x, y);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.command('L', x, y);
    }

    fn command(&mut self, cmd: char, x: f64, y: f64) {
        if !self.d.is_empty() {
            self.d.push(' ');
        }
        self.d.push(cmd);
        self.d.push(' ');
        self.d.push_str(&fmt_num(x));
        self.d.push(' ');
        self.d.push_str(&fmt_num(y));
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.d
    }

    pub fn into_shape(self) -> Shape {
        Shape::Path { d: self.d }
    }
}

/// Number of whole steps in `[0, extent]`, as used by the tiling loops.
///
/// Callers guarantee `step > 0` and a finite `extent` (non-degenerate geometry).
#[inline]
pub fn whole_steps(extent: f64, step: f64) -> usize {
    (extent / step).floor().max(0.0) as usize
}
