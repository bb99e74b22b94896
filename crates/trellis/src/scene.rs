//! Renderer-agnostic scene types.
//!
//! A [`Scene`] is what a generator produces and what the SVG renderer
//! consumes: an ordered list of shapes plus the canvas dimensions.
//! Element order is paint order (later elements paint over earlier ones).
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = like console.log, lets you print with `{:?}`
//! - `Clone` = can duplicate the value (like spread: `{...obj}`)
//! - `PartialEq` = can compare with `==`
//! - `Serialize`/`Deserialize` = serde turns the struct into JSON and back

use serde::{Deserialize, Serialize};

use crate::config::LineCap;

/// Geometry of a single scene element.
///
/// ## Rust Lesson #22: Pattern Matching on Enums with Data
///
/// Each variant carries only the fields that make sense for it, so a circle
/// can never end up with a stray `width`. The renderer matches on the variant
/// and the compiler checks that every kind is handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum Shape {
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    /// `x`/`y` is the center.
    Circle { x: f64, y: f64, radius: f64 },
    Line { x: f64, y: f64, x2: f64, y2: f64 },
    /// `d` is SVG path-command text.
    Path { d: String },
    /// A shape kind this version does not know. The renderer skips it.
    #[serde(other)]
    Unknown,
}

impl Shape {
    /// The `shape` tag as it appears in serialized scenes.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Rectangle { .. } => "rectangle",
            Shape::Circle { .. } => "circle",
            Shape::Line { .. } => "line",
            Shape::Path { .. } => "path",
            Shape::Unknown => "unknown",
        }
    }
}

/// Serialization-only stroke attributes, kept apart from shape geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_cap: Option<LineCap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<Vec<f64>>,
}

impl StrokeData {
    pub fn is_empty(&self) -> bool {
        self.stroke_opacity.is_none() && self.line_cap.is_none() && self.stroke_dasharray.is_none()
    }
}

/// One shape in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternElement {
    #[serde(flatten)]
    pub shape: Shape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "StrokeData::is_empty")]
    pub data: StrokeData,
}

impl PatternElement {
    /// An unstyled element.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            fill: None,
            stroke: None,
            stroke_width: None,
            data: StrokeData::default(),
        }
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(stroke.into());
        self.stroke_width = Some(width);
        self
    }

    pub fn with_data(mut self, data: StrokeData) -> Self {
        self.data = data;
        self
    }
}

/// Canvas extent of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Informational metadata about a generated scene.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneMetadata {
    /// Always equal to the number of elements.
    pub element_count: usize,
    /// Milliseconds since the Unix epoch at generation time.
    #[serde(default)]
    pub generated_at: i64,
}

/// `generated_at` is informational and does not take part in equality.
impl PartialEq for SceneMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.element_count == other.element_count
    }
}

/// The intermediate representation between generators and the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub elements: Vec<PatternElement>,
    pub dimensions: Dimensions,
    pub metadata: SceneMetadata,
}

impl Scene {
    /// Wrap `elements` into a scene, stamping the element count and time.
    pub fn new(elements: Vec<PatternElement>, dimensions: Dimensions) -> Self {
        let metadata = SceneMetadata {
            element_count: elements.len(),
            generated_at: chrono::Utc::now().timestamp_millis(),
        };
        Self {
            elements,
            dimensions,
            metadata,
        }
    }

    /// A scene with no elements.
    pub fn empty(dimensions: Dimensions) -> Self {
        Self::new(Vec::new(), dimensions)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Format a number the way it appears in markup: shortest round-trip form,
/// no trailing `.0`, and never `-0`.
pub fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
