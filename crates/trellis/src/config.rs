//! Geometry and style configuration.
//!
//! Every field on [`GeometryConfig`] and [`StyleConfig`] is optional. A
//! generator resolves each unset field against its own [`GeneratorDefaults`],
//! one field at a time, so two patterns never share defaults by accident
//! (dots default to round caps, grid to butt caps, and so on).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PatternError;
use crate::generators::PatternType;

/// Spacing and canvas extent. Units are abstract pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryConfig {
    /// Primary spacing unit (cell edge, dot diameter basis, wave amplitude basis).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<f64>,
    /// Extra spacing added to `cell_size` to form the repeat step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl GeometryConfig {
    /// Resolve every unset field against `defaults`.
    pub fn resolve(&self, defaults: &ResolvedGeometry) -> ResolvedGeometry {
        ResolvedGeometry {
            cell_size: self.cell_size.unwrap_or(defaults.cell_size),
            gap: self.gap.unwrap_or(defaults.gap),
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
        }
    }

    /// Merge this config over `base`, preferring self's values.
    pub fn merge_with(&self, base: &GeometryConfig) -> GeometryConfig {
        GeometryConfig {
            cell_size: self.cell_size.or(base.cell_size),
            gap: self.gap.or(base.gap),
            width: self.width.or(base.width),
            height: self.height.or(base.height),
        }
    }
}

/// Stroke end style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub const ALL: [LineCap; 3] = [LineCap::Butt, LineCap::Round, LineCap::Square];

    /// The value of the `stroke-linecap` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }

    pub fn from_name(name: &str) -> Option<LineCap> {
        match name.to_lowercase().as_str() {
            "butt" => Some(LineCap::Butt),
            "round" => Some(LineCap::Round),
            "square" => Some(LineCap::Square),
            _ => None,
        }
    }
}

impl std::fmt::Display for LineCap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named dash presets offered to users instead of raw dash arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl DashStyle {
    pub const ALL: [DashStyle; 3] = [DashStyle::Solid, DashStyle::Dashed, DashStyle::Dotted];

    /// Dash array for this style; `None` means a solid line.
    pub fn dasharray(&self) -> Option<Vec<f64>> {
        match self {
            DashStyle::Solid => None,
            DashStyle::Dashed => Some(vec![5.0, 5.0]),
            DashStyle::Dotted => Some(vec![2.0, 3.0]),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DashStyle::Solid => "solid",
            DashStyle::Dashed => "dashed",
            DashStyle::Dotted => "dotted",
        }
    }

    pub fn from_name(name: &str) -> Option<DashStyle> {
        match name.to_lowercase().as_str() {
            "solid" | "none" => Some(DashStyle::Solid),
            "dashed" | "dash" => Some(DashStyle::Dashed),
            "dotted" | "dot" => Some(DashStyle::Dotted),
            _ => None,
        }
    }
}

/// Stroke, fill and background styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_cap: Option<LineCap>,
    /// `None` draws a solid line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<Vec<f64>>,
    /// `None` leaves the canvas transparent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_opacity: Option<f64>,
}

impl StyleConfig {
    /// Resolve every unset field against `defaults`, borrowing strings from
    /// whichever side supplied them.
    pub fn resolve<'a>(&'a self, defaults: &ResolvedStyle<'static>) -> ResolvedStyle<'a> {
        ResolvedStyle {
            stroke_color: self.stroke_color.as_deref().unwrap_or(defaults.stroke_color),
            stroke_width: self.stroke_width.unwrap_or(defaults.stroke_width),
            stroke_opacity: self.stroke_opacity.unwrap_or(defaults.stroke_opacity),
            line_cap: self.line_cap.unwrap_or(defaults.line_cap),
            stroke_dasharray: self.stroke_dasharray.as_deref().or(defaults.stroke_dasharray),
            background_color: self.background_color.as_deref().or(defaults.background_color),
            background_opacity: self.background_opacity.unwrap_or(defaults.background_opacity),
        }
    }

    /// Merge this style over `base`, preferring self's values.
    pub fn merge_with(&self, base: &StyleConfig) -> StyleConfig {
        StyleConfig {
            stroke_color: self.stroke_color.clone().or_else(|| base.stroke_color.clone()),
            stroke_width: self.stroke_width.or(base.stroke_width),
            stroke_opacity: self.stroke_opacity.or(base.stroke_opacity),
            line_cap: self.line_cap.or(base.line_cap),
            stroke_dasharray: self
                .stroke_dasharray
                .clone()
                .or_else(|| base.stroke_dasharray.clone()),
            background_color: self
                .background_color
                .clone()
                .or_else(|| base.background_color.clone()),
            background_opacity: self.background_opacity.or(base.background_opacity),
        }
    }
}

/// Unified generator input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternGeneratorConfig {
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

impl PatternGeneratorConfig {
    pub fn new(geometry: GeometryConfig, style: StyleConfig) -> Self {
        Self { geometry, style }
    }
}

/// Most elements (or path vertices) one scene may hold. Geometry projected
/// past this is treated as degenerate.
pub const MAX_ELEMENTS: f64 = 5_000_000.0;

/// Geometry with every field filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGeometry {
    pub cell_size: f64,
    pub gap: f64,
    pub width: f64,
    pub height: f64,
}

impl ResolvedGeometry {
    /// Repeat distance between tiled elements.
    #[inline]
    pub fn step(&self) -> f64 {
        self.cell_size + self.gap
    }

    /// Upper bound on the elements plus path vertices any generator emits.
    ///
    /// Uses `cell_size` rather than the step, so it also bounds
    /// zero-gap layouts. Lines across the canvas are counted twice over
    /// `width + height` to cover the diagonal and isometric overdraw, and
    /// waves add one vertex per 5 units of width (at least 20).
    pub fn projected_elements(&self) -> f64 {
        let across = 2.0 * (self.width + self.height) / self.cell_size + self.width / 5.0 + 22.0;
        let down = 2.0 * self.height / self.cell_size + 2.0;
        across * down
    }

    /// True when no element can be placed: non-finite or non-positive
    /// values, a negative gap, or a cell larger than the canvas. Geometry
    /// that would exceed [`MAX_ELEMENTS`] is degenerate too.
    pub fn is_degenerate(&self) -> bool {
        let finite = [self.cell_size, self.gap, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());

        !finite
            || self.cell_size <= 0.0
            || self.gap < 0.0
            || self.width <= 0.0
            || self.height <= 0.0
            || self.cell_size > self.width
            || self.cell_size > self.height
            || self.projected_elements() > MAX_ELEMENTS
    }
}

/// Style with every field filled in. Strings borrow from the caller's
/// [`StyleConfig`] or from the generator's static defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStyle<'a> {
    pub stroke_color: &'a str,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    pub line_cap: LineCap,
    pub stroke_dasharray: Option<&'a [f64]>,
    pub background_color: Option<&'a str>,
    pub background_opacity: f64,
}

/// Fully-resolved defaults carried by every generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorDefaults {
    pub geometry: ResolvedGeometry,
    pub style: ResolvedStyle<'static>,
}

/// A pattern type plus its configuration: what a caller-level UI keeps as
/// "the current pattern".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternState {
    pub pattern_type: PatternType,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

impl PatternState {
    pub fn new(pattern_type: PatternType) -> Self {
        Self {
            pattern_type,
            geometry: GeometryConfig::default(),
            style: StyleConfig::default(),
        }
    }

    pub fn generator_config(&self) -> PatternGeneratorConfig {
        PatternGeneratorConfig::new(self.geometry.clone(), self.style.clone())
    }
}

/// Flattened configuration accepted by the older single-object API.
///
/// It mixes geometry and style fields; [`LegacyPatternConfig::split`] is the
/// only translation step before the structured pipeline takes over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPatternConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl LegacyPatternConfig {
    /// Read a flattened config from loosely-typed JSON, naming the first
    /// field whose value has the wrong type.
    ///
    /// Absent keys stay unset; an explicit `null` is rejected.
    pub fn from_json(value: &Value) -> Result<Self, PatternError> {
        let Some(map) = value.as_object() else {
            return Err(PatternError::invalid_field(
                "config",
                format!("expected an object, got {}", json_kind(value)),
            ));
        };

        Ok(Self {
            cell_size: number_field(map, "cellSize")?,
            gap: number_field(map, "gap")?,
            stroke_color: string_field(map, "strokeColor")?,
            stroke_width: number_field(map, "strokeWidth")?,
            width: number_field(map, "width")?,
            height: number_field(map, "height")?,
        })
    }

    /// [`from_json`](Self::from_json) followed by [`validate`](Self::validate).
    pub fn from_json_validated(value: &Value) -> Result<Self, PatternError> {
        let config = Self::from_json(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject numeric fields that are NaN or infinite.
    pub fn validate(&self) -> Result<(), PatternError> {
        let numbers = [
            ("cellSize", self.cell_size),
            ("gap", self.gap),
            ("strokeWidth", self.stroke_width),
            ("width", self.width),
            ("height", self.height),
        ];
        for (field, value) in numbers {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(PatternError::invalid_field(
                        field,
                        format!("expected a finite number, got {v}"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Split into geometry and style halves.
    pub fn split(&self) -> PatternGeneratorConfig {
        PatternGeneratorConfig {
            geometry: GeometryConfig {
                cell_size: self.cell_size,
                gap: self.gap,
                width: self.width,
                height: self.height,
            },
            style: StyleConfig {
                stroke_color: self.stroke_color.clone(),
                stroke_width: self.stroke_width,
                ..StyleConfig::default()
            },
        }
    }
}

fn number_field(map: &Map<String, Value>, field: &str) -> Result<Option<f64>, PatternError> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| PatternError::invalid_field(field, format!("{n} is not a finite number"))),
        Some(other) => Err(PatternError::invalid_field(
            field,
            format!("expected a number, got {}", json_kind(other)),
        )),
    }
}

fn string_field(map: &Map<String, Value>, field: &str) -> Result<Option<String>, PatternError> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(PatternError::invalid_field(
            field,
            format!("expected a string, got {}", json_kind(other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
