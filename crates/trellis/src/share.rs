//! Versioned query-string codec for sharing a pattern as a link.
//!
//! Encoding writes `v=1` followed only by fields that differ from the
//! defaults. Decoding validates every field and either returns a complete
//! [`SharedPattern`] or a [`DecodeError`]; it never returns a partial state.

use log::warn;
use serde::{Deserialize, Serialize};
use url::Url;
use url::form_urlencoded;

use crate::config::{GeometryConfig, LineCap, PatternState, StyleConfig};
use crate::error::DecodeError;
use crate::generators::PatternType;
use crate::scene::fmt_num;

/// Current share format version.
pub const SHARE_VERSION: &str = "1";

const CELL_SIZE_RANGE: (f64, f64) = (5.0, 100.0);
const GAP_RANGE: (f64, f64) = (0.0, 50.0);
const CANVAS_RANGE: (f64, f64) = (200.0, 5000.0);
const STROKE_WIDTH_RANGE: (f64, f64) = (0.5, 10.0);
const OPACITY_RANGE: (f64, f64) = (0.0, 1.0);
const ZOOM_RANGE: (f64, f64) = (0.25, 4.0);

/// Everything a shared link carries: a fully-resolved pattern plus viewer
/// settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedPattern {
    pub pattern_type: PatternType,
    pub cell_size: f64,
    pub gap: f64,
    pub width: u32,
    pub height: u32,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    pub line_cap: LineCap,
    /// Empty means a solid line.
    #[serde(default)]
    pub stroke_dasharray: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub background_opacity: f64,
    pub zoom: f64,
    pub checkerboard: bool,
}

impl Default for SharedPattern {
    fn default() -> Self {
        Self {
            pattern_type: PatternType::Grid,
            cell_size: 20.0,
            gap: 0.0,
            width: 800,
            height: 600,
            stroke_color: "#000000".to_string(),
            stroke_width: 1.0,
            stroke_opacity: 1.0,
            line_cap: LineCap::Butt,
            stroke_dasharray: Vec::new(),
            background_color: None,
            background_opacity: 1.0,
            zoom: 1.0,
            checkerboard: false,
        }
    }
}

impl SharedPattern {
    /// Capture a pattern state. Unset fields resolve against the pattern's
    /// own generator defaults.
    pub fn from_state(state: &PatternState, zoom: f64, checkerboard: bool) -> Self {
        let defaults = state.pattern_type.generator().defaults;
        let geometry = state.geometry.resolve(&defaults.geometry);
        let style = state.style.resolve(&defaults.style);
        Self {
            pattern_type: state.pattern_type,
            cell_size: geometry.cell_size,
            gap: geometry.gap,
            width: geometry.width.round().max(0.0) as u32,
            height: geometry.height.round().max(0.0) as u32,
            stroke_color: style.stroke_color.to_string(),
            stroke_width: style.stroke_width,
            stroke_opacity: style.stroke_opacity,
            line_cap: style.line_cap,
            stroke_dasharray: style.stroke_dasharray.map(<[f64]>::to_vec).unwrap_or_default(),
            background_color: style.background_color.map(str::to_string),
            background_opacity: style.background_opacity,
            zoom,
            checkerboard,
        }
    }

    /// The pattern part, with every field set explicitly.
    pub fn to_state(&self) -> PatternState {
        PatternState {
            pattern_type: self.pattern_type,
            geometry: GeometryConfig {
                cell_size: Some(self.cell_size),
                gap: Some(self.gap),
                width: Some(f64::from(self.width)),
                height: Some(f64::from(self.height)),
            },
            style: StyleConfig {
                stroke_color: Some(self.stroke_color.clone()),
                stroke_width: Some(self.stroke_width),
                stroke_opacity: Some(self.stroke_opacity),
                line_cap: Some(self.line_cap),
                stroke_dasharray: (!self.stroke_dasharray.is_empty())
                    .then(|| self.stroke_dasharray.clone()),
                background_color: self.background_color.clone(),
                background_opacity: Some(self.background_opacity),
            },
        }
    }
}

/// Encode as a query string (no leading `?`).
pub fn encode_query(shared: &SharedPattern) -> String {
    let defaults = SharedPattern::default();
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("v", SHARE_VERSION);

    if shared.pattern_type != defaults.pattern_type {
        query.append_pair("pattern", shared.pattern_type.name());
    }
    if shared.cell_size != defaults.cell_size {
        query.append_pair("cellSize", &fmt_num(shared.cell_size));
    }
    if shared.gap != defaults.gap {
        query.append_pair("gap", &fmt_num(shared.gap));
    }
    if shared.width != defaults.width {
        query.append_pair("width", &shared.width.to_string());
    }
    if shared.height != defaults.height {
        query.append_pair("height", &shared.height.to_string());
    }
    if shared.stroke_color != defaults.stroke_color {
        query.append_pair("strokeColor", &shared.stroke_color);
    }
    if shared.stroke_width != defaults.stroke_width {
        query.append_pair("strokeWidth", &fmt_num(shared.stroke_width));
    }
    if shared.stroke_opacity != defaults.stroke_opacity {
        query.append_pair("strokeOpacity", &fmt_num(shared.stroke_opacity));
    }
    if shared.line_cap != defaults.line_cap {
        query.append_pair("lineCap", shared.line_cap.as_str());
    }
    if !shared.stroke_dasharray.is_empty() {
        let parts: Vec<String> = shared.stroke_dasharray.iter().map(|v| fmt_num(*v)).collect();
        query.append_pair("strokeDasharray", &format!("[{}]", parts.join(",")));
    }
    if let Some(color) = shared.background_color.as_deref().filter(|c| !c.is_empty()) {
        query.append_pair("backgroundColor", color);
    }
    if shared.background_opacity != defaults.background_opacity {
        query.append_pair("backgroundOpacity", &fmt_num(shared.background_opacity));
    }
    if shared.zoom != defaults.zoom {
        query.append_pair("zoom", &fmt_num(shared.zoom));
    }
    if shared.checkerboard {
        query.append_pair("checkerboard", "true");
    }

    query.finish()
}

/// Decode a query string. A leading `?` is allowed.
pub fn decode_query(query: &str) -> Result<SharedPattern, DecodeError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let params = QueryParams::parse(query);
    decode_params(&params).inspect_err(|err| warn!("rejected shared pattern: {err}"))
}

/// Decode the query part of a full share URL.
pub fn decode_url(url: &str) -> Result<SharedPattern, DecodeError> {
    let parsed = Url::parse(url).map_err(|e| DecodeError::InvalidUrl(e.to_string()))?;
    decode_query(parsed.query().unwrap_or(""))
}

/// `<base>/?<query>`.
pub fn share_url(shared: &SharedPattern, base: &str) -> String {
    format!("{}/?{}", base.trim_end_matches('/'), encode_query(shared))
}

/// Decoded key/value pairs. The first occurrence of a key wins.
struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn parse(query: &str) -> Self {
        Self(form_urlencoded::parse(query.as_bytes()).into_owned().collect())
    }

    /// The value for `key`, treating an empty value as absent.
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

fn decode_params(params: &QueryParams) -> Result<SharedPattern, DecodeError> {
    let defaults = SharedPattern::default();

    let version = params.get("v").unwrap_or(SHARE_VERSION);
    if version != SHARE_VERSION {
        return Err(DecodeError::UnsupportedVersion(version.to_string()));
    }

    let pattern_type = match params.get("pattern") {
        None => defaults.pattern_type,
        Some(id) => {
            PatternType::from_id(id).ok_or_else(|| DecodeError::UnknownPattern(id.to_string()))?
        }
    };

    let cell_size = number(params, "cellSize", defaults.cell_size, CELL_SIZE_RANGE)?;
    let gap = number(params, "gap", defaults.gap, GAP_RANGE)?;
    let width = integer(params, "width", defaults.width, CANVAS_RANGE)?;
    let height = integer(params, "height", defaults.height, CANVAS_RANGE)?;

    let stroke_color = params
        .get("strokeColor")
        .map_or(defaults.stroke_color, str::to_string);
    let stroke_width = number(params, "strokeWidth", defaults.stroke_width, STROKE_WIDTH_RANGE)?;
    let stroke_opacity = number(params, "strokeOpacity", defaults.stroke_opacity, OPACITY_RANGE)?;
    let line_cap = match params.get("lineCap") {
        None => defaults.line_cap,
        // Case-sensitive on the wire.
        Some(cap) => LineCap::ALL
            .into_iter()
            .find(|c| c.as_str() == cap)
            .ok_or_else(|| DecodeError::InvalidLineCap(cap.to_string()))?,
    };
    let stroke_dasharray = match params.get("strokeDasharray") {
        None => Vec::new(),
        Some(raw) => dash_array(raw)?,
    };

    let background_color = params.get("backgroundColor").map(str::to_string);
    let background_opacity = number(
        params,
        "backgroundOpacity",
        defaults.background_opacity,
        OPACITY_RANGE,
    )?;

    let zoom = number(params, "zoom", defaults.zoom, ZOOM_RANGE)?;
    let checkerboard = params.get("checkerboard") == Some("true");

    Ok(SharedPattern {
        pattern_type,
        cell_size,
        gap,
        width,
        height,
        stroke_color,
        stroke_width,
        stroke_opacity,
        line_cap,
        stroke_dasharray,
        background_color,
        background_opacity,
        zoom,
        checkerboard,
    })
}

fn number(
    params: &QueryParams,
    field: &'static str,
    default: f64,
    (min, max): (f64, f64),
) -> Result<f64, DecodeError> {
    let Some(raw) = params.get(field) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DecodeError::Malformed { field, value: raw.to_string() })?;
    if value < min || value > max {
        return Err(DecodeError::OutOfRange { field, value, min, max });
    }
    Ok(value)
}

fn integer(
    params: &QueryParams,
    field: &'static str,
    default: u32,
    (min, max): (f64, f64),
) -> Result<u32, DecodeError> {
    let Some(raw) = params.get(field) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| DecodeError::Malformed { field, value: raw.to_string() })?;
    let as_float = f64::from(value);
    if as_float < min || as_float > max {
        return Err(DecodeError::OutOfRange { field, value: as_float, min, max });
    }
    Ok(value)
}

fn dash_array(raw: &str) -> Result<Vec<f64>, DecodeError> {
    let malformed = || DecodeError::Malformed {
        field: "strokeDasharray",
        value: raw.to_string(),
    };
    let values: Vec<serde_json::Value> = serde_json::from_str(raw).map_err(|_| malformed())?;
    values
        .iter()
        .map(|v| v.as_f64().filter(|n| n.is_finite() && *n >= 0.0).ok_or_else(malformed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_encode_to_version_only() {
        assert_eq!(encode_query(&SharedPattern::default()), "v=1");
    }

    #[test]
    fn only_changed_fields_are_encoded() {
        let shared = SharedPattern {
            pattern_type: PatternType::Waves,
            cell_size: 35.0,
            stroke_color: "#FF5733".into(),
            stroke_dasharray: vec![5.0, 5.0],
            checkerboard: true,
            ..Default::default()
        };
        let query = encode_query(&shared);
        assert_eq!(
            query,
            "v=1&pattern=waves&cellSize=35&strokeColor=%23FF5733&strokeDasharray=%5B5%2C5%5D&checkerboard=true"
        );
        assert_eq!(decode_query(&query).unwrap(), shared);
    }

    #[test]
    fn empty_query_decodes_to_defaults() {
        assert_eq!(decode_query("").unwrap(), SharedPattern::default());
        assert_eq!(decode_query("?").unwrap(), SharedPattern::default());
    }

    #[test]
    fn rejects_other_versions() {
        assert_eq!(
            decode_query("v=2").unwrap_err(),
            DecodeError::UnsupportedVersion("2".into())
        );
    }

    #[test]
    fn rejects_unknown_patterns() {
        assert_eq!(
            decode_query("v=1&pattern=hexagon").unwrap_err(),
            DecodeError::UnknownPattern("hexagon".into())
        );
    }

    #[test]
    fn range_checks() {
        for query in [
            "cellSize=4",
            "cellSize=101",
            "gap=51",
            "width=199",
            "height=5001",
            "strokeWidth=0.4",
            "strokeOpacity=1.5",
            "backgroundOpacity=-0.1",
            "zoom=8",
        ] {
            let err = decode_query(query).unwrap_err();
            assert!(matches!(err, DecodeError::OutOfRange { .. }), "{query}: {err:?}");
        }
    }

    #[test]
    fn malformed_values_name_the_field() {
        let err = decode_query("cellSize=big").unwrap_err();
        assert_eq!(
            err,
            DecodeError::Malformed { field: "cellSize", value: "big".into() }
        );
        assert!(matches!(
            decode_query("width=800.5").unwrap_err(),
            DecodeError::Malformed { field: "width", .. }
        ));
        assert!(matches!(
            decode_query("strokeDasharray=oops").unwrap_err(),
            DecodeError::Malformed { field: "strokeDasharray", .. }
        ));
        assert!(matches!(
            decode_query("strokeDasharray=%5B5%2C-1%5D").unwrap_err(),
            DecodeError::Malformed { field: "strokeDasharray", .. }
        ));
        assert!(matches!(
            decode_query("zoom=NaN").unwrap_err(),
            DecodeError::Malformed { field: "zoom", .. }
        ));
    }

    #[test]
    fn line_caps() {
        assert_eq!(decode_query("lineCap=round").unwrap().line_cap, LineCap::Round);
        assert_eq!(
            decode_query("lineCap=ROUND").unwrap_err(),
            DecodeError::InvalidLineCap("ROUND".into())
        );
    }

    #[test]
    fn full_url_roundtrip() {
        let shared = SharedPattern {
            pattern_type: PatternType::DiagonalGrid,
            width: 1200,
            background_color: Some("#f5f5f0".into()),
            zoom: 2.0,
            ..Default::default()
        };
        let url = share_url(&shared, "https://example.com/");
        assert!(url.starts_with("https://example.com/?v=1&pattern=diagonalGrid"));
        assert_eq!(decode_url(&url).unwrap(), shared);
        assert!(matches!(decode_url("not a url"), Err(DecodeError::InvalidUrl(_))));
    }

    #[test]
    fn state_conversion_resolves_defaults() {
        let state = PatternState::new(PatternType::Dots);
        let shared = SharedPattern::from_state(&state, 1.0, false);
        assert_eq!(shared.line_cap, LineCap::Round);
        assert_eq!(shared.cell_size, 20.0);

        let back = shared.to_state();
        assert_eq!(back.style.stroke_dasharray, None);
        assert_eq!(back.geometry.width, Some(800.0));
    }
}
