//! Built-in, read-only pattern presets.

use crate::config::{DashStyle, GeometryConfig, LineCap, PatternState, StyleConfig};
use crate::generators::PatternType;

/// A named starting point. Canvas size is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub pattern_type: PatternType,
    pub cell_size: f64,
    pub gap: f64,
    pub stroke_color: &'static str,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    pub line_cap: LineCap,
    pub dash: DashStyle,
    pub background_color: &'static str,
}

impl Preset {
    /// Expand into a pattern state with every style field set.
    pub fn state(&self) -> PatternState {
        PatternState {
            pattern_type: self.pattern_type,
            geometry: GeometryConfig {
                cell_size: Some(self.cell_size),
                gap: Some(self.gap),
                ..Default::default()
            },
            style: StyleConfig {
                stroke_color: Some(self.stroke_color.to_string()),
                stroke_width: Some(self.stroke_width),
                stroke_opacity: Some(self.stroke_opacity),
                line_cap: Some(self.line_cap),
                stroke_dasharray: self.dash.dasharray(),
                background_color: Some(self.background_color.to_string()),
                background_opacity: Some(1.0),
            },
        }
    }
}

pub const BUILTIN_PRESETS: [Preset; 4] = [
    Preset {
        id: "preset-notebook-grid",
        name: "Notebook Grid",
        description: "Classic notebook-sized grid",
        pattern_type: PatternType::Grid,
        cell_size: 20.0,
        gap: 1.0,
        stroke_color: "#333333",
        stroke_width: 1.5,
        stroke_opacity: 0.8,
        line_cap: LineCap::Butt,
        dash: DashStyle::Solid,
        background_color: "#f5f5f0",
    },
    Preset {
        id: "preset-dot-journal",
        name: "Dot Journal",
        description: "Dots for bullet journals and creative notes",
        pattern_type: PatternType::Dots,
        cell_size: 15.0,
        gap: 0.0,
        stroke_color: "#999999",
        stroke_width: 1.5,
        stroke_opacity: 1.0,
        line_cap: LineCap::Round,
        dash: DashStyle::Solid,
        background_color: "#ffffff",
    },
    Preset {
        id: "preset-isometric-paper",
        name: "Isometric Paper",
        description: "Isometric grid for technical drawing and perspective",
        pattern_type: PatternType::Isometric,
        cell_size: 25.0,
        gap: 0.0,
        stroke_color: "#0099cc",
        stroke_width: 1.0,
        stroke_opacity: 0.9,
        line_cap: LineCap::Butt,
        dash: DashStyle::Solid,
        background_color: "#ffffff",
    },
    Preset {
        id: "preset-minimal-grid",
        name: "Minimal Grid",
        description: "Subtle minimal grid",
        pattern_type: PatternType::Grid,
        cell_size: 30.0,
        gap: 0.0,
        stroke_color: "#dddddd",
        stroke_width: 0.5,
        stroke_opacity: 0.5,
        line_cap: LineCap::Butt,
        dash: DashStyle::Solid,
        background_color: "#ffffff",
    },
];

/// Look up a preset by id. The `preset-` prefix is optional.
pub fn find_preset(id: &str) -> Option<&'static Preset> {
    let id = id.trim().to_lowercase();
    BUILTIN_PRESETS.iter().find(|p| {
        p.id == id || p.id.strip_prefix("preset-") == Some(id.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        assert_eq!(find_preset("preset-dot-journal").map(|p| p.name), Some("Dot Journal"));
        assert_eq!(find_preset("minimal-grid").map(|p| p.cell_size), Some(30.0));
        assert!(find_preset("preset-unknown").is_none());
    }

    #[test]
    fn ids_are_unique() {
        for (i, a) in BUILTIN_PRESETS.iter().enumerate() {
            for b in &BUILTIN_PRESETS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn state_is_complete() {
        let state = find_preset("notebook-grid").unwrap().state();
        assert_eq!(state.pattern_type, PatternType::Grid);
        assert_eq!(state.geometry.gap, Some(1.0));
        assert_eq!(state.style.stroke_color.as_deref(), Some("#333333"));
        assert_eq!(state.style.background_color.as_deref(), Some("#f5f5f0"));
        assert_eq!(state.style.stroke_dasharray, None);
        assert!(state.geometry.width.is_none());
    }
}
