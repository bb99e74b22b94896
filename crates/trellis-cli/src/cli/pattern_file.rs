//! YAML pattern files.
//!
//! A pattern file names a pattern and carries any subset of its geometry,
//! style and render settings, plus optional export targets:
//!
//! ```yaml
//! pattern: isometric
//! preset: isometric-paper
//! geometry:
//!   cellSize: 24
//!   width: 1200
//! style:
//!   strokeColor: "#335577"
//!   strokeDasharray: [4, 2]
//! render:
//!   backgroundColor: "#fdfdf8"
//! export:
//!   png: paper.png
//!   scale: 2
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use trellis::{GeometryConfig, PatternState, PatternType, PngScale, RenderOptions, StyleConfig};

/// Where a rendered pattern file should also be written as a bitmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<PngScale>,
}

/// A pattern loaded from (or saved to) YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternFile {
    /// Pattern type; aliases such as `diagonal-grid` are accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Built-in preset the rest of the file is layered over
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    #[serde(default)]
    pub geometry: GeometryConfig,

    #[serde(default)]
    pub style: StyleConfig,

    #[serde(default, skip_serializing_if = "is_default_render")]
    pub render: RenderOptions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportSection>,
}

fn is_default_render(render: &RenderOptions) -> bool {
    *render == RenderOptions::default()
}

impl PatternFile {
    /// Load a pattern file from YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read pattern file: {}", e))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content)
            .map_err(|e| format!("Failed to parse pattern YAML: {}", e))
    }

    /// Write this pattern file as YAML.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .map_err(|e| format!("Failed to write pattern file: {}", e))
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize pattern YAML: {}", e))
    }

    /// Capture a pattern state (and render overrides) as a file.
    pub fn from_state(state: &PatternState, render: &RenderOptions) -> Self {
        Self {
            pattern: Some(state.pattern_type.name().to_string()),
            preset: None,
            geometry: state.geometry.clone(),
            style: state.style.clone(),
            render: render.clone(),
            export: None,
        }
    }

    /// The named pattern type, if the file sets one.
    pub fn pattern_type(&self) -> Result<Option<PatternType>, String> {
        match self.pattern.as_deref() {
            None => Ok(None),
            Some(name) => PatternType::from_name(name)
                .map(Some)
                .ok_or_else(|| format!("Unknown pattern in pattern file: {}", name)),
        }
    }

    /// Merge this file over `base`, preferring self's values.
    pub fn merge_with(&self, base: &PatternFile) -> PatternFile {
        PatternFile {
            pattern: self.pattern.clone().or_else(|| base.pattern.clone()),
            preset: self.preset.clone().or_else(|| base.preset.clone()),
            geometry: self.geometry.merge_with(&base.geometry),
            style: self.style.merge_with(&base.style),
            render: RenderOptions {
                background_color: self
                    .render
                    .background_color
                    .clone()
                    .or_else(|| base.render.background_color.clone()),
                background_opacity: self.render.background_opacity.or(base.render.background_opacity),
                view_box: self.render.view_box.clone().or_else(|| base.render.view_box.clone()),
            },
            export: match (&self.export, &base.export) {
                (Some(top), Some(bottom)) => Some(ExportSection {
                    png: top.png.clone().or_else(|| bottom.png.clone()),
                    scale: top.scale.or(bottom.scale),
                }),
                (top, bottom) => top.clone().or_else(|| bottom.clone()),
            },
        }
    }
}
