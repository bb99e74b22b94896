//! Single entry point: pattern type + config in, SVG markup out.
//!
//! ```text
//! lookup generator -> generate scene -> render markup
//! ```

use log::debug;
use serde_json::Value;

use crate::config::{GeometryConfig, LegacyPatternConfig, PatternGeneratorConfig, PatternState, StyleConfig};
use crate::error::PatternError;
use crate::registry::{PatternRegistry, default_registry};
use crate::scene::Scene;
use crate::svg::{RenderOptions, render_svg};

/// Runs the generate-then-render pipeline against one registry.
#[derive(Debug, Clone, Copy)]
pub struct Orchestrator<'a> {
    registry: &'a PatternRegistry,
}

impl Default for Orchestrator<'static> {
    fn default() -> Self {
        Self::new(default_registry())
    }
}

impl<'a> Orchestrator<'a> {
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a PatternRegistry {
        self.registry
    }

    /// Look up `pattern_type` and run its generator.
    pub fn generate_scene(
        &self,
        pattern_type: &str,
        config: &PatternGeneratorConfig,
    ) -> Result<Scene, PatternError> {
        let generator = self.registry.lookup(pattern_type)?;
        debug!("generating \"{pattern_type}\"");
        Ok(generator.generate(config))
    }

    /// Generate and render in one step.
    ///
    /// A background set on `options` wins; otherwise the style's own
    /// background color and opacity are used.
    pub fn generate_svg(
        &self,
        pattern_type: &str,
        geometry: &GeometryConfig,
        style: &StyleConfig,
        options: Option<&RenderOptions>,
    ) -> Result<String, PatternError> {
        let config = PatternGeneratorConfig::new(geometry.clone(), style.clone());
        let scene = self.generate_scene(pattern_type, &config)?;
        let options = effective_options(style, options);
        Ok(render_svg(&scene, &options))
    }

    /// Entry point for the flattened single-object config.
    ///
    /// Only splits the object into geometry and style halves, then
    /// delegates to [`Orchestrator::generate_svg`].
    pub fn generate_svg_legacy(
        &self,
        pattern_type: &str,
        config: &LegacyPatternConfig,
        options: Option<&RenderOptions>,
    ) -> Result<String, PatternError> {
        config.validate()?;
        let split = config.split();
        self.generate_svg(pattern_type, &split.geometry, &split.style, options)
    }

    /// Legacy entry point for loosely-typed JSON. Type errors name the field.
    pub fn generate_svg_legacy_json(
        &self,
        pattern_type: &str,
        config: &Value,
        options: Option<&RenderOptions>,
    ) -> Result<String, PatternError> {
        let split = LegacyPatternConfig::from_json_validated(config)?.split();
        self.generate_svg(pattern_type, &split.geometry, &split.style, options)
    }

    /// Render a caller-level pattern state.
    pub fn generate_svg_for_state(
        &self,
        state: &PatternState,
        options: Option<&RenderOptions>,
    ) -> Result<String, PatternError> {
        self.generate_svg(state.pattern_type.name(), &state.geometry, &state.style, options)
    }
}

fn effective_options(style: &StyleConfig, options: Option<&RenderOptions>) -> RenderOptions {
    let mut options = options.cloned().unwrap_or_default();
    if options.background_color.is_none() {
        options.background_color = style.background_color.clone();
        if options.background_opacity.is_none() {
            options.background_opacity = style.background_opacity;
        }
    }
    options
}

/// Generate markup using the process-wide built-in registry.
pub fn generate_pattern_svg(
    pattern_type: &str,
    geometry: &GeometryConfig,
    style: &StyleConfig,
    options: Option<&RenderOptions>,
) -> Result<String, PatternError> {
    Orchestrator::default().generate_svg(pattern_type, geometry, style, options)
}

/// Flattened-config variant of [`generate_pattern_svg`].
pub fn generate_legacy_pattern_svg(
    pattern_type: &str,
    config: &LegacyPatternConfig,
    options: Option<&RenderOptions>,
) -> Result<String, PatternError> {
    Orchestrator::default().generate_svg_legacy(pattern_type, config, options)
}
