//! Flags shared by every command that renders a pattern.
//!
//! Settings are layered field by field: built-in preset, then pattern file,
//! then command-line flags.

use std::fs;

use serde_json::Value;

use trellis::{
    DashStyle, LegacyPatternConfig, LineCap, Orchestrator, PatternGeneratorConfig, PatternState,
    PatternType, PngScale, RenderOptions, default_registry, find_preset,
};

use super::pattern_file::{ExportSection, PatternFile};

/// Pattern settings as given on the command line, before layering.
#[derive(Debug, Clone, Default)]
pub struct PatternArgs {
    pub flags: PatternFile,
    pub config_path: Option<String>,
    pub legacy: Option<String>,
    pub output: Option<String>,
    /// Arguments this parser does not know, left for the command
    pub rest: Vec<String>,
}

/// Fully layered settings, ready to generate from.
#[derive(Debug, Clone)]
pub struct ResolvedArgs {
    pub state: PatternState,
    pub render: RenderOptions,
    pub legacy: Option<Value>,
    pub output: Option<String>,
    pub png: Option<String>,
    pub png_scale: PngScale,
}

/// Take the value following `args[*i]`, advancing `i`.
pub fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

pub fn parse_number(flag: &str, value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid number for {}: {}", flag, value))
}

/// Resolve a pattern name, falling back to the registry so an unknown name
/// reports the available types.
pub fn parse_pattern(name: &str) -> Result<PatternType, String> {
    if let Some(pattern) = PatternType::from_name(name) {
        return Ok(pattern);
    }
    let generator = default_registry().lookup(name).map_err(|e| e.to_string())?;
    PatternType::from_id(generator.pattern_type)
        .ok_or_else(|| format!("Unknown pattern: {}", name))
}

/// `solid`, `dashed`, `dotted`, or a comma-separated list of lengths.
pub fn parse_dash(value: &str) -> Result<Option<Vec<f64>>, String> {
    if let Some(style) = DashStyle::from_name(value) {
        return Ok(style.dasharray());
    }
    let lengths = value
        .split(',')
        .map(|part| parse_number("--dash", part))
        .collect::<Result<Vec<f64>, String>>()?;
    if lengths.iter().any(|v| *v < 0.0) {
        return Err(format!("Dash lengths must not be negative: {}", value));
    }
    Ok(Some(lengths))
}

impl PatternArgs {
    /// Parse shared pattern flags. Unknown arguments are kept in `rest`.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut parsed = PatternArgs::default();
        let flags = &mut parsed.flags;

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "-p" | "--pattern" => {
                    flags.pattern = Some(flag_value(args, &mut i, flag)?.to_string());
                }
                "--preset" => {
                    flags.preset = Some(flag_value(args, &mut i, flag)?.to_string());
                }
                "--config" => {
                    parsed.config_path = Some(flag_value(args, &mut i, flag)?.to_string());
                }
                "--legacy" => {
                    parsed.legacy = Some(flag_value(args, &mut i, flag)?.to_string());
                }
                "-o" | "--output" => {
                    parsed.output = Some(flag_value(args, &mut i, flag)?.to_string());
                }
                "--cell-size" => {
                    flags.geometry.cell_size = Some(parse_number(flag, flag_value(args, &mut i, flag)?)?);
                }
                "--gap" => {
                    flags.geometry.gap = Some(parse_number(flag, flag_value(args, &mut i, flag)?)?);
                }
                "--width" => {
                    flags.geometry.width = Some(parse_number(flag, flag_value(args, &mut i, flag)?)?);
                }
                "--height" => {
                    flags.geometry.height = Some(parse_number(flag, flag_value(args, &mut i, flag)?)?);
                }
                "--stroke" => {
                    flags.style.stroke_color = Some(flag_value(args, &mut i, flag)?.to_string());
                }
                "--stroke-width" => {
                    flags.style.stroke_width = Some(parse_number(flag, flag_value(args, &mut i, flag)?)?);
                }
                "--opacity" => {
                    flags.style.stroke_opacity = Some(parse_number(flag, flag_value(args, &mut i, flag)?)?);
                }
                "--cap" => {
                    let value = flag_value(args, &mut i, flag)?;
                    let cap = LineCap::from_name(value).ok_or_else(|| {
                        format!("Unknown line cap: {}. Use 'butt', 'round' or 'square'.", value)
                    })?;
                    flags.style.line_cap = Some(cap);
                }
                "--dash" => {
                    flags.style.stroke_dasharray = parse_dash(flag_value(args, &mut i, flag)?)?;
                }
                "--background" => {
                    flags.render.background_color = Some(flag_value(args, &mut i, flag)?.to_string());
                }
                "--background-opacity" => {
                    flags.render.background_opacity =
                        Some(parse_number(flag, flag_value(args, &mut i, flag)?)?);
                }
                "--view-box" => {
                    flags.render.view_box = Some(flag_value(args, &mut i, flag)?.to_string());
                }
                "--png" => {
                    let png = flag_value(args, &mut i, flag)?.to_string();
                    flags.export.get_or_insert_with(ExportSection::default).png = Some(png);
                }
                "--png-scale" => {
                    let value = flag_value(args, &mut i, flag)?;
                    let scale = value
                        .trim_start_matches('@')
                        .trim_end_matches('x')
                        .parse::<u32>()
                        .ok()
                        .and_then(PngScale::from_factor)
                        .ok_or_else(|| format!("Invalid PNG scale: {}. Use 1, 2 or 3.", value))?;
                    flags.export.get_or_insert_with(ExportSection::default).scale = Some(scale);
                }
                _ => parsed.rest.push(args[i].clone()),
            }
            i += 1;
        }

        Ok(parsed)
    }

    /// Layer preset, pattern file and flags into one pattern state.
    pub fn resolve(&self) -> Result<ResolvedArgs, String> {
        let file = match &self.config_path {
            Some(path) => PatternFile::load(path)?,
            None => PatternFile::default(),
        };
        let layered = self.flags.merge_with(&file);

        let base = match layered.preset.as_deref() {
            Some(id) => {
                let preset = find_preset(id).ok_or_else(|| format!("Unknown preset: {}", id))?;
                log::info!("Using preset {}", preset.name);
                preset.state()
            }
            None => PatternState::new(PatternType::Grid),
        };

        let pattern_type = match layered.pattern.as_deref() {
            Some(name) => parse_pattern(name)?,
            None => base.pattern_type,
        };

        let state = PatternState {
            pattern_type,
            geometry: layered.geometry.merge_with(&base.geometry),
            style: layered.style.merge_with(&base.style),
        };

        let legacy = match &self.legacy {
            Some(text) => Some(parse_legacy(text)?),
            None => None,
        };

        let export = layered.export.unwrap_or_default();
        Ok(ResolvedArgs {
            state,
            render: layered.render,
            legacy,
            output: self.output.clone(),
            png: export.png,
            png_scale: export.scale.unwrap_or_default(),
        })
    }
}

/// Inline JSON, or a path to a JSON file.
fn parse_legacy(text: &str) -> Result<Value, String> {
    let json = if text.trim_start().starts_with('{') {
        text.to_string()
    } else {
        fs::read_to_string(text).map_err(|e| format!("Failed to read legacy config: {}", e))?
    };
    serde_json::from_str(&json).map_err(|e| format!("Failed to parse legacy config JSON: {}", e))
}

impl ResolvedArgs {
    /// Generator input. A legacy config replaces geometry and style.
    pub fn generator_config(&self) -> Result<PatternGeneratorConfig, String> {
        match &self.legacy {
            Some(value) => LegacyPatternConfig::from_json_validated(value)
                .map(|legacy| legacy.split())
                .map_err(|e| e.to_string()),
            None => Ok(self.state.generator_config()),
        }
    }

    /// Generate and render markup.
    pub fn render_svg(&self, orchestrator: &Orchestrator) -> Result<String, String> {
        let result = match &self.legacy {
            Some(value) => orchestrator.generate_svg_legacy_json(
                self.state.pattern_type.name(),
                value,
                Some(&self.render),
            ),
            None => orchestrator.generate_svg_for_state(&self.state, Some(&self.render)),
        };
        result.map_err(|e| e.to_string())
    }

    /// Canvas size after generator defaults are applied.
    pub fn canvas(&self) -> Result<(f64, f64), String> {
        let config = self.generator_config()?;
        let defaults = self.state.pattern_type.generator().defaults;
        let geometry = config.geometry.resolve(&defaults.geometry);
        Ok((geometry.width, geometry.height))
    }

    /// Background for bitmap export: render override, then style.
    pub fn background(&self) -> Option<String> {
        self.render
            .background_color
            .clone()
            .or_else(|| self.state.style.background_color.clone())
    }
}

/// Write `content` to `path`, or stdout when no path (or `-`) is given.
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), String> {
    match path {
        Some(path) if path != "-" => {
            fs::write(path, content).map_err(|e| format!("Failed to write {}: {}", path, e))?;
            log::info!("Wrote {} ({} bytes)", path, content.len());
            Ok(())
        }
        _ => {
            println!("{}", content);
            Ok(())
        }
    }
}
