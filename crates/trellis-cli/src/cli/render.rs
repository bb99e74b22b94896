//! `render`, `scene` and `info` commands.

use std::fs;

use trellis::export::{
    format_dimensions, format_file_size, minify_svg, prettify_svg, wrap_as_pattern_tile,
};
use trellis::{ExportInfo, Orchestrator, PngScale, export_png};

use super::common::{PatternArgs, ResolvedArgs, write_output};
use super::raster::ResvgRasterizer;

/// How the rendered markup is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Layout {
    #[default]
    Plain,
    Pretty,
    Minified,
}

fn unknown_option(arg: &str) -> String {
    format!("Unknown option: {}", arg)
}

/// Canvas size in whole pixels.
fn pixel_size(resolved: &ResolvedArgs) -> Result<(u32, u32), String> {
    let (width, height) = resolved.canvas()?;
    Ok((width.round().max(0.0) as u32, height.round().max(0.0) as u32))
}

/// Execute the render command.
pub fn cmd_render(args: &[String]) -> Result<(), String> {
    let parsed = PatternArgs::parse(args)?;

    let mut layout = Layout::Plain;
    let mut tile = false;
    for arg in &parsed.rest {
        match arg.as_str() {
            "--pretty" => layout = Layout::Pretty,
            "--minify" => layout = Layout::Minified,
            "--tile" => tile = true,
            other => return Err(unknown_option(other)),
        }
    }

    let resolved = parsed.resolve()?;
    let orchestrator = Orchestrator::default();
    let svg = resolved.render_svg(&orchestrator)?;
    log::info!("Rendered {} pattern", resolved.state.pattern_type);

    if let Some(png_path) = &resolved.png {
        write_png(&resolved, &svg, png_path, resolved.png_scale)?;
    }

    let mut markup = svg;
    if tile {
        let (width, height) = resolved.canvas()?;
        let id = format!("pattern-{}", resolved.state.pattern_type);
        markup = wrap_as_pattern_tile(&markup, &id, width, height);
    }
    markup = match layout {
        Layout::Plain => markup,
        Layout::Pretty => prettify_svg(&markup).map_err(|e| e.to_string())?,
        Layout::Minified => minify_svg(&markup).map_err(|e| e.to_string())?,
    };

    write_output(&markup, resolved.output.as_deref())
}

fn write_png(resolved: &ResolvedArgs, svg: &str, path: &str, scale: PngScale) -> Result<(), String> {
    let (width, height) = pixel_size(resolved)?;
    let background = resolved.background();

    eprint!("Generating PNG at {}...", scale);
    let bytes = export_png(&ResvgRasterizer::new(), svg, width, height, background.as_deref(), scale)
        .map_err(|e| {
            eprintln!(" failed");
            format!("PNG export failed: {}", e)
        })?;
    fs::write(path, &bytes).map_err(|e| format!("Failed to write {}: {}", path, e))?;
    eprintln!(
        " done!\nWrote: {} ({}x{}, {})",
        path,
        width * scale.factor(),
        height * scale.factor(),
        format_file_size(bytes.len() as u64)
    );
    Ok(())
}

/// Execute the scene command: the intermediate scene as JSON.
pub fn cmd_scene(args: &[String]) -> Result<(), String> {
    let parsed = PatternArgs::parse(args)?;

    let mut compact = false;
    for arg in &parsed.rest {
        match arg.as_str() {
            "--compact" => compact = true,
            other => return Err(unknown_option(other)),
        }
    }

    let resolved = parsed.resolve()?;
    let config = resolved.generator_config()?;
    let scene = Orchestrator::default()
        .generate_scene(resolved.state.pattern_type.name(), &config)
        .map_err(|e| e.to_string())?;

    let json = if compact {
        serde_json::to_string(&scene)
    } else {
        serde_json::to_string_pretty(&scene)
    }
    .map_err(|e| format!("Failed to serialize scene: {}", e))?;

    write_output(&json, resolved.output.as_deref())
}

/// Execute the info command: export sizes for the current pattern.
pub fn cmd_info(args: &[String]) -> Result<(), String> {
    let parsed = PatternArgs::parse(args)?;

    let mut json = false;
    for arg in &parsed.rest {
        match arg.as_str() {
            "--json" => json = true,
            other => return Err(unknown_option(other)),
        }
    }

    let resolved = parsed.resolve()?;
    let svg = resolved.render_svg(&Orchestrator::default())?;
    let (width, height) = pixel_size(&resolved)?;
    let info = ExportInfo::new(&svg, width, height);

    let text = if json {
        serde_json::to_string_pretty(&info).map_err(|e| format!("Failed to serialize info: {}", e))?
    } else {
        let mut lines = vec![
            format!("Pattern:     {}", resolved.state.pattern_type),
            format!("Dimensions:  {}", format_dimensions(info.width, info.height)),
            format!("SVG size:    {}", format_file_size(info.svg_size as u64)),
        ];
        for scale in PngScale::ALL {
            lines.push(format!(
                "PNG {}:     ~{}",
                scale,
                format_file_size(info.png_size(scale))
            ));
        }
        lines.join("\n")
    };

    write_output(&text, resolved.output.as_deref())
}
