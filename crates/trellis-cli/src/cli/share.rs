//! `share` command: encode a pattern as a link, or decode one.

use trellis::{Orchestrator, SharedPattern, decode_query, decode_url, share_url, encode_query};

use super::common::{PatternArgs, flag_value, parse_number, write_output};

/// Execute the share command.
pub fn cmd_share(args: &[String]) -> Result<(), String> {
    match args.first().map(String::as_str) {
        Some("encode") => cmd_encode(&args[1..]),
        Some("decode") => cmd_decode(&args[1..]),
        Some(other) => Err(format!("Unknown share action: {}. Use 'encode' or 'decode'.", other)),
        None => Err("Missing share action. Use 'encode' or 'decode'.".to_string()),
    }
}

fn cmd_encode(args: &[String]) -> Result<(), String> {
    let parsed = PatternArgs::parse(args)?;

    let mut zoom = 1.0;
    let mut checkerboard = false;
    let mut base: Option<String> = None;

    let rest = &parsed.rest;
    let mut i = 0;
    while i < rest.len() {
        let flag = rest[i].as_str();
        match flag {
            "--zoom" => zoom = parse_number(flag, flag_value(rest, &mut i, flag)?)?,
            "--checkerboard" => checkerboard = true,
            "--base" => base = Some(flag_value(rest, &mut i, flag)?.to_string()),
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let resolved = parsed.resolve()?;
    let mut state = resolved.state.clone();
    // A render-level background is part of what the link should show.
    if let Some(color) = &resolved.render.background_color {
        state.style.background_color = Some(color.clone());
    }
    if let Some(opacity) = resolved.render.background_opacity {
        state.style.background_opacity = Some(opacity);
    }

    let shared = SharedPattern::from_state(&state, zoom, checkerboard);
    let text = match base {
        Some(base) => share_url(&shared, &base),
        None => encode_query(&shared),
    };
    write_output(&text, resolved.output.as_deref())
}

fn cmd_decode(args: &[String]) -> Result<(), String> {
    let mut input: Option<&str> = None;
    let mut output: Option<&str> = None;
    let mut render = false;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-o" | "--output" => output = Some(flag_value(args, &mut i, flag)?),
            "--render" => render = true,
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(format!("Unknown option: {}", other));
            }
            other => input = Some(other),
        }
        i += 1;
    }

    let input = input.ok_or("Missing share link or query string to decode")?;
    let shared = if input.contains("://") {
        decode_url(input)
    } else {
        decode_query(input)
    }
    .map_err(|e| e.to_string())?;

    let text = if render {
        Orchestrator::default()
            .generate_svg_for_state(&shared.to_state(), None)
            .map_err(|e| e.to_string())?
    } else {
        serde_json::to_string_pretty(&shared)
            .map_err(|e| format!("Failed to serialize shared pattern: {}", e))?
    };
    write_output(&text, output)
}
