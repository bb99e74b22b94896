//! trellis - CLI for tiling vector patterns
//!
//! Usage:
//!   trellis render -p <pattern> [options]   Render a pattern to SVG / PNG
//!   trellis scene -p <pattern> [options]    Print the intermediate scene as JSON
//!   trellis random [--seed S] [--soft]      Render a seeded random pattern
//!   trellis share encode|decode ...         Work with shareable links
//!   trellis patterns | presets              List built-in patterns / presets

use std::env;

mod cli;

use cli::{cmd_info, cmd_patterns, cmd_presets, cmd_random, cmd_render, cmd_scene, cmd_share};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("trellis");

    if args.len() < 2 {
        print_usage(prog);
        std::process::exit(1);
    }

    let rest = &args[2..];
    let result = match args[1].as_str() {
        "render" => cmd_render(rest),
        "scene" => cmd_scene(rest),
        "info" => cmd_info(rest),
        "random" => cmd_random(rest),
        "share" => cmd_share(rest),
        "patterns" => cmd_patterns(rest),
        "presets" => cmd_presets(rest),
        "help" | "--help" | "-h" => {
            print_usage(prog);
            return;
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!();
            print_usage(prog);
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("trellis - tiling vector pattern generation");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} render [options] [--pretty|--minify] [--tile]", prog);
    eprintln!("  {} scene [options] [--compact]", prog);
    eprintln!("  {} info [options] [--json]", prog);
    eprintln!("  {} random [options] [--seed <s>] [--soft] [--save <yaml>]", prog);
    eprintln!("  {} share encode [options] [--zoom <z>] [--checkerboard] [--base <url>]", prog);
    eprintln!("  {} share decode <query|url> [--render] [-o <file>]", prog);
    eprintln!("  {} patterns [-v]", prog);
    eprintln!("  {} presets", prog);
    eprintln!();
    eprintln!("Pattern options:");
    eprintln!("  -p, --pattern <name>        grid, dots, diagonalGrid, isometric, zigzag, waves, cross");
    eprintln!("  --preset <id>               Start from a built-in preset");
    eprintln!("  --config <file.yaml>        Load a pattern file (flags override it)");
    eprintln!("  --legacy <json|file>        Flattened legacy config (replaces geometry/style)");
    eprintln!("  --cell-size <n>             Primary spacing unit");
    eprintln!("  --gap <n>                   Extra spacing between cells");
    eprintln!("  --width <n>, --height <n>   Canvas size");
    eprintln!("  --stroke <color>            Stroke color");
    eprintln!("  --stroke-width <n>          Stroke width");
    eprintln!("  --opacity <n>               Stroke opacity (0 to 1)");
    eprintln!("  --cap <cap>                 butt, round, square");
    eprintln!("  --dash <style>              solid, dashed, dotted, or lengths like 4,2");
    eprintln!("  --background <color>        Background fill");
    eprintln!("  --background-opacity <n>    Background opacity (0 to 1)");
    eprintln!("  --view-box <box>            Override the viewBox");
    eprintln!("  -o, --output <file>         Output file (- for stdout, default: stdout)");
    eprintln!("  --png <file>                Also write a PNG");
    eprintln!("  --png-scale <1|2|3>         PNG resolution multiplier (default: 1)");
    eprintln!();
    eprintln!("Logging:");
    eprintln!("  RUST_LOG=debug {} render -p dots", prog);
}
