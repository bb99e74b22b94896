//! `patterns` and `presets` listings.

use trellis::{BUILTIN_PRESETS, PatternType, default_registry};

/// Execute the patterns command.
pub fn cmd_patterns(args: &[String]) -> Result<(), String> {
    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    let registry = default_registry();

    println!("Available patterns:");
    for id in registry.types() {
        if !verbose {
            println!("  {}", id);
            continue;
        }
        let Some(pattern) = PatternType::from_id(id) else {
            println!("  {}", id);
            continue;
        };
        let meta = pattern.metadata();
        let defaults = pattern.generator().defaults;
        println!("  {:<14} {}", id, meta.description);
        println!(
            "  {:<14} {} (default {}), {} (default {})",
            "",
            meta.cell_size_label,
            defaults.geometry.cell_size,
            meta.gap_label,
            defaults.geometry.gap
        );
    }
    Ok(())
}

/// Execute the presets command.
pub fn cmd_presets(_args: &[String]) -> Result<(), String> {
    println!("Built-in presets:");
    for preset in &BUILTIN_PRESETS {
        println!("  {:<24} {:<16} {}", preset.id, preset.name, preset.description);
    }
    Ok(())
}
