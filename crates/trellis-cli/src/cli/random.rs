//! `random` command: seeded random patterns.

use rand::SeedableRng;
use rand::prelude::*;
use rand::rngs::StdRng;

use trellis::{Orchestrator, PatternState, Seed, random_pattern_state, soft_random_pattern_state};

use super::common::{PatternArgs, flag_value, write_output};
use super::pattern_file::PatternFile;

/// Execute the random command.
///
/// Without `--seed` a seed is drawn from the OS and logged, so any result
/// can be reproduced. `--soft` nudges the pattern given by the other flags
/// instead of replacing it.
pub fn cmd_random(args: &[String]) -> Result<(), String> {
    let parsed = PatternArgs::parse(args)?;

    let mut seed: Option<Seed> = None;
    let mut soft = false;
    let mut save_path: Option<String> = None;

    let rest = &parsed.rest;
    let mut i = 0;
    while i < rest.len() {
        let flag = rest[i].as_str();
        match flag {
            "--seed" => seed = Some(Seed::parse(flag_value(rest, &mut i, flag)?)),
            "--soft" => soft = true,
            "--save" => save_path = Some(flag_value(rest, &mut i, flag)?.to_string()),
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let seed = seed.unwrap_or_else(|| {
        let mut os_rng = StdRng::from_os_rng();
        Seed::Number(os_rng.random())
    });
    log::info!("Random seed: {}", seed);

    let resolved = parsed.resolve()?;
    let state = if soft {
        soft_random_pattern_state(&resolved.state, seed)
    } else {
        keep_canvas(random_pattern_state(seed), &resolved.state)
    };
    log::info!("Picked {} pattern", state.pattern_type);

    if let Some(path) = &save_path {
        PatternFile::from_state(&state, &resolved.render).save(path)?;
        log::info!("Saved pattern file {}", path);
    }

    let svg = Orchestrator::default()
        .generate_svg_for_state(&state, Some(&resolved.render))
        .map_err(|e| e.to_string())?;
    write_output(&svg, resolved.output.as_deref())
}

/// Random states leave the canvas unset; carry over the requested size.
fn keep_canvas(mut state: PatternState, requested: &PatternState) -> PatternState {
    state.geometry.width = requested.geometry.width;
    state.geometry.height = requested.geometry.height;
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis::PatternType;

    #[test]
    fn canvas_is_carried_over() {
        let mut requested = PatternState::new(PatternType::Grid);
        requested.geometry.width = Some(1024.0);
        let state = keep_canvas(random_pattern_state(5u64), &requested);
        assert_eq!(state.geometry.width, Some(1024.0));
        assert_eq!(state.geometry.height, None);
    }
}
