//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `render` - Render a pattern to SVG (and optionally PNG)
//! - `scene` - Print the intermediate scene as JSON
//! - `info` - Show export sizes
//! - `random` - Generate a seeded random pattern
//! - `share` - Encode or decode a shareable link
//! - `patterns` / `presets` - List what is built in

pub mod catalog;
pub mod common;
pub mod pattern_file;
pub mod random;
pub mod raster;
pub mod render;
pub mod share;

pub use catalog::{cmd_patterns, cmd_presets};
pub use random::cmd_random;
pub use render::{cmd_info, cmd_render, cmd_scene};
pub use share::cmd_share;
