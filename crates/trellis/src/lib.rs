//! # trellis
//!
//! Tiling vector pattern generation and SVG rendering.
//!
//! The pipeline is pure and synchronous:
//!
//! ```text
//! pattern type + geometry + style
//!     -> registry lookup -> generator -> Scene -> renderer -> SVG markup
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod config;
pub mod error;
pub mod export;
pub mod generators;
pub mod orchestrator;
pub mod presets;
pub mod random;
pub mod registry;
pub mod rng;
pub mod scene;
pub mod share;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use config::{
    DashStyle, GeneratorDefaults, GeometryConfig, LegacyPatternConfig, LineCap,
    PatternGeneratorConfig, PatternState, ResolvedGeometry, ResolvedStyle, StyleConfig,
    MAX_ELEMENTS,
};
pub use error::{DecodeError, ExportError, PatternError, RasterError};
pub use export::{ExportInfo, PngScale, Rasterizer, export_png};
pub use generators::{PatternGenerator, PatternMetadata, PatternType};
pub use orchestrator::{Orchestrator, generate_legacy_pattern_svg, generate_pattern_svg};
pub use presets::{Preset, BUILTIN_PRESETS, find_preset};
pub use random::{random_pattern_state, soft_random_pattern_state};
pub use registry::{PatternRegistry, default_registry};
pub use rng::{Rng, Seed};
pub use scene::{Dimensions, PatternElement, Scene, SceneMetadata, Shape, StrokeData};
pub use share::{SharedPattern, decode_query, decode_url, encode_query, share_url};
pub use svg::{RenderOptions, render_svg};
