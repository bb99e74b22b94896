//! Pattern generators for tiled canvases.
//!
//! Each generator is a pure function from a [`PatternGeneratorConfig`] to a
//! [`Scene`], carrying its own fully-resolved defaults.

pub mod util;

mod cross;
mod diagonal_grid;
mod dots;
mod grid;
mod isometric;
mod waves;
mod zigzag;

pub use cross::{CROSS, CROSS_DEFAULTS, generate_cross};
pub use diagonal_grid::{DIAGONAL_GRID, DIAGONAL_GRID_DEFAULTS, generate_diagonal_grid};
pub use dots::{DOTS, DOTS_DEFAULTS, generate_dots};
pub use grid::{GRID, GRID_DEFAULTS, generate_grid};
pub use isometric::{ISOMETRIC, ISOMETRIC_DEFAULTS, generate_isometric};
pub use waves::{WAVES, WAVES_DEFAULTS, generate_waves};
pub use zigzag::{ZIGZAG, ZIGZAG_DEFAULTS, generate_zigzag};

use serde::{Deserialize, Serialize};

use crate::config::{GeneratorDefaults, PatternGeneratorConfig};
use crate::scene::Scene;

/// Signature shared by every generator function.
pub type GenerateFn = fn(&PatternGeneratorConfig) -> Scene;

/// A generator record: identifier, defaults and the generating function.
///
/// ## Rust Lesson #9: Function Pointers
///
/// `fn(&PatternGeneratorConfig) -> Scene` is a plain function pointer, not a
/// closure. It has no captured state, is `Copy`, and can live in a `const`,
/// which is what lets the built-in generators be compile-time records.
#[derive(Debug, Clone, Copy)]
pub struct PatternGenerator {
    /// Unique registry identifier.
    pub pattern_type: &'static str,
    pub defaults: GeneratorDefaults,
    generate_fn: GenerateFn,
}

impl PatternGenerator {
    pub const fn new(
        pattern_type: &'static str,
        defaults: GeneratorDefaults,
        generate_fn: GenerateFn,
    ) -> Self {
        Self {
            pattern_type,
            defaults,
            generate_fn,
        }
    }

    /// Run the generator. Never mutates `config`.
    pub fn generate(&self, config: &PatternGeneratorConfig) -> Scene {
        (self.generate_fn)(config)
    }
}

/// Built-in generators in registration order.
pub const BUILTIN_GENERATORS: [PatternGenerator; 7] =
    [GRID, DOTS, DIAGONAL_GRID, ISOMETRIC, ZIGZAG, WAVES, CROSS];

/// Metadata describing a pattern for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMetadata {
    /// Label for the cell size parameter
    pub cell_size_label: &'static str,
    /// Label for the gap parameter
    pub gap_label: &'static str,
    /// Brief description of the pattern
    pub description: &'static str,
}

impl PatternMetadata {
    pub const fn new(
        cell_size_label: &'static str,
        gap_label: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            cell_size_label,
            gap_label,
            description,
        }
    }
}

/// Available pattern types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternType {
    Grid,
    Dots,
    DiagonalGrid,
    Isometric,
    Zigzag,
    Waves,
    Cross,
}

impl PatternType {
    /// Get all available patterns.
    pub fn all() -> &'static [PatternType] {
        &[
            PatternType::Grid,
            PatternType::Dots,
            PatternType::DiagonalGrid,
            PatternType::Isometric,
            PatternType::Zigzag,
            PatternType::Waves,
            PatternType::Cross,
        ]
    }

    /// Registry identifier.
    pub fn name(&self) -> &'static str {
        match self {
            PatternType::Grid => "grid",
            PatternType::Dots => "dots",
            PatternType::DiagonalGrid => "diagonalGrid",
            PatternType::Isometric => "isometric",
            PatternType::Zigzag => "zigzag",
            PatternType::Waves => "waves",
            PatternType::Cross => "cross",
        }
    }

    /// Exact identifier match, as used on the wire.
    pub fn from_id(id: &str) -> Option<PatternType> {
        Self::all().iter().copied().find(|p| p.name() == id)
    }

    /// Parse pattern from user input (case-insensitive, with aliases).
    pub fn from_name(name: &str) -> Option<PatternType> {
        match name.to_lowercase().as_str() {
            "grid" | "squares" | "graph-paper" => Some(PatternType::Grid),
            "dots" | "dot" | "dot-grid" => Some(PatternType::Dots),
            "diagonalgrid" | "diagonal-grid" | "diagonal" | "diamond" => {
                Some(PatternType::DiagonalGrid)
            }
            "isometric" | "iso" | "triangles" => Some(PatternType::Isometric),
            "zigzag" | "zig-zag" | "chevron" => Some(PatternType::Zigzag),
            "waves" | "wave" | "sine" => Some(PatternType::Waves),
            "cross" | "crosses" | "plus" => Some(PatternType::Cross),
            _ => None,
        }
    }

    /// Get UI metadata for this pattern.
    pub fn metadata(&self) -> PatternMetadata {
        match self {
            PatternType::Grid => {
                PatternMetadata::new("Cell Size", "Gap", "Square cells tiled edge to edge")
            }
            PatternType::Dots => {
                PatternMetadata::new("Dot Spacing", "Gap", "Circle at the center of every cell")
            }
            PatternType::DiagonalGrid => {
                PatternMetadata::new("Line Spacing", "Gap", "Two families of 45 degree lines")
            }
            PatternType::Isometric => {
                PatternMetadata::new("Triangle Size", "Gap", "Triangular grid at 0 and 30 degrees")
            }
            PatternType::Zigzag => {
                PatternMetadata::new("Amplitude", "Row Gap", "Rows of sharp zigzag polylines")
            }
            PatternType::Waves => {
                PatternMetadata::new("Wavelength", "Row Gap", "Rows of sampled sine waves")
            }
            PatternType::Cross => {
                PatternMetadata::new("Cell Size", "Gap", "Graph paper with dots at intersections")
            }
        }
    }

    /// The built-in generator record for this pattern.
    pub fn generator(&self) -> &'static PatternGenerator {
        match self {
            PatternType::Grid => &GRID,
            PatternType::Dots => &DOTS,
            PatternType::DiagonalGrid => &DIAGONAL_GRID,
            PatternType::Isometric => &ISOMETRIC,
            PatternType::Zigzag => &ZIGZAG,
            PatternType::Waves => &WAVES,
            PatternType::Cross => &CROSS,
        }
    }
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
