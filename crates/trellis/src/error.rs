//! Error types for pattern generation, sharing and export.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. `thiserror` derives the
//! `Display` and `std::error::Error` impls from the `#[error(...)]` strings,
//! so each variant documents its own message right where it is declared.

use thiserror::Error;

/// Caller contract violations at the registry / orchestrator boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    /// A generator with the same identifier is already registered.
    #[error(
        "Pattern type \"{0}\" is already registered. Each pattern type must have a unique identifier."
    )]
    DuplicateType(String),

    /// Lookup of an identifier that nothing registered.
    #[error(
        "Pattern type \"{pattern_type}\" is not registered. Available types: {}",
        .available.join(", ")
    )]
    NotRegistered {
        pattern_type: String,
        available: Vec<String>,
    },

    /// A configuration field has the wrong type or an unusable value.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
}

impl PatternError {
    pub(crate) fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Why a shared query string could not be turned back into a pattern.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unsupported share format version \"{0}\"")]
    UnsupportedVersion(String),

    #[error("unknown pattern type \"{0}\"")]
    UnknownPattern(String),

    #[error("malformed value for `{field}`: \"{value}\"")]
    Malformed { field: &'static str, value: String },

    #[error("`{field}` = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid line cap \"{0}\"")]
    InvalidLineCap(String),

    #[error("invalid share URL: {0}")]
    InvalidUrl(String),
}

/// Failure reported by a [`crate::Rasterizer`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    #[error("cannot rasterize a {width}x{height} image")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("markup could not be parsed: {0}")]
    Markup(String),

    #[error("image encoding failed: {0}")]
    Encode(String),
}

/// Failure while re-serializing markup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("markup is not well-formed: {0}")]
    Markup(String),
}
