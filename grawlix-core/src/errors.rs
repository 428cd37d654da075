//! errors.rs - Custom error types for the grawlix-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

use crate::filter::FilterDescriptor;
use crate::style::StyleDescriptor;

/// This enum represents all possible error types in the `grawlix-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions. This prevents them from
/// matching all variants exhaustively, thus avoiding breaking changes.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GrawlixError {
    /// A filter descriptor was rejected during validation. Carries the
    /// offending descriptor for diagnostics.
    #[error("invalid filter descriptor: {reason} ({descriptor:?})")]
    InvalidFilter {
        reason: String,
        descriptor: FilterDescriptor,
    },

    #[error("failed to compile pattern for '{word}': {source}")]
    PatternCompile {
        word: String,
        #[source]
        source: regex::Error,
    },

    /// A style descriptor was rejected during validation.
    #[error("invalid style descriptor: {reason} ({descriptor:?})")]
    InvalidStyle {
        reason: String,
        descriptor: StyleDescriptor,
    },

    /// The requested active style is not present in the resolved catalog.
    #[error("style '{name}' not found in the style catalog")]
    StyleNotFound { name: String },

    /// No active style was named anywhere in the effective options. There is
    /// no implicit fallback baked into the resolver; the caller's options
    /// (or the host's defaults) must always name one.
    #[error("no active style named in options; a style is required")]
    StyleUnspecified,

    /// `random_grawlix` was called on a style whose palette cannot randomize
    /// (a single fill character). Callers must check `can_randomize` first.
    #[error("style '{name}' does not support randomization")]
    RandomizeUnsupported { name: String },

    /// `fill_grawlix` was called on a style with no fill character at all
    /// (an empty palette or a generator-only style).
    #[error("style '{name}' has no fill character")]
    FillUnavailable { name: String },

    /// The random generator gave up: the palette cannot satisfy the
    /// adjacency / terminal-character constraints within the draw budget.
    #[error("palette {palette:?} cannot satisfy generation constraints (gave up after {attempts} draws)")]
    PaletteExhausted { palette: String, attempts: usize },

    /// A plugin failed to resolve or load. When the failure came from the
    /// plugin's contributed filters or styles, the underlying validation
    /// error is preserved as the source.
    #[error("plugin error ({}): {reason}", .plugin.as_deref().unwrap_or("unresolved"))]
    Plugin {
        reason: String,
        plugin: Option<String>,
        #[source]
        source: Option<Box<GrawlixError>>,
    },
}
