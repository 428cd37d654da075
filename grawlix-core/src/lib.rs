// grawlix-core/src/lib.rs
//! # Grawlix Core Library
//!
//! `grawlix-core` provides the fundamental logic for detecting and censoring
//! obscenity in text: obfuscation-tolerant word filters, replacement styles
//! that render cartoon-like "grawlixes" (`%!&#`, `████`), and the
//! options-resolution pipeline that merges defaults, whitelists, custom
//! filters, custom styles, and plugins into one effective configuration per
//! call.
//!
//! The library is a deterministic pattern matcher over a configured
//! dictionary, not a toxicity classifier: it performs no semantic analysis,
//! and it is tunable rather than exhaustive.
//!
//! ## Modules
//!
//! * `filter`: Defines `GrawlixFilter`s and their descriptors for
//!   specifying target words and matching patterns.
//! * `style`: Defines `GrawlixStyle`s - character palettes, generator
//!   functions, and fixed replacement maps.
//! * `template`: The compiled token-substitution mini-language that splices
//!   preserved capture groups around generated grawlixes.
//! * `generate`: Pure output generation (fill and constrained random).
//! * `plugin`: Plugin descriptors, factories, and references.
//! * `catalog`: The built-in filter and style catalogs (data, not logic).
//! * `config`: Invocation options, style selection, and descriptor-file
//!   loading.
//! * `settings`: The options resolver producing per-call settings
//!   snapshots.
//! * `engine`: The matching and replacement engine.
//! * `censor`: The `Censor` host object and one-shot helpers.
//! * `errors`: The `GrawlixError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use grawlix_core::{Censor, GrawlixOptions, StyleChoice};
//!
//! fn main() -> Result<(), grawlix_core::GrawlixError> {
//!     let censor = Censor::new();
//!
//!     // Censor with per-call options merged over the defaults.
//!     let options = GrawlixOptions {
//!         style: Some(StyleChoice::from("redacted")),
//!         randomize: Some(false),
//!         ..GrawlixOptions::default()
//!     };
//!     let clean = censor.censor_with("fuck this shit I'm out", &options)?;
//!     assert_eq!(clean, "████ this ████ I'm out");
//!
//!     // Boolean probe against the default catalog.
//!     assert!(censor.is_obscene("sh1t")?);
//!     assert!(!censor.is_obscene("scunthorpe")?);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`GrawlixError`]; configuration mistakes
//! (invalid filters or styles, unknown or unspecified active styles, broken
//! plugins) abort resolution rather than silently degrading to "no
//! filtering". The descriptor-file loading path uses `anyhow` for
//! contextual I/O errors.
//!
//! ## Design Principles
//!
//! * **Clone-on-read defaults:** settings snapshots are built from clones
//!   of the built-in catalogs, so per-call configuration never leaks into
//!   process-wide state.
//! * **Normalize at the edge:** plugins and style selections arrive as
//!   tagged unions and are resolved into concrete descriptors before the
//!   resolver runs.
//! * **Fail closed:** no partial snapshot is ever returned.
//! * **Testable:** every component is unit-testable in isolation; the
//!   default catalog's behavior is pinned by scenario tests.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod catalog;
pub mod censor;
pub mod config;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod generate;
pub mod plugin;
pub mod settings;
pub mod style;
pub mod template;

/// Re-exports the censor host object and the one-shot helpers.
pub use censor::{censor_string, is_obscene_string, Censor};

/// Re-exports the public configuration types.
pub use config::{CensorConfig, GrawlixOptions, StyleChoice};

/// Re-exports the custom error type for clear error reporting.
pub use errors::GrawlixError;

/// Re-exports filter types and the validating filter factory.
pub use filter::{to_filter, FilterDescriptor, GrawlixFilter};

/// Re-exports style types and the validating style factory.
pub use style::{to_style, CharGenerator, GrawlixStyle, Palette, RandomCharsOption, StyleDescriptor};

/// Re-exports plugin types.
pub use plugin::{GrawlixPlugin, PluginEntry, PluginFactory, PluginInit, PluginReference};

/// Re-exports the settings snapshot and the options resolver.
pub use settings::{parse_options, probe_filters, GrawlixSettings};

/// Re-exports the replacement-template mini-language.
pub use template::{ReplacementTemplate, TEMPLATE_BETWEEN, TEMPLATE_POST, TEMPLATE_PRE};

/// Re-exports the built-in style names.
pub use catalog::{default_filters, default_styles, style_name};
