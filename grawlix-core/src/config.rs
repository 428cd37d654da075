//! Configuration management for `grawlix-core`.
//!
//! This module defines the invocation options consumed by the settings
//! resolver, the tagged union naming the active style, and utilities for
//! loading and validating custom filter/style descriptor files.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::info;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::catalog::style_name;
use crate::filter::FilterDescriptor;
use crate::plugin::{PluginEntry, PluginReference};
use crate::style::{GrawlixStyle, StyleDescriptor};
use crate::template::ReplacementTemplate;

/// The active style, as named in options: a catalog name, a descriptor
/// (reconfiguring an existing style or defining an ad hoc one), or a
/// pre-built style entry used directly.
#[derive(Debug, Clone)]
pub enum StyleChoice {
    Name(String),
    Descriptor(StyleDescriptor),
    Entry(GrawlixStyle),
}

impl From<&str> for StyleChoice {
    fn from(name: &str) -> Self {
        StyleChoice::Name(name.to_string())
    }
}

impl From<String> for StyleChoice {
    fn from(name: String) -> Self {
        StyleChoice::Name(name)
    }
}

impl From<StyleDescriptor> for StyleChoice {
    fn from(descriptor: StyleDescriptor) -> Self {
        StyleChoice::Descriptor(descriptor)
    }
}

impl From<GrawlixStyle> for StyleChoice {
    fn from(style: GrawlixStyle) -> Self {
        StyleChoice::Entry(style)
    }
}

/// Raw invocation options, resolved into a settings snapshot per call.
///
/// Unset scalar fields inherit from the host's defaults during the shallow
/// merge; empty lists do the same. `randomize` defaults to true when unset
/// everywhere.
#[derive(Debug, Clone, Default)]
pub struct GrawlixOptions {
    /// The active style. Resolution fails if neither the call options nor
    /// the defaults name one.
    pub style: Option<StyleChoice>,
    /// Random grawlixes (true) versus fixed/fill replacements (false).
    pub randomize: Option<bool>,
    /// Whitelisted words, exempted from the default catalog.
    pub allowed: Vec<String>,
    /// Filter descriptors: add, fully replace, or reconfigure by word.
    pub filters: Vec<FilterDescriptor>,
    /// Style descriptors: add or reconfigure by name.
    pub styles: Vec<StyleDescriptor>,
    /// Plugins to load, in order.
    pub plugins: Vec<PluginEntry>,
}

impl GrawlixOptions {
    /// The library-level defaults a fresh [`crate::censor::Censor`] starts
    /// from: ascii style, randomization on.
    pub fn builtin_defaults() -> Self {
        Self {
            style: Some(StyleChoice::Name(style_name::ASCII.to_string())),
            randomize: Some(true),
            ..Self::default()
        }
    }

    /// Shallow merge: fields set here win, unset fields fall back to
    /// `base`. Empty lists count as unset.
    pub fn merged_over(&self, base: &GrawlixOptions) -> GrawlixOptions {
        GrawlixOptions {
            style: self.style.clone().or_else(|| base.style.clone()),
            randomize: self.randomize.or(base.randomize),
            allowed: pick_list(&self.allowed, &base.allowed),
            filters: pick_list(&self.filters, &base.filters),
            styles: pick_list(&self.styles, &base.styles),
            plugins: pick_list(&self.plugins, &base.plugins),
        }
    }

    /// Whether the given plugin reference is already present in the plugin
    /// list (same factory, or a descriptor with the same name).
    pub fn has_plugin(&self, reference: &PluginReference) -> bool {
        self.plugins
            .iter()
            .any(|entry| entry.reference.is_same(reference))
    }

    /// Whether a plugin descriptor with the given name is present. Factory
    /// entries cannot be matched by name before resolution.
    pub fn has_plugin_named(&self, name: &str) -> bool {
        self.plugins
            .iter()
            .any(|entry| entry.reference.name() == Some(name))
    }

    /// Appends the descriptors of a loaded config file to these options.
    pub fn extend_from_config(&mut self, config: CensorConfig) {
        self.filters.extend(config.filters);
        self.styles.extend(config.styles);
    }
}

fn pick_list<T: Clone>(preferred: &[T], fallback: &[T]) -> Vec<T> {
    if preferred.is_empty() {
        fallback.to_vec()
    } else {
        preferred.to_vec()
    }
}

/// A file-loadable bundle of custom filter and style descriptors.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CensorConfig {
    pub filters: Vec<FilterDescriptor>,
    pub styles: Vec<StyleDescriptor>,
}

impl CensorConfig {
    /// Loads custom descriptors from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom censor config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!(
            "Loaded {} filter and {} style descriptors from {}.",
            config.filters.len(),
            config.styles.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parses and validates custom descriptors from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: CensorConfig = serde_yml::from_str(text).context("Failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validates descriptor integrity: words and names present, patterns
    /// compile, template references stay within the pattern's groups.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        let mut words = HashSet::new();

        for descriptor in &self.filters {
            let word = match descriptor.word.as_deref() {
                Some(word) if !word.is_empty() => word,
                _ => {
                    errors.push("A filter descriptor has no `word` field.".to_string());
                    continue;
                }
            };
            if !words.insert(word.to_string()) {
                errors.push(format!("Duplicate filter word found: '{word}'."));
            }
            let Some(pattern) = descriptor.pattern.as_deref() else {
                // A descriptor without a pattern reconfigures an existing
                // filter; nothing further to check here.
                continue;
            };
            if pattern.is_empty() {
                errors.push(format!("Filter '{word}' has an empty `pattern` field."));
                continue;
            }
            let compiled = RegexBuilder::new(pattern).case_insensitive(true).build();
            match compiled {
                Err(e) => {
                    errors.push(format!("Filter '{word}' has an invalid pattern: {e}"));
                }
                Ok(regex) => {
                    if let Some(spec) = &descriptor.template {
                        let referenced = ReplacementTemplate::compile(spec).max_group();
                        let available = regex.captures_len() - 1;
                        if referenced > available {
                            errors.push(format!(
                                "Filter '{word}': template references non-existent capture group '${referenced}'."
                            ));
                        }
                    }
                }
            }
        }

        let mut names = HashSet::new();
        for descriptor in &self.styles {
            match descriptor.name.as_deref() {
                Some(name) if !name.is_empty() => {
                    if !names.insert(name.to_string()) {
                        errors.push(format!("Duplicate style name found: '{name}'."));
                    }
                }
                _ => errors.push("A style descriptor has no `name` field.".to_string()),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Censor config validation failed:\n{}", errors.join("\n")))
        }
    }
}
