//! settings.rs - The options-resolution pipeline.
//!
//! [`parse_options`] turns raw invocation options plus the built-in
//! catalogs into a [`GrawlixSettings`] snapshot: the priority-sorted filter
//! list (defaults minus whitelisted minus overridden, plus user and plugin
//! additions), the resolved style catalog, and the single active style.
//!
//! Defaults are cloned, never referenced: per-call configuration must not
//! leak into the global catalogs. Resolution order matters and is fixed:
//! defaults, plugins, user filters, sort, user styles, active style. Any
//! failure aborts the whole resolution; a snapshot is only returned on full
//! success.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};

use crate::catalog;
use crate::config::{GrawlixOptions, StyleChoice};
use crate::errors::GrawlixError;
use crate::filter::{to_filter, FilterDescriptor, GrawlixFilter};
use crate::plugin::{PluginEntry, PluginReference};
use crate::style::{to_style, GrawlixStyle, StyleDescriptor};

/// The fully resolved, per-call configuration driving matching and
/// replacement. Snapshots are self-contained and safe to share across
/// threads once built.
#[derive(Debug, Clone)]
pub struct GrawlixSettings {
    /// Random grawlixes versus fixed/fill replacements.
    pub is_random: bool,
    /// Active filters, sorted ascending by priority (stable, so catalog
    /// order breaks ties).
    pub filters: Vec<GrawlixFilter>,
    /// The resolved style catalog for this call.
    pub styles: Vec<GrawlixStyle>,
    /// The single active style.
    pub style: GrawlixStyle,
    /// Names of the plugins applied to this snapshot, in load order.
    pub loaded_plugins: Vec<String>,
}

/// Resolves raw options into a settings snapshot.
pub fn parse_options(options: &GrawlixOptions) -> Result<GrawlixSettings, GrawlixError> {
    let mut filters = clone_default_filters(&options.allowed, &options.filters);
    let mut styles: Vec<GrawlixStyle> = catalog::default_styles()
        .iter()
        .filter(|style| style.is_valid())
        .cloned()
        .collect();
    let mut loaded_plugins = Vec::new();

    for entry in &options.plugins {
        load_plugin(&mut filters, &mut styles, &mut loaded_plugins, entry, options)?;
    }

    load_filters(&mut filters, &options.filters, &options.allowed)?;
    // Stable sort: catalog/registration order survives among equal
    // priorities, which specific-before-general precedence relies on.
    filters.sort_by_key(|filter| filter.priority());

    load_styles(&mut styles, &options.styles)?;
    let style = resolve_active_style(&mut styles, options)?;

    debug!(
        "resolved settings: {} filters, {} styles, active '{}', {} plugin(s)",
        filters.len(),
        styles.len(),
        style.name(),
        loaded_plugins.len()
    );

    Ok(GrawlixSettings {
        is_random: options.randomize.unwrap_or(true),
        filters,
        styles,
        style,
        loaded_plugins,
    })
}

/// Resolves only the filter list, for the boolean obscenity probe: no
/// styles, no plugins, no active-style requirement.
pub fn probe_filters(
    descriptors: &[FilterDescriptor],
    allowed: &[String],
) -> Result<Vec<GrawlixFilter>, GrawlixError> {
    let mut filters = clone_default_filters(allowed, descriptors);
    load_filters(&mut filters, descriptors, allowed)?;
    filters.sort_by_key(|filter| filter.priority());
    Ok(filters)
}

/// Clones the default catalog, skipping whitelisted words and words the
/// caller is fully replacing (descriptor carrying both word and pattern).
fn clone_default_filters(allowed: &[String], descriptors: &[FilterDescriptor]) -> Vec<GrawlixFilter> {
    catalog::default_filters()
        .iter()
        .filter(|filter| {
            let is_allowed = allowed.iter().any(|word| word == filter.word());
            let is_replaced = descriptors.iter().any(|descriptor| {
                descriptor.word.as_deref() == Some(filter.word()) && descriptor.pattern.is_some()
            });
            !is_allowed && !is_replaced && filter.is_valid()
        })
        .cloned()
        .collect()
}

/// Merges filter descriptors into the working list: reconfigure-by-word
/// when no pattern is given, otherwise construct and add (unless the word
/// is whitelisted).
fn load_filters(
    filters: &mut Vec<GrawlixFilter>,
    descriptors: &[FilterDescriptor],
    allowed: &[String],
) -> Result<(), GrawlixError> {
    for descriptor in descriptors {
        let word = match descriptor.word.as_deref() {
            Some(word) if !word.is_empty() => word,
            _ => {
                return Err(GrawlixError::InvalidFilter {
                    reason: "word parameter is required".to_string(),
                    descriptor: descriptor.clone(),
                })
            }
        };
        if descriptor.pattern.is_none() {
            match filters.iter_mut().find(|filter| filter.word() == word) {
                Some(existing) => existing.configure(descriptor),
                None => warn!("filter reconfiguration for unknown word '{word}' ignored"),
            }
        } else if !allowed.iter().any(|allowed_word| allowed_word == word) {
            let filter = to_filter(descriptor)?;
            filters.push(filter);
        }
    }
    Ok(())
}

/// Merges style descriptors into the working catalog: reconfigure-by-name,
/// or validate and add a brand-new style.
fn load_styles(
    styles: &mut Vec<GrawlixStyle>,
    descriptors: &[StyleDescriptor],
) -> Result<(), GrawlixError> {
    for descriptor in descriptors {
        let name = match descriptor.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(GrawlixError::InvalidStyle {
                    reason: "name parameter is required".to_string(),
                    descriptor: descriptor.clone(),
                })
            }
        };
        match styles.iter_mut().find(|style| style.name() == name) {
            Some(existing) => existing.configure(descriptor),
            None => styles.push(to_style(descriptor)?),
        }
    }
    Ok(())
}

/// Resolves one plugin entry and merges its contributions, recording its
/// name. Contribution failures are wrapped in a plugin error with the
/// underlying cause preserved.
fn load_plugin(
    filters: &mut Vec<GrawlixFilter>,
    styles: &mut Vec<GrawlixStyle>,
    loaded_plugins: &mut Vec<String>,
    entry: &PluginEntry,
    options: &GrawlixOptions,
) -> Result<(), GrawlixError> {
    let mut plugin = match &entry.reference {
        PluginReference::Plugin(plugin) => plugin.clone(),
        PluginReference::Factory(factory) => {
            factory(&entry.options, options).map_err(|source| GrawlixError::Plugin {
                reason: "plugin factory did not produce a plugin".to_string(),
                plugin: None,
                source: Some(Box::new(source)),
            })?
        }
    };
    if plugin.name.is_empty() {
        return Err(GrawlixError::Plugin {
            reason: "name property is not provided".to_string(),
            plugin: None,
            source: None,
        });
    }

    debug!("loading plugin '{}'", plugin.name);
    plugin.run_init(&entry.options);

    load_filters(filters, &plugin.filters, &options.allowed).map_err(|source| {
        GrawlixError::Plugin {
            reason: "error loading plugin filters".to_string(),
            plugin: Some(plugin.name.clone()),
            source: Some(Box::new(source)),
        }
    })?;
    load_styles(styles, &plugin.styles).map_err(|source| GrawlixError::Plugin {
        reason: "error loading plugin styles".to_string(),
        plugin: Some(plugin.name.clone()),
        source: Some(Box::new(source)),
    })?;

    loaded_plugins.push(plugin.name);
    Ok(())
}

/// Resolves the single active style from the options. The effective options
/// must always name one; there is no implicit fallback here.
fn resolve_active_style(
    styles: &mut [GrawlixStyle],
    options: &GrawlixOptions,
) -> Result<GrawlixStyle, GrawlixError> {
    let choice = options.style.as_ref().ok_or(GrawlixError::StyleUnspecified)?;
    match choice {
        StyleChoice::Name(name) => styles
            .iter()
            .find(|style| style.name() == name)
            .cloned()
            .ok_or_else(|| GrawlixError::StyleNotFound { name: name.clone() }),
        StyleChoice::Entry(style) => {
            if style.is_valid() {
                Ok(style.clone())
            } else {
                Err(GrawlixError::InvalidStyle {
                    reason: "pre-built active style is not valid".to_string(),
                    descriptor: StyleDescriptor::named(style.name()),
                })
            }
        }
        StyleChoice::Descriptor(descriptor) => {
            if let Some(name) = descriptor.name.as_deref() {
                if let Some(existing) = styles.iter_mut().find(|style| style.name() == name) {
                    existing.configure(descriptor);
                    return Ok(existing.clone());
                }
            }
            // No catalog style of that name: treat the descriptor as an ad
            // hoc style, subject to factory validation.
            to_style(descriptor)
        }
    }
}
