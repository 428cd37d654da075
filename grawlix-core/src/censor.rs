//! censor.rs - The censor host object and one-shot helpers.
//!
//! [`Censor`] owns the process-wide default options and a lazily built,
//! invalidate-on-change cache of the settings snapshot those defaults
//! resolve to. It is deliberately an explicit object the hosting
//! application owns and passes around, not hidden global state.
//!
//! Calls that pass their own options always resolve a fresh snapshot
//! (shallow-merged over the defaults) and never touch the cache, so
//! concurrent callers with distinct options cannot interfere with each
//! other. Mutating the defaults requires `&mut self` and invalidates the
//! cache; the host application serializes such reconfiguration itself.
//!
//! License: MIT OR APACHE 2.0

use std::sync::{Arc, RwLock};

use log::debug;
use serde_json::Value;

use crate::config::GrawlixOptions;
use crate::engine;
use crate::errors::GrawlixError;
use crate::filter::FilterDescriptor;
use crate::plugin::{PluginEntry, PluginReference};
use crate::settings::{self, parse_options, GrawlixSettings};

/// Obscenity censor with process-wide defaults and a cached default
/// settings snapshot.
#[derive(Debug)]
pub struct Censor {
    defaults: GrawlixOptions,
    cached: RwLock<Option<Arc<GrawlixSettings>>>,
}

impl Default for Censor {
    fn default() -> Self {
        Self::new()
    }
}

impl Censor {
    /// A censor with the library defaults: ascii style, randomization on.
    pub fn new() -> Self {
        Self::with_defaults(GrawlixOptions::builtin_defaults())
    }

    /// A censor with caller-provided default options.
    pub fn with_defaults(defaults: GrawlixOptions) -> Self {
        Self {
            defaults,
            cached: RwLock::new(None),
        }
    }

    /// Censors `text` using the default options, reusing the cached
    /// snapshot when one has already been resolved.
    pub fn censor(&self, text: &str) -> Result<String, GrawlixError> {
        let settings = self.default_settings()?;
        engine::censor(text, &settings)
    }

    /// Censors `text` with per-call options shallow-merged over the
    /// defaults. Always resolves a fresh snapshot.
    pub fn censor_with(&self, text: &str, options: &GrawlixOptions) -> Result<String, GrawlixError> {
        let merged = options.merged_over(&self.defaults);
        let settings = parse_options(&merged)?;
        engine::censor(text, &settings)
    }

    /// Whether `text` contains any obscenity the default filters know
    /// about. Reuses the cached snapshot.
    pub fn is_obscene(&self, text: &str) -> Result<bool, GrawlixError> {
        let settings = self.default_settings()?;
        Ok(engine::is_match(text, &settings))
    }

    /// Narrow probe: additional filter descriptors and a whitelist, with
    /// style resolution and plugin loading skipped entirely.
    pub fn is_obscene_with(
        &self,
        text: &str,
        filters: &[FilterDescriptor],
        allowed: &[String],
    ) -> Result<bool, GrawlixError> {
        let filters = settings::probe_filters(filters, allowed)?;
        Ok(filters.iter().any(|filter| filter.is_match(text)))
    }

    /// The current default options.
    pub fn get_defaults(&self) -> &GrawlixOptions {
        &self.defaults
    }

    /// Shallow-merges `options` into the defaults and invalidates the
    /// cached snapshot.
    pub fn set_defaults(&mut self, options: GrawlixOptions) -> &mut Self {
        self.defaults = options.merged_over(&self.defaults);
        self.invalidate();
        self
    }

    /// Appends a plugin to the default plugin list. Resolution is lazy: it
    /// happens on the next snapshot build, so a broken plugin surfaces as
    /// an error from the next `censor`/`is_obscene` call.
    pub fn load_plugin(&mut self, reference: impl Into<PluginReference>) -> &mut Self {
        self.load_plugin_with(reference, Value::Null)
    }

    /// As [`Censor::load_plugin`], with plugin-specific options.
    pub fn load_plugin_with(
        &mut self,
        reference: impl Into<PluginReference>,
        options: Value,
    ) -> &mut Self {
        self.defaults
            .plugins
            .push(PluginEntry::with_options(reference.into(), options));
        self.invalidate();
        self
    }

    /// Whether the given plugin is already in the default plugin list.
    pub fn has_plugin(&self, reference: &PluginReference) -> bool {
        self.defaults.has_plugin(reference)
    }

    /// Whether a plugin descriptor with this name is already in the
    /// default plugin list.
    pub fn has_plugin_named(&self, name: &str) -> bool {
        self.defaults.has_plugin_named(name)
    }

    fn invalidate(&self) {
        *self.cached.write().unwrap() = None;
    }

    fn default_settings(&self) -> Result<Arc<GrawlixSettings>, GrawlixError> {
        // Read-lock fast path first; the write lock is only taken to fill.
        {
            let cache = self.cached.read().unwrap();
            if let Some(settings) = cache.as_ref() {
                debug!("serving default settings from cache");
                return Ok(Arc::clone(settings));
            }
        }

        debug!("default settings not cached; resolving now");
        let settings = Arc::new(parse_options(&self.defaults)?);
        *self.cached.write().unwrap() = Some(Arc::clone(&settings));
        Ok(settings)
    }
}

/// One-shot censoring without a host object or cache.
pub fn censor_string(text: &str, options: &GrawlixOptions) -> Result<String, GrawlixError> {
    let settings = parse_options(options)?;
    engine::censor(text, &settings)
}

/// One-shot probe. Skips style resolution and plugin loading when the
/// options request neither.
pub fn is_obscene_string(text: &str, options: &GrawlixOptions) -> Result<bool, GrawlixError> {
    if options.styles.is_empty() && options.plugins.is_empty() {
        let filters = settings::probe_filters(&options.filters, &options.allowed)?;
        return Ok(filters.iter().any(|filter| filter.is_match(text)));
    }
    let settings = parse_options(options)?;
    Ok(engine::is_match(text, &settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleChoice;
    use crate::plugin::GrawlixPlugin;

    #[test]
    fn censor_uses_library_defaults() {
        let censor = Censor::new();
        let out = censor.censor("fuck").unwrap();
        assert_eq!(out.chars().count(), 4);
        assert!(out.chars().all(|c| "@!#$%^&*".contains(c)));
    }

    #[test]
    fn set_defaults_merges_and_invalidates_the_cache() {
        let mut censor = Censor::new();
        // Resolve once so the cache is warm.
        assert!(censor.is_obscene("shit").unwrap());

        censor.set_defaults(GrawlixOptions {
            style: Some(StyleChoice::from("redacted")),
            randomize: Some(false),
            ..GrawlixOptions::default()
        });
        assert_eq!(censor.censor("fuck").unwrap(), "████");
        // Unset fields kept their previous values.
        assert_eq!(censor.get_defaults().randomize, Some(false));
    }

    #[test]
    fn censor_with_does_not_disturb_the_defaults() {
        let censor = Censor::new();
        let options = GrawlixOptions {
            style: Some(StyleChoice::from("asterix")),
            randomize: Some(false),
            ..GrawlixOptions::default()
        };
        assert_eq!(censor.censor_with("fuck", &options).unwrap(), "****");

        let out = censor.censor("fuck").unwrap();
        assert!(out.chars().all(|c| "@!#$%^&*".contains(c)));
    }

    #[test]
    fn load_plugin_is_chainable_and_lazy() {
        let mut censor = Censor::new();
        let plugin = GrawlixPlugin::new("extras")
            .with_filters(vec![FilterDescriptor::new("zounds", r"\bzounds\b")]);
        let reference = PluginReference::from(plugin);

        censor
            .load_plugin(reference.clone())
            .set_defaults(GrawlixOptions {
                randomize: Some(false),
                ..GrawlixOptions::default()
            });
        assert!(censor.has_plugin(&reference));
        assert!(censor.has_plugin_named("extras"));
        assert!(!censor.has_plugin_named("missing"));

        assert!(censor.is_obscene("zounds").unwrap());
    }

    #[test]
    fn broken_plugins_fail_on_next_resolution() {
        let mut censor = Censor::new();
        censor.load_plugin(GrawlixPlugin::default());
        let err = censor.censor("anything").unwrap_err();
        assert!(matches!(err, GrawlixError::Plugin { .. }));
    }

    #[test]
    fn narrow_probe_honors_extra_filters_and_whitelist() {
        let censor = Censor::new();
        assert!(censor
            .is_obscene_with("frak", &[FilterDescriptor::new("frak", r"\bfrak\b")], &[])
            .unwrap());
        assert!(!censor
            .is_obscene_with("fuck", &[], &["fuck".to_string()])
            .unwrap());
    }

    #[test]
    fn one_shot_helpers_work_without_a_host() {
        let options = GrawlixOptions {
            randomize: Some(false),
            ..GrawlixOptions::builtin_defaults()
        };
        assert_eq!(censor_string("fuck", &options).unwrap(), "%!&#");
        assert!(is_obscene_string("fuck", &options).unwrap());

        // The probe shortcut does not require a style at all.
        let bare = GrawlixOptions::default();
        assert!(is_obscene_string("fuck", &bare).unwrap());
        assert!(!is_obscene_string("fine text", &bare).unwrap());
    }
}
