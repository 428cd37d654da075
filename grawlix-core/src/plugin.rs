//! plugin.rs - Plugin descriptors and references.
//!
//! A plugin is a named bundle of filter and style descriptors plus an
//! optional initialization hook, used to extend the default catalogs at
//! configuration time. Plugins reach the settings resolver either as a
//! ready-made descriptor or as a factory function that produces one from
//! plugin-specific options; both shapes are normalized at this boundary
//! before any resolution logic runs.
//!
//! Resolving a plugin from a named module path is a host-runtime concern
//! and happens before the reference is handed to this crate.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::GrawlixOptions;
use crate::errors::GrawlixError;
use crate::filter::FilterDescriptor;
use crate::style::StyleDescriptor;

/// Initialization hook, invoked once at load time with the plugin-specific
/// options. The receiver is always the plugin descriptor itself, so hooks
/// may adjust the contributed filters and styles before they are merged.
pub type PluginInit = Arc<dyn Fn(&mut GrawlixPlugin, &Value) + Send + Sync>;

/// Factory form of a plugin: called with `(plugin_options, global_options)`
/// and expected to produce a valid descriptor.
pub type PluginFactory =
    Arc<dyn Fn(&Value, &GrawlixOptions) -> Result<GrawlixPlugin, GrawlixError> + Send + Sync>;

/// A plugin descriptor: additional filters and styles under one name.
#[derive(Clone, Default)]
pub struct GrawlixPlugin {
    /// Plugin name; required by load time. Used for the idempotent
    /// "already loaded" check and recorded in the settings snapshot.
    pub name: String,
    pub filters: Vec<FilterDescriptor>,
    pub styles: Vec<StyleDescriptor>,
    init: Option<PluginInit>,
}

impl GrawlixPlugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_filters(mut self, filters: Vec<FilterDescriptor>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_styles(mut self, styles: Vec<StyleDescriptor>) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_init(mut self, init: PluginInit) -> Self {
        self.init = Some(init);
        self
    }

    pub fn has_init(&self) -> bool {
        self.init.is_some()
    }

    /// Runs the init hook, if any, with this descriptor as the receiver.
    pub fn run_init(&mut self, options: &Value) {
        if let Some(init) = self.init.clone() {
            init(self, options);
        }
    }
}

impl fmt::Debug for GrawlixPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrawlixPlugin")
            .field("name", &self.name)
            .field("filters", &self.filters)
            .field("styles", &self.styles)
            .field("init", &self.init.is_some())
            .finish()
    }
}

/// The two shapes a plugin may arrive in.
#[derive(Clone)]
pub enum PluginReference {
    Plugin(GrawlixPlugin),
    Factory(PluginFactory),
}

impl PluginReference {
    /// The descriptor name, when it is knowable without running a factory.
    pub fn name(&self) -> Option<&str> {
        match self {
            PluginReference::Plugin(plugin) => Some(plugin.name.as_str()),
            PluginReference::Factory(_) => None,
        }
    }

    /// Whether two references denote the same plugin: the same factory
    /// function, or descriptors sharing a name.
    pub fn is_same(&self, other: &PluginReference) -> bool {
        match (self, other) {
            (PluginReference::Factory(a), PluginReference::Factory(b)) => Arc::ptr_eq(a, b),
            (PluginReference::Plugin(a), PluginReference::Plugin(b)) => {
                !a.name.is_empty() && a.name == b.name
            }
            _ => false,
        }
    }
}

impl fmt::Debug for PluginReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginReference::Plugin(plugin) => f.debug_tuple("Plugin").field(plugin).finish(),
            PluginReference::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl From<GrawlixPlugin> for PluginReference {
    fn from(plugin: GrawlixPlugin) -> Self {
        PluginReference::Plugin(plugin)
    }
}

impl From<PluginFactory> for PluginReference {
    fn from(factory: PluginFactory) -> Self {
        PluginReference::Factory(factory)
    }
}

/// A plugin reference paired with its plugin-specific options payload, as
/// recorded in [`GrawlixOptions::plugins`].
#[derive(Debug, Clone)]
pub struct PluginEntry {
    pub reference: PluginReference,
    pub options: Value,
}

impl PluginEntry {
    pub fn new(reference: impl Into<PluginReference>) -> Self {
        Self {
            reference: reference.into(),
            options: Value::Null,
        }
    }

    pub fn with_options(reference: impl Into<PluginReference>, options: Value) -> Self {
        Self {
            reference: reference.into(),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_empty_but_present() {
        let plugin = GrawlixPlugin::new("my-plugin");
        assert_eq!(plugin.name, "my-plugin");
        assert!(plugin.filters.is_empty());
        assert!(plugin.styles.is_empty());
        assert!(!plugin.has_init());
    }

    #[test]
    fn init_receives_the_plugin_itself() {
        let mut plugin = GrawlixPlugin::new("self-aware").with_init(Arc::new(|plugin, options| {
            assert_eq!(plugin.name, "self-aware");
            assert_eq!(options["x"], 1);
            plugin.filters.push(FilterDescriptor::new("word", "word"));
        }));
        plugin.run_init(&json!({ "x": 1 }));
        assert_eq!(plugin.filters.len(), 1);
    }

    #[test]
    fn reference_identity() {
        let a = PluginReference::from(GrawlixPlugin::new("p"));
        let b = PluginReference::from(GrawlixPlugin::new("p"));
        let c = PluginReference::from(GrawlixPlugin::new("q"));
        assert!(a.is_same(&b));
        assert!(!a.is_same(&c));

        let factory: PluginFactory = Arc::new(|_, _| Ok(GrawlixPlugin::new("f")));
        let f1 = PluginReference::Factory(Arc::clone(&factory));
        let f2 = PluginReference::Factory(factory);
        assert!(f1.is_same(&f2));

        let other: PluginFactory = Arc::new(|_, _| Ok(GrawlixPlugin::new("f")));
        assert!(!f1.is_same(&PluginReference::Factory(other)));
        assert!(!f1.is_same(&a));
    }

    #[test]
    fn anonymous_descriptors_never_compare_equal() {
        let a = PluginReference::from(GrawlixPlugin::default());
        let b = PluginReference::from(GrawlixPlugin::default());
        assert!(!a.is_same(&b));
    }
}
