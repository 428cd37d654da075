//! filter.rs - Obscenity filters and their descriptors.
//!
//! A [`GrawlixFilter`] pairs a target word with a compiled, case-insensitive
//! matching pattern and the policy knobs that shape its replacement: run
//! priority, an optional output template for preserved capture groups, an
//! expandable flag for elongated spellings, and an optional per-filter style
//! override.
//!
//! Patterns deliberately over-match: tolerating leet substitutions and
//! injected separators means sweeping in characters that are not themselves
//! obscene. Those land in capture groups, are subtracted from the effective
//! match length, and are spliced back into the output by the filter's
//! template.
//!
//! License: MIT OR APACHE 2.0

use log::warn;
use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::errors::GrawlixError;
use crate::template::ReplacementTemplate;

/// A user- or plugin-supplied description of a filter.
///
/// With both `word` and `pattern` set, the descriptor defines a brand-new
/// filter (or a full replacement of a default one). With `word` alone it
/// reconfigures the existing filter of that word in place. Absent fields are
/// never touched by reconfiguration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterDescriptor {
    /// Canonical word the filter targets; the dictionary key for
    /// whitelisting, overrides, and fixed-replacement lookup.
    pub word: Option<String>,
    /// Regex source for the matching pattern (compiled case-insensitively).
    pub pattern: Option<String>,
    /// Direct priority assignment. Lower runs first.
    pub priority: Option<i32>,
    /// Raise-only priority floor: applied only when the filter's current
    /// priority is below it.
    pub min_priority: Option<i32>,
    /// Textual template spec (see [`crate::template`]).
    pub template: Option<String>,
    /// Whether the pattern detects elongated spellings (`fuuuuuck`) whose
    /// replacement should span the whole match.
    pub expandable: Option<bool>,
    /// Name of a style to prefer over the active style, honored only when
    /// the active style allows overrides.
    pub style: Option<String>,
}

impl FilterDescriptor {
    /// Descriptor for a brand-new filter (word plus pattern).
    pub fn new(word: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            word: Some(word.into()),
            pattern: Some(pattern.into()),
            ..Self::default()
        }
    }

    /// Descriptor that reconfigures the existing filter for `word`.
    pub fn reconfigure(word: impl Into<String>) -> Self {
        Self {
            word: Some(word.into()),
            ..Self::default()
        }
    }
}

/// One configured obscenity filter.
#[derive(Debug, Clone)]
pub struct GrawlixFilter {
    word: String,
    regex: Regex,
    priority: i32,
    template: Option<ReplacementTemplate>,
    is_expandable: bool,
    style: Option<String>,
}

impl GrawlixFilter {
    /// Builds a filter from a word and an already-compiled pattern.
    pub fn new(word: impl Into<String>, regex: Regex) -> Self {
        Self {
            word: word.into(),
            regex,
            priority: 0,
            template: None,
            is_expandable: false,
            style: None,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn template(&self) -> Option<&ReplacementTemplate> {
        self.template.as_ref()
    }

    pub fn is_expandable(&self) -> bool {
        self.is_expandable
    }

    /// Name of the style this filter prefers, if any.
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }

    pub fn has_style(&self) -> bool {
        self.style.is_some()
    }

    /// A filter is valid when it has a word and a genuine (non-empty)
    /// matching pattern.
    pub fn is_valid(&self) -> bool {
        !self.word.is_empty() && !self.regex.as_str().is_empty()
    }

    /// Whether the pattern occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The first match in `text`, with its capture groups.
    pub fn first_match<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(text)
    }

    /// Length in characters of the first match, net of all captured groups —
    /// the length of the core obscenity, with incidental surrounding text
    /// subtracted out. Returns 0 when there is no match.
    pub fn match_len(&self, text: &str) -> usize {
        match self.first_match(text) {
            Some(caps) => net_match_len(&caps),
            None => 0,
        }
    }

    /// Selectively overwrites configuration from a descriptor. Fields the
    /// descriptor leaves unset are not touched; the word and pattern are
    /// never changed by reconfiguration.
    pub fn configure(&mut self, options: &FilterDescriptor) {
        if let Some(priority) = options.priority {
            self.priority = priority;
        } else if let Some(floor) = options.min_priority {
            // Raise-only: never lowers an already-higher priority.
            if self.priority < floor {
                self.priority = floor;
            }
        }
        if let Some(spec) = &options.template {
            let template = ReplacementTemplate::compile(spec);
            let available = self.regex.captures_len() - 1;
            if template.max_group() > available {
                warn!(
                    "template {:?} for filter '{}' references group {} but the pattern only defines {}",
                    spec,
                    self.word,
                    template.max_group(),
                    available
                );
            }
            self.template = Some(template);
        }
        if let Some(expandable) = options.expandable {
            self.is_expandable = expandable;
        }
        if let Some(style) = &options.style {
            self.style = Some(style.clone());
        }
    }
}

/// Character length of a match net of its capture groups.
pub(crate) fn net_match_len(caps: &Captures<'_>) -> usize {
    let Some(full) = caps.get(0) else {
        return 0;
    };
    let mut len = full.as_str().chars().count();
    for i in 1..caps.len() {
        if let Some(group) = caps.get(i) {
            len = len.saturating_sub(group.as_str().chars().count());
        }
    }
    len
}

/// Validating factory: builds a [`GrawlixFilter`] from a descriptor.
///
/// Fails with a filter-validation error when the descriptor lacks a word or
/// a pattern, when the pattern does not compile, or when the template
/// references capture groups the pattern does not define.
pub fn to_filter(descriptor: &FilterDescriptor) -> Result<GrawlixFilter, GrawlixError> {
    let word = match descriptor.word.as_deref() {
        Some(word) if !word.is_empty() => word,
        _ => {
            return Err(GrawlixError::InvalidFilter {
                reason: "word parameter is required".to_string(),
                descriptor: descriptor.clone(),
            })
        }
    };
    let pattern = match descriptor.pattern.as_deref() {
        Some(pattern) if !pattern.is_empty() => pattern,
        _ => {
            return Err(GrawlixError::InvalidFilter {
                reason: "pattern parameter is required".to_string(),
                descriptor: descriptor.clone(),
            })
        }
    };

    let regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| GrawlixError::PatternCompile {
            word: word.to_string(),
            source,
        })?;

    if let Some(spec) = &descriptor.template {
        let referenced = ReplacementTemplate::compile(spec).max_group();
        let available = regex.captures_len() - 1;
        if referenced > available {
            return Err(GrawlixError::InvalidFilter {
                reason: format!(
                    "template references capture group {referenced} but the pattern only defines {available}"
                ),
                descriptor: descriptor.clone(),
            });
        }
    }

    let mut filter = GrawlixFilter::new(word, regex);
    filter.configure(descriptor);
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TEMPLATE_PRE;

    fn filter(word: &str, pattern: &str) -> GrawlixFilter {
        to_filter(&FilterDescriptor::new(word, pattern)).unwrap()
    }

    #[test]
    fn matches_case_insensitively() {
        let f = filter("badword", r"\bbadword\b");
        assert!(f.is_match("such a BADWORD here"));
        assert!(!f.is_match("badwordy"));
    }

    #[test]
    fn match_len_subtracts_capture_groups() {
        let mut desc = FilterDescriptor::new("dumbass", r"\b(dumb)ass+");
        desc.template = Some(TEMPLATE_PRE.to_string());
        desc.expandable = Some(true);
        let f = to_filter(&desc).unwrap();
        // "dumbasss" matches 8 chars, 4 of which belong to the captured prefix.
        assert_eq!(f.match_len("what a dumbasss"), 4);
        assert_eq!(f.match_len("nothing here"), 0);
    }

    #[test]
    fn configure_sets_priority_directly() {
        let mut f = filter("w", "w");
        f.configure(&FilterDescriptor {
            priority: Some(7),
            ..FilterDescriptor::default()
        });
        assert_eq!(f.priority(), 7);
    }

    #[test]
    fn configure_min_priority_only_raises() {
        let mut f = filter("w", "w");
        f.configure(&FilterDescriptor {
            min_priority: Some(3),
            ..FilterDescriptor::default()
        });
        assert_eq!(f.priority(), 3);

        f.configure(&FilterDescriptor {
            min_priority: Some(1),
            ..FilterDescriptor::default()
        });
        assert_eq!(f.priority(), 3, "minPriority must never lower");
    }

    #[test]
    fn configure_leaves_unset_fields_alone() {
        let mut f = filter("w", "w");
        f.configure(&FilterDescriptor {
            expandable: Some(true),
            style: Some("dingbats".to_string()),
            ..FilterDescriptor::default()
        });
        f.configure(&FilterDescriptor::default());
        assert!(f.is_expandable());
        assert_eq!(f.style(), Some("dingbats"));
    }

    #[test]
    fn factory_requires_word_and_pattern() {
        let err = to_filter(&FilterDescriptor {
            pattern: Some("x".to_string()),
            ..FilterDescriptor::default()
        })
        .unwrap_err();
        assert!(matches!(err, GrawlixError::InvalidFilter { .. }));

        let err = to_filter(&FilterDescriptor {
            word: Some("x".to_string()),
            ..FilterDescriptor::default()
        })
        .unwrap_err();
        assert!(matches!(err, GrawlixError::InvalidFilter { .. }));
    }

    #[test]
    fn factory_rejects_bad_patterns() {
        let err = to_filter(&FilterDescriptor::new("w", "(unclosed")).unwrap_err();
        assert!(matches!(err, GrawlixError::PatternCompile { .. }));
    }

    #[test]
    fn factory_rejects_out_of_range_template_groups() {
        let mut desc = FilterDescriptor::new("w", "word");
        desc.template = Some("$1{}".to_string());
        let err = to_filter(&desc).unwrap_err();
        assert!(matches!(err, GrawlixError::InvalidFilter { .. }));
    }

    #[test]
    fn clone_is_independent() {
        let mut original = filter("w", "w+");
        let clone = original.clone();
        original.configure(&FilterDescriptor {
            priority: Some(9),
            ..FilterDescriptor::default()
        });
        assert_eq!(clone.priority(), 0);
        assert_eq!(original.priority(), 9);
    }
}
