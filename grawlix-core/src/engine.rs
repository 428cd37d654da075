//! engine.rs - The matching and replacement engine.
//!
//! Drives a resolved [`GrawlixSettings`] snapshot over an input string:
//! either a boolean probe, or full censoring. Censoring walks the filters
//! in priority order and, per filter, repeatedly replaces the next
//! occurrence until none remain — one occurrence at a time, because the
//! right token length depends on that specific occurrence's captured
//! context.
//!
//! A leet-tolerant pattern can match its own censored output (the default
//! `dumbass` filter matches the `dumb@$$` it produces). When a computed
//! replacement equals the matched span exactly, the engine skips past the
//! match instead of re-substituting, and the scan never re-enters text it
//! has already inserted; censoring therefore terminates on every catalog
//! and is idempotent on the default one.
//!
//! License: MIT OR APACHE 2.0

use regex::Captures;

use crate::errors::GrawlixError;
use crate::filter::{net_match_len, GrawlixFilter};
use crate::settings::GrawlixSettings;
use crate::style::GrawlixStyle;

/// Whether any active filter matches `text`. Short-circuits on the first
/// hit, in priority order.
pub fn is_match(text: &str, settings: &GrawlixSettings) -> bool {
    settings.filters.iter().any(|filter| filter.is_match(text))
}

/// Replaces every obscenity `settings` knows about in `text`.
pub fn censor(text: &str, settings: &GrawlixSettings) -> Result<String, GrawlixError> {
    let mut content = text.to_string();
    for filter in &settings.filters {
        content = apply_filter(content, filter, settings)?;
    }
    Ok(content)
}

/// Exhausts one filter against the evolving string.
fn apply_filter(
    mut content: String,
    filter: &GrawlixFilter,
    settings: &GrawlixSettings,
) -> Result<String, GrawlixError> {
    let mut search_from = 0usize;
    loop {
        if search_from > content.len() {
            break;
        }
        let Some(caps) = filter.regex().captures_at(&content, search_from) else {
            break;
        };
        let Some(full) = caps.get(0) else {
            break;
        };
        let (start, end) = (full.start(), full.end());
        let matched = full.as_str().to_string();
        let replacement = build_replacement(&caps, filter, settings)?;

        if replacement == matched {
            // Fixed point; skip it or we would loop here forever.
            search_from = if end > start {
                end
            } else {
                next_char_boundary(&content, start)
            };
            continue;
        }

        content.replace_range(start..end, &replacement);
        // Resume after the inserted text; replacements are not re-matched.
        search_from = start + replacement.len();
    }
    Ok(content)
}

/// Builds the replacement text for one occurrence.
fn build_replacement(
    caps: &Captures<'_>,
    filter: &GrawlixFilter,
    settings: &GrawlixSettings,
) -> Result<String, GrawlixError> {
    let style = effective_style(filter, settings);

    // Fixed replacements are complete: their own `$n` references splice the
    // preserved groups, so the filter template does not apply to them.
    if !settings.is_random {
        if let Some(fixed) = style.fixed_template(filter.word()) {
            return Ok(fixed.expand(caps));
        }
    }

    let len = if filter.is_expandable() {
        net_match_len(caps)
    } else {
        filter.word().chars().count()
    };
    let token = if style.can_randomize() {
        style.random_grawlix(len)?
    } else {
        style.fill_grawlix(len)?
    };

    Ok(match filter.template() {
        Some(template) => template.render(&token, caps),
        None => token,
    })
}

/// The style governing one filter's replacements: its declared override
/// when the active style permits overrides and the name resolves, otherwise
/// the active style.
fn effective_style<'s>(filter: &GrawlixFilter, settings: &'s GrawlixSettings) -> &'s GrawlixStyle {
    if settings.style.is_override_allowed() {
        if let Some(name) = filter.style() {
            if let Some(style) = settings.styles.iter().find(|s| s.name() == name) {
                return style;
            }
        }
    }
    &settings.style
}

fn next_char_boundary(content: &str, index: usize) -> usize {
    let mut next = index + 1;
    while next < content.len() && !content.is_char_boundary(next) {
        next += 1;
    }
    next
}
