//! catalog.rs - The built-in filter and style catalogs.
//!
//! This module is data, not engine logic: the default dictionary of
//! obscenity filters and the default replacement styles. Catalogs are built
//! once into `Lazy` statics; the settings resolver clones entries out of
//! them so per-call configuration can never leak back in.
//!
//! Catalog order is correctness-bearing: equal-priority filters are applied
//! in catalog order (the resolver's sort is stable), which is how specific
//! patterns (`dumbass`) win over general ones (`ass`). Reordering entries
//! here is a behavioral change, not a cosmetic one, and is pinned by a test.
//!
//! Pattern notes: everything is matched case-insensitively. Patterns
//! tolerate leet substitutions (`[i1]`, `[s$]`, `[o0]`), separator runs
//! injected between letters, and elongation (`f+u+c+k+`). Where a pattern
//! must reject an innocent longer word (`shitake`, `bastardize`, `dickens`,
//! `pissant`), it consumes the disambiguating suffix in a capture group and
//! a POST template splices it back into the output untouched.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::filter::{FilterDescriptor, GrawlixFilter};
use crate::style::GrawlixStyle;
use crate::template::{TEMPLATE_POST, TEMPLATE_PRE};

/// Names of the built-in styles.
pub mod style_name {
    pub const ASCII: &str = "ascii";
    pub const ASTERIX: &str = "asterix";
    pub const DINGBATS: &str = "dingbats";
    pub const NEXTWAVE: &str = "nextwave";
    pub const REDACTED: &str = "redacted";
    pub const UNICODE: &str = "unicode";
    pub const UNDERSCORE: &str = "underscore";
}

/// Separator run tolerated between the letters of a spelled-out obscenity
/// (`f u c k`, `f.u.c.k`, `f_-_u_-_c_-_k`, ...).
const SEP: &str = r#"[\s\d_^+=*.,:"'>|/\\-]{0,42}"#;

/// As [`SEP`], but without digits (for words where a digit is a letter
/// substitute rather than a separator).
const SEP_ND: &str = r#"[\s_^+=*.,:"'>|/\\-]{0,42}"#;

/// As [`SEP`], but without `1` (which reads as `i` in `shit`).
const SEP_NO1: &str = r#"[\s023456789_^+=*.,:"'>|/\\-]{0,42}"#;

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("built-in catalog pattern must compile")
}

fn entry(word: &str, pattern: &str, options: FilterDescriptor) -> GrawlixFilter {
    let mut filter = GrawlixFilter::new(word, compile(pattern));
    filter.configure(&options);
    filter
}

fn expandable() -> FilterDescriptor {
    FilterDescriptor {
        expandable: Some(true),
        ..FilterDescriptor::default()
    }
}

fn expandable_at(priority: i32) -> FilterDescriptor {
    FilterDescriptor {
        priority: Some(priority),
        expandable: Some(true),
        ..FilterDescriptor::default()
    }
}

static DEFAULT_FILTERS: Lazy<Vec<GrawlixFilter>> = Lazy::new(build_default_filters);
static DEFAULT_STYLES: Lazy<Vec<GrawlixStyle>> = Lazy::new(build_default_styles);

/// The built-in filter catalog, in its pinned order.
pub fn default_filters() -> &'static [GrawlixFilter] {
    &DEFAULT_FILTERS
}

/// The built-in style catalog.
pub fn default_styles() -> &'static [GrawlixStyle] {
    &DEFAULT_STYLES
}

fn build_default_filters() -> Vec<GrawlixFilter> {
    vec![
        // 'fuck'-related filters. The '-er' suffix of 'motherfucker' is
        // incidental captured content: it survives censoring.
        entry(
            "motherfucker",
            r"m[o0u]th(?:er|a)f+u+c+k+([e3]+r+)",
            FilterDescriptor {
                template: Some(TEMPLATE_POST.to_string()),
                expandable: Some(true),
                ..FilterDescriptor::default()
            },
        ),
        entry("motherfuck", r"m[o0u]th(?:er|a)f+u+c+k+", expandable_at(1)),
        entry("fuck", &format!("f+{SEP}u+{SEP}c+{SEP}k+"), expandable_at(2)),
        // 'shit' filter; must not fire on 'shitake'.
        entry(
            "shit",
            &format!(r"[s$]+{SEP}h+{SEP}[i1]+{SEP_NO1}t+($|[^a]|a$|a[^k]|ak$|ak[^e])"),
            FilterDescriptor {
                template: Some(TEMPLATE_POST.to_string()),
                expandable: Some(true),
                ..FilterDescriptor::default()
            },
        ),
        // 'cocksucker'-related filters.
        entry(
            "cocksucker",
            r"c+[o0]+c+k+s+u+c+k+([e3]+r+)",
            FilterDescriptor {
                template: Some(TEMPLATE_POST.to_string()),
                expandable: Some(true),
                ..FilterDescriptor::default()
            },
        ),
        entry("cocksuck", r"c+[o0]+c+k+s+u+c+k+", expandable_at(1)),
        // 'ass'-related filters, most specific first.
        entry("assholes", r"[a@][s$][s$]h[o0]l[e3][s$]", FilterDescriptor::default()),
        entry("asshole", r"[a@][s$][s$]h[o0]+l[e3]", expandable_at(1)),
        entry(
            "asses",
            r"(\b|^|[^glmp])[a@][s$][s$][e3][s$](?:\b|$)",
            FilterDescriptor {
                template: Some(TEMPLATE_PRE.to_string()),
                ..FilterDescriptor::default()
            },
        ),
        entry(
            "dumbass",
            r"\b(dumb)[a@][s$][s$]+",
            FilterDescriptor {
                priority: Some(1),
                template: Some(TEMPLATE_PRE.to_string()),
                expandable: Some(true),
                ..FilterDescriptor::default()
            },
        ),
        entry(
            "ass",
            &format!(r"(\b|^|\s|[^bcglmprstvu])[a@]{SEP}[s$]{SEP}[s$]+(?:\b|$)"),
            FilterDescriptor {
                priority: Some(2),
                template: Some(TEMPLATE_PRE.to_string()),
                expandable: Some(true),
                ..FilterDescriptor::default()
            },
        ),
        // 'tit'-related filters.
        entry("titties", r"\bt[i1]tt[i1]e[s$]", FilterDescriptor::default()),
        entry(
            "tittie",
            r"\bt[i1]tt[i1]e",
            FilterDescriptor {
                priority: Some(1),
                ..FilterDescriptor::default()
            },
        ),
        entry("titty", r"\bt[i1]tty", FilterDescriptor::default()),
        entry(
            "tits",
            &format!(r"\bt+{SEP_ND}[i1]+{SEP_ND}t+{SEP_ND}[s$]+"),
            expandable_at(1),
        ),
        entry(
            "tit",
            r"\bt+[i1]+t([^ahilmrtu])",
            FilterDescriptor {
                priority: Some(2),
                template: Some(TEMPLATE_POST.to_string()),
                expandable: Some(true),
                ..FilterDescriptor::default()
            },
        ),
        // 'piss' filter; must not fire on 'pissant'.
        entry(
            "piss",
            r"p[i1]+ss+($|[^a]|a$|a[^n]|an$|an[^t])",
            FilterDescriptor {
                template: Some(TEMPLATE_POST.to_string()),
                expandable: Some(true),
                ..FilterDescriptor::default()
            },
        ),
        // various insults
        entry(
            "dick",
            r"d[i1]+c+k+($|[^ei])",
            FilterDescriptor {
                template: Some(TEMPLATE_POST.to_string()),
                expandable: Some(true),
                ..FilterDescriptor::default()
            },
        ),
        entry(
            "cunt",
            &format!(r"(\b|[^s])c+{SEP_ND}u+{SEP_ND}n+{SEP_ND}t"),
            FilterDescriptor {
                template: Some(TEMPLATE_PRE.to_string()),
                expandable: Some(true),
                ..FilterDescriptor::default()
            },
        ),
        entry(
            "bastard",
            r"\bb[a@]+st[a@]+r+d($|[^i]|i$|i[^sz]|is$|iz$|is[^e]|iz[^e])",
            FilterDescriptor {
                template: Some(TEMPLATE_POST.to_string()),
                expandable: Some(true),
                ..FilterDescriptor::default()
            },
        ),
        entry(
            "bitch",
            &format!(r"b+{SEP_ND}[i1]+{SEP_ND}t{SEP_ND}c{SEP_ND}h"),
            expandable(),
        ),
    ]
}

fn build_default_styles() -> Vec<GrawlixStyle> {
    vec![
        // default style
        GrawlixStyle::new(style_name::ASCII, "@!#$%^&*").with_fixed([
            ("fuck", "%!&#"),
            ("motherfuck", "%*^##*%!&#"),
            ("motherfucker", "%*^##*%!&#$1"),
            ("shit", "$$#!%$1"),
            ("dick", "%!&#$1"),
            ("piss", "&!$$#$1"),
            ("cunt", "$1#^&%"),
            ("cocksuck", "#*#%$$!#%"),
            ("cocksucker", "#*#%$$!#%$1"),
            ("ass", "$1@$$$$"),
            ("asses", "$1@$$$$#$$"),
            ("asshole", "@$$$$#%!&"),
            ("assholes", "@$$$$#%!&$$"),
            ("dumbass", "$1@$$$$"),
            ("bastard", "%@$$%@*#$1"),
            ("bitch", "%!#*%"),
            ("tit", "%!%$1"),
            ("tits", "%!%$$"),
            ("titty", "%!%%^"),
            ("tittie", "%!%%!#"),
            ("titties", "%!%%!#$"),
        ]),
        // dingbats (unicode-only) style
        GrawlixStyle::new(style_name::DINGBATS, "★☒☎☠☢☣☹♡♢♤♧⚓⚔⚑⚡♯✓☝").with_fixed([
            ("fuck", "⚑☠♧⚔"),
            ("motherfuck", "★☹⚓♯⚡☢⚑☠♧⚔"),
            ("motherfucker", "★☹⚓♯⚡☢⚑☠♧⚔$1"),
            ("shit", "☠♯☝⚓$1"),
            ("dick", "♢☝♧⚔$1"),
            ("piss", "☣☝☠☠$1"),
            ("cunt", "$1♧♡⚔⚓"),
            ("cocksuck", "♧☹♧⚔☠♡♧⚔"),
            ("cocksucker", "♧☹♧⚔☠♡♧⚔$1"),
            ("ass", "$1☹☠☠"),
            ("asses", "$1☹☠☠♯☠"),
            ("asshole", "☹☠☠♯☢✓⚡"),
            ("assholes", "☹☠☠♯☢✓⚡☠"),
            ("dumbass", "$1☹☠☠"),
            ("bastard", "☣☹☠⚓@☢♢$1"),
            ("bitch", "☣☝⚓♧♯"),
            ("tit", "⚓☝⚓$1"),
            ("tits", "⚓☝⚓☠"),
            ("titty", "⚓☝⚓⚓⚔"),
            ("tittie", "⚓☝⚓⚓☝♯"),
            ("titties", "⚓☝⚓⚓☝♯☠"),
        ]),
        // unicode style
        GrawlixStyle::new(style_name::UNICODE, "!@#$%★☒☎☠☢☣☹♡♢♤♧⚓⚔⚑⚡").with_fixed([
            ("fuck", "⚑☠♧⚔"),
            ("motherfuck", "★☹⚓#⚡☢⚑☠♧⚔"),
            ("motherfucker", "★☹⚓#⚡☢⚑☠♧⚔$1"),
            ("shit", "$$#!⚓$1"),
            ("dick", "♢!♧⚔$1"),
            ("piss", "☣!$$$$$1"),
            ("cunt", "$1♧♡⚔⚓"),
            ("cocksuck", "♧☹♧⚔$$♡♧⚔"),
            ("cocksucker", "♧☹♧⚔$$♡♧⚔$1"),
            ("ass", "$1@$$$$"),
            ("asses", "$1@$$$$#$$"),
            ("asshole", "@$$$$#☢!⚡"),
            ("assholes", "@$$$$#☢!⚡$$"),
            ("dumbass", "$1@$$$$"),
            ("bastard", "☣@$$⚓@☢♢$1"),
            ("bitch", "☣!⚓♧#"),
            ("tit", "⚓!⚓$1"),
            ("tits", "⚓!⚓$$"),
            ("titty", "⚓!⚓⚓⚔"),
            ("tittie", "⚓!⚓⚓!#"),
            ("titties", "⚓!⚓⚓!#$$"),
        ]),
        // single-character styles
        GrawlixStyle::new(style_name::ASTERIX, "*"),
        GrawlixStyle::new(style_name::NEXTWAVE, "☠"),
        GrawlixStyle::new(style_name::REDACTED, "█"),
        GrawlixStyle::new(style_name::UNDERSCORE, "_"),
    ]
}
