//! template.rs - The replacement-template mini-language.
//!
//! A filter's pattern may sweep legitimate surrounding text into the match
//! via capture groups (a boundary character, a `dumb` prefix, a trailing
//! suffix consumed to disambiguate an innocent word). Templates describe how
//! to splice that preserved text back around the generated grawlix.
//!
//! Template specs are compiled once, at configuration time, into a parts
//! list; nothing is re-parsed per replacement. Syntax:
//!
//! * `$1`..`$9` - splice the text of the numbered capture group
//! * `$$`      - a literal `$`
//! * `{}`      - the generated grawlix token
//! * `{{`/`}}` - literal braces
//!
//! A `$` not followed by a digit or another `$` is literal. Fixed
//! replacement strings registered on styles use the same syntax (minus the
//! token marker, which they have no use for).
//!
//! License: MIT OR APACHE 2.0

use regex::Captures;

/// Standard template: preserved substring comes before the word.
pub const TEMPLATE_PRE: &str = "$1{}";

/// Standard template: preserved substring comes after the word.
pub const TEMPLATE_POST: &str = "{}$1";

/// Standard template: the word sits between two preserved substrings.
pub const TEMPLATE_BETWEEN: &str = "$1{}$2";

#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplatePart {
    Literal(String),
    Group(usize),
    Token,
}

/// A compiled replacement template.
///
/// Immutable once compiled; filters that are cloned into per-call settings
/// share the compiled form by value without re-parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementTemplate {
    parts: Vec<TemplatePart>,
    source: String,
}

impl ReplacementTemplate {
    /// Compiles a textual template spec. Compilation never fails: unknown
    /// sigil sequences degrade to literal text.
    pub fn compile(spec: &str) -> Self {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = spec.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '$' => match chars.peek().copied() {
                    Some('$') => {
                        chars.next();
                        literal.push('$');
                    }
                    Some(d @ '1'..='9') => {
                        let group = (d as u8 - b'0') as usize;
                        chars.next();
                        flush(&mut parts, &mut literal);
                        parts.push(TemplatePart::Group(group));
                    }
                    _ => literal.push('$'),
                },
                '{' => match chars.peek().copied() {
                    Some('{') => {
                        chars.next();
                        literal.push('{');
                    }
                    Some('}') => {
                        chars.next();
                        flush(&mut parts, &mut literal);
                        parts.push(TemplatePart::Token);
                    }
                    _ => literal.push('{'),
                },
                '}' => {
                    if chars.peek().copied() == Some('}') {
                        chars.next();
                    }
                    literal.push('}');
                }
                _ => literal.push(c),
            }
        }
        flush(&mut parts, &mut literal);

        Self {
            parts,
            source: spec.to_string(),
        }
    }

    /// The original textual spec this template was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Highest capture group number the template references, or 0 when it
    /// references none. Used to validate a template against its pattern.
    pub fn max_group(&self) -> usize {
        self.parts
            .iter()
            .filter_map(|p| match p {
                TemplatePart::Group(g) => Some(*g),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// True when the template contains the `{}` token marker.
    pub fn has_token(&self) -> bool {
        self.parts.iter().any(|p| matches!(p, TemplatePart::Token))
    }

    /// Renders the template against a concrete match. Capture groups that
    /// did not participate in the match render as empty.
    pub fn render(&self, token: &str, caps: &Captures<'_>) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => out.push_str(text),
                TemplatePart::Group(g) => {
                    if let Some(m) = caps.get(*g) {
                        out.push_str(m.as_str());
                    }
                }
                TemplatePart::Token => out.push_str(token),
            }
        }
        out
    }

    /// Renders a template that carries no token marker (a fixed replacement
    /// string). Equivalent to `render` with an empty token.
    pub fn expand(&self, caps: &Captures<'_>) -> String {
        self.render("", caps)
    }
}

fn flush(parts: &mut Vec<TemplatePart>, literal: &mut String) {
    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(std::mem::take(literal)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn caps_for<'t>(pattern: &str, text: &'t str) -> Captures<'t> {
        Regex::new(pattern).unwrap().captures(text).unwrap()
    }

    #[test]
    fn compiles_standard_templates() {
        let pre = ReplacementTemplate::compile(TEMPLATE_PRE);
        let caps = caps_for(r"(\w+)ass", "dumbass");
        assert_eq!(pre.render("@$$", &caps), "dumb@$$");

        let post = ReplacementTemplate::compile(TEMPLATE_POST);
        let caps = caps_for(r"tit(\w)", "tits");
        assert_eq!(post.render("%!%", &caps), "%!%s");

        let between = ReplacementTemplate::compile(TEMPLATE_BETWEEN);
        let caps = caps_for(r"(x)mid(y)", "xmidy");
        assert_eq!(between.render("#", &caps), "x#y");
    }

    #[test]
    fn dollar_escapes_and_literals() {
        let t = ReplacementTemplate::compile("$$#!%$1");
        let caps = caps_for(r"shit(\w)", "shits");
        assert_eq!(t.expand(&caps), "$#!%s");

        // A `$` not followed by a digit or `$` stays literal.
        let t = ReplacementTemplate::compile("%!%%!#$");
        assert_eq!(t.expand(&caps), "%!%%!#$");
    }

    #[test]
    fn brace_escapes() {
        let t = ReplacementTemplate::compile("{{}}{}");
        let caps = caps_for("(a)", "a");
        assert_eq!(t.render("X", &caps), "{}X");
    }

    #[test]
    fn missing_group_renders_empty() {
        let t = ReplacementTemplate::compile("$2{}");
        let caps = caps_for(r"(\b|(z))a", "a");
        assert_eq!(t.render("*", &caps), "*");
    }

    #[test]
    fn max_group_and_token_introspection() {
        let t = ReplacementTemplate::compile("$1{}$2");
        assert_eq!(t.max_group(), 2);
        assert!(t.has_token());

        let fixed = ReplacementTemplate::compile("%!&#");
        assert_eq!(fixed.max_group(), 0);
        assert!(!fixed.has_token());
    }
}
