//! style.rs - Replacement styles and their descriptors.
//!
//! A [`GrawlixStyle`] is an output theme: the palette random grawlixes are
//! drawn from (or a generator function standing in for one), a map of fixed
//! per-word replacement strings used when randomization is off, and a flag
//! controlling whether per-filter style overrides may supersede it.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::GrawlixError;
use crate::generate;
use crate::template::ReplacementTemplate;

/// A caller-supplied generator standing in for a character palette. The
/// function is trusted to honor the requested length.
pub type CharGenerator = Arc<dyn Fn(usize) -> String + Send + Sync>;

/// The source a style draws replacement characters from.
#[derive(Clone)]
pub enum Palette {
    /// A string of candidate characters. More than one character enables
    /// randomization; exactly one means fill mode only.
    Chars(String),
    /// A generator function; always considered randomizable.
    Generator(CharGenerator),
}

impl Palette {
    fn is_empty(&self) -> bool {
        match self {
            Palette::Chars(chars) => chars.is_empty(),
            Palette::Generator(_) => false,
        }
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Palette::Chars(chars) => f.debug_tuple("Chars").field(chars).finish(),
            Palette::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

/// A fixed replacement registered for a word: the raw string as supplied
/// (template syntax, see [`crate::template`]) plus its compiled form.
#[derive(Debug, Clone)]
pub struct FixedReplacement {
    raw: String,
    template: ReplacementTemplate,
}

/// The `random_chars` field of a style descriptor: either a whole new
/// character set, or an edit of the existing one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RandomCharsOption {
    /// Replace the palette outright.
    Set(String),
    /// Edit the palette in place.
    Edit {
        /// Characters to add (deduplicated against the existing set).
        #[serde(default)]
        add: Option<String>,
        /// Characters to remove.
        #[serde(default)]
        remove: Option<String>,
        /// Character-for-character substitutions; entries whose key is not
        /// in the palette are ignored.
        #[serde(default)]
        replace: Option<HashMap<char, char>>,
    },
}

/// A user- or plugin-supplied description of a style: a brand-new style
/// when the name is unknown, or a reconfiguration of the existing style of
/// that name. Absent fields are never touched.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleDescriptor {
    pub name: Option<String>,
    /// Single fill character shorthand; replaces the whole palette.
    #[serde(rename = "char")]
    pub fill_char: Option<char>,
    pub random_chars: Option<RandomCharsOption>,
    /// Fixed replacements to merge. A `None` value deletes the entry.
    pub fixed: Option<HashMap<String, Option<String>>>,
    pub allow_override: Option<bool>,
    /// Programmatic palette generator; not expressible in config files.
    #[serde(skip)]
    pub generator: Option<CharGenerator>,
}

impl fmt::Debug for StyleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleDescriptor")
            .field("name", &self.name)
            .field("char", &self.fill_char)
            .field("random_chars", &self.random_chars)
            .field("fixed", &self.fixed)
            .field("allow_override", &self.allow_override)
            .field("generator", &self.generator.is_some())
            .finish()
    }
}

impl StyleDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_chars(mut self, chars: impl Into<String>) -> Self {
        self.random_chars = Some(RandomCharsOption::Set(chars.into()));
        self
    }

    pub fn with_fill(mut self, fill: char) -> Self {
        self.fill_char = Some(fill);
        self
    }

    pub fn with_generator(mut self, generator: CharGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_fixed(mut self, word: impl Into<String>, replacement: Option<&str>) -> Self {
        self.fixed
            .get_or_insert_with(HashMap::new)
            .insert(word.into(), replacement.map(str::to_string));
        self
    }

    pub fn with_allow_override(mut self, allow: bool) -> Self {
        self.allow_override = Some(allow);
        self
    }
}

/// One configured replacement style.
#[derive(Debug, Clone)]
pub struct GrawlixStyle {
    name: String,
    palette: Palette,
    fixed: HashMap<String, FixedReplacement>,
    is_override_allowed: bool,
}

impl GrawlixStyle {
    /// Builds a style over a character palette.
    pub fn new(name: impl Into<String>, chars: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            palette: Palette::Chars(chars.into()),
            fixed: HashMap::new(),
            is_override_allowed: true,
        }
    }

    /// Builds a style over a generator function.
    pub fn with_generator(name: impl Into<String>, generator: CharGenerator) -> Self {
        Self {
            name: name.into(),
            palette: Palette::Generator(generator),
            fixed: HashMap::new(),
            is_override_allowed: true,
        }
    }

    /// Registers fixed replacements; used by the built-in catalog.
    pub fn with_fixed<'a>(mut self, entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (word, raw) in entries {
            self.set_fixed(word, raw);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The palette characters, when the palette is a character set.
    pub fn chars(&self) -> Option<&str> {
        match &self.palette {
            Palette::Chars(chars) => Some(chars),
            Palette::Generator(_) => None,
        }
    }

    pub fn is_override_allowed(&self) -> bool {
        self.is_override_allowed
    }

    /// A style is valid when it has a name and either a usable palette or
    /// at least one fixed replacement.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && (!self.palette.is_empty() || !self.fixed.is_empty())
    }

    /// Whether the style can produce randomized grawlixes: a generator, or
    /// a palette of more than one character. A single-character palette
    /// signals fill mode only.
    pub fn can_randomize(&self) -> bool {
        match &self.palette {
            Palette::Chars(chars) => chars.chars().count() > 1,
            Palette::Generator(_) => true,
        }
    }

    /// Generates a random grawlix of `len` characters.
    ///
    /// Generator palettes are delegated to directly. Character palettes are
    /// sampled under the adjacency and terminal-`!` constraints (see
    /// [`crate::generate`]). Calling this on a style that cannot randomize
    /// is a programming error and is reported as such.
    pub fn random_grawlix(&self, len: usize) -> Result<String, GrawlixError> {
        match &self.palette {
            Palette::Generator(generator) => Ok(generator(len)),
            Palette::Chars(chars) => {
                if !self.can_randomize() {
                    return Err(GrawlixError::RandomizeUnsupported {
                        name: self.name.clone(),
                    });
                }
                generate::random_grawlix(chars, len)
            }
        }
    }

    /// Generates a fill grawlix: the first palette character repeated `len`
    /// times. Valid regardless of `can_randomize`.
    pub fn fill_grawlix(&self, len: usize) -> Result<String, GrawlixError> {
        match &self.palette {
            Palette::Chars(chars) => match chars.chars().next() {
                Some(first) => Ok(generate::fill_grawlix(first, len)),
                None => Err(GrawlixError::FillUnavailable {
                    name: self.name.clone(),
                }),
            },
            Palette::Generator(_) => Err(GrawlixError::FillUnavailable {
                name: self.name.clone(),
            }),
        }
    }

    /// Whether a non-empty fixed replacement is registered for `word`.
    pub fn has_fixed(&self, word: &str) -> bool {
        self.fixed.get(word).is_some_and(|f| !f.raw.is_empty())
    }

    /// The raw fixed replacement string for `word`, if one is registered.
    pub fn get_fixed(&self, word: &str) -> Option<&str> {
        self.fixed
            .get(word)
            .filter(|f| !f.raw.is_empty())
            .map(|f| f.raw.as_str())
    }

    /// The compiled form of the fixed replacement for `word`.
    pub(crate) fn fixed_template(&self, word: &str) -> Option<&ReplacementTemplate> {
        self.fixed
            .get(word)
            .filter(|f| !f.raw.is_empty())
            .map(|f| &f.template)
    }

    /// Registers (or overwrites) a fixed replacement for `word`.
    pub fn set_fixed(&mut self, word: impl Into<String>, raw: impl Into<String>) {
        let raw = raw.into();
        let template = ReplacementTemplate::compile(&raw);
        self.fixed
            .insert(word.into(), FixedReplacement { raw, template });
    }

    /// Adds characters to the palette, skipping ones already present.
    /// Returns how many were added. No-op on generator palettes.
    pub fn add_chars(&mut self, additions: &str) -> usize {
        let Palette::Chars(chars) = &mut self.palette else {
            return 0;
        };
        let mut added = 0;
        for c in additions.chars() {
            if !chars.contains(c) {
                chars.push(c);
                added += 1;
            }
        }
        added
    }

    /// Removes characters from the palette, returning how many were removed.
    pub fn remove_chars(&mut self, removals: &str) -> usize {
        let Palette::Chars(chars) = &mut self.palette else {
            return 0;
        };
        let before = chars.chars().count();
        let kept: String = chars.chars().filter(|c| !removals.contains(*c)).collect();
        let removed = before - kept.chars().count();
        *chars = kept;
        removed
    }

    /// Substitutes palette characters in place. Entries whose key is not in
    /// the palette are ignored. Returns how many characters were replaced.
    pub fn replace_chars(&mut self, replacements: &HashMap<char, char>) -> usize {
        let Palette::Chars(chars) = &mut self.palette else {
            return 0;
        };
        let mut replaced = 0;
        let updated: String = chars
            .chars()
            .map(|c| match replacements.get(&c) {
                Some(substitute) => {
                    replaced += 1;
                    *substitute
                }
                None => c,
            })
            .collect();
        *chars = updated;
        replaced
    }

    /// Selectively overwrites configuration from a descriptor. Absent
    /// fields are never touched.
    pub fn configure(&mut self, options: &StyleDescriptor) {
        if let Some(generator) = &options.generator {
            self.palette = Palette::Generator(Arc::clone(generator));
        } else if let Some(fill) = options.fill_char {
            self.palette = Palette::Chars(fill.to_string());
        } else if let Some(random_chars) = &options.random_chars {
            match random_chars {
                RandomCharsOption::Set(chars) => {
                    self.palette = Palette::Chars(chars.clone());
                }
                RandomCharsOption::Edit { add, remove, replace } => {
                    if let Some(additions) = add {
                        self.add_chars(additions);
                    }
                    if let Some(removals) = remove {
                        self.remove_chars(removals);
                    }
                    if let Some(replacements) = replace {
                        self.replace_chars(replacements);
                    }
                }
            }
        }
        if let Some(fixed) = &options.fixed {
            for (word, value) in fixed {
                match value {
                    Some(raw) => self.set_fixed(word.clone(), raw.clone()),
                    None => {
                        self.fixed.remove(word);
                    }
                }
            }
        }
        if let Some(allow) = options.allow_override {
            self.is_override_allowed = allow;
        }
    }
}

/// Validating factory: builds a [`GrawlixStyle`] from a descriptor.
///
/// Fails with a style-validation error when the descriptor lacks a name, or
/// defines neither usable characters (nor a generator) nor any fixed
/// replacement.
pub fn to_style(descriptor: &StyleDescriptor) -> Result<GrawlixStyle, GrawlixError> {
    let name = match descriptor.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(GrawlixError::InvalidStyle {
                reason: "name parameter is required".to_string(),
                descriptor: descriptor.clone(),
            })
        }
    };

    let mut style = GrawlixStyle::new(name, "");
    style.configure(descriptor);
    if !style.is_valid() {
        return Err(GrawlixError::InvalidStyle {
            reason: "style must define characters, a generator, or fixed replacements".to_string(),
            descriptor: descriptor.clone(),
        });
    }
    Ok(style)
}
