//! generate.rs - Grawlix token generation.
//!
//! Pure generation primitives used by styles: fill a span with a single
//! character, or draw a random symbol string from a palette. Both operate on
//! whole Unicode characters, never on byte lengths.
//!
//! License: MIT OR APACHE 2.0

use rand::Rng;

use crate::errors::GrawlixError;

/// Redraw budget per output position. A palette that cannot produce a legal
/// character within this many draws is degenerate (for example `"!!"`, or a
/// single character that must not repeat); we fail loudly rather than spin.
pub const MAX_DRAW_ATTEMPTS: usize = 64;

/// Output may never end on this character; a trailing `!` reads like an
/// unterminated exclamation rather than a grawlix.
const FORBIDDEN_FINAL: char = '!';

/// Returns `fill` repeated `len` times.
pub fn fill_grawlix(fill: char, len: usize) -> String {
    std::iter::repeat(fill).take(len).collect()
}

/// Builds a `len`-character string by uniformly sampling `palette`, one
/// character at a time, under two constraints:
///
/// * no character may equal the immediately preceding character, and
/// * the final character may never be `!`.
///
/// Draws that violate a constraint are rejected and retried, up to
/// [`MAX_DRAW_ATTEMPTS`] per position.
pub fn random_grawlix(palette: &str, len: usize) -> Result<String, GrawlixError> {
    let chars: Vec<char> = palette.chars().collect();
    if chars.is_empty() {
        return Err(GrawlixError::PaletteExhausted {
            palette: palette.to_string(),
            attempts: 0,
        });
    }

    let mut rng = rand::rng();
    let mut out = String::with_capacity(len);
    let mut prev: Option<char> = None;

    for i in 0..len {
        let is_last = i + 1 == len;
        let mut attempts = 0;
        let next = loop {
            let candidate = chars[rng.random_range(0..chars.len())];
            let repeats = prev == Some(candidate);
            let bad_ending = is_last && candidate == FORBIDDEN_FINAL;
            if !repeats && !bad_ending {
                break candidate;
            }
            attempts += 1;
            if attempts >= MAX_DRAW_ATTEMPTS {
                return Err(GrawlixError::PaletteExhausted {
                    palette: palette.to_string(),
                    attempts,
                });
            }
        };
        out.push(next);
        prev = Some(next);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIALS: usize = 10_000;

    #[test]
    fn fill_repeats_exactly() {
        assert_eq!(fill_grawlix('*', 16), "****************");
        assert_eq!(fill_grawlix('*', 0), "");
    }

    #[test]
    fn fill_is_unicode_safe() {
        assert_eq!(fill_grawlix('☠', 4), "☠☠☠☠");
        assert_eq!(fill_grawlix('☠', 4).chars().count(), 4);
    }

    #[test]
    fn random_has_requested_length_and_palette_chars_only() {
        let palette = "!@#$%^&*";
        for len in [1usize, 4, 10, 32] {
            let g = random_grawlix(palette, len).unwrap();
            assert_eq!(g.chars().count(), len);
            assert!(g.chars().all(|c| palette.contains(c)));
        }
    }

    #[test]
    fn random_never_repeats_adjacent_chars() {
        let palette = "!@#$%★☒☎☠☢☣☹♡♢♤♧";
        for _ in 0..TRIALS {
            let g = random_grawlix(palette, 16).unwrap();
            let chars: Vec<char> = g.chars().collect();
            assert!(chars.windows(2).all(|w| w[0] != w[1]), "doubled char in {g:?}");
        }
    }

    #[test]
    fn random_never_ends_on_bang() {
        for _ in 0..TRIALS {
            let g = random_grawlix("!@#$%", 16).unwrap();
            assert_ne!(g.chars().last(), Some('!'));
        }
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(random_grawlix("!@#$%", 0).unwrap(), "");
    }

    #[test]
    fn degenerate_palettes_fail_loudly() {
        // A single character cannot avoid repeating itself.
        let err = random_grawlix("*", 2).unwrap_err();
        assert!(matches!(err, GrawlixError::PaletteExhausted { .. }));

        // `!` alone can never legally occupy the final position.
        let err = random_grawlix("!", 1).unwrap_err();
        assert!(matches!(err, GrawlixError::PaletteExhausted { .. }));

        let err = random_grawlix("", 3).unwrap_err();
        assert!(matches!(err, GrawlixError::PaletteExhausted { .. }));
    }
}
