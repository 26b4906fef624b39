//! Accent stripping.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Removes diacritics, keeping case and every non-letter character.
///
/// Text is decomposed, combining marks are dropped, and the rest is recomposed.
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}
