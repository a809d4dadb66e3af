//! Text cleanup pipeline for element text.
//!
//! Three passes run in a fixed order:
//!
//! 1. Quote and punctuation normalization (typographic quotes, dashes,
//!    ellipses and common mojibake mapped to plain ASCII)
//! 2. Non-ASCII transliteration (NFKD decomposition, then everything outside
//!    printable ASCII and ASCII whitespace is dropped)
//! 3. Whitespace normalization (runs collapsed to one space, ends trimmed)
//!
//! Quote mapping must come first so that mapped characters survive pass 2,
//! and pass 2 must precede pass 3 so gaps left by removed characters are
//! collapsed. The composition is idempotent.

use crate::model::{Element, ElementCollection};
use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Replacements applied by the quote normalization pass, in order.
///
/// Multi-character mojibake sequences come before the single characters
/// they contain. Every key is non-ASCII, so the pass is a no-op on
/// already-cleaned text.
pub const QUOTE_REPLACEMENTS: &[(&str, &str)] = &[
    // UTF-8 punctuation mis-decoded as cp1252
    ("\u{e2}\u{20ac}\u{2122}", "'"),   // â€™
    ("\u{e2}\u{20ac}\u{2dc}", "'"),    // â€˜
    ("\u{e2}\u{20ac}\u{153}", "\""),   // â€œ
    ("\u{e2}\u{20ac}\u{9d}", "\""),    // â€ + U+009D
    ("\u{e2}\u{20ac}\u{201c}", "-"),   // â€“
    ("\u{e2}\u{20ac}\u{201d}", "-"),   // â€”
    ("\u{e2}\u{20ac}\u{a6}", "..."),   // â€¦
    // Single quotes and primes
    ("\u{2018}", "'"), // ‘
    ("\u{2019}", "'"), // ’
    ("\u{201a}", "'"), // ‚
    ("\u{201b}", "'"), // ‛
    ("\u{2032}", "'"), // ′
    ("\u{b4}", "'"),   // ´
    ("\u{91}", "'"),
    ("\u{92}", "'"),
    // Double quotes
    ("\u{201c}", "\""), // “
    ("\u{201d}", "\""), // ”
    ("\u{201e}", "\""), // „
    ("\u{201f}", "\""), // ‟
    ("\u{2033}", "\""), // ″
    ("\u{ab}", "\""),   // «
    ("\u{bb}", "\""),   // »
    ("\u{93}", "\""),
    ("\u{94}", "\""),
    // Dashes
    ("\u{2010}", "-"), // ‐
    ("\u{2011}", "-"), // ‑
    ("\u{2012}", "-"), // ‒
    ("\u{2013}", "-"), // –
    ("\u{2014}", "-"), // —
    ("\u{2015}", "-"), // ―
    ("\u{2212}", "-"), // −
    // Ellipsis
    ("\u{2026}", "..."),
];

/// ASCII whitespace, the only whitespace left after pass 2.
const WHITESPACE_PATTERN: &str = r"[ \t\n\x0B\x0C\r]+";

/// Text cleanup pipeline.
pub struct TextCleaner {
    whitespace_regex: Regex,
}

impl TextCleaner {
    /// Create a new cleaner.
    pub fn new() -> Self {
        Self {
            whitespace_regex: Regex::new(WHITESPACE_PATTERN).expect("static whitespace pattern"),
        }
    }

    /// Process text through all three passes.
    pub fn process(&self, text: &str) -> String {
        let result = normalize_quotes(text);
        let result = strip_non_ascii(&result);
        self.normalize_whitespace(&result)
    }

    /// Clean the text of every element in place. Elements without text are skipped.
    pub fn clean_elements(&self, elements: &mut [Element]) {
        for element in elements.iter_mut() {
            if let Some(text) = element.text.as_mut() {
                *text = self.process(text);
            }
        }
    }

    /// Collapse whitespace runs to single spaces and trim both ends.
    pub fn normalize_whitespace(&self, text: &str) -> String {
        self.whitespace_regex
            .replace_all(text, " ")
            .trim()
            .to_string()
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

fn shared() -> &'static TextCleaner {
    static CLEANER: OnceLock<TextCleaner> = OnceLock::new();
    CLEANER.get_or_init(TextCleaner::new)
}

/// Clean every element's text in place, returning the collection for chaining.
pub fn clean(elements: &mut ElementCollection) -> &mut ElementCollection {
    shared().clean_elements(elements.as_mut_slice());
    log::debug!(
        "Cleaned text of {} elements",
        elements.iter().filter(|e| e.has_text()).count()
    );
    elements
}

/// Clean a single string.
pub fn clean_text(text: &str) -> String {
    shared().process(text)
}

/// Map typographic quotes, dashes, and mojibake to ASCII.
pub fn normalize_quotes(text: &str) -> String {
    let mut result = text.to_string();
    for (from, to) in QUOTE_REPLACEMENTS {
        if result.contains(from) {
            result = result.replace(from, to);
        }
    }
    result
}

/// Transliterate via NFKD and drop anything outside printable ASCII and ASCII whitespace.
pub fn strip_non_ascii(text: &str) -> String {
    text.nfkd().filter(|c| is_kept_ascii(*c)).collect()
}

fn is_kept_ascii(c: char) -> bool {
    matches!(c, ' '..='~' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
}
