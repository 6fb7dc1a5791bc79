// file: src/parser/quote.rs
// description: locate a supporting quotation inside verbatim chunk text
// reference: whitespace-tolerant, case-insensitive word sequence matching

use regex::RegexBuilder;
use std::ops::Range;

const QUOTE_CHARS: &[char] = &['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '\u{00AB}', '\u{00BB}'];

/// Strips wrapping quotation marks and leading or trailing ellipses.
pub fn clean_quote(quote: &str) -> &str {
    let mut current = quote.trim();
    loop {
        let next = current
            .trim_matches(QUOTE_CHARS)
            .trim_start_matches("...")
            .trim_end_matches("...")
            .trim_matches('\u{2026}')
            .trim();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Byte range of `quote` within `chunk_text`. Line breaks, tabs and repeated
/// spaces in the chunk do not prevent a match, and case is ignored. The range
/// indexes the text exactly as stored.
pub fn locate_quote(chunk_text: &str, quote: &str) -> Option<Range<usize>> {
    let cleaned = clean_quote(quote);
    if cleaned.is_empty() {
        return None;
    }

    if let Some(start) = chunk_text.find(cleaned) {
        return Some(start..start + cleaned.len());
    }

    let pattern = cleaned
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()?
        .find(chunk_text)
        .map(|m| m.range())
}
