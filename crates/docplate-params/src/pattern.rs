/*
 * pattern.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Placeholder grammar.
//!
//! A placeholder is `{{`, an optional `#`, a key of letters, digits,
//! underscores and dots, a separator (nothing, one dot, or spaces), zero or
//! more `:word` trigger tokens, and `}}`.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Regex matching one placeholder.
///
/// Groups: 1 = `#` marker, 2 = key, 3 = separator, 4 = trigger suffix.
pub static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(#?)([A-Za-z0-9_.]+?)(\.| +)?((?::[a-z]+)*)\}\}")
        .expect("Invalid regex pattern for placeholders")
});

/// One placeholder occurrence inside a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMatch<'t> {
    /// Byte range of the whole `{{...}}` token.
    pub range: Range<usize>,

    /// The whole token.
    pub text: &'t str,

    /// True for the `{{#Key}}` variant.
    pub is_key: bool,

    pub key: &'t str,

    /// Raw trigger tokens, e.g. `:empty:remove:row`. Empty when absent.
    pub trigger: &'t str,
}

/// All placeholders in `text`, leftmost first.
pub fn find_placeholders(text: &str) -> impl Iterator<Item = PlaceholderMatch<'_>> {
    PLACEHOLDER_PATTERN.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        Some(PlaceholderMatch {
            range: whole.range(),
            text: whole.as_str(),
            is_key: caps.get(1).is_some_and(|m| !m.is_empty()),
            key: caps.get(2)?.as_str(),
            trigger: caps.get(4).map_or("", |m| m.as_str()),
        })
    })
}
