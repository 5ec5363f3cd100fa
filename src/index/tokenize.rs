// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Splitting text into index terms.
//!
//! Both sides of the index go through here: record fields at build time and
//! query clauses at search time. If the two ever disagree, exact matches stop
//! matching, so there is exactly one tokenizer.

use crate::util::normalize::normalize;
use std::collections::HashSet;
use std::sync::LazyLock;

/// English stop words. Too common to rank on, and they make short fuzzy
/// queries match everything ("and" → "any", "an", ...).
const STOP_WORD_LIST: &[&str] = &[
    "a", "able", "about", "across", "after", "all", "almost", "also", "am", "among", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "but", "by", "can", "cannot", "could",
    "dear", "did", "do", "does", "either", "else", "ever", "every", "for", "from", "get", "got",
    "had", "has", "have", "he", "her", "hers", "him", "his", "how", "however", "i", "if", "in",
    "into", "is", "it", "its", "just", "least", "let", "like", "likely", "may", "me", "might",
    "most", "must", "my", "neither", "no", "nor", "not", "of", "off", "often", "on", "only", "or",
    "other", "our", "own", "rather", "said", "say", "says", "she", "should", "since", "so", "some",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "tis", "to",
    "too", "twas", "us", "wants", "was", "we", "were", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "would", "yet", "you", "your",
];

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORD_LIST.iter().copied().collect());

#[inline]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Word boundary: anything that is not a letter or digit.
#[inline]
fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Normalized words of `text`, stop words removed, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|w| !is_stop_word(w))
        .collect()
}

/// Normalized words of `text` with stop words kept.
///
/// Wildcard and fuzzy query terms use this: "th*" must still expand even
/// though "the" alone would be filtered.
pub fn words(text: &str) -> Vec<String> {
    normalize(text)
        .split(is_word_boundary)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
