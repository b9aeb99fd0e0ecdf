// src/preprocess.rs
//! Per-item preprocessing: emoji/emoticon extraction, punctuation counts,
//! span normalization, tokenization, elongation reduction and hashtag
//! segmentation. Produces the [`NormalizedItem`] every downstream stage
//! consumes.

use std::collections::HashSet;

use crate::emoji;
use crate::emoticons;
use crate::negation;
use crate::normalize;
use crate::punctuation::{self, PunctuationCounts};

/// Sentinel substituted for a hashtag token in the main streams.
pub const HASHTAG_SENTINEL: &str = "هاشتاغتوكن";

/// Everything extracted from one raw input line. Created fresh per item and
/// discarded once its feature line is written.
#[derive(Debug, Clone, Default)]
pub struct NormalizedItem {
    /// strip-all token stream fed to lexicon lookups (sentinel-substituted).
    pub normalized: Vec<String>,
    /// retain-some token stream the negation mask aligns with.
    pub with_punctuation: Vec<String>,
    /// One sub-token sequence per hashtag, in order of appearance.
    pub hashtags: Vec<Vec<String>>,
    /// Negation mask; invariant: `negated.len() == with_punctuation.len()`.
    pub negated: Vec<bool>,
    pub emojis: Vec<String>,
    pub emoticons: Vec<String>,
    pub punctuation: PunctuationCounts,
    pub elongated: u32,
    pub has_url: bool,
    pub has_mention: bool,
}

/// Collapse every run of three or more identical characters to a single
/// occurrence. Runs of two are left alone.
pub fn reduce_elongation(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;
    for c in word.chars() {
        if prev == Some(c) {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        match run {
            1 | 2 => out.push(c),
            3 => {
                out.pop();
            }
            _ => {}
        }
    }
    out
}

/// Full per-item preprocessing. Emoji extraction runs strictly before
/// emoticon extraction, punctuation is counted on the substituted text, and
/// span normalization runs before tokenization.
pub fn preprocess(text: &str, negation_terms: &HashSet<String>) -> NormalizedItem {
    let (emojis, text) = emoji::extract(text);
    let (emoticons, text) = emoticons::extract(&text);
    let marks = punctuation::count_marks(&text);
    let spans = normalize::normalize_spans(&text);

    let mut item = NormalizedItem {
        emojis,
        emoticons,
        punctuation: marks,
        has_url: spans.has_url,
        has_mention: spans.has_mention,
        ..Default::default()
    };

    for raw in spans
        .text
        .split([' ', '\n', '\t'])
        .filter(|w| !w.is_empty())
    {
        let word = reduce_elongation(raw);
        if word != raw {
            item.elongated += 1;
        }
        if word.starts_with('#') {
            // The marker and any other punctuation fall away in the
            // strip-all pass; the main streams only see the sentinel.
            item.hashtags.push(punctuation::strip_all(&word));
            item.normalized.push(HASHTAG_SENTINEL.to_string());
            item.with_punctuation.push(HASHTAG_SENTINEL.to_string());
        } else {
            item.with_punctuation
                .extend(punctuation::retain_some(&word));
            item.normalized.extend(punctuation::strip_all(&word));
        }
    }

    item.negated = negation::resolve(&item.with_punctuation, negation_terms);
    item
}
