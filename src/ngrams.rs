// src/ngrams.rs
//! Word and character n-gram generation over the lemmatized item text, plus
//! membership indicators against a fixed vocabulary.

use std::collections::HashSet;

use crate::vocab::NgramVocabulary;

/// Lemmas joined with a trailing space after every word. This exact string
/// (spaces included) feeds both word and character n-grams.
pub fn lemma_text(lemmas: &[String]) -> String {
    let mut out = String::new();
    for lemma in lemmas {
        out.push_str(lemma);
        out.push(' ');
    }
    out
}

/// Contiguous word n-grams by token position. Trailing empty fields from the
/// terminal space are trimmed; interior empty fields are kept.
pub fn word_ngrams(n: usize, text: &str) -> Vec<String> {
    let mut words: Vec<&str> = text.split(' ').collect();
    while words.last().is_some_and(|w| w.is_empty()) {
        words.pop();
    }
    if n == 0 || words.len() < n {
        return Vec::new();
    }
    words.windows(n).map(|w| w.join(" ")).collect()
}

/// Contiguous character n-grams by raw character offset, spaces included.
pub fn char_ngrams(n: usize, text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if n == 0 || chars.len() < n {
        return Vec::new();
    }
    chars.windows(n).map(|w| w.iter().collect()).collect()
}

/// One binary indicator per vocabulary entry, in vocabulary order.
/// Membership, not count: repeats never push a value above 1.
pub fn indicators(vocab: &NgramVocabulary, grams: &[String]) -> Vec<u32> {
    let present: HashSet<&str> = grams.iter().map(String::as_str).collect();
    vocab
        .entries
        .iter()
        .map(|entry| u32::from(present.contains(entry.as_str())))
        .collect()
}
