// src/emoticons.rs
//! Closed emoticon vocabulary with per-class polarity membership.
//!
//! Matching is exact-literal, leftmost non-overlapping; alternatives are
//! sorted longest-first so `:-)` is never consumed as `:-` plus junk.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::polarity::Polarity;

/// Sentinel substituted for every emoticon span.
pub const EMOTICON_SENTINEL: &str = "ايموتيكونتوكن";

const POSITIVE: &[&str] = &[
    ":-)", ":)", ":-]", ":]", ":-3", ":3", ":->", ":>", "8-)", "8)", ":-}", ":}", ":o)", ":c)",
    ":^)", "=]", "=)", ":-D", ":D", "8-D", "8D", "x-D", "X-D", "xD", "XD", "=D", "=3", "B^D",
    ":'-)", ":')", ":-*", ":*", ":×", ";-)", ";)", ";-]", ";]", ";^)", ";D", ":-P", ":P", "X-P",
    "XP", "x-p", "xp", ":-p", ":p", ":-b", ":b", "d:", "=p", "<3", "^_^", "^.^", "^^",
];

const NEUTRAL: &[&str] = &[":-O", ":O", ":-o", ":o", ":-0", "8-0"];

const NEGATIVE: &[&str] = &[
    ":-(", ":(", ":-c", ":c", ":-<", ":<", ":-[", ":[", ":{", ":@", ":'-(", ";'(", "D-':", "D:",
    "D8", "D;", "D=", "DX", ":-/", ":\\", "=/", "=\\", ":S", ":-|", ":|", "</3", "<\\3", "-_-",
    "-.-", ">_<", ">.<", "~_~", "_|_", "-|-", "=_=",
];

static POSITIVE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| POSITIVE.iter().copied().collect());
static NEUTRAL_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| NEUTRAL.iter().copied().collect());

static PATTERN: Lazy<Regex> = Lazy::new(|| {
    let mut all: Vec<&str> = POSITIVE
        .iter()
        .chain(NEUTRAL.iter())
        .chain(NEGATIVE.iter())
        .copied()
        .collect();
    // Longest-first keeps alternation deterministic for overlapping literals.
    all.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    all.dedup();
    let joined = all
        .iter()
        .map(|e| regex::escape(e))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&joined).unwrap()
});

/// Membership order is positive, then neutral; anything else in the closed
/// set is negative.
pub fn polarity(emoticon: &str) -> Polarity {
    if POSITIVE_SET.contains(emoticon) {
        Polarity::Positive
    } else if NEUTRAL_SET.contains(emoticon) {
        Polarity::Neutral
    } else {
        Polarity::Negative
    }
}

/// Returns the extracted emoticon literals in order of appearance and the
/// text with every span replaced by the space-padded sentinel.
pub fn extract(text: &str) -> (Vec<String>, String) {
    let mut emoticons = Vec::new();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in PATTERN.find_iter(text) {
        emoticons.push(m.as_str().to_string());
        out.push_str(&text[last..m.start()]);
        out.push(' ');
        out.push_str(EMOTICON_SENTINEL);
        out.push(' ');
        last = m.end();
    }
    out.push_str(&text[last..]);
    (emoticons, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_literal_wins() {
        let (found, _) = extract(":-)");
        assert_eq!(found, vec![":-)"]);
    }

    #[test]
    fn leftmost_non_overlapping_scan() {
        let (found, text) = extract("حلو :) بس :( شوي");
        assert_eq!(found, vec![":)", ":("]);
        assert_eq!(
            text,
            format!("حلو  {EMOTICON_SENTINEL}  بس  {EMOTICON_SENTINEL}  شوي")
        );
    }

    #[test]
    fn polarity_membership_order() {
        assert_eq!(polarity(":)"), Polarity::Positive);
        assert_eq!(polarity(":O"), Polarity::Neutral);
        assert_eq!(polarity(":("), Polarity::Negative);
        // Not in positive or neutral => negative by fallback.
        assert_eq!(polarity("unknown"), Polarity::Negative);
    }
}
