// src/emoji.rs
//! Emoji span extraction.
//!
//! Spans are matched with Unicode emoji properties. ZWJ sequences are listed
//! first so a composed emoji is extracted as one literal; bare digits, `#`
//! and `*` (which carry `Emoji=Yes`) only match as keycap sequences.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel substituted for every emoji span.
pub const EMOJI_SENTINEL: &str = "ايموجيتوكن";

static EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "\\p{Emoji}\u{FE0F}?(?:\u{200D}\\p{Emoji}\u{FE0F}?)+",
        "|[0-9#*]\u{FE0F}?\u{20E3}",
        "|\\p{Emoji_Modifier_Base}\\p{Emoji_Modifier}",
        "|\\p{Emoji_Presentation}",
        "|\\p{Emoji}\u{FE0F}",
    ))
    .unwrap()
});

/// Returns the extracted emoji literals in order of appearance and the text
/// with every span replaced by the space-padded sentinel.
pub fn extract(text: &str) -> (Vec<String>, String) {
    let mut emojis = Vec::new();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in EMOJI.find_iter(text) {
        emojis.push(m.as_str().to_string());
        out.push_str(&text[last..m.start()]);
        out.push(' ');
        out.push_str(EMOJI_SENTINEL);
        out.push(' ');
        last = m.end();
    }
    out.push_str(&text[last..]);
    (emojis, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_and_substitutes() {
        let (emojis, text) = extract("مبسوط 😀 اليوم");
        assert_eq!(emojis, vec!["😀"]);
        assert_eq!(text, format!("مبسوط  {EMOJI_SENTINEL}  اليوم"));
    }

    #[test]
    fn zwj_sequence_is_one_span() {
        let (emojis, _) = extract("👩‍💻 تعمل");
        assert_eq!(emojis, vec!["👩‍💻"]);
    }

    #[test]
    fn skin_tone_stays_attached() {
        let (emojis, _) = extract("👍🏽");
        assert_eq!(emojis, vec!["👍🏽"]);
    }

    #[test]
    fn plain_digits_and_hash_are_not_emoji() {
        let (emojis, text) = extract("#وسم 123");
        assert!(emojis.is_empty());
        assert_eq!(text, "#وسم 123");
    }

    #[test]
    fn keycap_is_an_emoji() {
        let (emojis, _) = extract("1\u{FE0F}\u{20E3}");
        assert_eq!(emojis, vec!["1\u{FE0F}\u{20E3}"]);
    }
}
