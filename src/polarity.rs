// src/polarity.rs
//! Tri-state polarity and the staged lexicon lookup with negation flipping.

use tracing::warn;

use crate::lexicons::LexiconStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    /// Positive/negative score comparison; an exact tie is Neutral.
    pub fn from_scores(pos: f64, neg: f64) -> Self {
        if pos > neg {
            Self::Positive
        } else if neg > pos {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Sign of a scalar score; zero is Neutral.
    pub fn from_sign(score: f64) -> Self {
        if score > 0.0 {
            Self::Positive
        } else if score < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
            Self::Neutral => Self::Neutral,
        }
    }
}

/// Positive/negative tallies over one word sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolarityCounts {
    pub positive: u32,
    pub negative: u32,
}

impl PolarityCounts {
    fn tally(&mut self, polarity: Polarity) {
        match polarity {
            Polarity::Positive => self.positive += 1,
            Polarity::Negative => self.negative += 1,
            Polarity::Neutral => {}
        }
    }
}

/// Staged lookup for one word: ArSenL by lemma, then AraSenTi and DAHL by
/// the normalized surface token. Short-circuits at the first table that
/// knows the word, even when the verdict there is Neutral.
fn word_polarity(store: &LexiconStore, lemma: &str, normalized: &str) -> Polarity {
    if let Some(entry) = store.arsenl.get(lemma) {
        return Polarity::from_scores(entry.pos, entry.neg);
    }
    if let Some(score) = store.arasenti.get(normalized) {
        return Polarity::from_sign(*score);
    }
    if let Some(score) = store.dahl.get(normalized) {
        return Polarity::from_sign(*score);
    }
    Polarity::Neutral
}

fn truncated(words: &[String], max: usize) -> Vec<String> {
    words.iter().take(max).cloned().collect()
}

/// Per-word polarity tallies with negation flipping. The three sequences are
/// expected to be positionally aligned; a shortfall in the mask or the
/// normalized stream degrades that position to unnegated/empty and logs one
/// diagnostic per call (never the raw text, only the anonymized id and a
/// truncated lemma sample).
pub fn word_counts(
    store: &LexiconStore,
    lemmas: &[String],
    normalized: &[String],
    negated: &[bool],
    item_id: &str,
) -> PolarityCounts {
    let mut counts = PolarityCounts::default();
    let mut misaligned = false;
    for (i, lemma) in lemmas.iter().enumerate() {
        let flag = match negated.get(i) {
            Some(flag) => *flag,
            None => {
                misaligned = true;
                false
            }
        };
        let norm = match normalized.get(i) {
            Some(word) => word.as_str(),
            None => {
                misaligned = true;
                ""
            }
        };
        let mut polarity = word_polarity(store, lemma, norm);
        if flag {
            polarity = polarity.flipped();
        }
        counts.tally(polarity);
    }
    if misaligned {
        warn!(
            target: "polarity",
            id = %item_id,
            lemmas = lemmas.len(),
            mask = negated.len(),
            normalized = normalized.len(),
            sample = ?truncated(lemmas, 5),
            "lemma sequence longer than aligned streams; missing positions degraded"
        );
    }
    counts
}

/// Hashtag-level polarity: every hashtag word goes through the staged lookup
/// with an all-false negation mask; a hashtag leans negative only when its
/// negative tally strictly exceeds the positive one (ties lean positive).
pub fn hashtag_counts(
    store: &LexiconStore,
    hashtag_lemmas: &[Vec<String>],
    hashtag_normalized: &[Vec<String>],
    item_id: &str,
) -> PolarityCounts {
    let mut counts = PolarityCounts::default();
    for (i, lemmas) in hashtag_lemmas.iter().enumerate() {
        let normalized: &[String] = hashtag_normalized
            .get(i)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let mask = vec![false; lemmas.len()];
        let words = word_counts(store, lemmas, normalized, &mask, item_id);
        if words.negative > words.positive {
            counts.negative += 1;
        } else {
            counts.positive += 1;
        }
    }
    counts
}

/// Emoticon and emoji tallies. Emoticons classify by closed-set membership;
/// emojis by lexicon scores, with absent emojis contributing nothing.
pub fn emo_counts(store: &LexiconStore, emoticons: &[String], emojis: &[String]) -> PolarityCounts {
    let mut counts = PolarityCounts::default();
    for emoticon in emoticons {
        counts.tally(crate::emoticons::polarity(emoticon));
    }
    for emoji in emojis {
        if let Some(scores) = store.emojis.get(emoji) {
            counts.tally(Polarity::from_scores(scores.pos, scores.neg));
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicons::{ArsenlEntry, EmojiScores};

    fn store() -> LexiconStore {
        let mut store = LexiconStore::default();
        store.arsenl.insert(
            "سعيد".to_string(),
            ArsenlEntry {
                pos: 0.8,
                neg: 0.1,
                confidence: 0.9,
            },
        );
        store.arasenti.insert("جميل".to_string(), 1.5);
        store.dahl.insert("وحش".to_string(), -0.7);
        store.emojis.insert(
            "😀".to_string(),
            EmojiScores { pos: 0.9, neg: 0.1 },
        );
        store.emojis.insert(
            "😐".to_string(),
            EmojiScores { pos: 0.4, neg: 0.4 },
        );
        store
    }

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn arsenl_positive_word_counts_once() {
        let counts = word_counts(
            &store(),
            &words(&["سعيد"]),
            &words(&["سعيد"]),
            &[false],
            "test",
        );
        assert_eq!(counts.positive, 1);
        assert_eq!(counts.negative, 0);
    }

    #[test]
    fn lookup_is_staged_and_short_circuiting() {
        let mut store = store();
        // A tied ArSenL entry is Neutral and must NOT fall through to the
        // strongly-negative AraSenTi score for the same surface form.
        store.arsenl.insert(
            "غريب".to_string(),
            ArsenlEntry {
                pos: 0.3,
                neg: 0.3,
                confidence: 0.5,
            },
        );
        store.arasenti.insert("غريب".to_string(), -9.0);
        let counts = word_counts(
            &store,
            &words(&["غريب"]),
            &words(&["غريب"]),
            &[false],
            "test",
        );
        assert_eq!(counts, PolarityCounts::default());
    }

    #[test]
    fn negation_flips_the_tally() {
        let counts = word_counts(
            &store(),
            &words(&["سعيد", "وحش"]),
            &words(&["سعيد", "وحش"]),
            &[true, true],
            "test",
        );
        assert_eq!(counts.positive, 1);
        assert_eq!(counts.negative, 1);
    }

    #[test]
    fn short_mask_degrades_to_unnegated() {
        let counts = word_counts(&store(), &words(&["سعيد"]), &[], &[], "test");
        assert_eq!(counts.positive, 1);
    }

    #[test]
    fn hashtag_ties_lean_positive() {
        let counts = hashtag_counts(
            &store(),
            &[words(&["محايد"]), words(&["وحش"])],
            &[words(&["محايد"]), words(&["وحش"])],
            "test",
        );
        assert_eq!(counts.positive, 1);
        assert_eq!(counts.negative, 1);
    }

    #[test]
    fn emoji_tie_is_neutral_and_unknown_is_skipped() {
        let counts = emo_counts(
            &store(),
            &[],
            &words(&["😀", "😐", "🦄"]),
        );
        assert_eq!(counts.positive, 1);
        assert_eq!(counts.negative, 0);
    }

    #[test]
    fn emoticons_default_to_negative() {
        let counts = emo_counts(&store(), &words(&[":)", ":O", ":("]), &[]);
        assert_eq!(counts.positive, 1);
        assert_eq!(counts.negative, 1);
    }
}
