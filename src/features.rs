// src/features.rs
//! Feature-vector assembly and sparse serialization.
//!
//! Column order is fixed and must match the order the classifier's model was
//! trained with: lexicon/punctuation/POS scalars first, then the word and
//! character n-gram indicator blocks in vocabulary order.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::lexicons::LexiconStore;
use crate::ngrams;
use crate::pipeline::ItemAnalysis;
use crate::polarity;
use crate::preprocess::NormalizedItem;
use crate::vocab::VocabStore;

/// Coarse POS groups in feature order, with the raw analyzer tags that fold
/// into each group.
const POS_GROUPS: [&[&str]; 15] = [
    &["noun"],
    &["noun_num", "noun_quant"],
    &["noun_prop"],
    &["adj", "adj_comp", "adj_num"],
    &["adv", "adv_interrog", "adv_rel"],
    &["pron", "pron_dem", "pron_exclam", "pron_interrog", "pron_rel"],
    &["verb", "verb_pseudo"],
    &[
        "part",
        "part_dem",
        "part_det",
        "part_focus",
        "part_fut",
        "part_interrog",
        "part_neg",
        "part_restrict",
        "part_verb",
        "part_voc",
    ],
    &["prep"],
    &["abbrev"],
    &["punc"],
    &["conj", "conj_sub"],
    &["interj"],
    &["digit"],
    &["latin"],
];

/// Fold raw analyzer POS counts into the 15 coarse groups, in feature order.
pub fn pos_group_counts(tags: &HashMap<String, u32>) -> [u32; 15] {
    let mut out = [0u32; 15];
    for (slot, raw_tags) in out.iter_mut().zip(POS_GROUPS.iter()) {
        for tag in *raw_tags {
            *slot += tags.get(*tag).copied().unwrap_or(0);
        }
    }
    out
}

/// Number of positions where negation turns on (false→true transitions,
/// starting at index 1).
pub fn negation_switches(mask: &[bool]) -> u32 {
    mask.windows(2).filter(|w| w[1] && !w[0]).count() as u32
}

/// The full feature vector for one item, in the fixed column order.
pub fn assemble(
    item: &NormalizedItem,
    analysis: &ItemAnalysis,
    lexicons: &LexiconStore,
    vocab: &VocabStore,
    item_id: &str,
) -> Vec<u32> {
    let mut features = Vec::with_capacity(29 + vocab.total_columns());

    let words = polarity::word_counts(
        lexicons,
        &analysis.lemmas,
        &item.normalized,
        &item.negated,
        item_id,
    );
    features.push(words.positive);
    features.push(words.negative);

    let hashtags = polarity::hashtag_counts(
        lexicons,
        &analysis.hashtag_lemmas,
        &item.hashtags,
        item_id,
    );
    features.push(hashtags.positive);
    features.push(hashtags.negative);

    features.push(item.punctuation.exclamation);
    features.push(item.punctuation.interrogation);
    features.push(item.punctuation.both);
    features.push(item.elongated);
    features.push(negation_switches(&item.negated));

    let emo = polarity::emo_counts(lexicons, &item.emoticons, &item.emojis);
    features.push(emo.positive);
    features.push(emo.negative);
    features.push(u32::from(
        !item.emoticons.is_empty() || !item.emojis.is_empty(),
    ));
    features.push(u32::from(item.has_mention));
    features.push(u32::from(item.has_url));

    features.extend(pos_group_counts(&analysis.pos_counts));

    append_ngram_indicators(&mut features, &analysis.lemmas, vocab);
    features
}

/// Reduced mode: only the word and character n-gram indicator blocks.
pub fn assemble_ngrams_only(lemmas: &[String], vocab: &VocabStore) -> Vec<u32> {
    let mut features = Vec::with_capacity(vocab.total_columns());
    append_ngram_indicators(&mut features, lemmas, vocab);
    features
}

fn append_ngram_indicators(features: &mut Vec<u32>, lemmas: &[String], vocab: &VocabStore) {
    let text = ngrams::lemma_text(lemmas);
    for (n, vocabulary) in [
        (1, &vocab.word_unigrams),
        (2, &vocab.word_bigrams),
        (3, &vocab.word_trigrams),
        (4, &vocab.word_fourgrams),
    ] {
        features.extend(ngrams::indicators(
            vocabulary,
            &ngrams::word_ngrams(n, &text),
        ));
    }
    for (n, vocabulary) in [
        (3, &vocab.char_trigrams),
        (4, &vocab.char_fourgrams),
        (5, &vocab.char_fivegrams),
    ] {
        features.extend(ngrams::indicators(
            vocabulary,
            &ngrams::char_ngrams(n, &text),
        ));
    }
}

/// One sparse line: literal `0` label, then ` idx:val` for strictly positive
/// values only, 1-based strictly increasing indices.
pub fn sparse_line(features: &[u32]) -> String {
    let mut line = String::from("0");
    for (j, value) in features.iter().enumerate() {
        if *value > 0 {
            let _ = write!(line, " {}:{}", j + 1, value);
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_line_omits_zeros_one_based() {
        assert_eq!(sparse_line(&[0, 2, 0, 1]), "0 2:2 4:1");
        assert_eq!(sparse_line(&[0, 0]), "0");
        assert_eq!(sparse_line(&[]), "0");
    }

    #[test]
    fn negation_switches_count_rising_edges_only() {
        assert_eq!(negation_switches(&[false, true, true, false, true]), 2);
        assert_eq!(negation_switches(&[true, true]), 0);
        assert_eq!(negation_switches(&[]), 0);
    }

    #[test]
    fn pos_groups_fold_subtags() {
        let mut tags = HashMap::new();
        tags.insert("noun".to_string(), 2);
        tags.insert("noun_num".to_string(), 1);
        tags.insert("noun_quant".to_string(), 1);
        tags.insert("verb_pseudo".to_string(), 3);
        tags.insert("latin".to_string(), 1);
        tags.insert("made_up_tag".to_string(), 9);
        let groups = pos_group_counts(&tags);
        assert_eq!(groups[0], 2); // nouns
        assert_eq!(groups[1], 2); // number words
        assert_eq!(groups[6], 3); // verbs
        assert_eq!(groups[14], 1); // latin
        assert_eq!(groups.iter().sum::<u32>(), 8); // unknown tags ignored
    }
}
