// src/lexicons.rs
//! Sentiment lexicons and the negation-term list.
//!
//! All tables load once at startup into an immutable [`LexiconStore`] that is
//! passed into every stage; there is no ambient global lookup. A missing or
//! unreadable resource degrades to an empty table with a warning and the
//! batch continues.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::config::ResourceConfig;

/// One ArSenL row: positivity, negativity and annotation confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArsenlEntry {
    pub pos: f64,
    pub neg: f64,
    pub confidence: f64,
}

/// One emoji-lexicon row (first three CSV columns).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmojiScores {
    pub pos: f64,
    pub neg: f64,
}

#[derive(Debug, Clone, Default)]
pub struct LexiconStore {
    pub arsenl: HashMap<String, ArsenlEntry>,
    pub arasenti: HashMap<String, f64>,
    pub dahl: HashMap<String, f64>,
    pub emojis: HashMap<String, EmojiScores>,
    pub negation_terms: HashSet<String>,
}

impl LexiconStore {
    pub fn load(config: &ResourceConfig) -> Self {
        Self {
            arsenl: parse_arsenl(&read_or_empty(&config.arsenl)),
            arasenti: parse_arasenti(&read_or_empty(&config.arasenti)),
            dahl: parse_dahl(&read_or_empty(&config.dahl)),
            emojis: parse_emoji_csv(&read_or_empty(&config.emojis)),
            negation_terms: parse_negation(&read_or_empty(&config.negation)),
        }
    }
}

pub(crate) fn read_or_empty(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!(
                target: "lexicons",
                path = %path.display(),
                error = %err,
                "resource unavailable; continuing with an empty table"
            );
            String::new()
        }
    }
}

fn is_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('/')
}

/// `word;pos;neg;confidence` rows; duplicate words keep the entry with the
/// strictly highest confidence (ties keep the first seen).
pub fn parse_arsenl(input: &str) -> HashMap<String, ArsenlEntry> {
    let mut map: HashMap<String, ArsenlEntry> = HashMap::new();
    for line in input.lines() {
        if is_comment(line) {
            continue;
        }
        let mut fields = line.split(';');
        let (Some(word), Some(pos), Some(neg), Some(confidence)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            warn!(target: "lexicons", lexicon = "arsenl", line, "malformed row skipped");
            continue;
        };
        let (Ok(pos), Ok(neg), Ok(confidence)) =
            (pos.parse::<f64>(), neg.parse::<f64>(), confidence.parse::<f64>())
        else {
            warn!(target: "lexicons", lexicon = "arsenl", line, "unparsable scores skipped");
            continue;
        };
        let entry = ArsenlEntry {
            pos,
            neg,
            confidence,
        };
        match map.entry(word.to_string()) {
            Entry::Occupied(mut seen) => {
                if entry.confidence > seen.get().confidence {
                    seen.insert(entry);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }
    map
}

/// `word score` rows, whitespace-delimited; sign carries the polarity.
pub fn parse_arasenti(input: &str) -> HashMap<String, f64> {
    let mut map = HashMap::new();
    for line in input.lines() {
        if is_comment(line) {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(word), Some(score)) = (fields.next(), fields.next()) else {
            warn!(target: "lexicons", lexicon = "arasenti", line, "malformed row skipped");
            continue;
        };
        let Ok(score) = score.parse::<f64>() else {
            warn!(target: "lexicons", lexicon = "arasenti", line, "unparsable score skipped");
            continue;
        };
        map.insert(word.to_string(), score);
    }
    map
}

/// Tab-delimited rows with the word in column 0 and the score in column 2.
pub fn parse_dahl(input: &str) -> HashMap<String, f64> {
    let mut map = HashMap::new();
    for line in input.lines() {
        if is_comment(line) {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let (Some(word), Some(score)) = (fields.first(), fields.get(2)) else {
            warn!(target: "lexicons", lexicon = "dahl", line, "malformed row skipped");
            continue;
        };
        let Ok(score) = score.parse::<f64>() else {
            warn!(target: "lexicons", lexicon = "dahl", line, "unparsable score skipped");
            continue;
        };
        map.insert(word.to_string(), score);
    }
    map
}

/// CSV with one header line; `emoji,negScore,posScore,...` — only the first
/// three columns are used.
pub fn parse_emoji_csv(input: &str) -> HashMap<String, EmojiScores> {
    let mut map = HashMap::new();
    for line in input.lines().skip(1) {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        let (Some(emoji), Some(neg), Some(pos)) = (fields.first(), fields.get(1), fields.get(2))
        else {
            warn!(target: "lexicons", lexicon = "emoji", line, "malformed row skipped");
            continue;
        };
        let (Ok(neg), Ok(pos)) = (neg.parse::<f64>(), pos.parse::<f64>()) else {
            warn!(target: "lexicons", lexicon = "emoji", line, "unparsable scores skipped");
            continue;
        };
        map.insert(emoji.to_string(), EmojiScores { pos, neg });
    }
    map
}

/// One term per line; the first line is a header; interior spaces are
/// stripped from each term.
pub fn parse_negation(input: &str) -> HashSet<String> {
    let mut terms = HashSet::new();
    for line in input.lines().skip(1) {
        if is_comment(line) {
            continue;
        }
        let term: String = line.chars().filter(|c| *c != ' ').collect();
        if !term.is_empty() {
            terms.insert(term);
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arsenl_keeps_highest_confidence_duplicate() {
        let map = parse_arsenl("/ comment\nسعيد;0.8;0.1;0.9\nسعيد;0.1;0.8;0.5\n");
        let entry = map.get("سعيد").unwrap();
        assert_eq!(entry.pos, 0.8);
        assert_eq!(entry.confidence, 0.9);
    }

    #[test]
    fn arsenl_ties_keep_the_first_entry() {
        let map = parse_arsenl("كلمة;0.2;0.3;0.5\nكلمة;0.9;0.0;0.5\n");
        assert_eq!(map.get("كلمة").unwrap().pos, 0.2);
    }

    #[test]
    fn arasenti_rows_and_comments() {
        let map = parse_arasenti("/ header-ish comment\nجميل 1.25\nسيء -2.0\n");
        assert_eq!(map.get("جميل"), Some(&1.25));
        assert_eq!(map.get("سيء"), Some(&-2.0));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn dahl_reads_word_and_third_column() {
        let map = parse_dahl("حلو\tadj\t0.7\nوحش\tnoun\t-0.4\n");
        assert_eq!(map.get("حلو"), Some(&0.7));
        assert_eq!(map.get("وحش"), Some(&-0.4));
    }

    #[test]
    fn emoji_csv_skips_header_and_maps_neg_then_pos() {
        let map = parse_emoji_csv("emoji,neg,pos,occurrences\n😀,0.1,0.8,100\n");
        let scores = map.get("😀").unwrap();
        assert_eq!(scores.pos, 0.8);
        assert_eq!(scores.neg, 0.1);
    }

    #[test]
    fn negation_list_skips_header_and_strips_spaces() {
        let terms = parse_negation("header\nما\nلا \n/ comment\n");
        assert!(terms.contains("ما"));
        assert!(terms.contains("لا"));
        assert_eq!(terms.len(), 2);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        assert!(parse_arsenl("برتقالة;x;y;z\n").is_empty());
        assert!(parse_arasenti("كلمة\n").is_empty());
        assert!(parse_dahl("كلمة\t0.5\n").is_empty());
    }
}
