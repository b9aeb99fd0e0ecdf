// src/pipeline.rs
//! Batch orchestration: preprocess every item, one analyzer round trip,
//! positional redistribution of the response segments, feature assembly in
//! input order.

use std::collections::HashMap;

use tracing::warn;

use crate::analyzer::{AnalysisRequest, AnalysisResponse, DynAnalyzer};
use crate::features;
use crate::lexicons::LexiconStore;
use crate::preprocess::{self, NormalizedItem};
use crate::vocab::VocabStore;

/// Analyzer-derived view of one item, redistributed from the batch response.
#[derive(Debug, Clone, Default)]
pub struct ItemAnalysis {
    pub lemmas: Vec<String>,
    pub pos_counts: HashMap<String, u32>,
    pub hashtag_lemmas: Vec<Vec<String>>,
}

pub struct Pipeline {
    pub lexicons: LexiconStore,
    pub vocab: VocabStore,
    analyzer: DynAnalyzer,
}

/// Short anonymized id for diagnostics; raw item text never reaches the log.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

impl Pipeline {
    pub fn new(lexicons: LexiconStore, vocab: VocabStore, analyzer: DynAnalyzer) -> Self {
        Self {
            lexicons,
            vocab,
            analyzer,
        }
    }

    /// One feature vector per item, in input order. Analyzer failure is
    /// non-fatal: the batch continues with empty analysis and degraded
    /// (all-zero) lemma-derived feature blocks.
    pub async fn run_batch(&self, items: &[String], only_ngrams: bool) -> Vec<Vec<u32>> {
        let preprocessed: Vec<NormalizedItem> = items
            .iter()
            .map(|text| preprocess::preprocess(text, &self.lexicons.negation_terms))
            .collect();

        let request = build_request(&preprocessed, !only_ngrams);
        let expected = request.segments.len();
        let response = match self.analyzer.analyze(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    target: "pipeline",
                    analyzer = self.analyzer.name(),
                    error = %err,
                    "analyzer invocation failed; continuing with empty analysis"
                );
                AnalysisResponse::default()
            }
        };
        if !response.segments.is_empty() && response.segments.len() != expected {
            // Positional correlation is the contract; any drift here would
            // silently desynchronize every lemma/POS lookup downstream.
            warn!(
                target: "pipeline",
                expected,
                received = response.segments.len(),
                "analyzer segment count mismatch; tail segments degraded"
            );
        }
        let analyses = redistribute(&preprocessed, response, !only_ngrams);

        items
            .iter()
            .zip(preprocessed.iter().zip(analyses.iter()))
            .map(|(raw, (item, analysis))| {
                if only_ngrams {
                    features::assemble_ngrams_only(&analysis.lemmas, &self.vocab)
                } else {
                    let id = anon_hash(raw);
                    features::assemble(item, analysis, &self.lexicons, &self.vocab, &id)
                }
            })
            .collect()
    }

    /// Sparse feature lines for the batch, one per item.
    pub async fn feature_lines(&self, items: &[String], only_ngrams: bool) -> Vec<String> {
        self.run_batch(items, only_ngrams)
            .await
            .iter()
            .map(|features| features::sparse_line(features))
            .collect()
    }
}

/// One segment per item (normalized tokens joined with trailing spaces),
/// immediately followed by one segment per hashtag of that item.
fn build_request(items: &[NormalizedItem], with_hashtags: bool) -> AnalysisRequest {
    let mut segments = Vec::new();
    for item in items {
        segments.push(joined(&item.normalized));
        if with_hashtags {
            for hashtag in &item.hashtags {
                segments.push(joined(hashtag));
            }
        }
    }
    AnalysisRequest { segments }
}

fn joined(words: &[String]) -> String {
    let mut out = String::new();
    for word in words {
        out.push_str(word);
        out.push(' ');
    }
    out
}

/// Walk the response segments with a cursor: item i's segment first, then one
/// per hashtag of item i, before item i+1 begins. A missing segment leaves
/// its slot empty, so a short or absent response degrades to all-zero
/// lemma-derived blocks instead of inventing entries.
fn redistribute(
    items: &[NormalizedItem],
    response: AnalysisResponse,
    with_hashtags: bool,
) -> Vec<ItemAnalysis> {
    let mut cursor = response.segments.into_iter();
    items
        .iter()
        .map(|item| {
            let words = cursor.next().unwrap_or_default();
            let mut analysis = ItemAnalysis::default();
            for word in &words {
                if let Some(pos) = &word.pos {
                    *analysis.pos_counts.entry(pos.clone()).or_insert(0) += 1;
                }
            }
            analysis.lemmas = words.into_iter().map(|word| word.lemma).collect();
            if with_hashtags {
                for _ in &item.hashtags {
                    let Some(words) = cursor.next() else {
                        break;
                    };
                    analysis
                        .hashtag_lemmas
                        .push(words.into_iter().map(|word| word.lemma).collect());
                }
            }
            analysis
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalyzedWord;

    fn item_with(normalized: &[&str], hashtags: &[&[&str]]) -> NormalizedItem {
        NormalizedItem {
            normalized: normalized.iter().map(|s| s.to_string()).collect(),
            hashtags: hashtags
                .iter()
                .map(|h| h.iter().map(|s| s.to_string()).collect())
                .collect(),
            ..Default::default()
        }
    }

    fn word(lemma: &str) -> AnalyzedWord {
        AnalyzedWord {
            surface: lemma.to_string(),
            lemma: lemma.to_string(),
            pos: Some("noun".to_string()),
        }
    }

    #[test]
    fn request_interleaves_hashtag_segments_per_item() {
        let items = vec![
            item_with(&["a"], &[&["h1"], &["h2"]]),
            item_with(&["b"], &[]),
        ];
        let request = build_request(&items, true);
        assert_eq!(request.segments, vec!["a ", "h1 ", "h2 ", "b "]);
    }

    #[test]
    fn ngram_only_request_skips_hashtags() {
        let items = vec![item_with(&["a"], &[&["h1"]])];
        let request = build_request(&items, false);
        assert_eq!(request.segments, vec!["a "]);
    }

    #[test]
    fn redistribute_follows_the_positional_contract() {
        let items = vec![
            item_with(&["a"], &[&["h1"]]),
            item_with(&["b"], &[]),
        ];
        let response = AnalysisResponse {
            segments: vec![vec![word("a")], vec![word("h1")], vec![word("b")]],
        };
        let analyses = redistribute(&items, response, true);
        assert_eq!(analyses[0].lemmas, vec!["a"]);
        assert_eq!(analyses[0].hashtag_lemmas, vec![vec!["h1".to_string()]]);
        assert_eq!(analyses[1].lemmas, vec!["b"]);
        assert_eq!(analyses[0].pos_counts.get("noun"), Some(&1));
    }

    #[test]
    fn missing_segments_degrade_to_empty() {
        let items = vec![item_with(&["a"], &[&["h1"]]), item_with(&["b"], &[])];
        let analyses = redistribute(&items, AnalysisResponse::default(), true);
        assert!(analyses[0].lemmas.is_empty());
        assert!(analyses[0].hashtag_lemmas.is_empty());
        assert!(analyses[1].lemmas.is_empty());
    }
}
