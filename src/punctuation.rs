// src/punctuation.rs
//! Interrogation/exclamation counting and the two punctuation-stripping
//! passes shared by tokenization and negation scoping.

use once_cell::sync::Lazy;
use regex::Regex;

/// Counts produced by [`count_marks`]. The three scans are independent: a
/// `?!` pair contributes to all three counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PunctuationCounts {
    pub interrogation: u32,
    pub exclamation: u32,
    pub both: u32,
}

static INTERROGATION: Lazy<Regex> = Lazy::new(|| Regex::new("[?؟]").unwrap());
static EXCLAMATION: Lazy<Regex> = Lazy::new(|| Regex::new("!").unwrap());
static BOTH: Lazy<Regex> = Lazy::new(|| Regex::new("(\\?!)|(!\\?)|(؟!)|(!؟)").unwrap());

// Runs of characters that survive the strip passes: Arabic letters,
// Arabic-Indic digits, ASCII alphanumerics, space, and (retain-some only)
// the clause punctuation that negation scoping needs as boundaries.
static RUN_STRIP_ALL: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{0621}-\u{064A}\u{0660}-\u{0669} 0-9a-zA-Z]+").unwrap());
static RUN_RETAIN_SOME: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{0621}-\u{064A}\u{0660}-\u{0669} 0-9a-zA-Z;:.,?!؟(]+").unwrap());
static CLAUSE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new("[;:.,?!؟(]").unwrap());
static ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{0621}-\u{064A}\u{0660}-\u{0669}0-9a-zA-Z]").unwrap());

/// Count interrogation marks (ASCII and Arabic), exclamation marks, and
/// immediately adjacent interrogation+exclamation pairs in either order.
pub fn count_marks(text: &str) -> PunctuationCounts {
    PunctuationCounts {
        interrogation: INTERROGATION.find_iter(text).count() as u32,
        exclamation: EXCLAMATION.find_iter(text).count() as u32,
        both: BOTH.find_iter(text).count() as u32,
    }
}

/// Whether the token contains a clause-boundary character (`; : . , ? ! ؟ (`).
pub fn contains_clause_punct(token: &str) -> bool {
    CLAUSE_PUNCT.is_match(token)
}

/// Whether the token contains any Arabic-letter, Arabic-digit or ASCII
/// alphanumeric character.
pub fn contains_alphanumeric(token: &str) -> bool {
    ALNUM.is_match(token)
}

fn push_words(out: &mut Vec<String>, piece: &str) {
    out.extend(
        piece
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(str::to_string),
    );
}

/// strip-all pass: everything outside the Arabic letter/digit and ASCII
/// alphanumeric ranges acts as a separator.
pub fn strip_all(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for m in RUN_STRIP_ALL.find_iter(text) {
        push_words(&mut out, m.as_str());
    }
    out
}

/// retain-some pass: like [`strip_all`] but `; : . , ? ! ؟ (` survive, and
/// each occurrence splits the run immediately after itself, so a boundary
/// mark stays attached to the text it terminates (`"ابدا."` stays one token,
/// `".."` becomes two).
pub fn retain_some(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for m in RUN_RETAIN_SOME.find_iter(text) {
        let run = m.as_str();
        let mut start = 0;
        for p in CLAUSE_PUNCT.find_iter(run) {
            push_words(&mut out, &run[start..p.end()]);
            start = p.end();
        }
        if start < run.len() {
            push_words(&mut out, &run[start..]);
        }
    }
    out
}
