// src/negation.rs
//! Negation scope resolution over the punctuation-retaining token stream.
//!
//! A negation term opens a scope; every following token is negated until a
//! clause boundary (`; : . , ? ! ؟ (`). A boundary token that also carries
//! alphanumeric content is itself negated, a bare one is not; either way the
//! scope closes. The mask is always exactly as long as its input.

use std::collections::HashSet;

use crate::punctuation;

pub fn resolve(tokens: &[String], terms: &HashSet<String>) -> Vec<bool> {
    let mut mask = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if terms.contains(tokens[i].as_str()) {
            // The negation term itself is not negated.
            mask.push(false);
            i += 1;
            while i < tokens.len() {
                let token = &tokens[i];
                if punctuation::contains_clause_punct(token) {
                    mask.push(punctuation::contains_alphanumeric(token));
                    i += 1;
                    break;
                }
                mask.push(true);
                i += 1;
            }
        } else {
            mask.push(false);
            i += 1;
        }
    }
    mask
}
