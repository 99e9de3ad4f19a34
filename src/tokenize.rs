// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! The tokenizer collaborator: `lowercase -> word_tokenize -> porter_stem ->
//! drop punctuation-only tokens`.
//!
//! Tokenization is treated as an external collaborator rather than a
//! from-scratch NLP component, so `rust-stemmers` supplies the Porter
//! algorithm itself; word boundaries are found by splitting on
//! non-alphanumeric characters, with no locale awareness or contraction
//! handling.

use rust_stemmers::{Algorithm, Stemmer};
use std::sync::LazyLock;

static STEMMER: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Split text on non-alphanumeric boundaries, lowercasing as we go.
fn word_tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    lower
        .split(|c: char| !is_word_char(c))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

/// True if every character in `tok` is punctuation (i.e. the token is not
/// alphanumeric at all and should be dropped). Word-tokenizing on
/// alphanumeric boundaries already drops pure punctuation, but this guards
/// tokens that arrive pre-split (e.g. from a caller-supplied token stream).
fn is_punctuation_only(tok: &str) -> bool {
    !tok.chars().any(|c| c.is_alphanumeric())
}

fn stem(tok: &str) -> String {
    STEMMER.stem(tok).into_owned()
}

/// `lowercase -> word_tokenize -> porter_stem -> drop punctuation-only`,
/// applied to one document's full text. Order preserved; duplicates kept
/// (the indexer counts them).
pub fn tokenize_document(text: &str) -> Vec<String> {
    word_tokenize(text)
        .into_iter()
        .filter(|t| !is_punctuation_only(t))
        .map(|t| stem(&t))
        .collect()
}

/// Tokenize a free-text ranked query exactly as if it were a document: the
/// output is a multiset (duplicates preserved) since within-query term
/// frequency matters for the ltc weight.
pub fn tokenize_query(text: &str) -> Vec<String> {
    tokenize_document(text)
}

/// Case-fold and stem a single Boolean-query operand.
pub fn clean_operand(operand: &str) -> String {
    stem(&operand.to_lowercase())
}
