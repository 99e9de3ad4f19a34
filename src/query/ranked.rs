// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! Ranked (ltc.lnc tf-idf) evaluator: stream each query term's posting
//! list, accumulate a cosine-style dot product per candidate document,
//! normalize by document length, and return the top ten.

use crate::codec::PostingReader;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::types::DocId;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

const TOP_K: usize = 10;

/// Score every document sharing a term with `query_terms` and return up to
/// the top ten, ordered by descending score with ties broken by ascending
/// doc id.
pub fn evaluate(query_terms: &[String], dict: &Dictionary, postings_path: &Path) -> Result<Vec<(DocId, f64)>> {
    let n = dict.corpus_size() as f64;

    let mut query_tf: HashMap<&str, u32> = HashMap::new();
    for term in query_terms {
        *query_tf.entry(term.as_str()).or_insert(0) += 1;
    }

    let mut doc_dot: HashMap<DocId, f64> = HashMap::new();

    for (term, tf_q) in &query_tf {
        let Some(offset) = dict.offset(term) else { continue };
        let file = File::open(postings_path)?;
        let mut reader = PostingReader::open(file, offset)?;
        let df = reader.doc_freq();
        if df == 0 {
            continue;
        }

        let idf = (n / f64::from(df)).log10();
        let w_tq = (1.0 + f64::from(*tf_q).log10()) * idf;
        if w_tq == 0.0 {
            continue;
        }

        for entry in reader.read_all()? {
            let w_td = 1.0 + f64::from(entry.term_freq).log10();
            *doc_dot.entry(entry.doc_id).or_insert(0.0) += w_td * w_tq;
        }
    }

    let mut scored: Vec<(DocId, f64)> = Vec::with_capacity(doc_dot.len());
    for (doc_id, dot) in doc_dot {
        let length = dict.length_of(doc_id)?;
        let score = if length > 0.0 { dot / length } else { 0.0 };
        scored.push((doc_id, score));
    }

    // Two stable passes: ascending doc id first, then descending score, so
    // ties land in ascending doc-id order.
    scored.sort_by_key(|&(doc_id, _)| doc_id);
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(TOP_K);
    Ok(scored)
}
