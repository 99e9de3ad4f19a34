// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! The dictionary file: term -> byte-offset map, packaged with whichever
//! side-table the build mode needs (a document-length map for ranked
//! retrieval, a corpus-wide doc-id set for Boolean NOT), plus the
//! [`IndexMode`] tag that tells the searcher which evaluator to run.
//!
//! Serialized with `bincode` - this is the one on-disk format that isn't the
//! textual, byte-addressable grammar postings use, since nothing queries
//! into the dictionary file by byte offset the way it does for postings;
//! `bincode` gets us there without hand-rolling a length-prefixed framing
//! of our own.

use crate::error::{Result, TfidxError};
use crate::types::{DocId, IndexMode};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Document lengths for the ranked model: `sqrt(sum((1 + log10 tf)^2))`
/// per document, used to normalize cosine scores.
pub type LengthMap = HashMap<DocId, f64>;

#[derive(Debug, Serialize, Deserialize)]
pub struct Dictionary {
    pub mode: IndexMode,
    /// term -> absolute byte offset of its posting list in the postings file.
    pub offsets: HashMap<String, u64>,
    /// Ranked mode only: document lengths for score normalization.
    pub lengths: Option<LengthMap>,
    /// Boolean mode only: every doc id in the corpus, for NOT.
    pub all_doc_ids: Option<HashSet<DocId>>,
}

impl Dictionary {
    pub fn new_ranked(offsets: HashMap<String, u64>, lengths: LengthMap) -> Self {
        Dictionary {
            mode: IndexMode::Ranked,
            offsets,
            lengths: Some(lengths),
            all_doc_ids: None,
        }
    }

    pub fn new_boolean(offsets: HashMap<String, u64>, all_doc_ids: HashSet<DocId>) -> Self {
        Dictionary {
            mode: IndexMode::Boolean,
            offsets,
            lengths: None,
            all_doc_ids: Some(all_doc_ids),
        }
    }

    pub fn offset(&self, term: &str) -> Option<u64> {
        self.offsets.get(term).copied()
    }

    pub fn doc_freq_count(&self) -> usize {
        self.offsets.len()
    }

    /// Length of `doc`'s lnc-weighted vector. Ranked mode only.
    pub fn length_of(&self, doc: DocId) -> Result<f64> {
        self.lengths
            .as_ref()
            .and_then(|m| m.get(&doc))
            .copied()
            .ok_or_else(|| TfidxError::Codec(format!("no recorded length for doc {doc}")))
    }

    pub fn corpus_doc_ids(&self) -> Result<&HashSet<DocId>> {
        self.all_doc_ids
            .as_ref()
            .ok_or_else(|| TfidxError::Codec("dictionary has no corpus-wide doc id set".to_string()))
    }

    pub fn corpus_size(&self) -> usize {
        match &self.all_doc_ids {
            Some(ids) => ids.len(),
            None => self.lengths.as_ref().map_or(0, |m| m.len()),
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)
            .map_err(|e| TfidxError::Codec(format!("failed to write dictionary: {e}")))
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        bincode::deserialize_from(reader)
            .map_err(|e| TfidxError::Codec(format!("failed to read dictionary: {e}")))
    }
}
