// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! In-memory accumulation structures for one SPIMI block, and the block
//! file format they spill to.
//!
//! Boolean and ranked builds accumulate differently (Boolean only needs a
//! deduplicated doc-id set per term; ranked needs a running `term_freq`
//! per `(term, doc)` pair) but both spill through the same on-disk shape:
//! a small bincode-framed table of `term -> Vec<(doc_id, term_freq)>`,
//! already sorted the way the final postings need to be. Keeping that
//! sorted-on-write invariant means the merge step never re-sorts, only
//! unions or concatenates.

use crate::error::{Result, TfidxError};
use crate::types::DocId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One posting inside a spilled block: a doc id and its term frequency
/// within that document (always 1 for Boolean blocks).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockPosting {
    pub doc_id: DocId,
    pub term_freq: u32,
}

/// A block file: terms in sorted order, each with its posting list already
/// ordered per the build mode (ranked: descending term_freq then ascending
/// doc_id; Boolean: ascending doc_id, deduplicated).
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Block {
    pub terms: BTreeMap<String, Vec<BlockPosting>>,
}

impl Block {
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)
            .map_err(|e| TfidxError::Codec(format!("failed to write block: {e}")))
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        bincode::deserialize_from(reader)
            .map_err(|e| TfidxError::Codec(format!("failed to read block: {e}")))
    }
}

/// Accumulator for a Boolean block: dedup doc ids per term as they arrive,
/// flush to a [`Block`] sorted ascending by doc id.
#[derive(Default)]
pub struct BooleanAccumulator {
    terms: BTreeMap<String, std::collections::BTreeSet<DocId>>,
    pair_count: usize,
}

impl BooleanAccumulator {
    pub fn add(&mut self, term: String, doc_id: DocId) {
        let set = self.terms.entry(term).or_default();
        if set.insert(doc_id) {
            self.pair_count += 1;
        }
    }

    /// Count of distinct `(term, doc_id)` pairs accumulated so far - the
    /// quantity the SPIMI threshold is measured against.
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn into_block(self) -> Block {
        let terms = self
            .terms
            .into_iter()
            .map(|(term, ids)| {
                let postings = ids
                    .into_iter()
                    .map(|doc_id| BlockPosting { doc_id, term_freq: 1 })
                    .collect();
                (term, postings)
            })
            .collect();
        Block { terms }
    }
}

/// Accumulator for a ranked block: running `term_freq` per `(term,
/// doc_id)`, flushed sorted descending by term_freq (ties ascending by
/// doc_id, via a stable sort over doc-id-ascending input).
#[derive(Default)]
pub struct RankedAccumulator {
    terms: BTreeMap<String, BTreeMap<DocId, u32>>,
    pair_count: usize,
}

impl RankedAccumulator {
    pub fn add(&mut self, term: String, doc_id: DocId) {
        self.add_count(term, doc_id, 1);
    }

    /// Add `count` occurrences of `term` in `doc_id` at once - used when the
    /// caller has already tallied a document's term frequencies rather than
    /// feeding one token at a time.
    pub fn add_count(&mut self, term: String, doc_id: DocId, count: u32) {
        let per_doc = self.terms.entry(term).or_default();
        let is_new = !per_doc.contains_key(&doc_id);
        *per_doc.entry(doc_id).or_insert(0) += count;
        if is_new {
            self.pair_count += 1;
        }
    }

    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn into_block(self) -> Block {
        let terms = self
            .terms
            .into_iter()
            .map(|(term, by_doc)| {
                // by_doc iterates ascending doc_id (BTreeMap); a stable
                // sort on descending term_freq preserves that as the tie
                // break, matching the build-time ordering rule.
                let mut postings: Vec<BlockPosting> = by_doc
                    .into_iter()
                    .map(|(doc_id, term_freq)| BlockPosting { doc_id, term_freq })
                    .collect();
                postings.sort_by(|a, b| b.term_freq.cmp(&a.term_freq));
                (term, postings)
            })
            .collect();
        Block { terms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_accumulator_dedupes_and_sorts() {
        let mut acc = BooleanAccumulator::default();
        acc.add("cat".to_string(), DocId(3));
        acc.add("cat".to_string(), DocId(1));
        acc.add("cat".to_string(), DocId(3));
        acc.add("cat".to_string(), DocId(2));
        assert_eq!(acc.pair_count(), 3);

        let block = acc.into_block();
        let postings = &block.terms["cat"];
        let ids: Vec<u32> = postings.iter().map(|p| p.doc_id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn ranked_accumulator_orders_by_descending_freq_then_doc_id() {
        let mut acc = RankedAccumulator::default();
        for _ in 0..2 {
            acc.add("dog".to_string(), DocId(5));
        }
        acc.add("dog".to_string(), DocId(1));
        for _ in 0..2 {
            acc.add("dog".to_string(), DocId(2));
        }
        assert_eq!(acc.pair_count(), 3);

        let block = acc.into_block();
        let postings = &block.terms["dog"];
        let pairs: Vec<(u32, u32)> = postings.iter().map(|p| (p.doc_id.0, p.term_freq)).collect();
        // freq 2 ties between doc 5 and doc 2; ascending doc_id tie break -> 2 before 5.
        assert_eq!(pairs, vec![(2, 2), (5, 2), (1, 1)]);
    }
}
