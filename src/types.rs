// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the on-disk index: document ids, posting entries, and
//! the two build modes.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐     ┌────────────┐     ┌───────────────┐
//! │  tokenize  │────▶│   index    │────▶│   dictionary  │
//! │ (terms)    │     │ (spimi,    │     │  + postings   │
//! │            │     │  merge)    │     │  files        │
//! └────────────┘     └────────────┘     └───────┬───────┘
//!                                                │
//!                                                ▼
//!                                          ┌────────────┐
//!                                          │   query    │
//!                                          │ (parser,   │
//!                                          │  boolean,  │
//!                                          │  ranked)   │
//!                                          └────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A document id, parsed from a corpus file's name. Positive and unique
/// within a corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub u32);

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DocId {
    fn from(v: u32) -> Self {
        DocId(v)
    }
}

/// Which build mode produced (or should be queried against) an index.
///
/// Stored in the dictionary file so the searcher knows, without being told
/// again on the command line, whether posting entries carry a `term_freq`
/// field and which evaluator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexMode {
    Boolean,
    Ranked,
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexMode::Boolean => write!(f, "boolean"),
            IndexMode::Ranked => write!(f, "ranked"),
        }
    }
}

impl std::str::FromStr for IndexMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(IndexMode::Boolean),
            "ranked" => Ok(IndexMode::Ranked),
            other => Err(format!("unknown mode '{other}', expected boolean|ranked")),
        }
    }
}

/// A single posting entry before serialization: a document id, a term
/// frequency (meaningless and fixed to 1 for Boolean lists), and an
/// optional skip delta assigned during encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingEntry {
    pub doc_id: DocId,
    pub term_freq: u32,
    /// Byte distance to a later entry that also carries a skip, or `None`.
    pub skip: Option<u32>,
}

impl PostingEntry {
    pub fn boolean(doc_id: DocId) -> Self {
        PostingEntry {
            doc_id,
            term_freq: 1,
            skip: None,
        }
    }

    pub fn ranked(doc_id: DocId, term_freq: u32) -> Self {
        PostingEntry {
            doc_id,
            term_freq,
            skip: None,
        }
    }
}

/// The skip interval for a posting list of length `len`, `k = floor(sqrt(len))`.
pub fn skip_interval(len: usize) -> usize {
    (len as f64).sqrt().floor() as usize
}
