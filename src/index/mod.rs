// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! Offline index construction: SPIMI block building for both retrieval
//! modes, and the n-way merge that folds spilled blocks into the final
//! dictionary and postings files.

pub mod merge;
pub mod ranked;
pub mod spimi;

pub use merge::merge_blocks;
pub use ranked::build_ranked_index;
pub use spimi::build_boolean_index;

use crate::corpus;
use crate::error::Result;
use crate::tokenize::tokenize_document;
use crate::types::DocId;
use indicatif::ProgressStyle;
use std::path::PathBuf;

/// Pair-count threshold at which an in-memory block is spilled to disk.
pub const SPIMI_THRESHOLD: usize = 200_000;

pub(crate) fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .expect("static progress template is valid")
        .progress_chars("##-")
}

/// Read and tokenize every document, in doc_id order. Reading and tokenizing
/// one document never depends on another, so with the `parallel` feature
/// this fans out across a rayon thread pool; the SPIMI accumulation that
/// follows stays strictly sequential and single-threaded, since pair order
/// within a block (and therefore the threshold at which it spills) must stay
/// deterministic regardless of how many cores are available.
#[cfg(feature = "parallel")]
pub(crate) fn read_and_tokenize(docs: &[(DocId, PathBuf)]) -> Result<Vec<(DocId, Vec<String>)>> {
    use rayon::prelude::*;
    docs.par_iter()
        .map(|(doc_id, path)| {
            let text = corpus::read_document(path)?;
            Ok((*doc_id, tokenize_document(&text)))
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn read_and_tokenize(docs: &[(DocId, PathBuf)]) -> Result<Vec<(DocId, Vec<String>)>> {
    docs.iter()
        .map(|(doc_id, path)| {
            let text = corpus::read_document(path)?;
            Ok((*doc_id, tokenize_document(&text)))
        })
        .collect()
}
