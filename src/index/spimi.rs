// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! Boolean-mode SPIMI build: one accumulator in memory, spilled to a block
//! file every time it crosses [`super::SPIMI_THRESHOLD`] distinct
//! `(term, doc_id)` pairs, merged at the end.

use super::{merge, progress_style, read_and_tokenize, SPIMI_THRESHOLD};
use crate::block::BooleanAccumulator;
use crate::corpus;
use crate::error::Result;
use crate::types::IndexMode;
use indicatif::ProgressBar;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Build a Boolean index from a corpus directory into `dict_path` and
/// `postings_path`, spilling intermediate blocks under `work_dir`.
pub fn build_boolean_index(corpus_dir: &Path, dict_path: &Path, postings_path: &Path, work_dir: &Path) -> Result<()> {
    let docs = corpus::list_documents(corpus_dir)?;
    let bar = ProgressBar::new(docs.len() as u64);
    bar.set_style(progress_style());
    bar.set_message("indexing (boolean)");

    let mut acc = BooleanAccumulator::default();
    let mut all_doc_ids = HashSet::new();
    let mut block_paths: Vec<PathBuf> = Vec::new();
    let mut next_block = 0usize;

    for (doc_id, terms) in read_and_tokenize(&docs)? {
        all_doc_ids.insert(doc_id);
        for term in terms {
            acc.add(term, doc_id);
        }
        if acc.pair_count() >= SPIMI_THRESHOLD {
            block_paths.push(flush_block(&mut acc, work_dir, &mut next_block)?);
        }
        bar.inc(1);
    }
    if !acc.is_empty() {
        block_paths.push(flush_block(&mut acc, work_dir, &mut next_block)?);
    }
    bar.finish_with_message(format!("merging {} block(s)", block_paths.len()));

    merge::merge_blocks(
        &block_paths,
        IndexMode::Boolean,
        dict_path,
        postings_path,
        None,
        Some(all_doc_ids),
    )
}

fn flush_block(acc: &mut BooleanAccumulator, work_dir: &Path, next_block: &mut usize) -> Result<PathBuf> {
    let block = std::mem::take(acc).into_block();
    let path = work_dir.join(format!("block-{:05}.bin", *next_block));
    *next_block += 1;
    block.write_to(&path)?;
    Ok(path)
}
