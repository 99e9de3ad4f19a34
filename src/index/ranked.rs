// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! Ranked-mode build: a single pass over the corpus that both accumulates
//! postings (spilled the same way the Boolean build does) and computes
//! each document's lnc-weighted length for score normalization.

use super::{merge, progress_style, read_and_tokenize, SPIMI_THRESHOLD};
use crate::block::RankedAccumulator;
use crate::corpus;
use crate::dictionary::LengthMap;
use crate::error::Result;
use crate::types::IndexMode;
use indicatif::ProgressBar;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Build a ranked (tf-idf) index from a corpus directory into `dict_path`
/// and `postings_path`, spilling intermediate blocks under `work_dir`.
pub fn build_ranked_index(corpus_dir: &Path, dict_path: &Path, postings_path: &Path, work_dir: &Path) -> Result<()> {
    let docs = corpus::list_documents(corpus_dir)?;
    let bar = ProgressBar::new(docs.len() as u64);
    bar.set_style(progress_style());
    bar.set_message("indexing (ranked)");

    let mut acc = RankedAccumulator::default();
    let mut lengths: LengthMap = HashMap::new();
    let mut block_paths: Vec<PathBuf> = Vec::new();
    let mut next_block = 0usize;

    for (doc_id, terms) in read_and_tokenize(&docs)? {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for term in terms {
            *counts.entry(term).or_insert(0) += 1;
        }

        let length: f64 = counts
            .values()
            .map(|&tf| {
                let w = 1.0 + (tf as f64).log10();
                w * w
            })
            .sum::<f64>()
            .sqrt();
        lengths.insert(doc_id, length);

        for (term, tf) in counts {
            acc.add_count(term, doc_id, tf);
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
        IndexMode::Ranked,
        dict_path,
        postings_path,
        Some(lengths),
        None,
    )
}

fn flush_block(acc: &mut RankedAccumulator, work_dir: &Path, next_block: &mut usize) -> Result<PathBuf> {
    let block = std::mem::take(acc).into_block();
    let path = work_dir.join(format!("block-{:05}.bin", *next_block));
    *next_block += 1;
    block.write_to(&path)?;
    Ok(path)
}
