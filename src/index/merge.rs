// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! N-way merge of spilled blocks into the final dictionary and postings
//! files.
//!
//! Each block already fits comfortably in memory - that's the point of the
//! SPIMI spill threshold - so the merge loads every block's term map once
//! and walks all of them in lockstep by ascending term, the classic
//! multi-way merge used to fold sorted runs together. Boolean postings
//! union and re-sort (no doc id can appear in two blocks, since a document
//! is only ever accumulated into the block that is open while it is being
//! read); ranked postings concatenate and re-sort by descending term
//! frequency. Every merged list is re-serialized with skip pointers,
//! regardless of whether the blocks that fed it had any.

use crate::block::{Block, BlockPosting};
use crate::codec::encode_posting_list;
use crate::dictionary::{Dictionary, LengthMap};
use crate::error::Result;
use crate::types::{DocId, IndexMode, PostingEntry};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Merge `block_paths` into `dict_path`/`postings_path` and delete the
/// block files afterward. `lengths` is required for [`IndexMode::Ranked`],
/// `all_doc_ids` for [`IndexMode::Boolean`].
pub fn merge_blocks(
    block_paths: &[PathBuf],
    mode: IndexMode,
    dict_path: &Path,
    postings_path: &Path,
    lengths: Option<LengthMap>,
    all_doc_ids: Option<HashSet<DocId>>,
) -> Result<()> {
    let blocks: Vec<Block> = block_paths.iter().map(|p| Block::read_from(p)).collect::<Result<_>>()?;

    let with_term_freq = matches!(mode, IndexMode::Ranked);
    let mut offsets: HashMap<String, u64> = HashMap::new();
    let mut byte_offset: u64 = 0;

    let postings_file = File::create(postings_path)?;
    let mut writer = BufWriter::new(postings_file);

    let mut cursors: Vec<_> = blocks.iter().map(|b| b.terms.iter().peekable()).collect();

    loop {
        let next_term = cursors
            .iter_mut()
            .filter_map(|it| it.peek().map(|(term, _)| (*term).clone()))
            .min();
        let Some(term) = next_term else { break };

        let mut combined: Vec<BlockPosting> = Vec::new();
        for it in cursors.iter_mut() {
            let matches = it.peek().map(|(t, _)| t.as_str() == term.as_str()).unwrap_or(false);
            if matches {
                let (_, postings) = it.next().expect("peeked Some above");
                combined.extend_from_slice(postings);
            }
        }

        let entries: Vec<PostingEntry> = match mode {
            IndexMode::Boolean => {
                combined.sort_by_key(|p| p.doc_id);
                combined.dedup_by_key(|p| p.doc_id);
                combined.into_iter().map(|p| PostingEntry::boolean(p.doc_id)).collect()
            }
            IndexMode::Ranked => {
                combined.sort_by(|a, b| b.term_freq.cmp(&a.term_freq).then(a.doc_id.cmp(&b.doc_id)));
                combined.into_iter().map(|p| PostingEntry::ranked(p.doc_id, p.term_freq)).collect()
            }
        };

        let text = encode_posting_list(&entries, with_term_freq, true);
        offsets.insert(term, byte_offset);
        writer.write_all(text.as_bytes())?;
        byte_offset += text.len() as u64;
    }
    writer.flush()?;

    let dict = match mode {
        IndexMode::Ranked => Dictionary::new_ranked(offsets, lengths.unwrap_or_default()),
        IndexMode::Boolean => Dictionary::new_boolean(offsets, all_doc_ids.unwrap_or_default()),
    };
    dict.write_to(dict_path)?;

    for path in block_paths {
        let _ = std::fs::remove_file(path);
    }

    Ok(())
}
