// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! Property tests for the posting-list codec: round-tripping and the skip
//! placement invariant, across list shapes proptest generates rather than
//! the handful of fixed examples in `src/codec.rs`.

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::io::Cursor;
use tfidx::codec::{encode_posting_list, PostingReader};
use tfidx::types::{skip_interval, DocId, PostingEntry};

fn boolean_list(mut ids: Vec<u32>) -> Vec<PostingEntry> {
    ids.sort_unstable();
    ids.dedup();
    ids.into_iter().map(|d| PostingEntry::boolean(DocId(d))).collect()
}

proptest! {
    #[test]
    fn boolean_round_trip_preserves_doc_ids(ids in prop::collection::vec(0u32..10_000, 0..200)) {
        let entries = boolean_list(ids);
        let text = encode_posting_list(&entries, false, true);
        let mut reader = PostingReader::open(Cursor::new(text.into_bytes()), 0).unwrap();
        prop_assert_eq!(reader.doc_freq() as usize, entries.len());
        let decoded = reader.read_all().unwrap();
        prop_assert_eq!(decoded, entries);
    }

    #[test]
    fn ranked_round_trip_preserves_term_freq(
        pairs in prop::collection::vec((0u32..500, 1u32..50), 0..150)
    ) {
        let unique_ids: BTreeSet<u32> = pairs.iter().map(|&(d, _)| d).collect();
        prop_assume!(unique_ids.len() == pairs.len());

        let mut entries: Vec<PostingEntry> = pairs
            .into_iter()
            .map(|(d, tf)| PostingEntry::ranked(DocId(d), tf))
            .collect();
        entries.sort_by(|a, b| b.term_freq.cmp(&a.term_freq).then(a.doc_id.cmp(&b.doc_id)));

        let text = encode_posting_list(&entries, true, true);
        let mut reader = PostingReader::open(Cursor::new(text.into_bytes()), 0).unwrap();
        let decoded = reader.read_all().unwrap();
        prop_assert_eq!(decoded.len(), entries.len());
        for (d, e) in decoded.iter().zip(entries.iter()) {
            prop_assert_eq!(d.doc_id, e.doc_id);
            prop_assert_eq!(d.term_freq, e.term_freq);
        }
    }

    #[test]
    fn a_skip_always_lands_before_or_at_the_next_skip_bearing_entry(
        ids in prop::collection::vec(0u32..10_000, 4..300)
    ) {
        let entries = boolean_list(ids);
        if entries.len() < 4 {
            return Ok(());
        }
        let text = encode_posting_list(&entries, false, true);
        let mut reader = PostingReader::open(Cursor::new(text.into_bytes()), 0).unwrap();
        let decoded = reader.read_all().unwrap();

        let k = skip_interval(decoded.len());
        let mut i = 0;
        while i < decoded.len() {
            if let Some(delta) = decoded[i].skip {
                // Re-open fresh and jump with the recorded delta from just past entry i.
                let text2 = encode_posting_list(&entries, false, true);
                let mut r2 = PostingReader::open(Cursor::new(text2.into_bytes()), 0).unwrap();
                for _ in 0..=i {
                    r2.read_entry().unwrap();
                }
                r2.skip(delta).unwrap();
                let landed = r2.read_entry().unwrap();
                prop_assert_eq!(landed.doc_id, decoded[i + k].doc_id);
            }
            i += 1;
        }
    }
}
