// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! A disk-resident inverted-index search engine: a SPIMI block indexer and
//! two query evaluators (Boolean set algebra, ranked tf-idf) sharing one
//! textual, skip-pointered posting-list codec.
//!
//! # Architecture
//!
//! ```text
//!  corpus dir                                   queries file
//!      │                                              │
//!      ▼                                              ▼
//! ┌──────────┐   blocks   ┌───────────┐         ┌────────────┐
//! │  tokenize │ ────────▶ │  index::  │         │  query::   │
//! │           │           │  spimi /  │         │  parser    │
//! │ (stem,    │           │  ranked   │         └─────┬──────┘
//! │  split)   │           └─────┬─────┘               │
//! └──────────┘                  │ merge                ▼
//!                          ┌────▼─────┐          ┌────────────┐
//!                          │  index:: │          │  query::   │
//!                          │  merge   │          │  boolean / │
//!                          └────┬─────┘          │  ranked    │
//!                               │                └─────┬──────┘
//!                               ▼                      │
//!                     ┌──────────────────┐              │
//!                     │  dictionary file  │◀─────────────┘
//!                     │  postings file    │  (codec::PostingReader)
//!                     └──────────────────┘
//! ```
//!
//! `codec` is the one module both halves share: the indexer's `merge` step
//! writes postings with [`codec::encode_posting_list`], the searcher reads
//! them back with [`codec::PostingReader`].

pub mod block;
pub mod codec;
pub mod corpus;
pub mod dictionary;
pub mod error;
pub mod index;
pub mod query;
pub mod tokenize;
pub mod types;

pub use dictionary::Dictionary;
pub use error::{Result, TfidxError};
pub use types::{DocId, IndexMode, PostingEntry};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parser;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    fn write_corpus(dir: &std::path::Path, docs: &[(u32, &str)]) {
        for (id, text) in docs {
            fs::write(dir.join(format!("{id}.txt")), text).unwrap();
        }
    }

    const DOCS: &[(u32, &str)] = &[
        (1, "the apple is red and the apple is sweet"),
        (2, "the banana is yellow"),
        (3, "the cherry is red and the cherry is small"),
        (4, "apple banana cherry all together"),
    ];

    #[test]
    fn boolean_end_to_end_and_or_not() {
        let corpus = tempdir().unwrap();
        write_corpus(corpus.path(), DOCS);
        let work = tempdir().unwrap();
        let dict_path = work.path().join("dict.bin");
        let postings_path = work.path().join("postings.txt");

        index::build_boolean_index(corpus.path(), &dict_path, &postings_path, work.path()).unwrap();
        let dict = Dictionary::read_from(&dict_path).unwrap();
        assert_eq!(dict.mode, IndexMode::Boolean);

        let run = |q: &str| -> Vec<u32> {
            let expr = parser::parse_boolean_query(q).unwrap().unwrap();
            query::boolean::evaluate(&expr, &dict, &postings_path)
                .unwrap()
                .into_iter()
                .map(|d| d.0)
                .collect()
        };

        assert_eq!(run("apple"), vec![1, 4]);
        assert_eq!(run("apple AND banana"), vec![4]);
        assert_eq!(run("apple OR banana"), vec![1, 2, 4]);
        assert_eq!(run("apple AND NOT banana"), vec![1]);
        assert_eq!(run("grape"), Vec::<u32>::new());
    }

    #[test]
    fn ranked_end_to_end_orders_by_score() {
        let corpus = tempdir().unwrap();
        write_corpus(corpus.path(), DOCS);
        let work = tempdir().unwrap();
        let dict_path = work.path().join("dict.bin");
        let postings_path = work.path().join("postings.txt");

        index::build_ranked_index(corpus.path(), &dict_path, &postings_path, work.path()).unwrap();
        let dict = Dictionary::read_from(&dict_path).unwrap();
        assert_eq!(dict.mode, IndexMode::Ranked);

        let terms = parser::parse_ranked_query("apple").unwrap();
        let scored = query::ranked::evaluate(&terms, &dict, &postings_path).unwrap();
        let ids: Vec<u32> = scored.iter().map(|(d, _)| d.0).collect();
        assert!(ids.contains(&1));
        assert!(ids.contains(&4));
        assert!(!ids.contains(&2));
        // doc 1 repeats "apple" twice, so it should outscore doc 4's single mention.
        assert_eq!(ids[0], 1);

        for window in scored.windows(2) {
            assert!(window[0].1 >= window[1].1);
        }
    }

    #[test]
    fn empty_query_line_is_none_not_an_error() {
        assert_eq!(parser::parse_boolean_query("").unwrap(), None);
        assert_eq!(parser::parse_ranked_query(""), None);
    }

    #[test]
    fn dictionary_records_doc_frequencies_consistent_with_corpus() {
        let corpus = tempdir().unwrap();
        write_corpus(corpus.path(), DOCS);
        let work = tempdir().unwrap();
        let dict_path = work.path().join("dict.bin");
        let postings_path = work.path().join("postings.txt");
        index::build_boolean_index(corpus.path(), &dict_path, &postings_path, work.path()).unwrap();
        let dict = Dictionary::read_from(&dict_path).unwrap();

        let bytes = fs::read(&postings_path).unwrap();
        let mut freqs: HashMap<&str, u32> = HashMap::new();
        for term in ["appl", "banana", "cherri", "red"] {
            if let Some(offset) = dict.offset(term) {
                let reader = codec::PostingReader::open(std::io::Cursor::new(bytes.clone()), offset).unwrap();
                freqs.insert(term, reader.doc_freq());
            }
        }
        assert_eq!(freqs.get("appl"), Some(&2));
        assert_eq!(freqs.get("banana"), Some(&2));
    }
}
