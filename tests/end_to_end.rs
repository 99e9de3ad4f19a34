// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! End-to-end scenarios driving the public library API the way the `tfidx`
//! binary does: build an index from a small corpus, then run a handful of
//! queries against it.

use std::collections::HashSet;
use std::fs;
use tempfile::tempdir;
use tfidx::query::{boolean, parser, ranked};
use tfidx::{index, Dictionary, DocId, IndexMode};

const CORPUS: &[(u32, &str)] = &[
    (1, "fruit bats eat fruit at night"),
    (2, "vampire bats drink blood at night"),
    (3, "fruit bats and vampire bats are both bats"),
    (4, "the night is dark and full of terrors"),
];

fn build(dir: &std::path::Path, mode: IndexMode) -> (Dictionary, std::path::PathBuf) {
    let work = tempdir().unwrap();
    let dict_path = work.path().join("dict.bin");
    let postings_path = work.path().join("postings.txt");
    for (id, text) in CORPUS {
        fs::write(dir.join(format!("{id}.txt")), text).unwrap();
    }
    match mode {
        IndexMode::Boolean => index::build_boolean_index(dir, &dict_path, &postings_path, work.path()).unwrap(),
        IndexMode::Ranked => index::build_ranked_index(dir, &dict_path, &postings_path, work.path()).unwrap(),
    }
    std::mem::forget(work);
    (Dictionary::read_from(&dict_path).unwrap(), postings_path)
}

#[test]
fn boolean_scenario_matches_expected_sets() {
    let corpus = tempdir().unwrap();
    let (dict, postings_path) = build(corpus.path(), IndexMode::Boolean);

    let run = |q: &str| -> HashSet<u32> {
        let expr = parser::parse_boolean_query(q).unwrap().unwrap();
        boolean::evaluate(&expr, &dict, &postings_path)
            .unwrap()
            .into_iter()
            .map(|d| d.0)
            .collect()
    };

    assert_eq!(run("bats"), HashSet::from([1, 2, 3]));
    assert_eq!(run("bats AND night"), HashSet::from([1, 2]));
    assert_eq!(run("bats AND NOT night"), HashSet::from([3]));
    assert_eq!(run("bats OR terrors"), HashSet::from([1, 2, 3, 4]));
    assert_eq!(run("bats AND vampire AND fruit"), HashSet::from([3]));
}

#[test]
fn ranked_scenario_favors_documents_mentioning_the_term_more() {
    let corpus = tempdir().unwrap();
    let (dict, postings_path) = build(corpus.path(), IndexMode::Ranked);

    let terms = parser::parse_ranked_query("bats").unwrap();
    let scored = ranked::evaluate(&terms, &dict, &postings_path).unwrap();
    let ranking: Vec<u32> = scored.iter().map(|(d, _)| d.0).collect();

    // doc 3 mentions "bats" three times, doc 1/2 once each, doc 4 never.
    assert_eq!(ranking[0], 3);
    assert!(!ranking.contains(&4));
    assert!(scored.len() <= 10);
}

#[test]
fn empty_and_out_of_vocabulary_queries_behave() {
    let corpus = tempdir().unwrap();
    let (dict, postings_path) = build(corpus.path(), IndexMode::Boolean);

    assert_eq!(parser::parse_boolean_query("   ").unwrap(), None);

    let expr = parser::parse_boolean_query("dragons").unwrap().unwrap();
    let result = boolean::evaluate(&expr, &dict, &postings_path).unwrap();
    assert!(result.is_empty());

    let expr = parser::parse_boolean_query("dragons OR bats").unwrap().unwrap();
    let result: Vec<u32> = boolean::evaluate(&expr, &dict, &postings_path)
        .unwrap()
        .into_iter()
        .map(|d| d.0)
        .collect();
    assert_eq!(result, vec![1, 2, 3]);
}

#[test]
fn not_of_not_returns_the_original_set() {
    let corpus = tempdir().unwrap();
    let (dict, postings_path) = build(corpus.path(), IndexMode::Boolean);

    let a = parser::parse_boolean_query("bats").unwrap().unwrap();
    let a_ids = boolean::evaluate(&a, &dict, &postings_path).unwrap();

    let not_not_a = parser::parse_boolean_query("NOT NOT bats").unwrap().unwrap();
    let not_not_a_ids = boolean::evaluate(&not_not_a, &dict, &postings_path).unwrap();

    assert_eq!(a_ids, not_not_a_ids);
}

#[test]
fn dictionary_exposes_doc_ids_matching_the_corpus() {
    let corpus = tempdir().unwrap();
    let (dict, _postings_path) = build(corpus.path(), IndexMode::Boolean);
    let ids: HashSet<u32> = dict.corpus_doc_ids().unwrap().iter().map(|d| d.0).collect();
    assert_eq!(ids, HashSet::from([1, 2, 3, 4]));
    assert!(dict.corpus_doc_ids().unwrap().contains(&DocId(1)));
}
