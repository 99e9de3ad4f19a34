// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! Boolean set-algebra evaluator.
//!
//! Every node resolves to a strictly ascending, duplicate-free `Vec<DocId>`
//! - `AND` intersects (shortest operand first, skip-accelerated), `OR`
//! merges (linear, no skips), `NOT` takes the corpus-wide complement.
//! Intermediate results are ordinary in-memory vectors, so there is no
//! byte-offset skip delta to carry between operations; [`skip_target`]
//! recomputes the same `floor(sqrt(len))` placement the codec uses on disk
//! so every intersection gets the identical jump pattern a freshly-decoded
//! posting list would, without needing to persist and re-stamp a `skip`
//! field after each op.

use crate::codec::PostingReader;
use crate::dictionary::Dictionary;
use crate::error::{Result, TfidxError};
use crate::query::parser::BoolExpr;
use crate::types::{skip_interval, DocId};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// Evaluate a Boolean expression against the index at `postings_path`,
/// returning matching doc ids in ascending order.
pub fn evaluate(expr: &BoolExpr, dict: &Dictionary, postings_path: &Path) -> Result<Vec<DocId>> {
    resolve(expr, dict, postings_path)
}

fn resolve(expr: &BoolExpr, dict: &Dictionary, postings_path: &Path) -> Result<Vec<DocId>> {
    match expr {
        BoolExpr::Term(term) => load_term(term, dict, postings_path),
        BoolExpr::Not(inner) => {
            let resolved = resolve(inner, dict, postings_path)?;
            let excluded: HashSet<DocId> = resolved.into_iter().collect();
            let mut result: Vec<DocId> = dict
                .corpus_doc_ids()?
                .iter()
                .copied()
                .filter(|id| !excluded.contains(id))
                .collect();
            result.sort();
            Ok(result)
        }
        BoolExpr::And(children) => {
            if children.is_empty() {
                return Err(TfidxError::Query);
            }
            let mut lists: Vec<Vec<DocId>> = children
                .iter()
                .map(|c| resolve(c, dict, postings_path))
                .collect::<Result<_>>()?;
            lists.sort_by_key(|l| l.len());
            let mut iter = lists.into_iter();
            let mut acc = iter.next().expect("checked non-empty above");
            for list in iter {
                acc = intersect(&acc, &list);
            }
            Ok(acc)
        }
        BoolExpr::Or(children) => {
            if children.is_empty() {
                return Err(TfidxError::Query);
            }
            let mut acc: Vec<DocId> = Vec::new();
            for child in children {
                let list = resolve(child, dict, postings_path)?;
                acc = union(&acc, &list);
            }
            Ok(acc)
        }
    }
}

/// A missing term (out of vocabulary) resolves to an empty list rather
/// than an error - the enclosing AND/OR/NOT still evaluates.
fn load_term(term: &str, dict: &Dictionary, postings_path: &Path) -> Result<Vec<DocId>> {
    let Some(offset) = dict.offset(term) else {
        return Ok(Vec::new());
    };
    let file = File::open(postings_path)?;
    let mut reader = PostingReader::open(file, offset)?;
    Ok(reader.read_all()?.into_iter().map(|e| e.doc_id).collect())
}

/// The index a skip at position `i` in a list of length `len` jumps to,
/// or `None` if `i` does not carry one - the same placement rule the
/// codec uses when serializing, expressed over in-memory positions
/// instead of on-disk byte deltas.
fn skip_target(len: usize, i: usize) -> Option<usize> {
    if len < 4 {
        return None;
    }
    let k = skip_interval(len);
    if k == 0 || i % k != 0 {
        return None;
    }
    let last_allowed = (len as isize - 1) - k as isize;
    if last_allowed < 0 || i as isize > last_allowed {
        return None;
    }
    Some(i + k)
}

fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                if let Some(target) = skip_target(a.len(), i) {
                    if a[target] <= b[j] {
                        i = target;
                        continue;
                    }
                }
                i += 1;
            }
            Ordering::Greater => {
                if let Some(target) = skip_target(b.len(), j) {
                    if b[target] <= a[i] {
                        j = target;
                        continue;
                    }
                }
                j += 1;
            }
        }
    }
    out
}

fn union(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_matches_brute_force() {
        let a = [1u32, 2, 4, 8, 16, 20, 21, 22].map(DocId);
        let b = [2u32, 4, 8, 9, 20, 22, 23].map(DocId);
        let expected: Vec<DocId> = a.iter().filter(|x| b.contains(x)).copied().collect();
        assert_eq!(intersect(&a, &b), expected);
    }

    #[test]
    fn union_dedupes_and_sorts() {
        let a = [1u32, 3, 5].map(DocId);
        let b = [2u32, 3, 6].map(DocId);
        assert_eq!(union(&a, &b), vec![DocId(1), DocId(2), DocId(3), DocId(5), DocId(6)]);
    }

    #[test]
    fn double_negation_is_identity_over_the_corpus() {
        let all: HashSet<DocId> = (1..=9).map(DocId).collect();
        let inner: Vec<DocId> = vec![DocId(2), DocId(5)];
        let excluded: HashSet<DocId> = inner.iter().copied().collect();
        let not_inner: Vec<DocId> = {
            let mut v: Vec<DocId> = all.iter().copied().filter(|id| !excluded.contains(id)).collect();
            v.sort();
            v
        };
        let not_excluded: HashSet<DocId> = not_inner.iter().copied().collect();
        let mut not_not_inner: Vec<DocId> = all.iter().copied().filter(|id| !not_excluded.contains(id)).collect();
        not_not_inner.sort();
        assert_eq!(not_not_inner, inner);
    }
}
