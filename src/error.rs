// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! The error kinds a build or a query can fail with.
//!
//! `Usage` and `Io`/`Codec` are fatal for the whole run (the CLI exits
//! non-zero). `Query` is recovered at the per-query boundary: the searcher
//! catches it, writes the literal line `Error processing query`, and moves
//! on to the next query. An empty query line is not an error at all - it is
//! handled upstream as `None` from the parser, never as a `TfidxError`.

use std::io;

/// Unified error type for indexing and search.
#[derive(Debug, thiserror::Error)]
pub enum TfidxError {
    /// Malformed or missing CLI flags. Callers should exit with code 2.
    #[error("usage error: {0}")]
    Usage(String),

    /// File missing, unreadable, or truncated.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed posting-list header, entry, or terminator.
    #[error("malformed index data: {0}")]
    Codec(String),

    /// Raised while evaluating a single query; recovered at the query
    /// boundary rather than aborting the whole search run.
    #[error("error processing query")]
    Query,
}

pub type Result<T> = std::result::Result<T, TfidxError>;

impl TfidxError {
    /// Process exit code the CLI should use for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TfidxError::Usage(_) => 2,
            _ => 1,
        }
    }
}
