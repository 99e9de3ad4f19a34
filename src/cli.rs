// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! Command-line surface: `tfidx index` builds a dictionary and postings
//! file from a corpus directory; `tfidx search` evaluates a queries file
//! against them and writes one result line per query.

use crate::types::IndexMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tfidx", version, about = "Disk-resident inverted-index search engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Raise logging verbosity; repeat for more detail (-v, -vv).
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a dictionary and postings file from a corpus directory.
    Index {
        /// Which retrieval model to build for.
        #[arg(short = 'm', long)]
        mode: IndexMode,

        /// Corpus directory: one file per document, named with its integer doc id.
        #[arg(short = 'i', long = "input", value_name = "DIR")]
        corpus_dir: PathBuf,

        /// Output dictionary file path.
        #[arg(short = 'd', long = "dict", value_name = "FILE")]
        dict_path: PathBuf,

        /// Output postings file path.
        #[arg(short = 'p', long = "postings", value_name = "FILE")]
        postings_path: PathBuf,
    },

    /// Evaluate queries against a previously built index.
    Search {
        /// Which retrieval model to evaluate with; must match the index's build mode.
        #[arg(short = 'm', long)]
        mode: IndexMode,

        /// Dictionary file produced by `tfidx index`.
        #[arg(short = 'd', long = "dict", value_name = "FILE")]
        dict_path: PathBuf,

        /// Postings file produced by `tfidx index`.
        #[arg(short = 'p', long = "postings", value_name = "FILE")]
        postings_path: PathBuf,

        /// Queries file, one query per line.
        #[arg(short = 'q', long = "queries", value_name = "FILE")]
        queries_path: PathBuf,

        /// Results file, one result line per query line.
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output_path: PathBuf,
    },
}
