// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! `tfidx` binary entry point: parses the CLI, dispatches to the indexer
//! or searcher, and maps errors to process exit codes.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tfidx::error::{Result, TfidxError};
use tfidx::query::{boolean, parser, ranked};
use tfidx::{index, Dictionary, IndexMode};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        log::error!("{err}");
        std::process::exit(err.exit_code());
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Index {
            mode,
            corpus_dir,
            dict_path,
            postings_path,
        } => run_index(mode, &corpus_dir, &dict_path, &postings_path),
        Command::Search {
            mode,
            dict_path,
            postings_path,
            queries_path,
            output_path,
        } => run_search(mode, &dict_path, &postings_path, &queries_path, &output_path),
    }
}

fn run_index(mode: IndexMode, corpus_dir: &Path, dict_path: &Path, postings_path: &Path) -> Result<()> {
    log::info!("building {mode} index from {}", corpus_dir.display());
    let work_dir = tempfile::tempdir()?;
    match mode {
        IndexMode::Boolean => index::build_boolean_index(corpus_dir, dict_path, postings_path, work_dir.path())?,
        IndexMode::Ranked => index::build_ranked_index(corpus_dir, dict_path, postings_path, work_dir.path())?,
    }
    log::info!("wrote {} and {}", dict_path.display(), postings_path.display());
    Ok(())
}

fn run_search(
    mode: IndexMode,
    dict_path: &Path,
    postings_path: &Path,
    queries_path: &Path,
    output_path: &Path,
) -> Result<()> {
    let dict = Dictionary::read_from(dict_path)?;
    if dict.mode != mode {
        return Err(TfidxError::Usage(format!(
            "--mode {mode} was requested but the dictionary was built in {} mode",
            dict.mode
        )));
    }

    let queries = std::fs::read_to_string(queries_path)?;
    let out_file = File::create(output_path)?;
    let mut out = BufWriter::new(out_file);

    for (lineno, line) in queries.lines().enumerate() {
        let outcome = match mode {
            IndexMode::Boolean => evaluate_boolean_line(line, &dict, postings_path),
            IndexMode::Ranked => evaluate_ranked_line(line, &dict, postings_path),
        };
        match outcome {
            Ok(Some(text)) => writeln!(out, "{text}")?,
            Ok(None) => writeln!(out)?,
            Err(TfidxError::Query) => {
                log::warn!("query on line {} failed to evaluate", lineno + 1);
                writeln!(out, "Error processing query")?;
            }
            Err(other) => return Err(other),
        }
    }
    out.flush()?;
    Ok(())
}

fn evaluate_boolean_line(line: &str, dict: &Dictionary, postings_path: &Path) -> Result<Option<String>> {
    let Some(expr) = parser::parse_boolean_query(line)? else {
        return Ok(None);
    };
    let ids = boolean::evaluate(&expr, dict, postings_path)?;
    Ok(Some(
        ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(" "),
    ))
}

fn evaluate_ranked_line(line: &str, dict: &Dictionary, postings_path: &Path) -> Result<Option<String>> {
    let Some(terms) = parser::parse_ranked_query(line) else {
        return Ok(None);
    };
    let scored = ranked::evaluate(&terms, dict, postings_path)?;
    Ok(Some(
        scored
            .iter()
            .map(|(id, _)| id.to_string())
            .collect::<Vec<_>>()
            .join(" "),
    ))
}
