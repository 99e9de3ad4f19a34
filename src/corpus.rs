// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! Corpus layout: one plain-text file per document, named with its integer
//! doc id (extension, if any, is ignored).

use crate::error::{Result, TfidxError};
use crate::types::DocId;
use std::fs;
use std::path::{Path, PathBuf};

/// List a corpus directory's documents, sorted ascending by doc id.
pub fn list_documents(dir: &Path) -> Result<Vec<(DocId, PathBuf)>> {
    let read_dir = fs::read_dir(dir).map_err(|e| {
        TfidxError::Usage(format!("cannot read corpus directory {}: {e}", dir.display()))
    })?;

    let mut docs = Vec::new();
    for entry in read_dir {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| TfidxError::Usage(format!("non-UTF-8 file name: {}", path.display())))?;
        let doc_id: u32 = stem.parse().map_err(|_| {
            TfidxError::Usage(format!(
                "corpus file '{}' is not named with an integer doc id",
                path.display()
            ))
        })?;
        docs.push((DocId(doc_id), path));
    }
    docs.sort_by_key(|(id, _)| *id);
    Ok(docs)
}

pub fn read_document(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}
