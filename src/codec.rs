// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! Posting-list text codec: a self-delimiting ASCII format with in-stream
//! document-frequency headers, optional per-entry term frequencies, and
//! byte-delta skip pointers.
//!
//! ```text
//! <doc_freq> "$" entry ("," entry)* "|"
//! entry  := doc_id ("*" term_freq)? ("^" skip_delta)?
//! ```
//!
//! Byte offsets are used everywhere instead of character offsets, so a
//! [`PostingReader`] stays correct even if a stray non-ASCII byte ever turns
//! up in a term. The reader is generic over `Read + Seek` so the same
//! implementation serves an in-memory block during merge and a real file
//! handle during search.

use crate::error::{Result, TfidxError};
use crate::types::{skip_interval, DocId, PostingEntry};
use std::collections::HashMap;
use std::io::{self, Read, Seek, SeekFrom};

/// Compute which positions in a list of length `len` carry a skip pointer,
/// per spec.md §4.1: multiples of `k = floor(sqrt(len))` at indices
/// `0, k, 2k, ...` up to and including the largest such index `L <= (len-1)-k`.
fn skip_positions(len: usize, write_skips: bool) -> Option<(usize, Vec<usize>)> {
    if !write_skips || len < 4 {
        return None;
    }
    let k = skip_interval(len);
    if k == 0 {
        return None;
    }
    let last_allowed = (len as isize - 1) - k as isize;
    if last_allowed < 0 {
        return None;
    }
    let last_allowed = last_allowed as usize;
    let mut positions = Vec::new();
    let mut i = 0;
    while i <= last_allowed {
        positions.push(i);
        i += k;
    }
    Some((k, positions))
}

fn render_plain(entry: &PostingEntry, with_term_freq: bool) -> String {
    if with_term_freq {
        format!("{}*{}", entry.doc_id.0, entry.term_freq)
    } else {
        entry.doc_id.0.to_string()
    }
}

/// Serialize a posting list. `entries` must already be in the order the
/// build mode requires (ranked: descending term_freq, ties ascending
/// doc_id; Boolean: ascending doc_id, deduplicated) - the codec does not
/// resort, it only frames and places skips.
pub fn encode_posting_list(entries: &[PostingEntry], with_term_freq: bool, write_skips: bool) -> String {
    let len = entries.len();
    let mut out = String::with_capacity(len * 8 + 8);
    out.push_str(&len.to_string());
    out.push('$');

    if len == 0 {
        out.push('|');
        return out;
    }

    let plain: Vec<String> = entries.iter().map(|e| render_plain(e, with_term_freq)).collect();

    // prefix[j] = total serialized bytes (including trailing comma) of
    // plain entries 0..j. delta(i) for a skip at i targeting i+k is
    // prefix[i+k] - prefix[i+1]: the bytes of everything strictly between
    // the end of entry i's separator and the start of entry i+k. This is
    // the same number the right-to-left accumulation in spec.md produces,
    // computed instead via a left-to-right prefix sum.
    let mut prefix = vec![0usize; len + 1];
    for (j, p) in plain.iter().enumerate() {
        prefix[j + 1] = prefix[j] + p.len() + 1;
    }

    let skip_at: HashMap<usize, usize> = match skip_positions(len, write_skips) {
        Some((k, positions)) => positions
            .into_iter()
            .map(|i| (i, prefix[i + k] - prefix[i + 1]))
            .collect(),
        None => HashMap::new(),
    };

    for (i, p) in plain.iter().enumerate() {
        out.push_str(p);
        if let Some(delta) = skip_at.get(&i) {
            out.push('^');
            out.push_str(&delta.to_string());
        }
        out.push(if i + 1 == len { '|' } else { ',' });
    }
    out
}

/// Read ASCII decimal digits until a non-digit byte, returning the parsed
/// value and the delimiter byte (already consumed from `reader`).
fn read_uint_until_delim<R: Read>(reader: &mut R, cursor: &mut u64) -> Result<(u64, u8)> {
    let mut val: u64 = 0;
    let mut saw_digit = false;
    loop {
        let mut b = [0u8; 1];
        reader.read_exact(&mut b).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                TfidxError::Codec("truncated posting list".to_string())
            } else {
                TfidxError::Io(e)
            }
        })?;
        *cursor += 1;
        let byte = b[0];
        if byte.is_ascii_digit() {
            saw_digit = true;
            val = val * 10 + u64::from(byte - b'0');
        } else {
            if !saw_digit {
                return Err(TfidxError::Codec(format!(
                    "expected decimal digits, got byte {byte:#x}"
                )));
            }
            return Ok((val, byte));
        }
    }
}

/// The state machine from spec.md §4.6: `Opened -> HeaderRead -> EntryRead*
/// -> Done`. Generic over `Read + Seek` so it works equally over a file
/// handle (search time) or an in-memory cursor over a fully-loaded block
/// (merge time).
pub struct PostingReader<R> {
    reader: R,
    cursor: u64,
    doc_freq: u32,
    remaining: u32,
    done: bool,
}

impl<R: Read + Seek> PostingReader<R> {
    /// Seek to `offset` and read the document-frequency header.
    pub fn open(mut reader: R, offset: u64) -> Result<Self> {
        reader.seek(SeekFrom::Start(offset))?;
        let mut cursor = offset;
        let (doc_freq, delim) = read_uint_until_delim(&mut reader, &mut cursor)?;
        if delim != b'$' {
            return Err(TfidxError::Codec(format!(
                "expected '$' after doc_freq header, got {:#x}",
                delim
            )));
        }
        let doc_freq = doc_freq as u32;
        let done = doc_freq == 0;
        if done {
            // An empty list is still terminated by '|'.
            let mut b = [0u8; 1];
            reader.read_exact(&mut b)?;
            cursor += 1;
            if b[0] != b'|' {
                return Err(TfidxError::Codec(
                    "expected '|' terminator for empty posting list".to_string(),
                ));
            }
        }
        Ok(PostingReader {
            reader,
            cursor,
            doc_freq,
            remaining: doc_freq,
            done,
        })
    }

    pub fn doc_freq(&self) -> u32 {
        self.doc_freq
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Read the next entry. Fails if the list is already exhausted.
    pub fn read_entry(&mut self) -> Result<PostingEntry> {
        if self.done {
            return Err(TfidxError::Codec(
                "read_entry called after posting list exhausted".to_string(),
            ));
        }

        let (doc_id, mut delim) = read_uint_until_delim(&mut self.reader, &mut self.cursor)?;
        let mut term_freq = 1u64;
        if delim == b'*' {
            let (tf, d) = read_uint_until_delim(&mut self.reader, &mut self.cursor)?;
            term_freq = tf;
            delim = d;
        }
        let mut skip = None;
        if delim == b'^' {
            let (sk, d) = read_uint_until_delim(&mut self.reader, &mut self.cursor)?;
            skip = Some(sk as u32);
            delim = d;
        }

        self.remaining -= 1;
        match delim {
            b',' => {
                if self.remaining == 0 {
                    return Err(TfidxError::Codec(
                        "posting list ended with ',' instead of '|'".to_string(),
                    ));
                }
            }
            b'|' => {
                self.done = true;
                if self.remaining != 0 {
                    return Err(TfidxError::Codec(
                        "posting list terminated early with '|'".to_string(),
                    ));
                }
            }
            other => {
                return Err(TfidxError::Codec(format!(
                    "expected ',' or '|' after entry, got {other:#x}"
                )))
            }
        }

        Ok(PostingEntry {
            doc_id: DocId(doc_id as u32),
            term_freq: term_freq as u32,
            skip,
        })
    }

    /// Advance the logical cursor by `n` bytes - used to consume a
    /// recorded `skip_delta` and land on the next skip-bearing entry.
    pub fn skip(&mut self, n: u32) -> Result<()> {
        self.cursor += u64::from(n);
        self.reader.seek(SeekFrom::Start(self.cursor))?;
        Ok(())
    }

    /// Read every remaining entry, fully materializing the list.
    pub fn read_all(&mut self) -> Result<Vec<PostingEntry>> {
        let mut out = Vec::with_capacity(self.remaining as usize);
        while !self.is_done() {
            out.push(self.read_entry()?);
        }
        Ok(out)
    }
}

/// Header-only read: the document frequency for a term, or `0` if absent
/// from the dictionary. Used by the Boolean query parser to annotate each
/// operand (spec.md §4.4) without materializing the posting list.
pub fn peek_doc_freq<R: Read + Seek>(reader: R, offset: u64) -> Result<u32> {
    Ok(PostingReader::open(reader, offset)?.doc_freq())
}
