//! Parallel chunked binary encoding of a split into a flat `u16` stream.
//!
//! The file list is cut into fixed contiguous chunks, one worker task per
//! chunk, each writing a `part_{id:06}.bin` temporary. Workers complete in
//! any order; the coordinator concatenates parts strictly in chunk-index
//! order, which is what makes the final stream byte-identical across runs
//! and worker-pool sizes.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corpus::vocab::CharVocab;
use crate::error::{CorpusError, Result};

/// Companion metadata for the encoded streams.
#[derive(Serialize, Deserialize, Debug)]
pub struct VocabMeta {
    pub vocab_size: usize,
    pub stoi: BTreeMap<String, u16>,
    pub itos: BTreeMap<String, String>,
    pub desc: String,
}

impl VocabMeta {
    pub fn from_vocab(vocab: &CharVocab, desc: &str) -> Self {
        let mut stoi = BTreeMap::new();
        let mut itos = BTreeMap::new();
        for (i, &ch) in vocab.chars().iter().enumerate() {
            stoi.insert(ch.to_string(), i as u16);
            itos.insert(i.to_string(), ch.to_string());
        }
        Self {
            vocab_size: vocab.len(),
            stoi,
            itos,
            desc: desc.to_string(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| CorpusError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|e| CorpusError::MetaError(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CorpusError::MetaNotFound(path.to_path_buf()));
        }
        let file = File::open(path).map_err(|e| CorpusError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| CorpusError::MetaError(e.to_string()))
    }
}

/// Buffered `u16` little-endian writer with an explicit flush threshold, so
/// a worker never holds more than `flush_codes` codes in memory.
struct CodeWriter {
    inner: BufWriter<File>,
    buf: Vec<u16>,
    flush_codes: usize,
    written: usize,
}

impl CodeWriter {
    fn create(path: &Path, flush_codes: usize) -> std::io::Result<Self> {
        Ok(Self {
            inner: BufWriter::with_capacity(1024 * 1024, File::create(path)?),
            buf: Vec::with_capacity(flush_codes.min(1 << 20)),
            flush_codes,
            written: 0,
        })
    }

    fn push(&mut self, code: u16) -> std::io::Result<()> {
        self.buf.push(code);
        if self.buf.len() >= self.flush_codes {
            self.flush_buf()?;
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> std::io::Result<()> {
        let bytes: Vec<u8> = self.buf.iter().flat_map(|c| c.to_le_bytes()).collect();
        self.inner.write_all(&bytes)?;
        self.written += self.buf.len();
        self.buf.clear();
        Ok(())
    }

    fn finish(mut self) -> std::io::Result<usize> {
        self.flush_buf()?;
        self.inner.flush()?;
        Ok(self.written)
    }
}

/// Per-split accounting.
pub struct EncodeReport {
    pub files: usize,
    pub tokens: usize,
    pub parts: usize,
}

struct ChunkResult {
    chunk_id: usize,
    part_path: PathBuf,
    tokens: usize,
}

fn part_path(tmp_dir: &Path, chunk_id: usize) -> PathBuf {
    tmp_dir.join(format!("part_{:06}.bin", chunk_id))
}

/// Encode one chunk of files into its part file. An unreadable input file
/// contributes nothing and does not abort the chunk; unknown characters are
/// dropped. Only output I/O errors propagate.
fn encode_chunk(
    chunk_id: usize,
    files: &[PathBuf],
    vocab: &CharVocab,
    tmp_dir: &Path,
    flush_codes: usize,
) -> Result<ChunkResult> {
    let out_path = part_path(tmp_dir, chunk_id);
    let mut writer = CodeWriter::create(&out_path, flush_codes).map_err(|e| {
        CorpusError::FileWrite {
            path: out_path.clone(),
            source: e,
        }
    })?;

    for path in files {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(_) => continue,
        };
        for ch in String::from_utf8_lossy(&bytes).chars() {
            if let Some(id) = vocab.id(ch) {
                writer.push(id).map_err(|e| CorpusError::FileWrite {
                    path: out_path.clone(),
                    source: e,
                })?;
            }
        }
    }

    let tokens = writer.finish().map_err(|e| CorpusError::FileWrite {
        path: out_path.clone(),
        source: e,
    })?;

    Ok(ChunkResult {
        chunk_id,
        part_path: out_path,
        tokens,
    })
}

/// Encode a split's file list into `out_bin`.
pub fn encode_split(
    files: &[PathBuf],
    vocab: &CharVocab,
    out_bin: &Path,
    tmp_dir: &Path,
    chunk_files: usize,
    flush_codes: usize,
) -> Result<EncodeReport> {
    std::fs::create_dir_all(tmp_dir)?;

    let chunk_files = chunk_files.max(1);
    let chunks: Vec<(usize, &[PathBuf])> = files.chunks(chunk_files).enumerate().collect();

    let mut results: Vec<ChunkResult> = chunks
        .par_iter()
        .map(|(chunk_id, chunk)| encode_chunk(*chunk_id, chunk, vocab, tmp_dir, flush_codes))
        .collect::<Result<Vec<_>>>()?;

    // Chunk-index order, never completion order.
    results.sort_by_key(|r| r.chunk_id);

    let out_file = File::create(out_bin).map_err(|e| CorpusError::FileWrite {
        path: out_bin.to_path_buf(),
        source: e,
    })?;
    let mut out = BufWriter::with_capacity(1024 * 1024, out_file);

    let mut tokens = 0usize;
    for part in &results {
        let mut reader = File::open(&part.part_path).map_err(|e| CorpusError::FileRead {
            path: part.part_path.clone(),
            source: e,
        })?;
        std::io::copy(&mut reader, &mut out).map_err(|e| CorpusError::FileWrite {
            path: out_bin.to_path_buf(),
            source: e,
        })?;
        tokens += part.tokens;
    }
    out.flush().map_err(|e| CorpusError::FileWrite {
        path: out_bin.to_path_buf(),
        source: e,
    })?;

    for part in &results {
        let _ = std::fs::remove_file(&part.part_path);
    }

    Ok(EncodeReport {
        files: files.len(),
        tokens,
        parts: results.len(),
    })
}
