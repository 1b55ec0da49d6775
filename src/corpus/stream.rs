//! Read-only view over an encoded split binary.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::corpus::vocab::CharVocab;
use crate::error::{CorpusError, Result};

/// Memory-mapped `u16` little-endian code stream, as written by the encoder
/// and consumed by downstream trainers.
pub struct EncodedView {
    data: Mmap,
}

impl EncodedView {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| CorpusError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let data = unsafe { Mmap::map(&file)? };

        if data.len() % 2 != 0 {
            return Err(CorpusError::StreamCorrupt {
                path: path.to_path_buf(),
                len: data.len(),
            });
        }

        Ok(Self { data })
    }

    /// Number of codes in the stream.
    pub fn len(&self) -> usize {
        self.data.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<u16> {
        let start = idx.checked_mul(2)?;
        let bytes = self.data.get(start..start + 2)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.data
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
    }

    /// Decode a code range back to text through the vocabulary. Codes
    /// outside the vocabulary are skipped, mirroring the encoder.
    pub fn decode(&self, vocab: &CharVocab, start: usize, len: usize) -> String {
        self.iter()
            .skip(start)
            .take(len)
            .filter_map(|id| vocab.char(id))
            .collect()
    }
}
