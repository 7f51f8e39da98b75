//! Compressed chunk collection and assembly
//!
//! The encoder emits opaque byte chunks whose order is significant. The
//! assembler collects them as they are emitted and concatenates them into
//! one contiguous output buffer: same order, no gaps, total length equal
//! to the sum of chunk lengths.

/// Collects compressed chunks in emission order.
#[derive(Debug, Default)]
pub struct ChunkAssembler {
    chunks: Vec<Vec<u8>>,
    total_len: usize,
}

impl ChunkAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk. Empty chunks carry no bytes and are dropped.
    pub fn push(&mut self, chunk: Vec<u8>) {
        if chunk.is_empty() {
            return;
        }
        self.total_len += chunk.len();
        self.chunks.push(chunk);
    }

    /// Number of collected chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total byte length across all collected chunks
    pub fn len(&self) -> usize {
        self.total_len
    }

    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    /// Concatenate all chunks into a single buffer, in emission order.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_len);
        for chunk in self.chunks {
            out.extend_from_slice(&chunk);
        }
        out
    }
}
