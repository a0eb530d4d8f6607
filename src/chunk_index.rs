//! Chunk offset table: maps a logical chunk index to the byte range of its
//! compressed form within the raw stream.

use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

/// 4 GiB: the threshold above which the stream header stores 8-byte rather
/// than 4-byte little-endian offset entries.
const LARGE_FILE_THRESHOLD: u64 = 4 * 1024 * 1024 * 1024;

#[derive(Debug)]
pub struct ChunkIndex {
    chunk_size: u32,
    /// `num_chunks + 1` absolute byte offsets into the compressed stream;
    /// `offsets[i]..offsets[i + 1]` is chunk `i`'s compressed range.
    offsets: Vec<u64>,
}

fn is_large_file(uncompressed_size: u64) -> bool {
    uncompressed_size > LARGE_FILE_THRESHOLD
}

impl ChunkIndex {
    /// Parses the chunk offset table at the current position of
    /// `raw_reader`, which must sit at the very start of the compressed
    /// stream. Leaves the reader positioned just past the header on success.
    pub fn parse<R: Read + Seek>(
        raw_reader: &mut R,
        uncompressed_size: u64,
        chunk_size: u32,
    ) -> Result<ChunkIndex> {
        let num_chunks = ((uncompressed_size + chunk_size as u64 - 1) / chunk_size as u64).max(1);
        let num_entries = num_chunks - 1;
        let entry_is_large = is_large_file(uncompressed_size);
        let entry_size: u64 = if entry_is_large { 8 } else { 4 };
        let header_size = num_entries * entry_size;

        let mut offsets = Vec::with_capacity(num_chunks as usize + 1);
        offsets.push(header_size);
        for _ in 0..num_entries {
            let raw = if entry_is_large {
                raw_reader.read_u64::<LittleEndian>()?
            } else {
                raw_reader.read_u32::<LittleEndian>()? as u64
            };
            // Entries are stored relative to the end of the header; make
            // them absolute within the compressed stream.
            offsets.push(header_size + raw);
        }

        let stream_len = raw_reader.seek(SeekFrom::End(0))?;
        offsets.push(stream_len);
        raw_reader.seek(SeekFrom::Start(header_size))?;

        if !offsets.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::NonMonotonicChunkOffsets);
        }

        Ok(ChunkIndex {
            chunk_size,
            offsets,
        })
    }

    pub fn num_chunks(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Absolute compressed-stream byte range for chunk `index`.
    pub fn chunk_range(&self, index: usize) -> (u64, u64) {
        (self.offsets[index], self.offsets[index + 1])
    }
}
