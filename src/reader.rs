//! Top-level random-access entry point: turns a chunked compressed stream
//! plus the chunk index into arbitrary `(pos, count)` reads of the logical,
//! uncompressed file.

use crate::chunk_index::ChunkIndex;
use crate::error::{Error, Result};
use crate::format::CompressionFormat;
use log::{debug, trace, warn};
use std::io::{Read, Seek, SeekFrom};

struct CachedChunk {
    index: usize,
    valid_len: usize,
}

/// A reader over one system-compressed file, backed by a seekable raw byte
/// source over its compressed alternate data stream.
///
/// Not safe for concurrent use: the scratch buffer and cache are mutated by
/// every `read` call. Independent `RandomAccessReader`s over the same
/// underlying file share nothing and are independently safe.
pub struct RandomAccessReader<R> {
    raw_reader: R,
    format: CompressionFormat,
    index: ChunkIndex,
    uncompressed_size: u64,
    scratch: Vec<u8>,
    cache: Option<CachedChunk>,
}

impl<R: Read + Seek> RandomAccessReader<R> {
    /// Builds a reader over `raw_reader`, which must be positioned at the
    /// start of the compressed stream (its chunk offset table).
    pub fn open(
        format: CompressionFormat,
        uncompressed_size: u64,
        mut raw_reader: R,
    ) -> Result<Self> {
        let chunk_size = format.chunk_size();
        let index = ChunkIndex::parse(&mut raw_reader, uncompressed_size, chunk_size)?;
        debug!(
            "opened system-compressed stream: {} chunks of {} bytes, {} bytes uncompressed",
            index.num_chunks(),
            chunk_size,
            uncompressed_size
        );
        Ok(RandomAccessReader {
            raw_reader,
            format,
            index,
            uncompressed_size,
            scratch: vec![0u8; chunk_size as usize],
            cache: None,
        })
    }

    pub fn size(&self) -> u64 {
        self.uncompressed_size
    }

    /// Direct access to the underlying raw reader, mostly useful for tests
    /// that wrap it to observe I/O activity (e.g. to confirm caching).
    pub fn raw_reader(&self) -> &R {
        &self.raw_reader
    }

    /// Reads up to `out.len()` bytes starting at `pos`, clamped to EOF, and
    /// returns the number of bytes actually written. A read entirely past
    /// EOF returns 0 without touching `out`.
    pub fn read(&mut self, pos: u64, out: &mut [u8]) -> Result<usize> {
        if pos > self.uncompressed_size {
            return Err(Error::InvalidArgument);
        }
        let count = (out.len() as u64).min(self.uncompressed_size - pos) as usize;
        if count == 0 {
            return Ok(0);
        }

        let chunk_size = self.index.chunk_size() as u64;
        let mut written = 0usize;
        while written < count {
            let file_pos = pos + written as u64;
            let chunk_idx = (file_pos / chunk_size) as usize;
            let chunk_start = chunk_idx as u64 * chunk_size;

            let valid_len = self.ensure_chunk_decoded(chunk_idx)?;

            let within = (file_pos - chunk_start) as usize;
            let avail = valid_len - within;
            let want = (count - written).min(avail);
            out[written..written + want]
                .copy_from_slice(&self.scratch[within..within + want]);
            written += want;
        }

        Ok(written)
    }

    /// Releases the scratch buffer, cache, and underlying raw reader.
    /// Equivalent to dropping the reader; provided to mirror the explicit
    /// open/close lifecycle callers expect from this layer.
    pub fn close(self) {
        drop(self);
    }

    /// Decodes chunk `chunk_idx` into `self.scratch` unless it is already
    /// cached there, returning its valid (uncompressed) length.
    fn ensure_chunk_decoded(&mut self, chunk_idx: usize) -> Result<usize> {
        if let Some(cached) = &self.cache {
            if cached.index == chunk_idx {
                trace!("chunk {} cache hit", chunk_idx);
                return Ok(cached.valid_len);
            }
        }

        let (start, end) = self.index.chunk_range(chunk_idx);
        let compressed_len = (end - start) as usize;
        let chunk_size = self.index.chunk_size() as u64;
        let uncompressed_len = (self.uncompressed_size - chunk_idx as u64 * chunk_size)
            .min(chunk_size) as usize;

        self.raw_reader.seek(SeekFrom::Start(start))?;
        let mut compressed = vec![0u8; compressed_len];
        self.raw_reader.read_exact(&mut compressed)?;

        if compressed_len == uncompressed_len {
            // Stored literally: the filesystem layer gave up on compressing
            // this chunk because it didn't shrink.
            self.scratch[..uncompressed_len].copy_from_slice(&compressed);
        } else if let Err(e) = self
            .format
            .decode(&compressed, &mut self.scratch[..uncompressed_len])
        {
            warn!("chunk {} failed to decode: {}", chunk_idx, e);
            self.cache = None;
            return Err(e);
        }

        self.cache = Some(CachedChunk {
            index: chunk_idx,
            valid_len: uncompressed_len,
        });
        Ok(uncompressed_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn build_single_chunk_stream(payload: &[u8]) -> Vec<u8> {
        // No offset-table entries for a single chunk: the header is empty
        // and the chunk starts at byte 0.
        payload.to_vec()
    }

    #[test]
    fn reads_stored_literal_chunk() {
        let payload: Vec<u8> = (0..=255u8).collect();
        let stream = build_single_chunk_stream(&payload);
        let mut reader = RandomAccessReader::open(
            CompressionFormat::Xpress4K,
            payload.len() as u64,
            Cursor::new(stream),
        )
        .unwrap();

        let mut out = vec![0u8; payload.len()];
        let n = reader.read(0, &mut out).unwrap();
        assert_eq!(n, payload.len());
        assert_eq!(out, payload);
    }

    #[test]
    fn read_past_eof_is_clamped() {
        let payload = vec![7u8; 10];
        let stream = build_single_chunk_stream(&payload);
        let mut reader =
            RandomAccessReader::open(CompressionFormat::Xpress4K, 10, Cursor::new(stream))
                .unwrap();

        let mut out = [0u8; 5];
        assert_eq!(reader.read(10, &mut out).unwrap(), 0);
        assert_eq!(reader.read(9, &mut out).unwrap(), 1);
    }

    #[test]
    fn empty_read_is_a_no_op() {
        let payload = vec![1u8; 10];
        let stream = build_single_chunk_stream(&payload);
        let mut reader =
            RandomAccessReader::open(CompressionFormat::Xpress4K, 10, Cursor::new(stream))
                .unwrap();
        let mut out = [9u8; 0];
        assert_eq!(reader.read(0, &mut out).unwrap(), 0);
    }

    #[test]
    fn caches_most_recent_chunk() {
        let payload = vec![3u8; 10];
        let stream = build_single_chunk_stream(&payload);
        let mut reader =
            RandomAccessReader::open(CompressionFormat::Xpress4K, 10, Cursor::new(stream))
                .unwrap();

        let mut out = [0u8; 10];
        reader.read(0, &mut out).unwrap();
        assert!(reader.cache.is_some());
        reader.read(0, &mut out).unwrap();
        assert_eq!(reader.cache.as_ref().unwrap().index, 0);
    }
}
