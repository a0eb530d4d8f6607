//! Decoding engine for NTFS "system compressed" files.
//!
//! Windows transparently compresses a file via the WOF (Windows Overlay
//! Filter) reparse point, storing the compressed bytes out-of-band in a
//! named alternate data stream, split into independently-compressed chunks
//! so any byte range of the logical file can be recovered without decoding
//! the whole thing. This crate is that decoding half: given the compression
//! format, the logical file size, and a seekable reader over the compressed
//! stream, it reconstructs arbitrary `(offset, length)` slices of the
//! original file.
//!
//! Two wire formats are supported, matching what WOF actually uses:
//! XPRESS (Huffman-coded variant, in 4/8/16 KiB chunks) and LZX (the
//! "no-intervals" WIM variant, in 32 KiB chunks, E8 call-translation
//! disabled). Locating the reparse point, determining which algorithm a
//! file uses, and opening its alternate data stream are the filesystem
//! layer's job, not this crate's — see [`RandomAccessReader::open`] for the
//! boundary.
//!
//! ```no_run
//! use std::fs::File;
//! use wof_decompress::{CompressionFormat, RandomAccessReader};
//!
//! # fn main() -> wof_decompress::error::Result<()> {
//! let ads = File::open("stream.bin")?;
//! let mut reader = RandomAccessReader::open(CompressionFormat::Xpress4K, 1 << 20, ads)?;
//! let mut buf = [0u8; 64];
//! reader.read(0, &mut buf)?;
//! # Ok(())
//! # }
//! ```

mod bit_reader;
mod chunk_index;
pub mod error;
mod format;
mod huffman;
mod lzcopy;
mod lzx;
mod reader;
mod xpress;

pub use error::Error;
pub use format::CompressionFormat;
pub use reader::RandomAccessReader;

/// Direct access to the per-chunk decoders, bypassing the chunk index and
/// cache. Only meant for fuzzing: real callers go through
/// [`RandomAccessReader`], which is the only place that knows a chunk's
/// expected decoded length.
#[cfg(feature = "fuzzing")]
pub mod fuzzing {
    pub use crate::lzx::decode as lzx_decode;
    pub use crate::xpress::decode as xpress_decode;
}
