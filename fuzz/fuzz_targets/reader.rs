#![no_main]
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use wof_decompress::{CompressionFormat, RandomAccessReader};

const FORMATS: &[CompressionFormat] = &[
    CompressionFormat::Xpress4K,
    CompressionFormat::Xpress8K,
    CompressionFormat::Xpress16K,
    CompressionFormat::Lzx32K,
];

/// Exercises chunk-offset-table parsing and chunk decoding against
/// arbitrary bytes, standing in for a corrupt or adversarial compressed
/// stream. Never expected to succeed; only expected not to panic.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let format = FORMATS[data[0] as usize % FORMATS.len()];
    let uncompressed_size = (data[1] as u64) * format.chunk_size() as u64;
    let stream = data[2..].to_vec();

    if let Ok(mut reader) =
        RandomAccessReader::open(format, uncompressed_size, Cursor::new(stream))
    {
        let mut out = vec![0u8; format.chunk_size() as usize];
        let _ = reader.read(0, &mut out);
    }
});
