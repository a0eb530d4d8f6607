#![no_main]
use libfuzzer_sys::fuzz_target;
use wof_decompress::fuzzing::xpress_decode;

/// Every XPRESS chunk size WOF ever emits.
const CHUNK_SIZES: &[usize] = &[4096, 8192, 16384];

fuzz_target!(|data: &[u8]| {
    for &size in CHUNK_SIZES {
        let mut out = vec![0u8; size];
        let _ = xpress_decode(data, &mut out);
    }
});
