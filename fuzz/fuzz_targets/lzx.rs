#![no_main]
use libfuzzer_sys::fuzz_target;
use wof_decompress::fuzzing::lzx_decode;

fuzz_target!(|data: &[u8]| {
    let mut out = vec![0u8; 32768];
    let _ = lzx_decode(data, &mut out);
});
