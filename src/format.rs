/// Which WOF compression algorithm a system-compressed file uses.
///
/// Chosen by the filesystem layer from the reparse point's algorithm
/// identifier; determines both the chunk size and which decoder a chunk
/// is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Xpress4K,
    Xpress8K,
    Xpress16K,
    Lzx32K,
}

impl CompressionFormat {
    pub fn chunk_size(self) -> u32 {
        match self {
            CompressionFormat::Xpress4K => 4096,
            CompressionFormat::Xpress8K => 8192,
            CompressionFormat::Xpress16K => 16384,
            CompressionFormat::Lzx32K => 32768,
        }
    }

    pub(crate) fn decode(self, input: &[u8], out: &mut [u8]) -> crate::error::Result<()> {
        match self {
            CompressionFormat::Lzx32K => crate::lzx::decode(input, out),
            _ => crate::xpress::decode(input, out),
        }
    }
}
