use std::fmt;

/// The error type used when decoding a system-compressed stream fails.
///
/// Every variant is recoverable from the caller's point of view: a reader
/// that returns one of these from `read` remains usable for unrelated
/// ranges, since each chunk is decoded independently.
#[derive(Debug)]
pub enum Error {
    /// A chunk (or the header) ended before the expected amount of data was
    /// present.
    TruncatedInput,

    /// A Huffman code-length table did not describe a valid canonical
    /// prefix code (over- or under-subscribed).
    InvalidHuffmanLengths,

    /// A decoded match offset would read before the start of the output
    /// already produced for this chunk.
    MatchOffsetUnderflow,

    /// A decoded match (or literal run) would write past the end of the
    /// chunk's output buffer.
    MatchLengthOverflow,

    /// An LZX block header carried a block type outside {VERBATIM,
    /// ALIGNED, UNCOMPRESSED}.
    InvalidBlockType(u8),

    /// The chunk offset table was not strictly increasing, or its final
    /// entry did not match the compressed stream length.
    NonMonotonicChunkOffsets,

    /// `pos` was negative or otherwise outside the representable range.
    InvalidArgument,

    /// The raw compressed-stream reader (the filesystem-layer collaborator)
    /// returned an I/O error.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;
        match self {
            TruncatedInput => write!(f, "compressed chunk ended before expected"),
            InvalidHuffmanLengths => write!(f, "invalid canonical Huffman code-length table"),
            MatchOffsetUnderflow => write!(f, "match offset underflows chunk output"),
            MatchLengthOverflow => write!(f, "match or literal run overflows chunk output"),
            InvalidBlockType(kind) => write!(f, "invalid LZX block type {}", kind),
            NonMonotonicChunkOffsets => write!(f, "chunk offset table is not strictly increasing"),
            InvalidArgument => write!(f, "invalid argument (negative position or null buffer)"),
            Io(e) => write!(f, "I/O error reading compressed stream: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// Does this error correspond to a corrupt compressed stream (as opposed to
/// an I/O failure or a caller mistake)? Useful for callers that want to
/// distinguish "this chunk is bad" from "the device went away".
impl Error {
    pub fn is_corrupt_stream(&self) -> bool {
        matches!(
            self,
            Error::TruncatedInput
                | Error::InvalidHuffmanLengths
                | Error::MatchOffsetUnderflow
                | Error::MatchLengthOverflow
                | Error::InvalidBlockType(_)
                | Error::NonMonotonicChunkOffsets
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
