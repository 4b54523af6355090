use thiserror::Error;

/// Structural problems found while reading a codepage table, a container
/// or an encoded entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("bad magic value: expected {expected:?}, found {found:?}")]
    BadMagic { expected: [u8; 4], found: Vec<u8> },

    #[error("bad file size: {0} bytes")]
    BadSize(usize),

    #[error("data truncated: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    #[error("entry end chunk has nonzero size {0}")]
    MalformedEnd(u32),

    #[error("unknown chunk kind {0:#04x}")]
    UnknownChunkKind(u8),

    #[error("file too small: arena length {0}")]
    TooSmall(i64),
}

/// Failures while encoding an entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("out of memory while encoding")]
    OutOfMemory,
}

impl From<std::collections::TryReserveError> for EncodeError {
    fn from(_: std::collections::TryReserveError) -> Self {
        EncodeError::OutOfMemory
    }
}

#[derive(Error, Debug)]
pub enum StrError {
    /// Malformed codepage, container or chunk data.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// A single entry failed to decode; the whole file is rejected.
    #[error("entry {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: FormatError,
    },

    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Malformed text source.
    #[error("text error: {0}")]
    Text(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
