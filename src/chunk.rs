//! Chunk headers inside an encoded STR entry.
//!
//! Every chunk starts on a 4-byte boundary with a little endian `u32`:
//!
//! ```text
//! bits 0..=7   : chunk kind (0 = end, 1 = string, 2 = parameter)
//! bits 8..=31  : size field
//! ```
//!
//! For string chunks the size is the payload length in bytes. Parameter
//! chunks carry no payload and their size field holds the parameter value
//! minus one. The end chunk must have size zero.

use crate::error::FormatError;

/// Size of an encoded chunk header in bytes.
pub const CHUNK_HEADER_SIZE: usize = 4;
/// Largest value representable in the 24-bit size field.
pub const MAX_CHUNK_SIZE: u32 = 0x00FF_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    End,
    String,
    Parameter,
}

impl ChunkKind {
    pub fn code(self) -> u8 {
        match self {
            ChunkKind::End => 0x00,
            ChunkKind::String => 0x01,
            ChunkKind::Parameter => 0x02,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, FormatError> {
        match code {
            0x00 => Ok(ChunkKind::End),
            0x01 => Ok(ChunkKind::String),
            0x02 => Ok(ChunkKind::Parameter),
            other => Err(FormatError::UnknownChunkKind(other)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChunkKind::End => "end",
            ChunkKind::String => "string",
            ChunkKind::Parameter => "parameter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub kind: ChunkKind,
    pub size: u32,
}

impl ChunkHeader {
    pub fn new(kind: ChunkKind, size: u32) -> Self {
        Self { kind, size }
    }

    /// Pack into the on-disk little endian form. Sizes wider than 24 bits
    /// are truncated.
    pub fn pack(self) -> [u8; CHUNK_HEADER_SIZE] {
        let raw = u32::from(self.kind.code()) | ((self.size & MAX_CHUNK_SIZE) << 8);
        raw.to_le_bytes()
    }

    pub fn unpack(bytes: [u8; CHUNK_HEADER_SIZE]) -> Result<Self, FormatError> {
        let raw = u32::from_le_bytes(bytes);
        let kind = ChunkKind::from_code((raw & 0xFF) as u8)?;
        Ok(Self {
            kind,
            size: raw >> 8,
        })
    }
}

/// Round `pos` up to the next multiple of four.
pub fn align4(pos: usize) -> usize {
    (pos + 3) & !3
}

/// One chunk read from an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Offset of the chunk header within the entry.
    pub offset: usize,
    pub header: ChunkHeader,
    /// Payload bytes; empty for parameter and end chunks.
    pub payload: &'a [u8],
}

/// Iterator over the chunks of one entry, stopping after the end chunk.
///
/// The first malformed chunk is yielded as an error and ends iteration.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> ChunkReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            done: false,
        }
    }

    /// Bytes consumed so far, including alignment after the last chunk.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn read_chunk(&mut self) -> Result<Chunk<'a>, FormatError> {
        let offset = self.pos;
        let header_end = offset + CHUNK_HEADER_SIZE;
        if header_end > self.data.len() {
            return Err(FormatError::Truncated {
                needed: header_end,
                available: self.data.len(),
            });
        }
        let mut raw = [0u8; CHUNK_HEADER_SIZE];
        raw.copy_from_slice(&self.data[offset..header_end]);
        let header = ChunkHeader::unpack(raw)?;
        let payload = match header.kind {
            ChunkKind::End => {
                if header.size != 0 {
                    return Err(FormatError::MalformedEnd(header.size));
                }
                &self.data[header_end..header_end]
            }
            ChunkKind::Parameter => &self.data[header_end..header_end],
            ChunkKind::String => {
                let end = header_end + header.size as usize;
                if end > self.data.len() {
                    return Err(FormatError::Truncated {
                        needed: end,
                        available: self.data.len(),
                    });
                }
                &self.data[header_end..end]
            }
        };
        self.pos = align4(header_end + payload.len());
        Ok(Chunk {
            offset,
            header,
            payload,
        })
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<Chunk<'a>, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let chunk = self.read_chunk();
        match &chunk {
            Ok(c) if c.header.kind != ChunkKind::End => {}
            _ => self.done = true,
        }
        Some(chunk)
    }
}
