//! Conversion between UTF-16 text and encoded STR entries.
//!
//! An entry is a run of chunks (see [`crate::chunk`]) closed by an end
//! chunk. String chunk payloads hold one or more bytes per character:
//! `0xFF` adds 254 to a running index and any other byte adds its own value
//! and resolves the index through the [`CodepageTable`].
//!
//! Decoded text is in escaped form: `\`, newline and tab appear as `\\`,
//! `\n`, `\t`, a literal `%` appears as `%%` and parameter chunks appear as
//! `%<n>`. [`encode_entry`] accepts the same form.

use tracing::trace;

use crate::chunk::{ChunkHeader, ChunkKind, ChunkReader, CHUNK_HEADER_SIZE};
use crate::codepage::CodepageTable;
use crate::config::{CodecOptions, EscapeMode};
use crate::error::{EncodeError, FormatError};

/// Payload byte meaning "add 254 and keep accumulating".
pub const CONTINUATION: u8 = 0xFF;
/// Index step contributed by one continuation byte.
pub const CONTINUATION_STEP: usize = 254;
/// Emitted by the decoder for indices outside the codepage.
pub const DECODE_PLACEHOLDER: u16 = b'_' as u16;

const BACKSLASH: u16 = b'\\' as u16;
const PERCENT: u16 = b'%' as u16;
const NEWLINE: u16 = b'\n' as u16;
const TAB: u16 = b'\t' as u16;
const LETTER_N: u16 = b'n' as u16;
const LETTER_T: u16 = b't' as u16;

fn ascii_digit(unit: u16) -> Option<u32> {
    if (u16::from(b'0')..=u16::from(b'9')).contains(&unit) {
        Some(u32::from(unit - u16::from(b'0')))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Decoding

/// Decode one entry into escaped UTF-16 text.
///
/// Returns the text and the number of bytes consumed up to and including
/// the end chunk.
pub fn decode_entry(table: &CodepageTable, data: &[u8]) -> Result<(Vec<u16>, usize), FormatError> {
    let mut out: Vec<u16> = Vec::with_capacity(data.len());
    let mut reader = ChunkReader::new(data);
    for chunk in reader.by_ref() {
        let chunk = chunk?;
        match chunk.header.kind {
            ChunkKind::End => break,
            ChunkKind::Parameter => push_parameter(&mut out, chunk.header.size + 1),
            ChunkKind::String => decode_string_payload(table, chunk.payload, &mut out),
        }
    }
    out.shrink_to_fit();
    Ok((out, reader.position()))
}

fn push_parameter(out: &mut Vec<u16>, value: u32) {
    out.push(PERCENT);
    out.extend(value.to_string().bytes().map(u16::from));
}

/// Decode the payload of a single string chunk, appending to `out`.
///
/// An index run still open at the end of the payload is dropped.
pub fn decode_string_payload(table: &CodepageTable, payload: &[u8], out: &mut Vec<u16>) {
    let mut index = 0usize;
    for &byte in payload {
        if byte == CONTINUATION {
            index += CONTINUATION_STEP;
            continue;
        }
        index += usize::from(byte);
        let unit = table.get(index).unwrap_or(DECODE_PLACEHOLDER);
        push_escaped(out, unit);
        index = 0;
    }
}

fn push_escaped(out: &mut Vec<u16>, unit: u16) {
    match unit {
        PERCENT => out.extend_from_slice(&[PERCENT, PERCENT]),
        BACKSLASH => out.extend_from_slice(&[BACKSLASH, BACKSLASH]),
        NEWLINE => out.extend_from_slice(&[BACKSLASH, LETTER_N]),
        TAB => out.extend_from_slice(&[BACKSLASH, LETTER_T]),
        other => out.push(other),
    }
}

// ---------------------------------------------------------------------------
// Encoding

/// Payload bytes for codepage index `index`: `index / 254` continuation
/// bytes followed by the remainder.
pub fn glyph_bytes(index: usize) -> Vec<u8> {
    let mut out = vec![CONTINUATION; index / CONTINUATION_STEP];
    out.push((index % CONTINUATION_STEP) as u8);
    out
}

/// Builds an entry chunk by chunk. A string chunk is always open; its
/// header is filled in when it is closed.
struct EntryWriter {
    out: Vec<u8>,
    chunk_start: usize,
}

impl EntryWriter {
    fn new(capacity: usize) -> Result<Self, EncodeError> {
        let mut out = Vec::new();
        out.try_reserve(capacity + 2 * CHUNK_HEADER_SIZE)?;
        out.extend_from_slice(&[0; CHUNK_HEADER_SIZE]);
        Ok(Self {
            out,
            chunk_start: 0,
        })
    }

    fn payload_len(&self) -> usize {
        self.out.len() - self.chunk_start - CHUNK_HEADER_SIZE
    }

    fn push_payload(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.out.try_reserve(bytes.len())?;
        self.out.extend_from_slice(bytes);
        Ok(())
    }

    fn close_string(&mut self) {
        let header = ChunkHeader::new(ChunkKind::String, self.payload_len() as u32).pack();
        self.out[self.chunk_start..self.chunk_start + CHUNK_HEADER_SIZE].copy_from_slice(&header);
    }

    /// Close the open string chunk with zero padding, write a parameter
    /// chunk and open a new string chunk.
    fn push_parameter(&mut self, size: u32) -> Result<(), EncodeError> {
        self.close_string();
        let padding = (4 - self.out.len() % 4) % 4;
        self.out.try_reserve(padding + 2 * CHUNK_HEADER_SIZE)?;
        self.out.resize(self.out.len() + padding, 0);
        self.out
            .extend_from_slice(&ChunkHeader::new(ChunkKind::Parameter, size).pack());
        self.chunk_start = self.out.len();
        self.out.extend_from_slice(&[0; CHUNK_HEADER_SIZE]);
        Ok(())
    }

    /// The last string chunk is not padded before the end chunk.
    fn finish(mut self) -> Result<Vec<u8>, EncodeError> {
        self.close_string();
        self.out.try_reserve(CHUNK_HEADER_SIZE)?;
        self.out
            .extend_from_slice(&ChunkHeader::new(ChunkKind::End, 0).pack());
        Ok(self.out)
    }
}

/// Unmapped characters are written as the placeholder's code value, used
/// directly as an index.
fn glyph_index(table: &CodepageTable, options: &CodecOptions, unit: u16) -> usize {
    table.index_of(unit).unwrap_or_else(|| {
        trace!(unit, "unmapped character replaced by placeholder");
        usize::from(options.placeholder)
    })
}

/// Encode escaped UTF-16 text into an entry. Text ends at the first NUL.
pub fn encode_entry(
    table: &CodepageTable,
    text: &[u16],
    options: &CodecOptions,
) -> Result<Vec<u8>, EncodeError> {
    let text = match text.iter().position(|&u| u == 0) {
        Some(nul) => &text[..nul],
        None => text,
    };
    let mut writer = EntryWriter::new(text.len())?;
    let mut i = 0usize;
    while i < text.len() {
        let unit = text[i];
        i += 1;
        let literal = match unit {
            BACKSLASH => match text.get(i).copied() {
                Some(LETTER_N) => {
                    i += 1;
                    NEWLINE
                }
                Some(LETTER_T) => {
                    i += 1;
                    TAB
                }
                Some(BACKSLASH) => {
                    i += 1;
                    BACKSLASH
                }
                Some(_) if options.escapes == EscapeMode::Compatible => {
                    i += 1;
                    BACKSLASH
                }
                _ => BACKSLASH,
            },
            PERCENT if text.get(i) == Some(&PERCENT) => {
                i += 1;
                PERCENT
            }
            PERCENT => {
                let mut value = 0u32;
                while let Some(digit) = text.get(i).copied().and_then(ascii_digit) {
                    value = value.saturating_mul(10).saturating_add(digit);
                    i += 1;
                }
                writer.push_parameter(value.saturating_sub(1))?;
                continue;
            }
            other => other,
        };
        let bytes = glyph_bytes(glyph_index(table, options, literal));
        writer.push_payload(&bytes)?;
    }
    writer.finish()
}
