//! STR container envelope.
//!
//! Layout, little endian throughout:
//!
//! ```text
//! magic[4] = "BFST" | file_id: u32 | count: u32 | offsets: [u32; count] | arena
//! ```
//!
//! Each stored offset is biased by `count * 4`; the bias is removed on read
//! and re-applied on write. Offsets that go negative after removing the
//! bias are unset.

use std::io::{Read, Write};

use crate::error::{FormatError, StrError};
use crate::store::EntryStore;

/// Magic tag of a STR container.
pub const STR_MAGIC: [u8; 4] = *b"BFST";
/// Bytes before the offset table.
pub const STR_HEADER_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Opaque identifier, carried through unchanged.
    pub file_id: u32,
    pub entry_count: u32,
}

fn read_u32(data: &[u8], pos: usize) -> Result<u32, FormatError> {
    data.get(pos..pos + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or(FormatError::Truncated {
            needed: pos + 4,
            available: data.len(),
        })
}

/// Parse a complete container held in memory.
pub fn parse(data: &[u8]) -> Result<(ContainerHeader, EntryStore), FormatError> {
    if data.len() < STR_MAGIC.len() || data[..4] != STR_MAGIC {
        return Err(FormatError::BadMagic {
            expected: STR_MAGIC,
            found: data[..data.len().min(4)].to_vec(),
        });
    }
    let file_id = read_u32(data, 4)?;
    let entry_count = read_u32(data, 8)?;
    let bias = i64::from(entry_count) * 4;
    let table_end = STR_HEADER_SIZE as u64 + bias as u64;
    if table_end > data.len() as u64 {
        return Err(FormatError::Truncated {
            needed: usize::try_from(table_end).unwrap_or(usize::MAX),
            available: data.len(),
        });
    }
    let table_end = table_end as usize;

    let arena_len = data.len() as i64 - table_end as i64;
    if arena_len < 1 {
        return Err(FormatError::TooSmall(arena_len));
    }
    let arena = data[table_end..].to_vec();

    let offsets = data[STR_HEADER_SIZE..table_end]
        .chunks_exact(4)
        .map(|b| {
            let stored = i64::from(u32::from_le_bytes([b[0], b[1], b[2], b[3]]));
            let offset = stored - bias;
            if offset < 0 {
                Ok(None)
            } else if offset as usize > arena.len() {
                Err(FormatError::Truncated {
                    needed: offset as usize,
                    available: arena.len(),
                })
            } else {
                Ok(Some(offset as u32))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((
        ContainerHeader {
            file_id,
            entry_count,
        },
        EntryStore::from_parts(offsets, arena),
    ))
}

/// Read a whole container from a stream.
pub fn read<R: Read>(reader: &mut R) -> Result<(ContainerHeader, EntryStore), StrError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(parse(&data)?)
}

/// Serialize a container into a byte vector.
pub fn to_bytes(file_id: u32, store: &EntryStore) -> Vec<u8> {
    let count = store.len() as u32;
    let bias = count.wrapping_mul(4);
    let mut out = Vec::with_capacity(STR_HEADER_SIZE + store.len() * 4 + store.arena().len());
    out.extend_from_slice(&STR_MAGIC);
    out.extend_from_slice(&file_id.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    for offset in store.offsets() {
        // An unset slot is written as -1 before biasing.
        let stored = match offset {
            Some(o) => o.wrapping_add(bias),
            None => bias.wrapping_sub(1),
        };
        out.extend_from_slice(&stored.to_le_bytes());
    }
    out.extend_from_slice(store.arena());
    out
}

/// Write a container to a stream.
pub fn write<W: Write>(writer: &mut W, file_id: u32, store: &EntryStore) -> Result<(), StrError> {
    writer.write_all(&to_bytes(file_id, store))?;
    writer.flush()?;
    Ok(())
}
