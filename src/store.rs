//! Growable arena of encoded entries with a parallel offset table.
//!
//! Entries are appended in order and every entry starts on a 4-byte
//! boundary. An entry spans from its offset to the next entry's offset, or
//! to the end of the arena for the last entry (and whenever the next offset
//! lies before the current one).

use std::ops::Range;

use crate::error::EncodeError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStore {
    arena: Vec<u8>,
    offsets: Vec<Option<u32>>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the offset table and arena.
    pub fn with_capacity(entries: usize, arena: usize) -> Self {
        Self {
            arena: Vec::with_capacity(arena),
            offsets: Vec::with_capacity(entries),
        }
    }

    /// Assemble a store from offsets and arena bytes read from disk.
    pub fn from_parts(offsets: Vec<Option<u32>>, arena: Vec<u8>) -> Self {
        Self { arena, offsets }
    }

    fn pad_arena(&mut self) {
        let padded = (self.arena.len() + 3) & !3;
        self.arena.resize(padded, 0);
    }

    /// Append one encoded entry and return its index.
    pub fn append(&mut self, bytes: &[u8]) -> Result<usize, EncodeError> {
        self.offsets.try_reserve(1)?;
        self.arena.try_reserve(bytes.len() + 6)?;
        self.pad_arena();
        let offset = u32::try_from(self.arena.len()).map_err(|_| EncodeError::OutOfMemory)?;
        self.arena.extend_from_slice(bytes);
        self.pad_arena();
        self.offsets.push(Some(offset));
        Ok(self.offsets.len() - 1)
    }

    /// Number of offset slots, set or not.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn arena(&self) -> &[u8] {
        &self.arena
    }

    pub fn offsets(&self) -> &[Option<u32>] {
        &self.offsets
    }

    pub fn offset(&self, index: usize) -> Option<u32> {
        self.offsets.get(index).copied().flatten()
    }

    /// Byte range of entry `index`, clamped to the arena.
    ///
    /// `None` for an index past the table or an unset offset.
    pub fn range(&self, index: usize) -> Option<Range<usize>> {
        let start = self.offset(index)? as usize;
        let arena_end = self.arena.len();
        let end = match self.offsets.get(index + 1).copied().flatten() {
            Some(next) if next as usize >= start => next as usize,
            _ => arena_end,
        };
        let start = start.min(arena_end);
        Some(start..end.min(arena_end).max(start))
    }

    /// Borrow the raw bytes of entry `index`.
    ///
    /// `None` means the entry is absent; `Some(&[])` is a present entry of
    /// zero length.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.range(index).map(|r| &self.arena[r])
    }
}
