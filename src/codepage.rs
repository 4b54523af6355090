//! Byte index to Unicode mapping used by the STR chunk codec.
//!
//! The table file layout is:
//!
//! ```text
//! magic[4] = "BFMU" | reserved: u16 | values: [u16 LE; (size - 6) / 2]
//! ```
//!
//! The total file size must lie in `8..=65538` bytes, which caps the table
//! at 32766 mappings.

use std::fs;
use std::path::Path;

use crate::error::{FormatError, StrError};

/// Magic tag of the multibyte to Unicode table.
pub const CODEPAGE_MAGIC: [u8; 4] = *b"BFMU";
/// Bytes preceding the table values.
pub const CODEPAGE_HEADER_SIZE: usize = 6;
/// Smallest accepted table file.
pub const CODEPAGE_MIN_SIZE: usize = 8;
/// Largest accepted table file.
pub const CODEPAGE_MAX_SIZE: usize = 65538;

/// Immutable table of 16-bit code points indexed by accumulated byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodepageTable {
    units: Vec<u16>,
}

impl CodepageTable {
    /// Build a table directly from its values.
    pub fn from_units(units: Vec<u16>) -> Self {
        Self { units }
    }

    /// Parse a complete codepage file.
    pub fn load(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < CODEPAGE_MAGIC.len() || bytes[..4] != CODEPAGE_MAGIC {
            return Err(FormatError::BadMagic {
                expected: CODEPAGE_MAGIC,
                found: bytes[..bytes.len().min(4)].to_vec(),
            });
        }
        if !(CODEPAGE_MIN_SIZE..=CODEPAGE_MAX_SIZE).contains(&bytes.len()) {
            return Err(FormatError::BadSize(bytes.len()));
        }
        // The u16 after the magic has no known meaning and is skipped.
        let units = bytes[CODEPAGE_HEADER_SIZE..]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(Self { units })
    }

    /// Read and parse a codepage file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StrError> {
        let bytes = fs::read(path)?;
        Ok(Self::load(&bytes)?)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[u16] {
        &self.units
    }

    /// Code point stored at `index`, if the index is inside the table.
    pub fn get(&self, index: usize) -> Option<u16> {
        self.units.get(index).copied()
    }

    /// Smallest index mapping to `unit`, found by linear scan.
    pub fn index_of(&self, unit: u16) -> Option<usize> {
        self.units.iter().position(|&u| u == unit)
    }
}
