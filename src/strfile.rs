use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::codec::{decode_entry, encode_entry};
use crate::codepage::CodepageTable;
use crate::config::{CodecOptions, Config};
use crate::container::{self, ContainerHeader};
use crate::error::StrError;
use crate::store::EntryStore;
use crate::text::TextDocument;

/// A string table held as decoded, escaped UTF-16 entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrFile {
    pub file_id: u32,
    pub entries: Vec<Vec<u16>>,
}

/// Path of the codepage file sitting next to `str_path`.
pub fn codepage_path_for(str_path: &Path, config: &Config) -> PathBuf {
    match str_path.parent() {
        Some(dir) => dir.join(&config.codepage_name),
        None => PathBuf::from(&config.codepage_name),
    }
}

fn is_empty_text(entry: &[u16]) -> bool {
    entry.first().map_or(true, |&u| u == 0)
}

impl StrFile {
    /// Decode every entry of an already parsed container.
    ///
    /// Unset and zero-length entries become empty strings.
    pub fn from_store(
        header: ContainerHeader,
        store: &EntryStore,
        table: &CodepageTable,
    ) -> Result<Self, StrError> {
        let mut entries = Vec::with_capacity(store.len());
        for index in 0..store.len() {
            debug!(index, "reading entry");
            let text = match store.get(index) {
                Some(bytes) if !bytes.is_empty() => {
                    debug!(index, size = bytes.len(), "got entry");
                    decode_entry(table, bytes)
                        .map_err(|source| StrError::Entry { index, source })?
                        .0
                }
                Some(_) => Vec::new(),
                None => {
                    warn!(index, "entry offset unset, using empty text");
                    Vec::new()
                }
            };
            entries.push(text);
        }
        debug!(count = entries.len(), "total entries decoded");
        Ok(Self {
            file_id: header.file_id,
            entries,
        })
    }

    /// Parse and decode a container held in memory.
    pub fn decode(data: &[u8], table: &CodepageTable) -> Result<Self, StrError> {
        let (header, store) = container::parse(data)?;
        Self::from_store(header, &store, table)
    }

    pub fn read_from<P: AsRef<Path>>(path: P, table: &CodepageTable) -> Result<Self, StrError> {
        let data = fs::read(path)?;
        Self::decode(&data, table)
    }

    /// Encode into an entry store. A trailing empty entry is left out.
    pub fn encode(
        &self,
        table: &CodepageTable,
        options: &CodecOptions,
    ) -> Result<(ContainerHeader, EntryStore), StrError> {
        let mut store = EntryStore::with_capacity(self.entries.len() + 4, 4096);
        let keep = match self.entries.last() {
            Some(last) if is_empty_text(last) => self.entries.len() - 1,
            _ => self.entries.len(),
        };
        for (index, entry) in self.entries[..keep].iter().enumerate() {
            debug!(index, "adding entry");
            let bytes = encode_entry(table, entry, options)?;
            store.append(&bytes)?;
        }
        if keep < self.entries.len() {
            debug!(index = keep, "skipping empty last entry");
        }
        debug!(count = store.len(), "total entries encoded");
        let header = ContainerHeader {
            file_id: self.file_id,
            entry_count: store.len() as u32,
        };
        Ok((header, store))
    }

    /// Encode and serialize to container bytes.
    pub fn to_bytes(
        &self,
        table: &CodepageTable,
        options: &CodecOptions,
    ) -> Result<Vec<u8>, StrError> {
        let (header, store) = self.encode(table, options)?;
        Ok(container::to_bytes(header.file_id, &store))
    }

    pub fn write_to<P: AsRef<Path>>(
        &self,
        path: P,
        table: &CodepageTable,
        options: &CodecOptions,
    ) -> Result<(), StrError> {
        let bytes = self.to_bytes(table, options)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    pub fn from_text(doc: TextDocument) -> Self {
        Self {
            file_id: doc.file_id,
            entries: doc.lines,
        }
    }

    pub fn to_text(&self) -> TextDocument {
        TextDocument {
            file_id: self.file_id,
            lines: self.entries.clone(),
        }
    }

    pub fn read_text<P: AsRef<Path>>(path: P) -> Result<Self, StrError> {
        let bytes = fs::read(path)?;
        Ok(Self::from_text(TextDocument::parse(&bytes)?))
    }

    pub fn write_text<P: AsRef<Path>>(&self, path: P) -> Result<(), StrError> {
        fs::write(path, self.to_text().to_bytes())?;
        Ok(())
    }
}
