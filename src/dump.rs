//! Structure dump of a STR container for inspection and debugging.

use std::fmt::Write as _;

use serde::Serialize;

use crate::chunk::ChunkReader;
use crate::codec::decode_entry;
use crate::codepage::CodepageTable;
use crate::container::ContainerHeader;
use crate::store::EntryStore;

#[derive(Debug, Clone, Serialize)]
pub struct ChunkDump {
    pub offset: usize,
    pub kind: &'static str,
    pub size: u32,
    /// Payload bytes as lowercase hex.
    pub payload: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryDump {
    pub index: usize,
    /// `None` for an unset offset slot.
    pub offset: Option<u32>,
    pub length: usize,
    pub chunks: Vec<ChunkDump>,
    pub text: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DumpReport {
    pub file_id: u32,
    pub entry_count: u32,
    pub arena_len: usize,
    pub entries: Vec<EntryDump>,
}

fn dump_entry(index: usize, store: &EntryStore, table: &CodepageTable) -> EntryDump {
    let offset = store.offset(index);
    let bytes = store.get(index).unwrap_or(&[]);
    let mut chunks = Vec::new();
    let mut error = None;
    for chunk in ChunkReader::new(bytes) {
        match chunk {
            Ok(c) => chunks.push(ChunkDump {
                offset: c.offset,
                kind: c.header.kind.name(),
                size: c.header.size,
                payload: hex::encode(c.payload),
            }),
            Err(e) => error = Some(e.to_string()),
        }
    }
    // Empty entries decode to empty text without walking any chunk.
    let text = if bytes.is_empty() {
        error = None;
        Some(String::new())
    } else {
        decode_entry(table, bytes)
            .ok()
            .map(|(units, _)| String::from_utf16_lossy(&units))
    };
    EntryDump {
        index,
        offset,
        length: bytes.len(),
        chunks,
        text,
        error,
    }
}

impl DumpReport {
    pub fn build(header: ContainerHeader, store: &EntryStore, table: &CodepageTable) -> Self {
        Self {
            file_id: header.file_id,
            entry_count: header.entry_count,
            arena_len: store.arena().len(),
            entries: (0..store.len())
                .map(|i| dump_entry(i, store, table))
                .collect(),
        }
    }

    /// Number of entries whose chunk stream is malformed.
    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.error.is_some()).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "file id:     {}", self.file_id);
        let _ = writeln!(out, "entries:     {}", self.entry_count);
        let _ = writeln!(out, "arena bytes: {}", self.arena_len);
        for entry in &self.entries {
            let offset = entry
                .offset
                .map_or_else(|| "unset".to_string(), |o| format!("{o:#010x}"));
            let _ = writeln!(
                out,
                "[{}] offset {} length {}",
                entry.index, offset, entry.length
            );
            for chunk in &entry.chunks {
                let _ = writeln!(
                    out,
                    "    +{:<4} {:<9} size {:<6} {}",
                    chunk.offset, chunk.kind, chunk.size, chunk.payload
                );
            }
            if let Some(text) = &entry.text {
                let _ = writeln!(out, "    text: {text}");
            }
            if let Some(err) = &entry.error {
                let _ = writeln!(out, "    error: {err}");
            }
        }
        out
    }
}
