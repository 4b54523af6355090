//! Conversion between binary `BFST` string tables and editable UTF-16 text.
//!
//! A string table is a container of entries. Each entry is a sequence of
//! typed chunks whose string payloads index a codepage table. The layers,
//! bottom up:
//!
//! * [`codepage`] – byte index to Unicode mapping loaded from `MBToUni.dat`.
//! * [`chunk`] / [`codec`] – the per-entry chunk format.
//! * [`store`] – aligned arena of encoded entries.
//! * [`container`] – the file envelope.
//! * [`strfile`] / [`text`] – whole-file conversion to and from text.

pub mod chunk;
pub mod codec;
pub mod codepage;
pub mod config;
pub mod container;
pub mod dump;
pub mod error;
pub mod io_utils;
pub mod store;
pub mod strfile;
pub mod text;

pub use chunk::{align4, Chunk, ChunkHeader, ChunkKind, ChunkReader, CHUNK_HEADER_SIZE};
pub use codec::{decode_entry, encode_entry, glyph_bytes};
pub use codepage::CodepageTable;
pub use config::{CodecOptions, Config, EscapeMode};
pub use container::{ContainerHeader, STR_HEADER_SIZE, STR_MAGIC};
pub use dump::DumpReport;
pub use error::{EncodeError, FormatError, StrError};
pub use store::EntryStore;
pub use strfile::{codepage_path_for, StrFile};
pub use text::TextDocument;
