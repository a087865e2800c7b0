//! In-memory ingestion of project archives.
//!
//! # Architecture
//!
//! - `format.rs` - Container detection from magic bytes
//! - `source/` - Per-format member listing (`EntrySource`)
//! - `rules.rs` - Substring path exclusion and extension inclusion
//! - `ingest.rs` - The filtering pipeline (`Ingestor`)
//! - `serialize.rs` - Deterministic JSON rendering of the kept files
//!
//! Nothing touches the filesystem or the network: bytes in, `(path, text)`
//! pairs out.

pub use entry::{ExtractedFile, FileKind};
pub use error::{ArchiveError, Result};
pub use format::{ArchiveFormat, TarCompress, detect_format};
pub use ingest::Ingestor;
pub use options::{DecodePolicy, IngestOptions, Progress, ProgressSink};
pub use rules::{DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_EXCLUDED_PATHS, Decision, FilterRules};
pub use serialize::{PromptEntry, SerializedStats, deserialize, serialize, stats};

mod entry;
mod error;
mod format;
mod ingest;
pub mod options;
pub mod rules;
mod serialize;
pub mod source;
