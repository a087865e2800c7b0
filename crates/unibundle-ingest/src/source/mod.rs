//! Per-format listing of archive members.
//!
//! Sources hand out members lazily and in listing order. A file member
//! carries a reader over its content, so members rejected by the filter
//! are never decompressed.

use std::io::Read;

use crate::Result;

#[cfg(feature = "tar")]
mod tar;
#[cfg(feature = "zip")]
mod zip;

#[cfg(feature = "tar")]
pub use self::tar::{TarArchive, TarSource};
#[cfg(feature = "zip")]
pub use self::zip::ZipSource;

/// A member read from the listing but not yet consumed.
pub struct PendingEntry<'a> {
    /// Member name exactly as stored in the archive.
    pub raw_path: String,
    pub kind: PendingEntryKind<'a>,
}

pub enum PendingEntryKind<'a> {
    Directory,
    File(Box<dyn Read + 'a>),
    /// Links, devices and other special members.
    Other,
}

/// Lazily yields archive members in listing order; `None` ends the listing.
pub trait EntrySource {
    fn next_entry(&mut self) -> Option<Result<PendingEntry<'_>>>;
}
