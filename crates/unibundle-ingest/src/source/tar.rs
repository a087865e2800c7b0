use std::cell::Cell;
use std::io::{self, Read};
use std::rc::Rc;

use crate::error::ArchiveError;
use crate::format::{Decoder, TarCompress};
use crate::source::{EntrySource, PendingEntry, PendingEntryKind};
use crate::Result;

/// Owns the decoded tar stream; [`TarArchive::entries`] borrows it as a source.
pub struct TarArchive<R: Read> {
    archive: tar::Archive<EofFlag<Decoder<R>>>,
    exhausted: Rc<Cell<bool>>,
}

impl<R: Read> TarArchive<R> {
    pub fn new(reader: R, codec: TarCompress) -> Self {
        let exhausted = Rc::new(Cell::new(false));
        let stream = EofFlag {
            inner: codec.decoder(reader),
            exhausted: Rc::clone(&exhausted),
        };
        Self {
            archive: tar::Archive::new(stream),
            exhausted,
        }
    }

    pub fn entries(&mut self) -> Result<TarSource<'_, R>> {
        let entries = self.archive.entries().map_err(ArchiveError::corrupted)?;
        Ok(TarSource {
            entries,
            exhausted: Rc::clone(&self.exhausted),
            finished: false,
        })
    }
}

/// Records whether the underlying stream ran dry.
///
/// `tar` reports a clean EOF at a header boundary the same way as the
/// zero-block end marker, so a cut archive would otherwise look complete.
struct EofFlag<R> {
    inner: R,
    exhausted: Rc<Cell<bool>>,
}

impl<R: Read> Read for EofFlag<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.exhausted.set(true);
        }
        Ok(n)
    }
}

pub struct TarSource<'a, R: 'a + Read> {
    entries: tar::Entries<'a, EofFlag<Decoder<R>>>,
    exhausted: Rc<Cell<bool>>,
    finished: bool,
}

impl<'a, R: Read + 'a> EntrySource for TarSource<'a, R> {
    fn next_entry(&mut self) -> Option<Result<PendingEntry<'_>>> {
        if self.finished {
            return None;
        }

        let entry = match self.entries.next() {
            Some(Ok(e)) => e,
            Some(Err(e)) => return Some(Err(ArchiveError::corrupted(e))),
            None => {
                self.finished = true;
                // stopped on EOF instead of a zero block
                if self.exhausted.get() {
                    return Some(Err(ArchiveError::corrupted("missing end-of-archive marker")));
                }
                return None;
            }
        };

        let raw_path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        let entry_type = entry.header().entry_type();

        let kind = if entry_type.is_dir() {
            PendingEntryKind::Directory
        } else if entry_type.is_file() {
            PendingEntryKind::File(Box::new(entry))
        } else {
            PendingEntryKind::Other
        };

        Some(Ok(PendingEntry { raw_path, kind }))
    }
}
