use std::io::{Read, Seek};

use crate::error::ArchiveError;
use crate::source::{EntrySource, PendingEntry, PendingEntryKind};
use crate::Result;

/// Walks the central directory in stored order.
pub struct ZipSource<R: Read + Seek> {
    inner: zip::ZipArchive<R>,
    cursor: usize,
}

impl<R: Read + Seek> ZipSource<R> {
    /// Reads the central directory; a missing or damaged one fails here.
    pub fn new(reader: R) -> Result<Self> {
        let inner = zip::ZipArchive::new(reader).map_err(ArchiveError::corrupted)?;
        Ok(Self { inner, cursor: 0 })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }
}

impl<R: Read + Seek> EntrySource for ZipSource<R> {
    fn next_entry(&mut self) -> Option<Result<PendingEntry<'_>>> {
        let position = self.cursor;
        if position == self.inner.len() {
            return None;
        }
        self.cursor += 1;

        let file = match self.inner.by_index(position) {
            Ok(member) => member,
            Err(e) => return Some(Err(ArchiveError::corrupted(e))),
        };

        let raw_path = file.name().to_string();
        let kind = if file.is_dir() {
            PendingEntryKind::Directory
        } else {
            PendingEntryKind::File(Box::new(file))
        };

        Some(Ok(PendingEntry { raw_path, kind }))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;

    use super::*;

    fn sample_zip() -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.add_directory("src/", options).unwrap();
        writer.start_file("src/main.ts", options).unwrap();
        writer.write_all(b"console.log(1);").unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn lists_members_in_order() {
        let bytes = sample_zip();
        let mut source = ZipSource::new(Cursor::new(bytes.as_slice())).unwrap();
        assert_eq!(source.len(), 2);

        let first = source.next_entry().unwrap().unwrap();
        assert_eq!(first.raw_path, "src/");
        assert!(matches!(first.kind, PendingEntryKind::Directory));
        drop(first);

        {
            let second = source.next_entry().unwrap().unwrap();
            assert_eq!(second.raw_path, "src/main.ts");
            match second.kind {
                PendingEntryKind::File(mut reader) => {
                    let mut content = String::new();
                    reader.read_to_string(&mut content).unwrap();
                    assert_eq!(content, "console.log(1);");
                }
                _ => panic!("expected a file entry"),
            }
        }

        assert!(source.next_entry().is_none());
    }

    #[test]
    fn rejects_non_zip_bytes() {
        let result = ZipSource::new(Cursor::new(&b"definitely not a zip"[..]));
        assert!(matches!(result, Err(ArchiveError::Corrupted(_))));
    }
}
