use std::collections::HashMap;
use std::io::Read;

use tracing::{debug, info, warn};

use crate::entry::{ExtractedFile, normalize_path};
use crate::error::{ArchiveError, Result};
use crate::format::{ArchiveFormat, TarCompress, detect_format};
use crate::options::{DecodePolicy, IngestOptions, Progress};
use crate::rules::{Decision, FilterRules};
use crate::source::{EntrySource, PendingEntryKind};

/// Turns archive bytes into the filtered, ordered list of text files.
///
/// The rules are fixed at construction, so one `Ingestor` can be reused for
/// any number of independent calls.
#[derive(Clone, Debug, Default)]
pub struct Ingestor {
    options: IngestOptions,
}

impl Ingestor {
    pub fn new(options: IngestOptions) -> Self {
        Self { options }
    }

    pub fn with_rules(rules: FilterRules) -> Self {
        Self::new(IngestOptions::default().rules(rules))
    }

    /// Decompress `bytes` in memory and keep the members that pass the rules.
    ///
    /// An archive with nothing worth keeping yields an empty vector, not an
    /// error. Any container or decode failure aborts the whole call.
    pub fn ingest(&self, bytes: &[u8]) -> Result<Vec<ExtractedFile>> {
        let format = detect_format(bytes).ok_or(ArchiveError::UnsupportedFormat)?;
        debug!(%format, bytes = bytes.len(), "ingesting archive");

        let files = match format {
            ArchiveFormat::Zip => self.ingest_zip(bytes)?,
            ArchiveFormat::Tar(codec) => self.ingest_tar(bytes, codec)?,
        };

        info!(%format, files = files.len(), "archive ingested");
        Ok(files)
    }

    /// Same as [`Ingestor::ingest`], run on tokio's blocking pool.
    pub async fn ingest_async(&self, bytes: Vec<u8>) -> Result<Vec<ExtractedFile>> {
        let ingestor = self.clone();
        tokio::task::spawn_blocking(move || ingestor.ingest(&bytes))
            .await
            .map_err(|e| ArchiveError::Task(e.to_string()))?
    }

    #[cfg(feature = "zip")]
    fn ingest_zip(&self, bytes: &[u8]) -> Result<Vec<ExtractedFile>> {
        let mut source = crate::source::ZipSource::new(std::io::Cursor::new(bytes))?;
        self.collect(&mut source)
    }

    #[cfg(not(feature = "zip"))]
    fn ingest_zip(&self, _bytes: &[u8]) -> Result<Vec<ExtractedFile>> {
        Err(ArchiveError::Disabled("zip"))
    }

    #[cfg(feature = "tar")]
    fn ingest_tar(&self, bytes: &[u8], codec: TarCompress) -> Result<Vec<ExtractedFile>> {
        let mut archive = crate::source::TarArchive::new(bytes, codec);
        let mut source = archive.entries()?;
        self.collect(&mut source)
    }

    #[cfg(not(feature = "tar"))]
    fn ingest_tar(&self, _bytes: &[u8], _codec: TarCompress) -> Result<Vec<ExtractedFile>> {
        Err(ArchiveError::Disabled("tar"))
    }

    /// Run every member of `source` through the rules, in listing order.
    pub fn collect<S: EntrySource>(&self, source: &mut S) -> Result<Vec<ExtractedFile>> {
        let mut files: Vec<ExtractedFile> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut index = 0usize;

        while let Some(pending) = source.next_entry() {
            let pending = pending?;
            let path = normalize_path(&pending.raw_path);

            let decision = match pending.kind {
                PendingEntryKind::Directory => Decision::Directory,
                PendingEntryKind::Other => Decision::Unsupported,
                PendingEntryKind::File(reader) => {
                    if path.is_empty() {
                        return Err(ArchiveError::InvalidPath);
                    }
                    match self.options.rules.decide(&path) {
                        Decision::Keep => match self.read_text(&path, reader)? {
                            Some(content) => {
                                upsert(&mut files, &mut positions, &path, content);
                                Decision::Keep
                            }
                            None => Decision::Undecodable,
                        },
                        rejected => rejected,
                    }
                }
            };

            debug!(path = %path, %decision, "filtered archive member");
            self.options.report(Progress {
                index,
                path,
                decision,
                kept: files.len(),
            });
            index += 1;
        }

        Ok(files)
    }

    fn read_text(&self, path: &str, mut reader: Box<dyn Read + '_>) -> Result<Option<String>> {
        let mut raw = Vec::new();
        reader
            .read_to_end(&mut raw)
            .map_err(|e| ArchiveError::Corrupted(format!("{path}: {e}")))?;
        decode_text(path, raw, self.options.decode_policy)
    }
}

/// Last write wins on content; the first occurrence keeps its position.
fn upsert(
    files: &mut Vec<ExtractedFile>,
    positions: &mut HashMap<String, usize>,
    path: &str,
    content: String,
) {
    match positions.get(path) {
        Some(&at) => {
            warn!(path, "duplicate archive member, keeping the later content");
            files[at].content = content;
        }
        None => {
            positions.insert(path.to_string(), files.len());
            files.push(ExtractedFile::new(path, content));
        }
    }
}

/// Content is kept byte for byte, a leading BOM included.
fn decode_text(path: &str, raw: Vec<u8>, policy: DecodePolicy) -> Result<Option<String>> {
    match String::from_utf8(raw) {
        Ok(text) => Ok(Some(text)),
        Err(err) => match policy {
            DecodePolicy::Fail => Err(ArchiveError::Decode {
                path: path.to_string(),
            }),
            DecodePolicy::Skip => {
                warn!(path, "skipping member that is not valid UTF-8");
                Ok(None)
            }
            DecodePolicy::Lossy => Ok(Some(String::from_utf8_lossy(err.as_bytes()).into_owned())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_plain_utf8() {
        let text = decode_text("a.js", "const π = 3;".as_bytes().to_vec(), DecodePolicy::Fail)
            .unwrap();
        assert_eq!(text.as_deref(), Some("const π = 3;"));
    }

    #[test]
    fn decode_keeps_bom() {
        let mut raw = vec![0xEF, 0xBB, 0xBF];
        raw.extend_from_slice(b"{}");
        let text = decode_text("a.json", raw, DecodePolicy::Fail).unwrap();
        assert_eq!(text.as_deref(), Some("\u{FEFF}{}"));
    }

    #[test]
    fn decode_policies_on_invalid_bytes() {
        let raw = vec![b'<', b's', b'v', b'g', 0xFF, 0xFE];

        let failed = decode_text("logo.svg", raw.clone(), DecodePolicy::Fail);
        assert!(matches!(failed, Err(ArchiveError::Decode { ref path }) if path == "logo.svg"));

        let skipped = decode_text("logo.svg", raw.clone(), DecodePolicy::Skip).unwrap();
        assert!(skipped.is_none());

        let lossy = decode_text("logo.svg", raw, DecodePolicy::Lossy).unwrap().unwrap();
        assert!(lossy.starts_with("<svg"));
        assert!(lossy.contains('\u{FFFD}'));
    }

    #[test]
    fn upsert_keeps_first_position_and_last_content() {
        let mut files = Vec::new();
        let mut positions = HashMap::new();
        upsert(&mut files, &mut positions, "a.js", "1".into());
        upsert(&mut files, &mut positions, "b.js", "2".into());
        upsert(&mut files, &mut positions, "a.js", "3".into());

        assert_eq!(files.len(), 2);
        assert_eq!(files[0], ExtractedFile::new("a.js", "3"));
        assert_eq!(files[1], ExtractedFile::new("b.js", "2"));
    }

    #[test]
    fn unknown_bytes_are_unsupported() {
        let result = Ingestor::default().ingest(b"just some text");
        assert!(matches!(result, Err(ArchiveError::UnsupportedFormat)));
    }

    #[test]
    fn empty_bytes_are_unsupported() {
        let result = Ingestor::default().ingest(&[]);
        assert!(matches!(result, Err(ArchiveError::UnsupportedFormat)));
    }
}
