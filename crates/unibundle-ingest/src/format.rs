#[cfg(feature = "tar")]
use std::io::Read;

const ZIP_LOCAL_HEADER: &[u8] = b"PK\x03\x04";
const ZIP_END_OF_DIRECTORY: &[u8] = b"PK\x05\x06";
const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B];
const TAR_BLOCK: usize = 512;
const USTAR_MAGIC_OFFSET: usize = 257;

/// Container format, sniffed from leading bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar(TarCompress),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TarCompress {
    None,
    Gzip,
}

impl TarCompress {
    #[cfg(feature = "tar")]
    pub fn decoder<R: Read>(self, reader: R) -> Decoder<R> {
        match self {
            Self::None => Decoder::Plain(reader),
            Self::Gzip => Decoder::Gzip(Box::new(flate2::read::GzDecoder::new(reader))),
        }
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tar(TarCompress::None) => "tar",
            ArchiveFormat::Tar(TarCompress::Gzip) => "tar.gz",
        };
        f.write_str(name)
    }
}

/// Tar byte stream, optionally behind a decompressor.
#[cfg(feature = "tar")]
#[derive(Debug)]
pub enum Decoder<R> {
    Plain(R),
    Gzip(Box<flate2::read::GzDecoder<R>>),
}

#[cfg(feature = "tar")]
impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::Plain(inner) => inner.read(buf),
            Self::Gzip(inner) => inner.read(buf),
        }
    }
}

/// Identify the archive container from its first bytes.
///
/// An empty zip has no local file header and starts directly with the
/// end-of-central-directory record, so both signatures map to [`ArchiveFormat::Zip`].
/// Any gzip stream is assumed to wrap a tar.
pub fn detect_format(data: &[u8]) -> Option<ArchiveFormat> {
    if data.starts_with(ZIP_LOCAL_HEADER) || data.starts_with(ZIP_END_OF_DIRECTORY) {
        return Some(ArchiveFormat::Zip);
    }
    if data.starts_with(GZIP_MAGIC) {
        return Some(ArchiveFormat::Tar(TarCompress::Gzip));
    }
    is_tar_header(data).then_some(ArchiveFormat::Tar(TarCompress::None))
}

/// POSIX `ustar\0` or the GNU `ustar  \0` variant.
fn is_tar_header(data: &[u8]) -> bool {
    if data.len() < TAR_BLOCK {
        return false;
    }
    let magic = &data[USTAR_MAGIC_OFFSET..];
    magic.starts_with(b"ustar\0") || magic.starts_with(b"ustar  \0")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ustar_block(magic: &[u8]) -> Vec<u8> {
        let mut block = vec![0u8; 512];
        block[257..257 + magic.len()].copy_from_slice(magic);
        block
    }

    #[test]
    fn zip_signatures() {
        assert_eq!(detect_format(b"PK\x03\x04rest"), Some(ArchiveFormat::Zip));
        // central directory only
        let mut empty = b"PK\x05\x06".to_vec();
        empty.resize(22, 0);
        assert_eq!(detect_format(&empty), Some(ArchiveFormat::Zip));
    }

    #[test]
    fn gzip_is_assumed_to_wrap_tar() {
        assert_eq!(
            detect_format(&[0x1F, 0x8B, 0x08]),
            Some(ArchiveFormat::Tar(TarCompress::Gzip))
        );
    }

    #[test]
    fn posix_and_gnu_tar_magic() {
        let plain = Some(ArchiveFormat::Tar(TarCompress::None));
        assert_eq!(detect_format(&ustar_block(b"ustar\0")), plain);
        assert_eq!(detect_format(&ustar_block(b"ustar  \0")), plain);
        assert_eq!(detect_format(&ustar_block(b"ustax\0")), None);
    }

    #[test]
    fn non_archives_are_rejected() {
        assert_eq!(detect_format(&[]), None);
        assert_eq!(detect_format(b"<!DOCTYPE html>"), None);
        assert_eq!(detect_format(&[0u8; 300]), None);
        assert_eq!(detect_format(b"PK"), None);
    }

    #[test]
    fn display_names() {
        let names: Vec<String> = [
            ArchiveFormat::Zip,
            ArchiveFormat::Tar(TarCompress::None),
            ArchiveFormat::Tar(TarCompress::Gzip),
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(names, ["zip", "tar", "tar.gz"]);
    }

    #[test]
    #[cfg(feature = "tar")]
    fn decoder_matches_codec() {
        assert!(matches!(TarCompress::None.decoder(&b"x"[..]), Decoder::Plain(_)));
        assert!(matches!(TarCompress::Gzip.decoder(&b"x"[..]), Decoder::Gzip(_)));
    }
}
