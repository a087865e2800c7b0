#![allow(dead_code)]

use std::io::{Cursor, Write};

use flate2::Compression;
use flate2::write::GzEncoder;
use zip::write::SimpleFileOptions;

/// A member to place in a fixture archive. `None` content means a directory.
pub type Member<'a> = (&'a str, Option<&'a [u8]>);

pub fn file<'a>(path: &'a str, content: &'a [u8]) -> Member<'a> {
    (path, Some(content))
}

pub fn dir(path: &str) -> Member<'_> {
    (path, None)
}

/// Deterministic, poorly compressible ASCII text.
pub fn noisy_text(len: usize) -> Vec<u8> {
    let mut seed = 0x2545_F491u32;
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            b'a' + ((seed >> 16) % 26) as u8
        })
        .collect()
}

pub fn zip_archive(members: &[Member<'_>]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (path, content) in members {
        match content {
            Some(bytes) => {
                writer.start_file(*path, options).unwrap();
                writer.write_all(bytes).unwrap();
            }
            None => writer.add_directory(*path, options).unwrap(),
        }
    }
    writer.finish().unwrap().into_inner()
}

pub fn tar_archive(members: &[Member<'_>]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, content) in members {
        let mut header = tar::Header::new_gnu();
        match content {
            Some(bytes) => {
                header.set_size(bytes.len() as u64);
                header.set_mode(0o644);
                header.set_cksum();
                builder.append_data(&mut header, path, *bytes).unwrap();
            }
            None => {
                header.set_entry_type(tar::EntryType::Directory);
                header.set_size(0);
                header.set_mode(0o755);
                header.set_cksum();
                builder.append_data(&mut header, path, std::io::empty()).unwrap();
            }
        }
    }
    builder.into_inner().unwrap()
}

pub fn tar_gz_archive(members: &[Member<'_>]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&tar_archive(members)).unwrap();
    encoder.finish().unwrap()
}

pub fn paths(files: &[unibundle_ingest::ExtractedFile]) -> Vec<&str> {
    files.iter().map(|f| f.path.as_str()).collect()
}
