//! Deterministic JSON rendering of extracted files.
//!
//! The output is a pretty-printed array of `{ "path", "content" }` objects in
//! input order. Nothing is filtered, deduplicated, truncated or reordered;
//! size policy belongs to the caller.

use serde::{Deserialize, Serialize};

use crate::entry::ExtractedFile;

/// Wire shape of one serialized file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptEntry {
    pub path: String,
    pub content: String,
}

#[derive(Serialize)]
struct PromptEntryRef<'a> {
    path: &'a str,
    content: &'a str,
}

/// Size figures for caller-side budgeting and logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SerializedStats {
    pub files: usize,
    pub content_bytes: usize,
    pub serialized_bytes: usize,
}

pub fn serialize(entries: &[ExtractedFile]) -> String {
    let rows: Vec<PromptEntryRef<'_>> = entries
        .iter()
        .map(|f| PromptEntryRef {
            path: &f.path,
            content: &f.content,
        })
        .collect();

    // Only string fields: serde_json cannot fail here.
    match serde_json::to_string_pretty(&rows) {
        Ok(json) => json,
        Err(e) => unreachable!("serializing string pairs failed: {e}"),
    }
}

pub fn deserialize(serialized: &str) -> Result<Vec<PromptEntry>, serde_json::Error> {
    serde_json::from_str(serialized)
}

pub fn stats(entries: &[ExtractedFile], serialized: &str) -> SerializedStats {
    SerializedStats {
        files: entries.len(),
        content_bytes: entries.iter().map(ExtractedFile::len).sum(),
        serialized_bytes: serialized.len(),
    }
}
