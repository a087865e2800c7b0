use serde::Serialize;

/// One text file pulled out of an archive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExtractedFile {
    pub path: String,
    pub content: String,
    pub kind: FileKind,
}

impl ExtractedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind: FileKind::File,
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Directories are never materialized, so extracted entries are always files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    #[default]
    File,
}

/// Normalize a raw member name to a forward-slash, archive-relative path.
pub(crate) fn normalize_path(raw: &str) -> String {
    let unified = raw.replace('\\', "/");
    let mut rest = unified.as_str();
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
        } else {
            break;
        }
    }
    rest.to_string()
}
