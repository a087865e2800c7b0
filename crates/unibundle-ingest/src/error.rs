use thiserror::Error;

/// Failure of a whole ingestion call. There is no partial result.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("unsupported archive format: expected a zip or tar archive")]
    UnsupportedFormat,

    #[error("archive is corrupted or truncated: {0}")]
    Corrupted(String),

    #[error("archive member has an empty path")]
    InvalidPath,

    #[error("'{path}' is not valid UTF-8 text")]
    Decode { path: String },

    #[error("archive support for {0} was not compiled in")]
    Disabled(&'static str),

    #[error("ingestion task failed: {0}")]
    Task(String),
}

impl ArchiveError {
    pub(crate) fn corrupted(err: impl std::fmt::Display) -> Self {
        Self::Corrupted(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
