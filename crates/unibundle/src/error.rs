use thiserror::Error;
use unibundle_gen::GenError;
use unibundle_ingest::ArchiveError;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(
        "No valid source files found in the archive. Expected .js, .jsx, .ts, .tsx, .css, .html, .json or .svg files outside excluded folders such as node_modules."
    )]
    NoSourceFiles,

    #[error(transparent)]
    Generation(#[from] GenError),

    #[error("archive holds {files} source files, over the configured limit of {limit}")]
    TooManyFiles { files: usize, limit: usize },

    #[error("serialized project is {bytes} bytes, over the configured limit of {limit}")]
    PromptTooLarge { bytes: usize, limit: usize },
}
