use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use unibundle_gen::{GenerationClient, Generator};
use unibundle_ingest::{ExtractedFile, Ingestor, SerializedStats, serialize, stats};

use crate::config::Limits;
use crate::error::BundleError;

/// Where a conversion currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Extracting,
    Analyzing,
    Generating,
    Completed,
    Error,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Extracting => "extracting",
            Stage::Analyzing => "analyzing",
            Stage::Generating => "generating",
            Stage::Completed => "completed",
            Stage::Error => "error",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub stage: Stage,
    pub message: String,
}

pub type StatusSink = Arc<dyn Fn(&Status) + Send + Sync>;

/// Ingested, filtered and serialized project, ready for prompting.
#[derive(Clone, Debug)]
pub struct Prepared {
    pub files: Vec<ExtractedFile>,
    pub serialized: String,
    pub stats: SerializedStats,
}

pub struct Pipeline {
    ingestor: Ingestor,
    limits: Limits,
    status: Option<StatusSink>,
}

impl Pipeline {
    pub fn new(ingestor: Ingestor, limits: Limits) -> Self {
        Self {
            ingestor,
            limits,
            status: None,
        }
    }

    pub fn with_status(mut self, sink: StatusSink) -> Self {
        sink(&Status {
            stage: Stage::Idle,
            message: String::new(),
        });
        self.status = Some(sink);
        self
    }

    pub async fn prepare(&self, bytes: Vec<u8>) -> Result<Prepared, BundleError> {
        let result = self.prepare_inner(bytes).await;
        if let Err(ref err) = result {
            self.report(Stage::Error, err.to_string());
        }
        result
    }

    /// Full conversion: archive bytes in, cleaned HTML document out.
    pub async fn run<C: GenerationClient>(
        &self,
        bytes: Vec<u8>,
        generator: &Generator<C>,
    ) -> Result<String, BundleError> {
        let result = self.run_inner(bytes, generator).await;
        match result {
            Ok(ref html) => {
                info!(html_bytes = html.len(), "conversion finished");
                self.report(Stage::Completed, "Conversion successful!");
            }
            Err(ref err) => self.report(Stage::Error, err.to_string()),
        }
        result
    }

    async fn run_inner<C: GenerationClient>(
        &self,
        bytes: Vec<u8>,
        generator: &Generator<C>,
    ) -> Result<String, BundleError> {
        let prepared = self.prepare_inner(bytes).await?;
        self.report(Stage::Generating, "Model is analyzing project structure...");
        let html = generator.generate_html(&prepared.serialized).await?;
        Ok(html)
    }

    async fn prepare_inner(&self, bytes: Vec<u8>) -> Result<Prepared, BundleError> {
        self.report(Stage::Extracting, "Extracting files from archive...");
        if bytes.len() as u64 > self.limits.max_archive_bytes {
            warn!(
                size = bytes.len(),
                limit = self.limits.max_archive_bytes,
                "archive exceeds the recommended size, continuing"
            );
        }

        let files = self.ingestor.ingest_async(bytes).await?;
        if files.is_empty() {
            return Err(BundleError::NoSourceFiles);
        }
        self.report(
            Stage::Analyzing,
            format!("Analyzed {} files. Preparing prompt...", files.len()),
        );

        if let Some(limit) = self.limits.max_files
            && files.len() > limit
        {
            return Err(BundleError::TooManyFiles {
                files: files.len(),
                limit,
            });
        }

        let serialized = serialize(&files);
        let stats = stats(&files, &serialized);
        if let Some(limit) = self.limits.max_prompt_bytes
            && stats.serialized_bytes > limit
        {
            return Err(BundleError::PromptTooLarge {
                bytes: stats.serialized_bytes,
                limit,
            });
        }

        info!(
            files = stats.files,
            content_bytes = stats.content_bytes,
            serialized_bytes = stats.serialized_bytes,
            "project prepared"
        );
        Ok(Prepared {
            files,
            serialized,
            stats,
        })
    }

    fn report(&self, stage: Stage, message: impl Into<String>) {
        if let Some(ref sink) = self.status {
            sink(&Status {
                stage,
                message: message.into(),
            });
        }
    }
}

/// Archive names outside `.zip`, `.tar`, `.tar.gz` and `.tgz` only get a
/// warning; detection goes by content.
pub fn check_archive_name(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let known = [".zip", ".tar", ".tar.gz", ".tgz"]
        .iter()
        .any(|ext| name.ends_with(ext));
    if !known {
        warn!(path = %path.display(), "file name does not look like a zip or tar archive");
    }
    known
}
