use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use console::style;
use tracing::info;
use unibundle_gen::{GeminiClient, GenError, Generator, build_prompt};
use unibundle_ingest::{Ingestor, Progress, serialize};

use crate::cli::{BundleArg, InspectArg};
use crate::config::Config;
use crate::pipeline::{Pipeline, check_archive_name};
use crate::ui::{DecisionRow, FileRow, FormatConfig, Formatter, StageSpinner};

pub async fn bundle(arg: BundleArg, config: &Config) -> Result<()> {
    let bytes = read_archive(&arg.archive).await?;
    let spinner = StageSpinner::new();
    let pipeline = Pipeline::new(Ingestor::new(config.ingest_options()), config.limits.clone())
        .with_status(spinner.sink());

    if arg.dry_run {
        let prepared = pipeline.prepare(bytes).await?;
        spinner.finish();
        info!(
            files = prepared.files.len(),
            serialized_bytes = prepared.stats.serialized_bytes,
            "dry run, model not called"
        );
        return write_output(&arg.output, &build_prompt(&prepared.serialized)).await;
    }

    let api_key = arg.api_key.ok_or(GenError::MissingApiKey)?;
    let generation = &config.generation;
    let client = GeminiClient::new(api_key)?
        .with_base_url(generation.api_base_url.as_str())
        .with_timeout(generation.timeout())?;
    let generator = Generator::new(client)
        .with_model(arg.model.unwrap_or(generation.model))
        .with_retry(generation.retry_policy());
    info!(
        model = %generator.model(),
        endpoint = generator.client().base_url(),
        "generation client ready"
    );

    let html = pipeline.run(bytes, &generator).await?;
    spinner.finish();
    write_output(&arg.output, &html).await
}

pub async fn inspect(arg: InspectArg, config: &Config) -> Result<()> {
    let bytes = read_archive(&arg.archive).await?;

    let decisions: Arc<Mutex<Vec<Progress>>> = Arc::default();
    let mut options = config.ingest_options();
    if arg.all {
        let log = Arc::clone(&decisions);
        options = options.on_progress(Arc::new(move |p: &Progress| {
            log.lock().unwrap_or_else(PoisonError::into_inner).push(p.clone());
        }));
    }

    let files = Ingestor::new(options).ingest_async(bytes).await?;

    let mut stdout = std::io::stdout().lock();
    if arg.json {
        writeln!(stdout, "{}", serialize(&files))?;
    } else {
        let total: usize = files.iter().map(|f| f.len()).sum();
        let table = Formatter::table(
            files.iter().map(FileRow::from),
            FormatConfig {
                footer: Some(format!("{} files, {} bytes", files.len(), total)),
                ..Default::default()
            },
        );
        writeln!(stdout, "{table}")?;
    }

    if arg.all {
        let decisions = decisions.lock().unwrap_or_else(PoisonError::into_inner);
        let kept = decisions.iter().filter(|p| p.decision.is_kept()).count();
        let table = Formatter::table(
            decisions.iter().map(DecisionRow::from),
            FormatConfig {
                header: Some("Filtering decisions".into()),
                footer: Some(format!("{kept} of {} members kept", decisions.len())),
            },
        );
        writeln!(stdout, "\n{table}")?;
    }
    Ok(())
}

async fn read_archive(path: &Path) -> Result<Vec<u8>> {
    check_archive_name(path);
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read archive: {}", path.display()))
}

async fn write_output(path: &Path, text: &str) -> Result<()> {
    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    tokio::fs::write(path, text)
        .await
        .with_context(|| format!("Failed to write output: {}", path.display()))?;
    eprintln!(
        "{} wrote {} ({} bytes)",
        style("done").green().bold(),
        path.display(),
        text.len()
    );
    Ok(())
}
