use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use unibundle_gen::{DEFAULT_API_BASE_URL, Model, RetryPolicy};
use unibundle_ingest::{DecodePolicy, FilterRules, IngestOptions};

/// Looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "unibundle.toml";

pub const DEFAULT_MAX_ARCHIVE_BYTES: u64 = 50 * 1024 * 1024;

/// Settings read from `unibundle.toml`. Every section is optional.
///
/// The API key is deliberately absent; it only comes from the command line
/// or `GEMINI_API_KEY`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub rules: FilterRules,
    pub decode_policy: DecodePolicy,
    pub generation: GenerationConfig,
    pub limits: Limits,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: Model,
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_base_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 300,
            max_retries: 2,
            retry_base_ms: 2000,
        }
    }
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_base_ms),
        }
    }
}

/// Caller-side size policy. Limits reject input, they never truncate it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Advisory: larger archives only produce a warning.
    pub max_archive_bytes: u64,
    pub max_files: Option<usize>,
    pub max_prompt_bytes: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_archive_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
            max_files: None,
            max_prompt_bytes: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// An explicit path must exist; the implicit `unibundle.toml` may not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(explicit, Path::new(CONFIG_FILE_NAME))
    }

    fn load_from(explicit: Option<&Path>, fallback: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if fallback.is_file() => Self::from_file(fallback),
            None => Ok(Self::default()),
        }
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions::default()
            .rules(self.rules.clone())
            .decode_policy(self.decode_policy)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_config("");
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.limits.max_archive_bytes, 50 * 1024 * 1024);
        assert_eq!(config.generation.model, Model::Pro);
    }

    #[test]
    fn sections_override_defaults() {
        let file = write_config(
            r#"
decode_policy = "lossy"

[rules]
excluded_paths = ["vendor/"]

[generation]
model = "flash"
max_retries = 5
retry_base_ms = 10

[limits]
max_files = 200
"#,
        );
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.decode_policy, DecodePolicy::Lossy);
        assert_eq!(config.rules.excluded_paths, vec!["vendor/".to_string()]);
        assert_eq!(config.rules.allowed_extensions, FilterRules::default().allowed_extensions);
        assert_eq!(config.generation.model, Model::Flash);
        assert_eq!(config.generation.timeout_secs, 300);
        assert_eq!(
            config.generation.retry_policy(),
            RetryPolicy {
                max_retries: 5,
                base_delay: Duration::from_millis(10)
            }
        );
        assert_eq!(config.limits.max_files, Some(200));
        assert_eq!(config.limits.max_prompt_bytes, None);
    }

    #[test]
    fn parse_error_names_the_file() {
        let file = write_config("[generation]\nmodel = \"gpt\"\n");
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains(&file.path().display().to_string()));
    }

    #[test]
    fn api_key_is_not_a_config_field() {
        let file = write_config("api_key = \"secret\"\n");
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let fallback = dir.path().join(CONFIG_FILE_NAME);
        assert!(Config::load_from(Some(&missing), &fallback).is_err());
    }

    #[test]
    fn absent_fallback_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join(CONFIG_FILE_NAME);
        assert_eq!(Config::load_from(None, &fallback).unwrap(), Config::default());
    }

    #[test]
    fn present_fallback_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&fallback, "[limits]\nmax_prompt_bytes = 1024\n").unwrap();
        let config = Config::load_from(None, &fallback).unwrap();
        assert_eq!(config.limits.max_prompt_bytes, Some(1024));
    }
}
